//! Shared utilities and common types for the Aloha push relay backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Cryptographic utilities (hashing, API key generation)
//! - Common validation logic

pub mod crypto;
pub mod validation;
