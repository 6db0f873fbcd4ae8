//! Domain layer for the Aloha push relay backend.
//!
//! This crate contains:
//! - Domain models (remote servers, push device tokens, audit logs, usage
//!   counts, realms and their custom emoji)
//! - Business logic services (emoji resolution, usage sync, rate-limit keys)
//! - The shared request-level error type

pub mod error;
pub mod models;
pub mod services;
