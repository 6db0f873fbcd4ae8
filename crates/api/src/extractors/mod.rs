//! Request extractors.

pub mod server_auth;

pub use server_auth::RemoteServerAuth;
