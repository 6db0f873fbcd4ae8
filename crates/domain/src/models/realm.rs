//! Realm (tenant) and user profile models.
//!
//! Only the fields the emoji services need are modelled here; the rest of
//! the chat application's user model is outside this repository.

use serde::{Deserialize, Serialize};

/// A tenant/organization within the chat application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Realm {
    pub id: i64,
    pub string_id: String,
    pub name: String,
}

/// A user inside a realm.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UserProfile {
    pub id: i64,
    pub realm_id: i64,
    pub email: String,
    pub is_realm_admin: bool,
}
