//! Custom emoji uploaded by a realm.

use serde::{Deserialize, Serialize};

/// An organization-uploaded emoji image, distinct from built-in Unicode
/// emoji. Deactivated emoji stay around so old reactions keep rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RealmEmoji {
    pub id: i64,
    pub realm_id: i64,
    pub name: String,
    pub author_id: Option<i64>,
    pub deactivated: bool,
    pub file_name: String,
}

impl RealmEmoji {
    /// The code used for this emoji in reactions: its id as a string.
    pub fn code(&self) -> String {
        self.id.to_string()
    }
}

impl std::fmt::Display for RealmEmoji {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<RealmEmoji({}): {} {}>", self.realm_id, self.id, self.name)
    }
}
