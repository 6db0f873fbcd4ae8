//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod audit_log;
pub mod counts;
pub mod push_device_token;
pub mod realm_emoji;
pub mod remote_server;

pub use audit_log::{RemoteRealmAuditLogEntity, RemoteServerAuditLogEntity};
pub use counts::{RemoteInstallationCountEntity, RemoteRealmCountEntity};
pub use push_device_token::{RemotePushDeviceTokenEntity, TokenKindDb};
pub use realm_emoji::RealmEmojiEntity;
pub use remote_server::{PlanTypeDb, RemoteServerEntity};
