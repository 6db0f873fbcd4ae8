//! Domain models for the Aloha push relay.

pub mod audit_log;
pub mod counts;
pub mod push_device_token;
pub mod realm;
pub mod realm_emoji;
pub mod remote_server;

pub use audit_log::{RealmAuditLogUpload, RemoteRealmAuditLog, RemoteServerAuditLog};
pub use counts::{InstallationCountUpload, RealmCountUpload, RemoteInstallationCount, RemoteRealmCount};
pub use push_device_token::{RemotePushDeviceToken, TokenKind, UserIdentity};
pub use realm::{Realm, UserProfile};
pub use realm_emoji::RealmEmoji;
pub use remote_server::{PlanType, RemoteServer};
