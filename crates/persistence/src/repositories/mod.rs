//! Repository implementations.
//!
//! Repositories own the SQL for one table (or a closely related family of
//! tables) and translate entities into domain models.

pub mod audit_log;
pub mod counts;
pub mod push_device_token;
pub mod realm_emoji;
pub mod remote_server;

pub use audit_log::AuditLogRepository;
pub use counts::CountRepository;
pub use push_device_token::PushDeviceTokenRepository;
pub use realm_emoji::RealmEmojiRepository;
pub use remote_server::RemoteServerRepository;
