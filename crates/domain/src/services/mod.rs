//! Domain services for the Aloha push relay.
//!
//! Services contain business logic that operates on domain models.

pub mod emoji;
pub mod emoji_codes;
pub mod rate_limit;
pub mod sync;

pub use emoji::{
    check_emoji_request, check_remove_custom_emoji, check_valid_emoji_name,
    emoji_name_to_emoji_code, get_emoji_file_name, translate_emoticons, EmojiType,
    EXTRA_EMOJI_NAME,
};
pub use rate_limit::{RateLimitRule, RateLimitedRemoteServer, API_BY_REMOTE_SERVER};
pub use sync::{check_ascending_order, filter_new_rows};
