//! Emoji name and code resolution.
//!
//! Resolution prefers a realm's own custom emoji, then the reserved literal
//! emoji, then the built-in Unicode table. The companion checks validate
//! incoming (name, code, type) triples and removal authorization. Callers
//! load the realm's emoji rows up front; everything here is a pure function.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::RequestError;
use crate::models::{RealmEmoji, UserProfile};
use crate::services::emoji_codes::{codepoint_to_name, name_to_codepoint, EMOTICON_CONVERSIONS};

/// The reserved literal emoji name; its code equals its name.
pub const EXTRA_EMOJI_NAME: &str = "aloha";

/// Characters that delimit an emoticon in running text.
const TERMINAL_SYMBOLS: &str = r#",.;?!()\[\] "'\n\t"#;

lazy_static! {
    static ref EMOJI_NAME_CHARSET_RE: Regex =
        Regex::new(r"^[0-9a-z.\-_]+$").expect("static emoji name regex");

    /// Matches any known emoticon delimited by terminal symbols (or the
    /// start/end of input); the emoticon itself is the `emoticon` capture.
    static ref EMOTICON_RE: Regex = {
        let alternatives = EMOTICON_CONVERSIONS
            .iter()
            .map(|(emoticon, _)| regex::escape(emoticon))
            .collect::<Vec<_>>()
            .join(")|(");
        Regex::new(&format!(
            "(?:^|[{t}])(?P<emoticon>({a}))(?:[{t}]|$)",
            t = TERMINAL_SYMBOLS,
            a = alternatives,
        ))
        .expect("static emoticon regex")
    };
}

/// The three kinds of emoji a reaction can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmojiType {
    #[serde(rename = "unicode_emoji")]
    Unicode,
    #[serde(rename = "realm_emoji")]
    Realm,
    #[serde(rename = "aloha_extra_emoji")]
    AlohaExtra,
}

impl EmojiType {
    /// Wire representation used in API requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unicode => "unicode_emoji",
            Self::Realm => "realm_emoji",
            Self::AlohaExtra => "aloha_extra_emoji",
        }
    }
}

impl std::fmt::Display for EmojiType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolve a human-readable emoji name to its (code, type) pair.
///
/// `realm_emoji` is the full set of the realm's custom emoji; only active
/// rows take part in resolution.
pub fn emoji_name_to_emoji_code(
    realm_emoji: &[RealmEmoji],
    emoji_name: &str,
) -> Result<(String, EmojiType), RequestError> {
    if let Some(emoji) = realm_emoji
        .iter()
        .find(|e| !e.deactivated && e.name == emoji_name)
    {
        return Ok((emoji.code(), EmojiType::Realm));
    }
    if emoji_name == EXTRA_EMOJI_NAME {
        return Ok((emoji_name.to_string(), EmojiType::AlohaExtra));
    }
    if let Some(codepoint) = name_to_codepoint(emoji_name) {
        return Ok((codepoint.to_string(), EmojiType::Unicode));
    }
    Err(RequestError::new(format!(
        "Emoji '{}' does not exist",
        emoji_name
    )))
}

/// Check whether an incoming (name, code, type) triple is internally
/// consistent for the claimed type.
///
/// Unlike resolution, this looks at deactivated custom emoji too, so the
/// distinct "deactivated" error can be reported.
pub fn check_emoji_request(
    realm_emoji: &[RealmEmoji],
    emoji_name: &str,
    emoji_code: &str,
    emoji_type: &str,
) -> Result<(), RequestError> {
    match emoji_type {
        "realm_emoji" => {
            let emoji = realm_emoji
                .iter()
                .find(|e| e.code() == emoji_code)
                .ok_or_else(|| RequestError::new("Invalid custom emoji."))?;
            if emoji.name != emoji_name {
                return Err(RequestError::new("Invalid custom emoji name."));
            }
            if emoji.deactivated {
                return Err(RequestError::new("This custom emoji has been deactivated."));
            }
            Ok(())
        }
        "aloha_extra_emoji" => {
            if emoji_code != EXTRA_EMOJI_NAME {
                return Err(RequestError::new("Invalid emoji code."));
            }
            if emoji_name != emoji_code {
                return Err(RequestError::new("Invalid emoji name."));
            }
            Ok(())
        }
        "unicode_emoji" => {
            if codepoint_to_name(emoji_code).is_none() {
                return Err(RequestError::new("Invalid emoji code."));
            }
            if name_to_codepoint(emoji_name) != Some(emoji_code) {
                return Err(RequestError::new("Invalid emoji name."));
            }
            Ok(())
        }
        _ => Err(RequestError::new("Invalid emoji type.")),
    }
}

/// Check whether a user may remove the custom emoji with the given name.
///
/// Realm administrators may always remove; other users only the emoji they
/// themselves added. `active_emoji` is the realm's *active* emoji of that
/// name, if any; deactivated emoji never authorize a non-admin.
pub fn check_remove_custom_emoji(
    user: &UserProfile,
    active_emoji: Option<&RealmEmoji>,
) -> Result<(), RequestError> {
    if user.is_realm_admin {
        return Ok(());
    }
    let current_user_is_author = active_emoji
        .and_then(|emoji| emoji.author_id)
        .map(|author_id| author_id == user.id)
        .unwrap_or(false);
    if current_user_is_author {
        return Ok(());
    }
    Err(RequestError::new(
        "Must be an organization administrator or emoji author",
    ))
}

/// Validate the syntax of a custom emoji name.
pub fn check_valid_emoji_name(emoji_name: &str) -> Result<(), RequestError> {
    if emoji_name.is_empty() {
        return Err(RequestError::new("Emoji name is missing"));
    }
    if EMOJI_NAME_CHARSET_RE.is_match(emoji_name) {
        if emoji_name.ends_with(['.', '-', '_']) {
            return Err(RequestError::new(
                "Emoji names must end with either a letter or number.",
            ));
        }
        return Ok(());
    }
    Err(RequestError::new(
        "Emoji names must contain only numbers, lowercase English letters, spaces, dashes, underscores, and periods.",
    ))
}

/// Translate emoticons to their colon syntax, e.g. `:)` to `:slight_smile:`.
pub fn translate_emoticons(text: &str) -> String {
    let mut translated = text.to_string();
    for (emoticon, conversion) in EMOTICON_CONVERSIONS {
        translated = translated.replace(emoticon, conversion);
    }
    translated
}

/// The boundary-aware emoticon matcher, for callers that only want
/// free-standing emoticons (typeahead, message rendering).
pub fn emoticon_regex() -> &'static Regex {
    &EMOTICON_RE
}

/// Storage file name for an uploaded emoji: the emoji id plus the upload's
/// original extension.
pub fn get_emoji_file_name(uploaded_file_name: &str, emoji_id: i64) -> String {
    match uploaded_file_name.rsplit_once('.') {
        Some((_, ext)) => format!("{}.{}", emoji_id, ext),
        None => emoji_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom_emoji(id: i64, name: &str, author_id: Option<i64>, deactivated: bool) -> RealmEmoji {
        RealmEmoji {
            id,
            realm_id: 1,
            name: name.to_string(),
            author_id,
            deactivated,
            file_name: format!("{}.png", id),
        }
    }

    fn user(id: i64, is_realm_admin: bool) -> UserProfile {
        UserProfile {
            id,
            realm_id: 1,
            email: format!("user{}@example.com", id),
            is_realm_admin,
        }
    }

    // Resolution tests

    #[test]
    fn test_resolve_realm_emoji() {
        let emoji = vec![custom_emoji(34, "green_tick", Some(8), false)];
        let (code, emoji_type) = emoji_name_to_emoji_code(&emoji, "green_tick").unwrap();
        assert_eq!(code, "34");
        assert_eq!(emoji_type, EmojiType::Realm);
    }

    #[test]
    fn test_resolve_realm_emoji_shadows_unicode() {
        // A custom emoji named like a Unicode one wins.
        let emoji = vec![custom_emoji(7, "octopus", Some(8), false)];
        let (code, emoji_type) = emoji_name_to_emoji_code(&emoji, "octopus").unwrap();
        assert_eq!(code, "7");
        assert_eq!(emoji_type, EmojiType::Realm);
    }

    #[test]
    fn test_resolve_deactivated_realm_emoji_falls_through() {
        let emoji = vec![custom_emoji(7, "octopus", Some(8), true)];
        let (code, emoji_type) = emoji_name_to_emoji_code(&emoji, "octopus").unwrap();
        assert_eq!(code, "1f419");
        assert_eq!(emoji_type, EmojiType::Unicode);
    }

    #[test]
    fn test_resolve_extra_emoji() {
        let (code, emoji_type) = emoji_name_to_emoji_code(&[], EXTRA_EMOJI_NAME).unwrap();
        assert_eq!(code, "aloha");
        assert_eq!(emoji_type, EmojiType::AlohaExtra);
    }

    #[test]
    fn test_resolve_unicode_emoji() {
        let (code, emoji_type) = emoji_name_to_emoji_code(&[], "heart").unwrap();
        assert_eq!(code, "2764");
        assert_eq!(emoji_type, EmojiType::Unicode);
    }

    #[test]
    fn test_resolve_unknown_name() {
        let err = emoji_name_to_emoji_code(&[], "definitely_not_real").unwrap_err();
        assert_eq!(err.message, "Emoji 'definitely_not_real' does not exist");
    }

    #[test]
    fn test_unicode_round_trip() {
        let (code, _) = emoji_name_to_emoji_code(&[], "rocket").unwrap();
        assert_eq!(codepoint_to_name(&code), Some("rocket"));
    }

    // Request validation tests

    #[test]
    fn test_check_request_realm_emoji_ok() {
        let emoji = vec![custom_emoji(34, "green_tick", Some(8), false)];
        assert!(check_emoji_request(&emoji, "green_tick", "34", "realm_emoji").is_ok());
    }

    #[test]
    fn test_check_request_realm_emoji_unknown_code() {
        let err = check_emoji_request(&[], "green_tick", "34", "realm_emoji").unwrap_err();
        assert_eq!(err.message, "Invalid custom emoji.");
    }

    #[test]
    fn test_check_request_realm_emoji_name_mismatch() {
        let emoji = vec![custom_emoji(34, "green_tick", Some(8), false)];
        let err = check_emoji_request(&emoji, "red_tick", "34", "realm_emoji").unwrap_err();
        assert_eq!(err.message, "Invalid custom emoji name.");
    }

    #[test]
    fn test_check_request_realm_emoji_deactivated() {
        let emoji = vec![custom_emoji(34, "green_tick", Some(8), true)];
        let err = check_emoji_request(&emoji, "green_tick", "34", "realm_emoji").unwrap_err();
        assert_eq!(err.message, "This custom emoji has been deactivated.");
    }

    #[test]
    fn test_check_request_extra_emoji() {
        assert!(check_emoji_request(&[], "aloha", "aloha", "aloha_extra_emoji").is_ok());

        let err = check_emoji_request(&[], "aloha", "other", "aloha_extra_emoji").unwrap_err();
        assert_eq!(err.message, "Invalid emoji code.");

        let err = check_emoji_request(&[], "other", "aloha", "aloha_extra_emoji").unwrap_err();
        assert_eq!(err.message, "Invalid emoji name.");
    }

    #[test]
    fn test_check_request_unicode_emoji() {
        assert!(check_emoji_request(&[], "heart", "2764", "unicode_emoji").is_ok());

        let err = check_emoji_request(&[], "heart", "ffff", "unicode_emoji").unwrap_err();
        assert_eq!(err.message, "Invalid emoji code.");

        let err = check_emoji_request(&[], "rocket", "2764", "unicode_emoji").unwrap_err();
        assert_eq!(err.message, "Invalid emoji name.");
    }

    #[test]
    fn test_check_request_alias_name_rejected_for_canonical_code() {
        // "thumbs_up" maps to 1f44d, so the pair is consistent even though
        // the canonical name is "+1".
        assert!(check_emoji_request(&[], "thumbs_up", "1f44d", "unicode_emoji").is_ok());
    }

    #[test]
    fn test_check_request_invalid_type() {
        let err = check_emoji_request(&[], "heart", "2764", "animated_emoji").unwrap_err();
        assert_eq!(err.message, "Invalid emoji type.");
    }

    // Removal authorization tests

    #[test]
    fn test_remove_allowed_for_admin() {
        assert!(check_remove_custom_emoji(&user(1, true), None).is_ok());
    }

    #[test]
    fn test_remove_allowed_for_author() {
        let emoji = custom_emoji(34, "green_tick", Some(2), false);
        assert!(check_remove_custom_emoji(&user(2, false), Some(&emoji)).is_ok());
    }

    #[test]
    fn test_remove_denied_for_non_author() {
        let emoji = custom_emoji(34, "green_tick", Some(2), false);
        let err = check_remove_custom_emoji(&user(3, false), Some(&emoji)).unwrap_err();
        assert_eq!(
            err.message,
            "Must be an organization administrator or emoji author"
        );
    }

    #[test]
    fn test_remove_denied_when_author_unknown() {
        let emoji = custom_emoji(34, "green_tick", None, false);
        assert!(check_remove_custom_emoji(&user(3, false), Some(&emoji)).is_err());
    }

    #[test]
    fn test_remove_denied_when_no_active_emoji() {
        assert!(check_remove_custom_emoji(&user(3, false), None).is_err());
    }

    // Name syntax tests

    #[test]
    fn test_valid_emoji_names() {
        assert!(check_valid_emoji_name("green_tick").is_ok());
        assert!(check_valid_emoji_name("party-parrot").is_ok());
        assert!(check_valid_emoji_name("v2.1").is_ok());
        assert!(check_valid_emoji_name("100").is_ok());
    }

    #[test]
    fn test_emoji_name_missing() {
        let err = check_valid_emoji_name("").unwrap_err();
        assert_eq!(err.message, "Emoji name is missing");
    }

    #[test]
    fn test_emoji_name_bad_terminator() {
        for name in ["tick.", "tick-", "tick_"] {
            let err = check_valid_emoji_name(name).unwrap_err();
            assert_eq!(
                err.message,
                "Emoji names must end with either a letter or number."
            );
        }
    }

    #[test]
    fn test_emoji_name_bad_charset() {
        for name in ["Green_Tick", "green tick", "tick!", "日本"] {
            let err = check_valid_emoji_name(name).unwrap_err();
            assert!(err.message.starts_with("Emoji names must contain only"));
        }
    }

    // Emoticon tests

    #[test]
    fn test_translate_emoticons() {
        assert_eq!(
            translate_emoticons("test :)"),
            "test :slight_smile:"
        );
        assert_eq!(translate_emoticons("<3 u"), ":heart: u");
        assert_eq!(translate_emoticons("no emoticons here"), "no emoticons here");
    }

    #[test]
    fn test_translate_emoticons_multiple() {
        assert_eq!(
            translate_emoticons(":) and :("),
            ":slight_smile: and :frown:"
        );
    }

    #[test]
    fn test_emoticon_regex_matches_free_standing() {
        let caps = emoticon_regex().captures("hello :) world").unwrap();
        assert_eq!(&caps["emoticon"], ":)");
    }

    #[test]
    fn test_emoticon_regex_at_boundaries() {
        assert!(emoticon_regex().is_match(":)"));
        assert!(emoticon_regex().is_match("done :)"));
        assert!(!emoticon_regex().is_match("ascii:)art"));
    }

    // File name tests

    #[test]
    fn test_get_emoji_file_name() {
        assert_eq!(get_emoji_file_name("tick.png", 34), "34.png");
        assert_eq!(get_emoji_file_name("parrot.GIF", 2), "2.GIF");
        assert_eq!(get_emoji_file_name("noextension", 9), "9");
    }
}
