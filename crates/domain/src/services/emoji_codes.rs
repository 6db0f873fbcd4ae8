//! Built-in Unicode emoji tables.
//!
//! Derived from the emoji data bundle shipped with the web client. Names use
//! the canonical lowercase_underscore spelling; aliases map to the same
//! codepoint and come after their canonical entry, so the reverse table
//! always resolves a codepoint to its canonical name.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// (name, codepoint) pairs. The first name listed for a codepoint is the
/// canonical one.
static EMOJI_CODES: &[(&str, &str)] = &[
    ("grinning", "1f600"),
    ("smiley", "1f603"),
    ("smile", "1f604"),
    ("grin", "1f601"),
    ("laughing", "1f606"),
    ("joy", "1f602"),
    ("slight_smile", "1f642"),
    ("upside_down", "1f643"),
    ("wink", "1f609"),
    ("blush", "1f60a"),
    ("heart_eyes", "1f60d"),
    ("stuck_out_tongue", "1f61b"),
    ("stuck_out_tongue_wink", "1f61c"),
    ("thinking", "1f914"),
    ("neutral", "1f610"),
    ("expressionless", "1f611"),
    ("open_mouth", "1f62e"),
    ("frown", "1f641"),
    ("cry", "1f622"),
    ("sob", "1f62d"),
    ("angry", "1f620"),
    ("rage", "1f621"),
    ("scream", "1f631"),
    ("fear", "1f628"),
    ("sleepy", "1f62a"),
    ("sleeping", "1f634"),
    ("sunglasses", "1f60e"),
    ("smirk", "1f60f"),
    ("confused", "1f615"),
    ("worried", "1f61f"),
    ("heart", "2764"),
    ("broken_heart", "1f494"),
    ("two_hearts", "1f495"),
    ("sparkling_heart", "1f496"),
    ("+1", "1f44d"),
    ("thumbs_up", "1f44d"),
    ("-1", "1f44e"),
    ("thumbs_down", "1f44e"),
    ("clap", "1f44f"),
    ("wave", "1f44b"),
    ("raised_hands", "1f64c"),
    ("pray", "1f64f"),
    ("muscle", "1f4aa"),
    ("point_up", "261d"),
    ("ok_hand", "1f44c"),
    ("fire", "1f525"),
    ("sparkles", "2728"),
    ("star", "2b50"),
    ("tada", "1f389"),
    ("party_popper", "1f389"),
    ("confetti", "1f38a"),
    ("rocket", "1f680"),
    ("bulb", "1f4a1"),
    ("warning", "26a0"),
    ("white_check_mark", "2705"),
    ("heavy_check_mark", "2714"),
    ("cross_mark", "274c"),
    ("question", "2753"),
    ("exclamation", "2757"),
    ("zzz", "1f4a4"),
    ("eyes", "1f440"),
    ("100", "1f4af"),
    ("octopus", "1f419"),
    ("dog", "1f436"),
    ("cat", "1f431"),
    ("snake", "1f40d"),
    ("bug", "1f41b"),
    ("turtle", "1f422"),
    ("coffee", "2615"),
    ("pizza", "1f355"),
    ("cake", "1f370"),
    ("beer", "1f37a"),
    ("soccer", "26bd"),
    ("earth_americas", "1f30e"),
    ("sunny", "2600"),
    ("cloud", "2601"),
    ("snowflake", "2744"),
    ("umbrella", "2602"),
    ("alien", "1f47d"),
    ("ghost", "1f47b"),
    ("robot", "1f916"),
    ("skull", "1f480"),
    ("gift", "1f381"),
    ("bell", "1f514"),
    ("lock", "1f512"),
    ("key", "1f511"),
    ("hammer", "1f528"),
    ("wrench", "1f527"),
    ("gear", "2699"),
    ("calendar", "1f4c5"),
    ("book", "1f4d6"),
    ("pencil", "270f"),
    ("scissors", "2702"),
    ("link", "1f517"),
    ("email", "2709"),
    ("telephone", "260e"),
    ("laptop", "1f4bb"),
    ("keyboard", "2328"),
    ("mag", "1f50d"),
    ("chart", "1f4c8"),
];

/// Emoticon to colon-syntax conversions, e.g. `:)` becomes `:slight_smile:`.
pub static EMOTICON_CONVERSIONS: &[(&str, &str)] = &[
    (":)", ":slight_smile:"),
    ("(:", ":slight_smile:"),
    (":(", ":frown:"),
    ("<3", ":heart:"),
    (":|", ":expressionless:"),
    (":/", ":confused:"),
    (";)", ":wink:"),
    (":D", ":grin:"),
    (":p", ":stuck_out_tongue:"),
    (":P", ":stuck_out_tongue:"),
];

lazy_static! {
    static ref NAME_TO_CODEPOINT: HashMap<&'static str, &'static str> =
        EMOJI_CODES.iter().copied().collect();

    // First occurrence wins: aliases never shadow the canonical name.
    static ref CODEPOINT_TO_NAME: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        for (name, codepoint) in EMOJI_CODES {
            map.entry(*codepoint).or_insert(*name);
        }
        map
    };
}

/// Look up the codepoint for an emoji name.
pub fn name_to_codepoint(name: &str) -> Option<&'static str> {
    NAME_TO_CODEPOINT.get(name).copied()
}

/// Look up the canonical name for a codepoint.
pub fn codepoint_to_name(codepoint: &str) -> Option<&'static str> {
    CODEPOINT_TO_NAME.get(codepoint).copied()
}
