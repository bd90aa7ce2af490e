//! Parsing of entity-extractor replies
//!
//! The extractor answers in plain text: either a comma-separated list of
//! names or the exact sentinel [`NO_ENTITIES`].

/// Sentinel reply meaning nothing was found
pub const NO_ENTITIES: &str = "No companies found.";

/// Names of this length or longer are treated as extractor noise
pub const MAX_NAME_CHARS: usize = 100;

/// Splits an extractor reply into entity names
///
/// Tokens are trimmed; empty tokens, over-long tokens and repeats are dropped.
/// Reply order is kept.
pub fn parse_entity_reply(reply: &str) -> Vec<String> {
    let reply = reply.trim();
    if reply.is_empty() || reply == NO_ENTITIES {
        return Vec::new();
    }

    let mut names: Vec<String> = Vec::new();
    for token in reply.split(',').map(str::trim) {
        if token.is_empty() || token.chars().count() >= MAX_NAME_CHARS {
            continue;
        }
        if !names.iter().any(|n| n == token) {
            names.push(token.to_string());
        }
    }
    names
}
