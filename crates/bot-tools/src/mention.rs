//! User mention parsing.

use std::sync::LazyLock;

use regex::Regex;

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<@!?(\d+)>").expect("mention pattern is valid"));

/// Extract a user id from a mention token (`<@123>`, `<@!123>`) or a bare
/// numeric id. Returns `None` when the input is neither.
pub fn parse_user_mention(input: &str) -> Option<u64> {
    let trimmed = input.trim();

    if let Some(captures) = MENTION_RE.captures(trimmed) {
        return captures[1].parse().ok();
    }

    trimmed.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_plain_mention() {
        assert_eq!(parse_user_mention("<@123456789>"), Some(123456789));
    }

    #[test]
    fn test_parses_nickname_mention() {
        assert_eq!(parse_user_mention("<@!42>"), Some(42));
    }

    #[test]
    fn test_parses_bare_id() {
        assert_eq!(parse_user_mention("987654321"), Some(987654321));
        assert_eq!(parse_user_mention("  987654321  "), Some(987654321));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_user_mention("@username"), None);
        assert_eq!(parse_user_mention("not a user"), None);
        assert_eq!(parse_user_mention(""), None);
    }
}
