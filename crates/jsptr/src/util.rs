//! Pointer tokenizing helpers.

use crate::JsonPointerError;

/// Unescapes a JSON Pointer path component.
///
/// Two whole-token passes, in this order: `~1` becomes `/`, then `~0`
/// becomes `~`.
///
/// # Example
///
/// ```
/// use jsptr::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// assert_eq!(unescape_component("e~01f"), "e~1f");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    component.replace("~1", "/").replace("~0", "~")
}

/// Encodes a decoded token back into pointer text.
///
/// Only used to hand the unconsumed part of a path to a nested source.
pub(crate) fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Splits pointer text into decoded tokens.
///
/// The empty string is the root and yields no tokens. Anything else must
/// start with `/`.
pub fn parse_tokens(pointer: &str) -> Result<Vec<String>, JsonPointerError> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    match pointer.strip_prefix('/') {
        Some(rest) => Ok(rest.split('/').map(unescape_component).collect()),
        None => Err(JsonPointerError::MalformedPointer(pointer.to_string())),
    }
}

/// Formats tokens as pointer text, re-encoding `~` and `/`.
pub(crate) fn format_tokens(tokens: &[String]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push('/');
        out.push_str(&escape_component(token));
    }
    out
}

/// Resolves an array index token against a container of length `len`.
///
/// Tokens are read as signed integers so that `-1` reports an
/// out-of-bounds index rather than a malformed one.
pub(crate) fn parse_index(token: &str, len: usize) -> Result<usize, JsonPointerError> {
    let index: i64 = token
        .parse()
        .map_err(|_| JsonPointerError::TypeMismatch(format!("invalid array index '{token}'")))?;
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or(JsonPointerError::OutOfBounds { index, len })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_component() {
        assert_eq!(unescape_component("foo"), "foo");
        assert_eq!(unescape_component("a~0b"), "a~b");
        assert_eq!(unescape_component("c~1d"), "c/d");
        assert_eq!(unescape_component("a~0b~1c"), "a~b/c");
        assert_eq!(unescape_component("~0~0"), "~~");
        assert_eq!(unescape_component("~1~1"), "//");
    }

    #[test]
    fn test_unescape_is_two_pass() {
        // "~01" holds no "~1", so only the second pass fires.
        assert_eq!(unescape_component("foo~01bar"), "foo~1bar");
        assert_eq!(unescape_component("~0~1"), "~/");
        assert_eq!(unescape_component("~2"), "~2");
    }

    #[test]
    fn test_escape_then_unescape() {
        for raw in ["plain", "a/b", "a~b", "~1", "~0", "/~/", ""] {
            assert_eq!(unescape_component(&escape_component(raw)), raw);
        }
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!(parse_tokens("").unwrap(), Vec::<String>::new());
        assert_eq!(parse_tokens("/").unwrap(), vec![""]);
        assert_eq!(parse_tokens("/foo/bar").unwrap(), vec!["foo", "bar"]);
        assert_eq!(parse_tokens("/a~0b/c~1d").unwrap(), vec!["a~b", "c/d"]);
        assert_eq!(parse_tokens("/foo///").unwrap(), vec!["foo", "", "", ""]);
    }

    #[test]
    fn test_parse_tokens_requires_leading_slash() {
        assert!(matches!(
            parse_tokens("foo"),
            Err(JsonPointerError::MalformedPointer(_))
        ));
        assert!(matches!(
            parse_tokens("foo/bar"),
            Err(JsonPointerError::MalformedPointer(_))
        ));
    }

    #[test]
    fn test_format_tokens() {
        assert_eq!(format_tokens(&[]), "");
        assert_eq!(
            format_tokens(&["a~b".to_string(), "c/d".to_string()]),
            "/a~0b/c~1d"
        );
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("0", 3).unwrap(), 0);
        assert_eq!(parse_index("2", 3).unwrap(), 2);
        assert_eq!(parse_index("02", 3).unwrap(), 2);
        assert_eq!(
            parse_index("3", 3),
            Err(JsonPointerError::OutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(
            parse_index("-1", 3),
            Err(JsonPointerError::OutOfBounds { index: -1, len: 3 })
        );
        assert!(matches!(
            parse_index("abc", 3),
            Err(JsonPointerError::TypeMismatch(_))
        ));
        assert!(matches!(
            parse_index("", 3),
            Err(JsonPointerError::TypeMismatch(_))
        ));
        assert!(matches!(
            parse_index("99999999999999999999", 3),
            Err(JsonPointerError::TypeMismatch(_))
        ));
    }
}
