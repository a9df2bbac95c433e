//! Delimiter-aware splitting of composite bodies.
//!
//! [`split`] cuts a text span at top-level occurrences of a separator,
//! skipping separators that sit inside quoted text or inside nested
//! `[...]`/`{...}` groups. [`clean`] prepares a single token for coercion.
//!
//! ## Examples
//!
//! ```rust
//! use serde_shape::tokenizer::split;
//!
//! let tokens = split(r#"a,"b,c",[d,e]"#, ',', 0).unwrap();
//! assert_eq!(tokens, vec!["a", r#""b,c""#, "[d,e]"]);
//!
//! // With a limit, everything after the first split point stays together
//! let pair = split(r#""title": "Engineer, Senior""#, ':', 2).unwrap();
//! assert_eq!(pair, vec![r#""title""#, r#" "Engineer, Senior""#]);
//! ```

use crate::{Error, Result, TypeDescriptor};

/// The literal standing for an absent value.
pub const NULL: &str = "null";

/// Splits `text` at top-level occurrences of `separator`.
///
/// Separators inside double- or single-quoted text, or inside bracket/brace
/// groups, are not split points. When `limit > 0`, at most `limit` tokens are
/// produced and the last one holds the rest of the text; `limit == 0` splits
/// without bound. The segment after the last split point is always emitted,
/// even when empty.
///
/// `separator` must not be a quote or bracket character.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] for unbalanced brackets or an
/// unterminated quote.
pub fn split(text: &str, separator: char, limit: usize) -> Result<Vec<&str>> {
    let mut tokens = Vec::new();
    let mut in_double = false;
    let mut in_single = false;
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        match ch {
            '"' if !in_single => in_double = !in_double,
            '\'' if !in_double => in_single = !in_single,
            _ if in_double || in_single => {}
            '[' | '{' => depth += 1,
            ']' | '}' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| Error::malformed("balanced brackets", text))?;
            }
            c if c == separator && depth == 0 => {
                if limit == 0 || tokens.len() + 1 < limit {
                    tokens.push(&text[start..idx]);
                    start = idx + c.len_utf8();
                }
            }
            _ => {}
        }
    }

    if in_double || in_single {
        return Err(Error::malformed("a closing quote", text));
    }
    if depth != 0 {
        return Err(Error::malformed("balanced brackets", text));
    }

    tokens.push(&text[start..]);
    Ok(tokens)
}

/// Prepares a raw token for decoding against `descriptor`.
///
/// Trims surrounding whitespace and maps the `null` literal to `None`. For
/// textual scalar kinds one layer of surrounding double quotes is removed;
/// unquoted text is passed through as is.
///
/// # Examples
///
/// ```rust
/// use serde_shape::tokenizer::clean;
/// use serde_shape::{ScalarKind, TypeDescriptor};
///
/// let string = TypeDescriptor::Scalar(ScalarKind::String);
/// let int = TypeDescriptor::Scalar(ScalarKind::I32);
///
/// assert_eq!(clean(r#"  "Ada"  "#, &string), Some("Ada"));
/// assert_eq!(clean(r#""null""#, &string), Some("null"));
/// assert_eq!(clean(" null ", &string), None);
/// assert_eq!(clean(" 42 ", &int), Some("42"));
/// ```
#[must_use]
pub fn clean<'a>(raw: &'a str, descriptor: &TypeDescriptor) -> Option<&'a str> {
    let trimmed = raw.trim();
    if trimmed == NULL {
        return None;
    }
    match descriptor {
        TypeDescriptor::Scalar(kind) if kind.is_textual() => Some(strip_quotes(trimmed)),
        _ => Some(trimmed),
    }
}

/// Removes one layer of surrounding double quotes, if present.
#[must_use]
pub fn strip_quotes(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(text)
}

/// Returns the text between `open` and `close` if `text` is wrapped in them.
pub(crate) fn unwrap_delimited(text: &str, open: char, close: char) -> Option<&str> {
    text.strip_prefix(open)?.strip_suffix(close)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScalarKind;

    #[test]
    fn test_split_skips_quoted_and_nested_separators() {
        let tokens = split(r#"a,"b,c",[d,e]"#, ',', 0).unwrap();
        assert_eq!(tokens, vec!["a", r#""b,c""#, "[d,e]"]);

        let tokens = split(r#"{"x": 1, "y": 2}, 'p,q', [[1,2],[3]]"#, ',', 0).unwrap();
        assert_eq!(tokens, vec![r#"{"x": 1, "y": 2}"#, " 'p,q'", " [[1,2],[3]]"]);
    }

    #[test]
    fn test_split_with_limit_folds_remainder() {
        let tokens = split(r#""title": "Engineer, Senior""#, ':', 2).unwrap();
        assert_eq!(tokens, vec![r#""title""#, r#" "Engineer, Senior""#]);

        let tokens = split("a:b:c:d", ':', 2).unwrap();
        assert_eq!(tokens, vec!["a", "b:c:d"]);

        let tokens = split("a:b:c:d", ':', 3).unwrap();
        assert_eq!(tokens, vec!["a", "b", "c:d"]);

        let tokens = split("a:b", ':', 1).unwrap();
        assert_eq!(tokens, vec!["a:b"]);
    }

    #[test]
    fn test_split_unlimited() {
        assert_eq!(split("a:b:c", ':', 0).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_emits_trailing_segment() {
        assert_eq!(split("a,", ',', 0).unwrap(), vec!["a", ""]);
        assert_eq!(split("", ',', 0).unwrap(), vec![""]);
        assert_eq!(split(",", ',', 0).unwrap(), vec!["", ""]);
    }

    #[test]
    fn test_split_quotes_do_not_toggle_each_other() {
        let tokens = split(r#""O'Brien", "x""#, ',', 0).unwrap();
        assert_eq!(tokens, vec![r#""O'Brien""#, r#" "x""#]);

        let tokens = split(r#"'say "hi", ok', 2"#, ',', 0).unwrap();
        assert_eq!(tokens, vec![r#"'say "hi", ok'"#, " 2"]);
    }

    #[test]
    fn test_split_ignores_brackets_inside_quotes() {
        let tokens = split(r#""a[b", "c}""#, ',', 0).unwrap();
        assert_eq!(tokens, vec![r#""a[b""#, r#" "c}""#]);
    }

    #[test]
    fn test_split_rejects_unbalanced_input() {
        assert!(matches!(
            split("[a,b", ',', 0),
            Err(Error::MalformedInput { .. })
        ));
        assert!(matches!(
            split("a],b", ',', 0),
            Err(Error::MalformedInput { .. })
        ));
        assert!(matches!(
            split(r#""open, b"#, ',', 0),
            Err(Error::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_split_multibyte_text() {
        let tokens = split("é,ü,\"ß,ø\"", ',', 0).unwrap();
        assert_eq!(tokens, vec!["é", "ü", "\"ß,ø\""]);
    }

    #[test]
    fn test_clean_only_strips_textual_kinds() {
        let string = TypeDescriptor::Scalar(ScalarKind::String);
        let char_kind = TypeDescriptor::Scalar(ScalarKind::Char);
        let boolean = TypeDescriptor::Scalar(ScalarKind::Bool);
        let seq = TypeDescriptor::sequence_of(string.clone());

        assert_eq!(clean(r#" "" "#, &string), Some(""));
        assert_eq!(clean(r#""M""#, &char_kind), Some("M"));
        assert_eq!(clean("M", &char_kind), Some("M"));
        assert_eq!(clean(r#""true""#, &boolean), Some(r#""true""#));
        assert_eq!(clean(r#" ["a"] "#, &seq), Some(r#"["a"]"#));
        assert_eq!(clean("null", &seq), None);
    }

    #[test]
    fn test_clean_strips_only_one_layer() {
        let string = TypeDescriptor::Scalar(ScalarKind::String);
        assert_eq!(clean(r#"""x"""#, &string), Some(r#""x""#));
        assert_eq!(clean(r#"" padded ""#, &string), Some(" padded "));
    }

    #[test]
    fn test_unwrap_delimited() {
        assert_eq!(unwrap_delimited("{a}", '{', '}'), Some("a"));
        assert_eq!(unwrap_delimited("{}", '{', '}'), Some(""));
        assert_eq!(unwrap_delimited("{", '{', '}'), None);
        assert_eq!(unwrap_delimited("[a]", '{', '}'), None);
    }
}
