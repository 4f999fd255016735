//! Placeholder substitution
//!
//! `{{ key }}` spans are replaced by the value of `key` in a
//! [`VariableStore`]. Unknown keys render as empty text. Substituted values
//! are never rescanned.

use tracing::debug;

use crate::error::{RenderError, Span};
use crate::store::VariableStore;

use super::lexer::{segments, Segment};

/// Whitespace stripped from both ends of a placeholder key
const KEY_WHITESPACE: [char; 4] = [' ', '\t', '\n', '\r'];

/// A piece of a scanned template
#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece<'a> {
    /// Text copied to the output verbatim
    Literal(&'a str),
    /// A placeholder with its trimmed key and the span of the whole `{{...}}`
    Placeholder { key: &'a str, span: Span },
}

/// Walk the template, handing each literal run and placeholder to `visit`
fn scan<'a>(template: &'a str, mut visit: impl FnMut(Piece<'a>)) -> Result<(), RenderError> {
    let mut open: Option<Span> = None;

    for (segment, span) in segments(template) {
        match open.take() {
            None => match segment {
                Segment::Open => open = Some(span),
                Segment::Close | Segment::Brace | Segment::Literal => {
                    visit(Piece::Literal(&template[span]))
                }
            },
            Some(start) => match segment {
                Segment::Close => {
                    let key = template[start.end..span.start].trim_matches(&KEY_WHITESPACE[..]);
                    visit(Piece::Placeholder {
                        key,
                        span: start.start..span.end,
                    });
                }
                // Everything up to the first closing marker belongs to the key
                Segment::Open | Segment::Brace | Segment::Literal => open = Some(start),
            },
        }
    }

    match open {
        Some(start) => Err(RenderError::unterminated(start.start..template.len())),
        None => Ok(()),
    }
}

/// Render a template against a variable store
///
/// # Example
///
/// ```rust
/// use varsub::{renderer::render, VariableStore};
///
/// let store: VariableStore = [("name", "World")].into_iter().collect();
/// assert_eq!(render(&store, "Hi {{ name }}!").unwrap(), "Hi World!");
/// ```
pub fn render(store: &VariableStore, template: &str) -> Result<String, RenderError> {
    let mut output = String::with_capacity(template.len());
    let mut unresolved = 0usize;

    scan(template, |piece| match piece {
        Piece::Literal(text) => output.push_str(text),
        Piece::Placeholder { key, span } => match store.get(key) {
            Some(value) => output.push_str(value),
            None => {
                unresolved += 1;
                debug!(key, ?span, "unresolved placeholder rendered as empty");
            }
        },
    })?;

    if unresolved > 0 {
        debug!(unresolved, "template referenced unknown keys");
    }
    Ok(output)
}

/// List the keys a template references, in order of appearance
///
/// Keys are trimmed the same way [`render`] trims them; duplicates are kept.
pub fn placeholders(template: &str) -> Result<Vec<&str>, RenderError> {
    let mut keys = Vec::new();
    scan(template, |piece| {
        if let Piece::Placeholder { key, .. } = piece {
            keys.push(key);
        }
    })?;
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store(pairs: &[(&str, &str)]) -> VariableStore {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_no_placeholders_unchanged() {
        let out = render(&store(&[("a", "1")]), "no placeholders here").unwrap();
        assert_eq!(out, "no placeholders here");
    }

    #[test]
    fn test_whitespace_tolerance() {
        let out = render(&store(&[("name", "World")]), "Hi {{ name }}!").unwrap();
        assert_eq!(out, "Hi World!");
    }

    #[test]
    fn test_tight_placeholder() {
        let out = render(&store(&[("name", "World")]), "Hi {{name}}!").unwrap();
        assert_eq!(out, "Hi World!");
    }

    #[test]
    fn test_all_whitespace_kinds_trimmed() {
        let out = render(&store(&[("k", "v")]), "{{\t\r\n k \n\t}}").unwrap();
        assert_eq!(out, "v");
    }

    #[test]
    fn test_inner_whitespace_kept() {
        let out = render(&store(&[("a b", "spaced")]), "{{ a b }}").unwrap();
        assert_eq!(out, "spaced");
    }

    #[test]
    fn test_unknown_key_is_empty() {
        assert_eq!(render(&store(&[]), "{{missing}}").unwrap(), "");
        assert_eq!(render(&store(&[]), "[{{ missing }}]").unwrap(), "[]");
    }

    #[test]
    fn test_empty_placeholder() {
        assert_eq!(render(&store(&[]), "a{{}}b").unwrap(), "ab");
        assert_eq!(render(&store(&[("", "blank")]), "{{  }}").unwrap(), "blank");
    }

    #[test]
    fn test_unterminated() {
        let err = render(&store(&[]), "{{unterminated").unwrap_err();
        assert_eq!(err, RenderError::unterminated(0..14));
    }

    #[test]
    fn test_unterminated_after_valid() {
        let err = render(&store(&[("a", "1")]), "{{a}} then {{ b").unwrap_err();
        assert_eq!(err, RenderError::unterminated(11..15));
    }

    #[test]
    fn test_stray_closing_marker_is_literal() {
        let out = render(&store(&[("a", "1")]), "}} {{a}} }}").unwrap();
        assert_eq!(out, "}} 1 }}");
    }

    #[test]
    fn test_single_braces_are_literal() {
        let out = render(&store(&[("a", "1")]), "fn() { {{a}} }").unwrap();
        assert_eq!(out, "fn() { 1 }");
    }

    #[test]
    fn test_first_closing_marker_ends_key() {
        let s = store(&[("{a", "brace"), ("a{{b", "nested")]);
        assert_eq!(render(&s, "{{{a}}}").unwrap(), "brace}");
        assert_eq!(render(&s, "{{a{{b}}").unwrap(), "nested");
    }

    #[test]
    fn test_values_not_rescanned() {
        let s = store(&[("a", "{{b}}"), ("b", "nope")]);
        assert_eq!(render(&s, "{{a}}").unwrap(), "{{b}}");
    }

    #[test]
    fn test_multiple_and_repeated() {
        let s = store(&[("x", "1"), ("y", "2")]);
        let out = render(&s, "{{x}}+{{ y }}={{z}}; {{x}}").unwrap();
        assert_eq!(out, "1+2=; 1");
    }

    #[test]
    fn test_multibyte_template() {
        let s = store(&[("名前", "世界")]);
        assert_eq!(render(&s, "こんにちは {{ 名前 }}！").unwrap(), "こんにちは 世界！");
    }

    #[test]
    fn test_trailing_newline_preserved() {
        let s = store(&[("a", "1")]);
        assert_eq!(render(&s, "{{a}}\n").unwrap(), "1\n");
    }

    #[test]
    fn test_placeholders() {
        let keys = placeholders("{{ a }} x {{b}} {{ a }} {{}}").unwrap();
        assert_eq!(keys, vec!["a", "b", "a", ""]);
    }

    #[test]
    fn test_placeholders_unterminated() {
        assert!(placeholders("ok {{ broken").is_err());
    }
}
