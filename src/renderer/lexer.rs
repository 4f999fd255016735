//! Template lexer using logos
//!
//! Splits a template into placeholder markers and literal runs. Stray
//! single braces are their own segment so that `{{` and `}}` are always
//! found at their first occurrence.

use logos::Logos;

use crate::error::Span;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    #[token("{{")]
    Open,
    #[token("}}")]
    Close,
    #[token("{")]
    #[token("}")]
    Brace,
    #[regex(r"[^{}]+")]
    Literal,
}

/// Lex a template into segments with spans
pub fn segments(template: &str) -> impl Iterator<Item = (Segment, Span)> + '_ {
    // Every byte matches one of the patterns above
    Segment::lexer(template)
        .spanned()
        .map(|(seg, span)| (seg.unwrap_or(Segment::Literal), span))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(template: &str) -> Vec<Segment> {
        segments(template).map(|(s, _)| s).collect()
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(kinds("hello world"), vec![Segment::Literal]);
    }

    #[test]
    fn test_placeholder() {
        let segs: Vec<_> = segments("Hi {{ name }}!").collect();
        assert_eq!(
            segs,
            vec![
                (Segment::Literal, 0..3),
                (Segment::Open, 3..5),
                (Segment::Literal, 5..11),
                (Segment::Close, 11..13),
                (Segment::Literal, 13..14),
            ]
        );
    }

    #[test]
    fn test_single_braces() {
        assert_eq!(
            kinds("{a}"),
            vec![Segment::Brace, Segment::Literal, Segment::Brace]
        );
    }

    #[test]
    fn test_triple_braces() {
        assert_eq!(
            kinds("{{{x}}}"),
            vec![
                Segment::Open,
                Segment::Brace,
                Segment::Literal,
                Segment::Close,
                Segment::Brace,
            ]
        );
    }

    #[test]
    fn test_multiline() {
        assert_eq!(
            kinds("a\n{{\nb\n}}\n"),
            vec![
                Segment::Literal,
                Segment::Open,
                Segment::Literal,
                Segment::Close,
                Segment::Literal,
            ]
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(kinds(""), vec![]);
    }
}
