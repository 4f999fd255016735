//! Error types for assignment parsing and template rendering

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Errors raised while parsing an assignment source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed input at {span:?}: {message}")]
    MalformedInput { span: Span, message: String },
}

impl ParseError {
    /// Create a malformed input error
    pub fn malformed(message: impl Into<String>, span: Span) -> Self {
        Self::MalformedInput {
            message: message.into(),
            span,
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            Self::MalformedInput { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            Self::MalformedInput { span, message } => {
                report(source, filename, span, "malformed input", message)
                    .unwrap_or_else(|| self.to_string())
            }
        }
    }
}

/// Errors raised while rendering a template
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("unterminated placeholder: '{{{{' at byte {} has no closing '}}}}'", .span.start)]
    UnterminatedPlaceholder { span: Span },
}

impl RenderError {
    /// Create an unterminated placeholder error spanning from the opening
    /// marker to the end of the template
    pub fn unterminated(span: Span) -> Self {
        Self::UnterminatedPlaceholder { span }
    }

    pub fn span(&self) -> &Span {
        match self {
            Self::UnterminatedPlaceholder { span } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            Self::UnterminatedPlaceholder { span } => report(
                source,
                filename,
                span,
                "unterminated placeholder",
                "this '{{' is never closed with '}}'",
            )
            .unwrap_or_else(|| self.to_string()),
        }
    }
}

/// Build an ariadne report for a single labelled span
///
/// Returns `None` if the report could not be written.
fn report(source: &str, filename: &str, span: &Span, title: &str, label: &str) -> Option<String> {
    // ariadne indexes by char, spans here are bytes
    let to_char = |byte: usize| source.get(..byte.min(source.len())).map(|s| s.chars().count());
    let end = to_char(span.end)?;
    let start = to_char(span.start)?.min(end);

    let mut buf = Vec::new();
    Report::build(ReportKind::Error, filename, start)
        .with_message(title)
        .with_label(
            Label::new((filename, start..end))
                .with_message(label)
                .with_color(Color::Red),
        )
        .finish()
        .write((filename, Source::from(source)), &mut buf)
        .ok()?;
    String::from_utf8(buf).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let err = ParseError::malformed("key 'a' has no value", 0..1);
        assert_eq!(
            err.to_string(),
            "malformed input at 0..1: key 'a' has no value"
        );
        assert_eq!(err.span(), &(0..1));
    }

    #[test]
    fn test_unterminated_display() {
        let err = RenderError::unterminated(3..10);
        assert_eq!(
            err.to_string(),
            "unterminated placeholder: '{{' at byte 3 has no closing '}}'"
        );
    }

    #[test]
    fn test_format_includes_context() {
        let source = "a=1\nb";
        let err = ParseError::malformed("key 'b' has no value", 4..5);
        let formatted = err.format(source, "vars.env");
        assert!(formatted.contains("malformed input"));
        assert!(formatted.contains("vars.env"));
        assert!(formatted.contains("key 'b' has no value"));
    }

    #[test]
    fn test_format_clamps_span() {
        let err = RenderError::unterminated(2..100);
        let formatted = err.format("x {{y", "page.tmpl");
        assert!(formatted.contains("unterminated placeholder"));
    }
}
