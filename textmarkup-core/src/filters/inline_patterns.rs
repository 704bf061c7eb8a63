use super::Filter;
use crate::error::{MarkupError, Result};
use crate::handlers::Handler;
use crate::types::{InlineMatch, SubstitutionKind};
use regex::{Captures, Regex};

// Patterns are ASCII-only on purpose: `\w` in the regex crate is Unicode-aware,
// so word characters are spelled out.
pub const EMPHASIS_PATTERN: &str = r"\*(.*?)\*";
pub const URL_PATTERN: &str =
    r"(https?://[0-9A-Za-z_-]+(\.[0-9A-Za-z_-]+)+([?/=.&][0-9A-Za-z_-]+)+)";
pub const MAIL_PATTERN: &str = r"([0-9A-Za-z_]+@[0-9A-Za-z_]+(\.[0-9A-Za-z_]+)+)";

/// Replaces every match of a pattern with whatever the handler supplies for
/// this filter's substitution kind.
///
/// A literal `*` pair always reads as emphasis; there is no escape.
#[derive(Debug, Clone)]
pub struct RegexFilter {
    kind: SubstitutionKind,
    pattern: Regex,
}

impl RegexFilter {
    pub fn new(kind: SubstitutionKind, pattern: &str) -> Result<Self> {
        let pattern =
            Regex::new(pattern).map_err(|source| MarkupError::Pattern { kind, source })?;
        Ok(Self { kind, pattern })
    }

    pub fn emphasis() -> Result<Self> {
        Self::new(SubstitutionKind::Emphasis, EMPHASIS_PATTERN)
    }

    pub fn url() -> Result<Self> {
        Self::new(SubstitutionKind::Url, URL_PATTERN)
    }

    pub fn mail() -> Result<Self> {
        Self::new(SubstitutionKind::Mail, MAIL_PATTERN)
    }

    /// Built-in filter for `kind`
    pub fn for_kind(kind: SubstitutionKind) -> Result<Self> {
        match kind {
            SubstitutionKind::Emphasis => Self::emphasis(),
            SubstitutionKind::Url => Self::url(),
            SubstitutionKind::Mail => Self::mail(),
        }
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

impl Filter for RegexFilter {
    fn kind(&self) -> SubstitutionKind {
        self.kind
    }

    fn apply(&self, text: &str, handler: &mut dyn Handler) -> String {
        let kind = self.kind;
        self.pattern
            .replace_all(text, |captures: &Captures<'_>| {
                handler.substitute(kind, &InlineMatch::from_captures(captures))
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{HtmlRenderer, NullHandler};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn html(filter: &RegexFilter, text: &str) -> String {
        let mut renderer = HtmlRenderer::new(Vec::new());
        filter.apply(text, &mut renderer)
    }

    #[rstest]
    #[case("*hi*", "<em>hi</em>")]
    #[case("a *b* c *d*", "a <em>b</em> c <em>d</em>")]
    #[case("**", "<em></em>")]
    #[case("one * star", "one * star")]
    #[case("***", "<em></em>*")]
    #[case("*spans\nlines*", "*spans\nlines*")]
    fn test_emphasis(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(html(&RegexFilter::emphasis().unwrap(), input), expected);
    }

    #[rstest]
    #[case(
        "http://example.com/a?b=c",
        "<a href=\"http://example.com/a?b=c\">http://example.com/a?b=c</a>"
    )]
    #[case(
        "see https://www.python.org for more",
        "see <a href=\"https://www.python.org\">https://www.python.org</a> for more"
    )]
    // A bare host needs at least one path/query segment after its dotted part
    #[case("http://example.com", "http://example.com")]
    #[case("ftp://example.com/a", "ftp://example.com/a")]
    #[case("http://exämple.com/a", "http://exämple.com/a")]
    fn test_url(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(html(&RegexFilter::url().unwrap(), input), expected);
    }

    #[test]
    fn test_mail_wraps_only_address_span() {
        let filter = RegexFilter::mail().unwrap();
        assert_eq!(
            html(&filter, "contact me at ab@example.com today"),
            "contact me at <a href=\"mailto:ab@example.com\">ab@example.com</a> today"
        );
        // Dots are not part of the local part
        assert_eq!(
            html(&filter, "contact me at a.b@example.com"),
            "contact me at a.<a href=\"mailto:b@example.com\">b@example.com</a>"
        );
        assert_eq!(html(&filter, "user@localhost"), "user@localhost");
    }

    #[test]
    fn test_null_handler_leaves_text_alone() {
        let filter = RegexFilter::emphasis().unwrap();
        assert_eq!(filter.apply("*kept*", &mut NullHandler), "*kept*");
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let err = RegexFilter::new(SubstitutionKind::Url, "(unclosed").unwrap_err();
        assert!(matches!(
            err,
            MarkupError::Pattern {
                kind: SubstitutionKind::Url,
                ..
            }
        ));
    }
}
