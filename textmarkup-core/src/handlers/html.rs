use super::Handler;
use crate::config::default_document_title;
use crate::error::Result;
use crate::types::InlineMatch;
use std::io::Write;

/// Renders the event stream as HTML, one tag or block per line.
///
/// Text is written as-is: there is no escaping beyond the three inline
/// substitutions, so a literal `<` in the input reaches the output untouched.
pub struct HtmlRenderer<W: Write> {
    out: W,
    document_title: String,
}

impl<W: Write> HtmlRenderer<W> {
    pub fn new(out: W) -> Self {
        Self::with_title(out, default_document_title())
    }

    pub fn with_title(out: W, document_title: impl Into<String>) -> Self {
        Self {
            out,
            document_title: document_title.into(),
        }
    }

    pub fn document_title(&self) -> &str {
        &self.document_title
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }
}

impl HtmlRenderer<Vec<u8>> {
    /// Rendered output so far, for in-memory rendering
    pub fn into_string(self) -> String {
        match String::from_utf8(self.out) {
            Ok(html) => html,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }
    }
}

impl<W: Write> Handler for HtmlRenderer<W> {
    fn start_document(&mut self) -> Result<()> {
        let prologue = format!(
            "<html>\n<head>\n\t<title>{}</title>\n</head>\n<body>",
            self.document_title
        );
        self.line(&prologue)
    }

    fn end_document(&mut self) -> Result<()> {
        self.line("</body>\n</html>")?;
        self.out.flush()?;
        Ok(())
    }

    fn start_title(&mut self) -> Result<()> {
        self.line("<h1>")
    }

    fn end_title(&mut self) -> Result<()> {
        self.line("</h1>")
    }

    fn start_heading(&mut self) -> Result<()> {
        self.line("<h2>")
    }

    fn end_heading(&mut self) -> Result<()> {
        self.line("</h2>")
    }

    fn start_paragraph(&mut self) -> Result<()> {
        self.line("<p>")
    }

    fn end_paragraph(&mut self) -> Result<()> {
        self.line("</p>")
    }

    fn start_ulist(&mut self) -> Result<()> {
        self.line("<ul>")
    }

    fn end_ulist(&mut self) -> Result<()> {
        self.line("</ul>")
    }

    fn start_listitem(&mut self) -> Result<()> {
        self.line("<li>")
    }

    fn end_listitem(&mut self) -> Result<()> {
        self.line("</li>")
    }

    fn sub_emphasis(&mut self, m: &InlineMatch<'_>) -> Option<String> {
        Some(format!("<em>{}</em>", m.capture))
    }

    fn sub_url(&mut self, m: &InlineMatch<'_>) -> Option<String> {
        Some(format!("<a href=\"{0}\">{0}</a>", m.capture))
    }

    fn sub_mail(&mut self, m: &InlineMatch<'_>) -> Option<String> {
        Some(format!("<a href=\"mailto:{0}\">{0}</a>", m.capture))
    }

    fn feed(&mut self, text: &str) -> Result<()> {
        self.line(text)
    }
}
