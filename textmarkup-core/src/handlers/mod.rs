//! Rendering handlers
//!
//! A handler receives start/end events for structural regions, inline
//! substitution requests from the filter chain, and the block text itself.
//! Every region and substitution has its own method with a no-op (or
//! "keep the original text") default, so a handler only implements what it
//! cares about. Unknown regions simply do nothing.
//!
//! - `HtmlRenderer` - the reference HTML output
//! - `Recorder` - forwards to an inner handler and logs every event
//! - `NullHandler` - swallows everything

pub mod html;
pub mod recorder;

pub use html::HtmlRenderer;
pub use recorder::Recorder;

use crate::error::Result;
use crate::types::{InlineMatch, MarkupEvent, Region, SubstitutionKind};

pub trait Handler {
    fn start_document(&mut self) -> Result<()> {
        Ok(())
    }
    fn end_document(&mut self) -> Result<()> {
        Ok(())
    }
    fn start_title(&mut self) -> Result<()> {
        Ok(())
    }
    fn end_title(&mut self) -> Result<()> {
        Ok(())
    }
    fn start_heading(&mut self) -> Result<()> {
        Ok(())
    }
    fn end_heading(&mut self) -> Result<()> {
        Ok(())
    }
    fn start_paragraph(&mut self) -> Result<()> {
        Ok(())
    }
    fn end_paragraph(&mut self) -> Result<()> {
        Ok(())
    }
    fn start_ulist(&mut self) -> Result<()> {
        Ok(())
    }
    fn end_ulist(&mut self) -> Result<()> {
        Ok(())
    }
    fn start_listitem(&mut self) -> Result<()> {
        Ok(())
    }
    fn end_listitem(&mut self) -> Result<()> {
        Ok(())
    }

    /// `None` keeps the matched text unchanged
    fn sub_emphasis(&mut self, _m: &InlineMatch<'_>) -> Option<String> {
        None
    }
    fn sub_url(&mut self, _m: &InlineMatch<'_>) -> Option<String> {
        None
    }
    fn sub_mail(&mut self, _m: &InlineMatch<'_>) -> Option<String> {
        None
    }

    /// Emit a block's (already filtered) text verbatim.
    fn feed(&mut self, text: &str) -> Result<()>;

    fn start(&mut self, region: Region) -> Result<()> {
        match region {
            Region::Document => self.start_document(),
            Region::Title => self.start_title(),
            Region::Heading => self.start_heading(),
            Region::Paragraph => self.start_paragraph(),
            Region::UList => self.start_ulist(),
            Region::ListItem => self.start_listitem(),
        }
    }

    fn end(&mut self, region: Region) -> Result<()> {
        match region {
            Region::Document => self.end_document(),
            Region::Title => self.end_title(),
            Region::Heading => self.end_heading(),
            Region::Paragraph => self.end_paragraph(),
            Region::UList => self.end_ulist(),
            Region::ListItem => self.end_listitem(),
        }
    }

    /// Replacement text for one match. Never fails: a handler without an
    /// opinion on `kind` gets the matched span back.
    fn substitute(&mut self, kind: SubstitutionKind, m: &InlineMatch<'_>) -> String {
        let replacement = match kind {
            SubstitutionKind::Emphasis => self.sub_emphasis(m),
            SubstitutionKind::Url => self.sub_url(m),
            SubstitutionKind::Mail => self.sub_mail(m),
        };
        replacement.unwrap_or_else(|| m.matched.to_string())
    }

    /// Replay a recorded event. Substitutions are already baked into the fed
    /// text, so they replay as nothing.
    fn emit(&mut self, event: &MarkupEvent) -> Result<()> {
        match event {
            MarkupEvent::Start { region } => self.start(*region),
            MarkupEvent::End { region } => self.end(*region),
            MarkupEvent::Feed { text } => self.feed(text),
            MarkupEvent::Substitute { .. } => Ok(()),
        }
    }
}

/// Forwards every method, so overrides on `H` are reached whichever entry
/// point the caller uses.
impl<H: Handler + ?Sized> Handler for &mut H {
    fn start_document(&mut self) -> Result<()> {
        (**self).start_document()
    }
    fn end_document(&mut self) -> Result<()> {
        (**self).end_document()
    }
    fn start_title(&mut self) -> Result<()> {
        (**self).start_title()
    }
    fn end_title(&mut self) -> Result<()> {
        (**self).end_title()
    }
    fn start_heading(&mut self) -> Result<()> {
        (**self).start_heading()
    }
    fn end_heading(&mut self) -> Result<()> {
        (**self).end_heading()
    }
    fn start_paragraph(&mut self) -> Result<()> {
        (**self).start_paragraph()
    }
    fn end_paragraph(&mut self) -> Result<()> {
        (**self).end_paragraph()
    }
    fn start_ulist(&mut self) -> Result<()> {
        (**self).start_ulist()
    }
    fn end_ulist(&mut self) -> Result<()> {
        (**self).end_ulist()
    }
    fn start_listitem(&mut self) -> Result<()> {
        (**self).start_listitem()
    }
    fn end_listitem(&mut self) -> Result<()> {
        (**self).end_listitem()
    }
    fn sub_emphasis(&mut self, m: &InlineMatch<'_>) -> Option<String> {
        (**self).sub_emphasis(m)
    }
    fn sub_url(&mut self, m: &InlineMatch<'_>) -> Option<String> {
        (**self).sub_url(m)
    }
    fn sub_mail(&mut self, m: &InlineMatch<'_>) -> Option<String> {
        (**self).sub_mail(m)
    }
    fn feed(&mut self, text: &str) -> Result<()> {
        (**self).feed(text)
    }
    fn start(&mut self, region: Region) -> Result<()> {
        (**self).start(region)
    }
    fn end(&mut self, region: Region) -> Result<()> {
        (**self).end(region)
    }
    fn substitute(&mut self, kind: SubstitutionKind, m: &InlineMatch<'_>) -> String {
        (**self).substitute(kind, m)
    }
    fn emit(&mut self, event: &MarkupEvent) -> Result<()> {
        (**self).emit(event)
    }
}

/// Handler that renders nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHandler;

impl Handler for NullHandler {
    fn feed(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }
}
