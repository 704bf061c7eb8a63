use super::{Handler, NullHandler};
use crate::error::Result;
use crate::types::{InlineMatch, MarkupEvent, Region, SubstitutionKind};

/// Forwards every call to `inner` and keeps a log of what happened.
///
/// Events are recorded before forwarding, so a failing inner handler still
/// leaves the attempted event in the log.
#[derive(Debug, Default)]
pub struct Recorder<H = NullHandler> {
    inner: H,
    events: Vec<MarkupEvent>,
}

impl<H: Handler> Recorder<H> {
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[MarkupEvent] {
        &self.events
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut H {
        &mut self.inner
    }

    pub fn into_parts(self) -> (H, Vec<MarkupEvent>) {
        (self.inner, self.events)
    }

    pub fn into_events(self) -> Vec<MarkupEvent> {
        self.events
    }
}

impl<H: Handler> Handler for Recorder<H> {
    fn start(&mut self, region: Region) -> Result<()> {
        self.events.push(MarkupEvent::start(region));
        self.inner.start(region)
    }

    fn end(&mut self, region: Region) -> Result<()> {
        self.events.push(MarkupEvent::end(region));
        self.inner.end(region)
    }

    fn substitute(&mut self, kind: SubstitutionKind, m: &InlineMatch<'_>) -> String {
        let replacement = self.inner.substitute(kind, m);
        self.events.push(MarkupEvent::Substitute {
            kind,
            matched: m.matched.to_string(),
            replacement: replacement.clone(),
        });
        replacement
    }

    fn feed(&mut self, text: &str) -> Result<()> {
        self.events.push(MarkupEvent::feed(text));
        self.inner.feed(text)
    }
}
