use serde::{Deserialize, Serialize};
use std::fmt;

// ===== STRUCTURAL REGIONS =====
// A region is a named span bounded by start/end events. The names are the
// wire names handlers and event logs see.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Document,
    Title,
    Heading,
    Paragraph,
    #[serde(rename = "ulist")]
    UList,
    #[serde(rename = "listitem")]
    ListItem,
}

impl Region {
    pub fn name(&self) -> &'static str {
        match self {
            Region::Document => "document",
            Region::Title => "title",
            Region::Heading => "heading",
            Region::Paragraph => "paragraph",
            Region::UList => "ulist",
            Region::ListItem => "listitem",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ===== INLINE SUBSTITUTIONS =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubstitutionKind {
    Emphasis,
    Url,
    Mail,
}

impl SubstitutionKind {
    pub fn name(&self) -> &'static str {
        match self {
            SubstitutionKind::Emphasis => "emphasis",
            SubstitutionKind::Url => "url",
            SubstitutionKind::Mail => "mail",
        }
    }
}

impl fmt::Display for SubstitutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One pattern match handed to a handler's substitution.
///
/// `matched` is the whole span being replaced; `capture` is the first capture
/// group (the text between `*` markers for emphasis, the full address for
/// url and mail).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineMatch<'t> {
    pub matched: &'t str,
    pub capture: &'t str,
}

impl<'t> InlineMatch<'t> {
    pub fn new(matched: &'t str, capture: &'t str) -> Self {
        Self { matched, capture }
    }

    pub fn from_captures(captures: &regex::Captures<'t>) -> Self {
        let matched = captures.get(0).map_or("", |m| m.as_str());
        let capture = captures.get(1).map_or(matched, |m| m.as_str());
        Self { matched, capture }
    }
}

// ===== EVENTS =====

/// Everything a handler can observe, as a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum MarkupEvent {
    Start { region: Region },
    End { region: Region },
    Substitute {
        kind: SubstitutionKind,
        matched: String,
        replacement: String,
    },
    Feed { text: String },
}

impl MarkupEvent {
    pub fn start(region: Region) -> Self {
        MarkupEvent::Start { region }
    }

    pub fn end(region: Region) -> Self {
        MarkupEvent::End { region }
    }

    pub fn feed(text: impl Into<String>) -> Self {
        MarkupEvent::Feed { text: text.into() }
    }
}

// ===== PIPELINE CAPTURE =====

/// Captured intermediate outputs from one parse.
/// Used for testing and diagnostics; lets you inspect each boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStages {
    /// Blocks exactly as the splitter produced them
    pub blocks: Vec<String>,
    /// Blocks after the filter chain ran
    pub filtered_blocks: Vec<String>,
    /// Region that claimed each block, in block order
    pub classifications: Vec<Region>,
    /// Every event the handler saw, document wrapper included
    pub events: Vec<MarkupEvent>,
}

impl ParseStages {
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}
