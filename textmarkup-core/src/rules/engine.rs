use crate::config::MarkupConfig;
use crate::error::{ConfigurationError, Result};
use crate::handlers::Handler;
use crate::types::Region;
use regex::Regex;

use super::block_rules::{HeadingRule, ListItemRule, ParagraphRule, TitleRule};
use super::list_detection::UnorderedListRule;

/// Outcome of a rule's action for one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    /// The block is classified; no later rule sees it
    Claimed,
    /// Observed only; evaluation continues with the next rule
    Continue,
}

/// Cross-block state of one parse.
///
/// Owned by the `RuleSet` and reset at the start of every parse, so one rule
/// set can be reused for several documents (but not for two at once).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierState {
    /// True until the title rule has looked at a block. Leading blocks
    /// claimed before the title rule is reached do not clear it.
    pub first_block: bool,
    /// True while inside a run of list-item blocks
    pub inside_list: bool,
    pub blocks_seen: usize,
}

impl Default for ClassifierState {
    fn default() -> Self {
        Self {
            first_block: true,
            inside_list: false,
            blocks_seen: 0,
        }
    }
}

pub trait Rule {
    fn region(&self) -> Region;

    fn name(&self) -> &str;

    fn matches(&self, block: &str, state: &ClassifierState) -> bool;

    /// Runs after `matches` for every block this rule is asked about,
    /// whether or not it matched.
    fn evaluated(&self, _state: &mut ClassifierState) {}

    /// Default action: wrap the block in this rule's region and claim it.
    fn apply(
        &self,
        block: &str,
        _state: &mut ClassifierState,
        handler: &mut dyn Handler,
    ) -> Result<Claim> {
        emit_region(self.region(), block, handler)
    }

    /// Called once after the last block, before the document closes.
    fn finish(&self, _state: &mut ClassifierState, _handler: &mut dyn Handler) -> Result<()> {
        Ok(())
    }

    /// A catch-all matches every block and always claims it.
    fn is_catch_all(&self) -> bool {
        false
    }
}

pub fn emit_region(region: Region, text: &str, handler: &mut dyn Handler) -> Result<Claim> {
    handler.start(region)?;
    handler.feed(text)?;
    handler.end(region)?;
    Ok(Claim::Claimed)
}

/// Ordered rules plus the state they share.
///
/// Per block, rules are tried top to bottom; the first rule whose action
/// claims the block ends evaluation. Observer rules return `Continue` and let
/// the block fall through.
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
    state: ClassifierState,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unordered list (observer), list item, title, heading, paragraph.
    pub fn standard(config: &MarkupConfig) -> Self {
        let mut rules = Self::new();
        rules.add_rule(Box::new(UnorderedListRule));
        rules.add_rule(Box::new(ListItemRule));
        rules.add_rule(Box::new(TitleRule::new(config.heading_max_chars)));
        rules.add_rule(Box::new(HeadingRule::new(config.heading_max_chars)));
        rules.add_rule(Box::new(ParagraphRule));
        rules
    }

    pub fn add_rule(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Removes every rule for `region`; returns whether any was present.
    pub fn remove_rule(&mut self, region: Region) -> bool {
        let before = self.rules.len();
        self.rules.retain(|rule| rule.region() != region);
        self.rules.len() != before
    }

    pub fn regions(&self) -> Vec<Region> {
        self.rules.iter().map(|rule| rule.region()).collect()
    }

    pub fn state(&self) -> &ClassifierState {
        &self.state
    }

    /// Every block must be classifiable: the set needs a catch-all, last.
    pub fn validate(&self) -> Result<()> {
        let last = self.rules.last().ok_or(ConfigurationError::EmptyRuleSet)?;
        if !last.is_catch_all() {
            return Err(ConfigurationError::MissingCatchAll(last.region()).into());
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        self.state = ClassifierState::default();
    }

    /// Classify one block, emitting its events. Returns the claiming region.
    pub fn dispatch(&mut self, block: &str, handler: &mut dyn Handler) -> Result<Region> {
        let mut claimed = None;
        for rule in &self.rules {
            let matched = rule.matches(block, &self.state);
            rule.evaluated(&mut self.state);
            if !matched {
                continue;
            }
            if rule.apply(block, &mut self.state, handler)? == Claim::Claimed {
                log::trace!("rule '{}' claimed block {}", rule.name(), self.state.blocks_seen);
                claimed = Some(rule.region());
                break;
            }
        }

        self.state.blocks_seen += 1;

        claimed.ok_or_else(|| ConfigurationError::Unclassified(block.to_string()).into())
    }

    /// Let stateful rules close whatever they still have open.
    pub fn finish(&mut self, handler: &mut dyn Handler) -> Result<()> {
        for rule in &self.rules {
            rule.finish(&mut self.state, handler)?;
        }
        Ok(())
    }
}

/// Guard for the document-level region.
///
/// `open` emits the document start; `close` emits the end. If the guard is
/// dropped while still open (an error returned through `?`, or a panic) the
/// end event is emitted anyway and any failure doing so is logged.
pub struct DocumentScope<'h> {
    handler: &'h mut dyn Handler,
    open: bool,
}

impl<'h> DocumentScope<'h> {
    pub fn open(handler: &'h mut dyn Handler) -> Result<Self> {
        handler.start(Region::Document)?;
        Ok(Self {
            handler,
            open: true,
        })
    }

    pub fn handler(&mut self) -> &mut dyn Handler {
        &mut *self.handler
    }

    pub fn close(mut self) -> Result<()> {
        self.open = false;
        self.handler.end(Region::Document)
    }
}

impl Drop for DocumentScope<'_> {
    fn drop(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        if let Err(e) = self.handler.end(Region::Document) {
            log::warn!("⚠️  Failed to close document after an error: {e}");
        }
    }
}

// Debug configuration for block tracing
#[derive(Debug, Clone)]
enum DebugPattern {
    Regex(Regex),
    Substring(String),
}

impl DebugPattern {
    fn is_match(&self, text: &str) -> bool {
        match self {
            DebugPattern::Regex(regex) => regex.is_match(text),
            DebugPattern::Substring(needle) => text.contains(needle.as_str()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    filter_patterns: Vec<DebugPattern>,
}

impl DebugConfig {
    /// Patterns are tried as regexes first, falling back to plain substring
    pub fn new(enabled: bool, filter_patterns: Vec<String>) -> Self {
        let filter_patterns = filter_patterns
            .into_iter()
            .map(|pattern| match Regex::new(&pattern) {
                Ok(regex) => DebugPattern::Regex(regex),
                Err(_) => DebugPattern::Substring(pattern),
            })
            .collect();
        Self {
            enabled,
            filter_patterns,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            filter_patterns: Vec::new(),
        }
    }

    pub fn matches(&self, block: &str) -> bool {
        self.enabled && self.filter_patterns.iter().any(|pattern| pattern.is_match(block))
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Debug utility function to trace blocks through classification
pub fn debug_block(index: usize, block: &str, region: Region, debug_config: &DebugConfig) {
    if !debug_config.matches(block) {
        return;
    }

    let preview = if block.chars().count() > 50 {
        format!("{}...", block.chars().take(47).collect::<String>())
    } else {
        block.to_string()
    };
    log::debug!("🔍 Block {index}: {preview:?} -> {region}");
}
