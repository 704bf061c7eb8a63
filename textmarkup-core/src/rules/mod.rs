// Block classification - delegates to semantic sub-modules
// This file coordinates the rule system but actual implementations are in:
// - engine.rs: Rule trait, RuleSet dispatch, document scope and debug tracing
// - block_rules.rs: title, heading, list item and the paragraph catch-all
// - list_detection.rs: unordered list boundaries

pub mod block_rules;
pub mod engine;
pub mod list_detection;

pub use block_rules::{has_heading_shape, HeadingRule, ListItemRule, ParagraphRule, TitleRule};
pub use engine::*;
pub use list_detection::{is_list_item, UnorderedListRule};
