// Text Markup Core Library
//
// Converts plain text into marked-up output: blocks are split from the input,
// rewritten by inline filters, classified by an ordered rule set and emitted
// as events to a pluggable handler.

pub mod config;
pub mod error;
pub mod filters;
pub mod handlers;
pub mod preprocessors;
pub mod processor;
pub mod rules;
pub mod types;

// Re-export main types and functions for easy use
pub use config::{MarkupConfig, OutputFormat};
pub use error::{ConfigurationError, MarkupError, Result};
pub use filters::{Filter, FilterChain, RegexFilter};
pub use handlers::{Handler, HtmlRenderer, NullHandler, Recorder};
pub use preprocessors::{blocks, blocks_from_str, Blocks};
pub use processor::{markup_to_html, Parser, StepProfiler};
pub use rules::{Claim, ClassifierState, DebugConfig, Rule, RuleSet};
pub use types::*;
