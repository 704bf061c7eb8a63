// Inline filters - rewrite a block's text before it is classified.
//
// Each filter is a stateless substitution; the chain folds them left to right
// so every filter sees the previous filter's output.

pub mod inline_patterns;

pub use inline_patterns::RegexFilter;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::handlers::Handler;
use crate::types::SubstitutionKind;

pub trait Filter {
    fn kind(&self) -> SubstitutionKind;
    fn apply(&self, text: &str, handler: &mut dyn Handler) -> String;
}

#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emphasis, then url, then mail
    pub fn standard() -> Result<Self> {
        Self::from_config(&PipelineConfig::default())
    }

    pub fn from_config(pipeline: &PipelineConfig) -> Result<Self> {
        let mut chain = Self::new();
        for kind in pipeline.enabled_filters() {
            chain.add_filter(Box::new(RegexFilter::for_kind(kind)?));
        }
        Ok(chain)
    }

    pub fn add_filter(&mut self, filter: Box<dyn Filter>) {
        self.filters.push(filter);
    }

    /// Removes every filter of `kind`; returns whether any was present.
    pub fn remove_filter(&mut self, kind: SubstitutionKind) -> bool {
        let before = self.filters.len();
        self.filters.retain(|filter| filter.kind() != kind);
        self.filters.len() != before
    }

    pub fn kinds(&self) -> Vec<SubstitutionKind> {
        self.filters.iter().map(|filter| filter.kind()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn apply(&self, text: &str, handler: &mut dyn Handler) -> String {
        self.filters
            .iter()
            .fold(text.to_string(), |text, filter| filter.apply(&text, &mut *handler))
    }
}
