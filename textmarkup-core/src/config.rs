use crate::error::{MarkupError, Result};
use crate::types::SubstitutionKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Default value functions for serde
fn default_true() -> bool {
    true
}

pub fn default_document_title() -> String {
    "Document".to_string()
}

fn default_heading_max_chars() -> usize {
    70 // Longer single-line blocks read as paragraphs
}

fn default_filters() -> Vec<FilterConfig> {
    [
        SubstitutionKind::Emphasis,
        SubstitutionKind::Url,
        SubstitutionKind::Mail,
    ]
    .into_iter()
    .map(|kind| FilterConfig {
        kind,
        enabled: true,
    })
    .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Rendered HTML document
    #[default]
    Html,
    /// JSON log of every handler event
    Events,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupConfig {
    /// Text placed in the HTML `<title>` element
    #[serde(default = "default_document_title")]
    pub document_title: String,
    /// Maximum length (in characters) of a single-line block that still
    /// counts as a title or heading
    #[serde(default = "default_heading_max_chars")]
    pub heading_max_chars: usize,
    /// Filter pipeline - which inline substitutions run and in what order
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Filters to run, in order
    #[serde(default = "default_filters")]
    pub filters: Vec<FilterConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub kind: SubstitutionKind,
    /// Whether this filter is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            filters: default_filters(),
        }
    }
}

impl PipelineConfig {
    pub fn enabled_filters(&self) -> impl Iterator<Item = SubstitutionKind> + '_ {
        self.filters
            .iter()
            .filter(|filter| filter.enabled)
            .map(|filter| filter.kind)
    }

    pub fn disable_all(&mut self) {
        for filter in &mut self.filters {
            filter.enabled = false;
        }
    }
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            document_title: default_document_title(),
            heading_max_chars: default_heading_max_chars(),
            pipeline: PipelineConfig::default(),
            output_format: OutputFormat::default(),
        }
    }
}

impl MarkupConfig {
    /// Load config from a YAML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| MarkupError::ConfigRead {
            config_path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| MarkupError::ConfigParse {
            config_path: path.to_path_buf(),
            source,
        })
    }

    /// Load config with fallback to default
    pub fn load_with_fallback(path: Option<&Path>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|e| {
                log::warn!("⚠️  {e}; using defaults");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// `<config dir>/textmarkup/config.yaml`, when the platform has a config dir
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("textmarkup").join("config.yaml"))
    }

    /// Explicit path if given, else the per-user config file if it exists,
    /// else defaults.
    pub fn discover(explicit: Option<&Path>) -> Self {
        if explicit.is_some() {
            return Self::load_with_fallback(explicit);
        }
        match Self::default_config_path() {
            Some(path) if path.is_file() => {
                log::info!("📁 Loading config from: {}", path.display());
                Self::load_with_fallback(Some(&path))
            }
            _ => Self::default(),
        }
    }
}
