//! Loading fill instructions from disk.
//!
//! A spec file is either a bare list of fields or a document carrying a
//! `config` block next to the `fields` list. Files ending in `.json` are
//! read as JSON; anything else as YAML.

use crate::error::{CliError, CliResult};
use antform::{FillConfig, FillSpec};
use serde::Deserialize;
use std::path::Path;

/// Encoding of a spec file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    /// serde_json
    Json,
    /// serde_yaml_ng
    Yaml,
}

impl SpecFormat {
    /// Pick the format from the file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Parsed spec file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecFile {
    /// Settings from the file, before command-line overrides
    pub config: FillConfig,
    /// Fields in fill order
    pub fields: Vec<FillSpec>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Fields(Vec<FillSpec>),
    Full {
        #[serde(default)]
        config: FillConfig,
        fields: Vec<FillSpec>,
    },
}

impl From<Document> for SpecFile {
    fn from(doc: Document) -> Self {
        match doc {
            Document::Fields(fields) => Self {
                config: FillConfig::default(),
                fields,
            },
            Document::Full { config, fields } => Self { config, fields },
        }
    }
}

impl SpecFile {
    /// Parse spec text
    pub fn parse(text: &str, format: SpecFormat) -> Result<Self, String> {
        let doc: Document = match format {
            SpecFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string())?,
            SpecFormat::Yaml => serde_yaml_ng::from_str(text).map_err(|e| e.to_string())?,
        };
        Ok(doc.into())
    }

    /// Read and parse a spec file
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, SpecFormat::from_path(path))
            .map_err(|message| CliError::spec_file(path.display(), message))
    }
}
