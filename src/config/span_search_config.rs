use std::path::Path;

use log::error;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::common::constants::{
    DEFAULT_BOOST, DEFAULT_MAX_CLAUSE_COUNT, DEFAULT_TOP_K, SPAN_SEARCH_CONFIG_FILE,
};
use crate::common::errors::SpanIndexError;
use crate::common::file_operations::{atomic_save_json, read_json, FileOperationError};

fn default_boost() -> f32 {
    DEFAULT_BOOST
}

fn default_max_clause_count() -> usize {
    DEFAULT_MAX_CLAUSE_COUNT
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

/// Parameters a span search runs with.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Copy, TypedBuilder)]
#[serde(rename_all = "snake_case")]
pub struct SpanSearchConfig {
    /// Query boost folded into the query weight.
    #[serde(default = "default_boost")]
    #[builder(default = DEFAULT_BOOST)]
    pub boost: f32,

    /// Upper bound on the clauses of a single Or/Near node.
    #[serde(default = "default_max_clause_count")]
    #[builder(default = DEFAULT_MAX_CLAUSE_COUNT)]
    pub max_clause_count: usize,

    /// Number of hits a search returns.
    #[serde(default = "default_top_k")]
    #[builder(default = DEFAULT_TOP_K)]
    pub top_k: usize,
}

impl Default for SpanSearchConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SpanSearchConfig {
    pub fn new(
        boost: f32,
        max_clause_count: usize,
        top_k: usize,
    ) -> Result<Self, ValidationErrors> {
        let config = Self { boost, max_clause_count, top_k };
        config.validate()?;
        Ok(config)
    }

    pub fn load(config_dir: &Path) -> Result<Self, SpanIndexError> {
        let file_path = config_dir.join(SPAN_SEARCH_CONFIG_FILE);
        let config: SpanSearchConfig = read_json(&file_path)?;
        if let Err(e) = config.validate() {
            error!("[SpanSearchConfig] invalid config loaded from {:?}: {}", file_path, e);
            return Err(e.into());
        }
        Ok(config)
    }

    pub fn save(&self, config_dir: &Path) -> Result<(), FileOperationError> {
        let file_path = config_dir.join(SPAN_SEARCH_CONFIG_FILE);
        if !config_dir.exists() {
            std::fs::create_dir_all(config_dir).map_err(FileOperationError::IoError)?;
        }
        atomic_save_json(&file_path, self)
    }
}

impl Validate for SpanSearchConfig {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if !(self.boost.is_finite() && self.boost > 0.0) {
            errors.add("boost", ValidationError::new("must be a positive finite number"));
        }
        if self.max_clause_count == 0 {
            errors.add("max_clause_count", ValidationError::new("must be at least 1"));
        }
        if self.top_k == 0 {
            errors.add("top_k", ValidationError::new("must be at least 1"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_config() {
        let empty_config = "{}";
        let empty_config: SpanSearchConfig = serde_json::from_str(empty_config).expect("");
        assert_eq!(empty_config, SpanSearchConfig::default());

        let config = "{\"boost\":2.5,\"top_k\":3}";
        let config: SpanSearchConfig = serde_json::from_str(config).expect("");
        assert_eq!(config, SpanSearchConfig::builder().boost(2.5).top_k(3).build());
    }

    #[test]
    fn test_load_and_save() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let config_dir = temp_dir.path().join("nested");

        let config = SpanSearchConfig::new(1.5, 16, 4).expect("valid");
        config.save(&config_dir).expect("Failed to save config");

        let loaded_config = SpanSearchConfig::load(&config_dir).expect("Failed to load config");
        assert_eq!(config, loaded_config);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let errors = SpanSearchConfig::new(0.0, 0, 1).expect_err("invalid");
        let fields = errors.field_errors();
        assert!(fields.contains_key("boost"));
        assert!(fields.contains_key("max_clause_count"));
        assert!(!fields.contains_key("top_k"));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let file_path = temp_dir.path().join(SPAN_SEARCH_CONFIG_FILE);
        std::fs::write(file_path, "{\"top_k\":0}").expect("write");
        let res = SpanSearchConfig::load(temp_dir.path());
        assert!(matches!(res, Err(SpanIndexError::ValidationError(_))));
    }
}
