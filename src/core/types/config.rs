use std::fs;

use serde_json::Value;

use crate::types::{AppError, AppResult, Category};

/// Grading configuration bundled into the binary, used when the caller
/// provides none.
const DEFAULT_CONFIG: &str = include_str!("../../../default.json");

/// Syntactically validated grading configuration.
///
/// The weight and threshold semantics live with the downstream grader;
/// this pipeline only checks that the value is well-formed JSON and hands
/// the per-category sections through to the scores untouched.
#[derive(Debug, Clone)]
pub struct GradingConfig {
    value: Value,
}

impl GradingConfig {
    /// Resolve the configuration argument: a value containing a path
    /// separator is read from disk, anything else is taken as literal JSON.
    pub fn from_arg(input: &str) -> AppResult<Self> {
        if input.contains('/') {
            let contents = fs::read_to_string(input).map_err(|e| {
                AppError::Config(format!("Config file could not be read ({input}): {e}"))
            })?;
            Self::from_literal(&contents)
        } else {
            Self::from_literal(input)
        }
    }

    pub fn bundled_default() -> AppResult<Self> {
        Self::from_literal(DEFAULT_CONFIG)
    }

    fn from_literal(input: &str) -> AppResult<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| AppError::Config(format!("Config is not a valid JSON: {e}")))?;
        if !value.is_object() && !value.is_array() {
            return Err(AppError::Config("Config is not a valid JSON".to_string()));
        }
        Ok(Self { value })
    }

    /// The configuration section for one scoring category; a section the
    /// config does not carry comes back as null.
    pub fn section_for(&self, category: Category) -> Value {
        let key = match category {
            Category::Analysis => "analysis",
            Category::Test => "tests",
            Category::Coverage => "coverage",
            Category::Mutation => "pit",
        };
        self.value.get(key).cloned().unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::types::AppError;

    #[test]
    fn literal_json_object_is_accepted() {
        let config = GradingConfig::from_arg(r#"{"tests": {"maxScore": 50}}"#)
            .expect("literal object should parse");

        assert_eq!(config.section_for(Category::Test)["maxScore"], 50);
        assert!(config.section_for(Category::Coverage).is_null());
    }

    #[test]
    fn literal_json_array_is_accepted() {
        assert!(GradingConfig::from_arg(r#"[{"maxScore": 50}]"#).is_ok());
    }

    #[test]
    fn scalar_json_is_rejected() {
        let result = GradingConfig::from_arg("42");

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let result = GradingConfig::from_arg("{not json");

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn argument_with_a_path_separator_is_read_from_disk() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        write!(file, r#"{{"analysis": {{"maxScore": 80}}}}"#).expect("Failed to write config");

        let config = GradingConfig::from_arg(&file.path().to_string_lossy())
            .expect("config file should parse");

        assert_eq!(config.section_for(Category::Analysis)["maxScore"], 80);
    }

    #[test]
    fn missing_config_file_is_a_config_error() {
        let result = GradingConfig::from_arg("does/not/exist.json");

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn bundled_default_parses_and_covers_all_categories() {
        let config = GradingConfig::bundled_default().expect("bundled default is valid");

        assert!(config.section_for(Category::Analysis).is_object());
        assert!(config.section_for(Category::Test).is_object());
        assert!(config.section_for(Category::Coverage).is_object());
        assert!(config.section_for(Category::Mutation).is_object());
    }
}
