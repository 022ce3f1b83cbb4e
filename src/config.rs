use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::{
    CleaningOptions, Result, DEFAULT_CLEANED_PATH, DEFAULT_RAW_PATH, DEFAULT_REPORT_DIR,
};

/// Input and output locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Raw file, or a directory whose first CSV is used
    pub raw: PathBuf,
    pub cleaned: PathBuf,
    pub report_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw: PathBuf::from(DEFAULT_RAW_PATH),
            cleaned: PathBuf::from(DEFAULT_CLEANED_PATH),
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
        }
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub cleaning: CleaningOptions,
}

impl Config {
    /// Read a TOML config file; omitted keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.cleaning.validate()?;
        Ok(config)
    }
}

impl CleaningOptions {
    /// Reject settings no stage can work with
    pub fn validate(&self) -> Result<()> {
        if !(self.min_age <= self.max_age) {
            return Err(Error::Config(format!(
                "min_age ({}) exceeds max_age ({})",
                self.min_age, self.max_age
            )));
        }
        if self.min_phone_digits > self.max_phone_digits {
            return Err(Error::Config(format!(
                "min_phone_digits ({}) exceeds max_phone_digits ({})",
                self.min_phone_digits, self.max_phone_digits
            )));
        }
        if !(0.0..=1.0).contains(&self.numeric_threshold) {
            return Err(Error::Config(format!(
                "numeric_threshold must be within [0, 1], got {}",
                self.numeric_threshold
            )));
        }
        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier < 0.0 {
            return Err(Error::Config(format!(
                "iqr_multiplier must be a non-negative number, got {}",
                self.iqr_multiplier
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.paths.report_dir, PathBuf::from("reports"));
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_toml(
            r#"
            [paths]
            raw = "input/patients.csv"

            [cleaning]
            max_age = 110
            numeric_threshold = 0.8
            sentinel_tokens = ["", "n/a", "missing"]

            [cleaning.role_patterns]
            phone = ["phone", "tel"]

            [cleaning.role_columns]
            age = ["years"]
            "#,
        )
        .unwrap();

        assert_eq!(config.paths.raw, PathBuf::from("input/patients.csv"));
        assert_eq!(config.paths.cleaned, PathBuf::from(DEFAULT_CLEANED_PATH));
        assert_eq!(config.cleaning.max_age, 110.0);
        assert_eq!(config.cleaning.min_age, 0.0);
        assert_eq!(config.cleaning.numeric_threshold, 0.8);
        assert_eq!(config.cleaning.sentinel_tokens.len(), 3);
        assert_eq!(
            config.cleaning.role_patterns.get(Role::Phone),
            &["phone".to_string(), "tel".to_string()]
        );
        assert_eq!(
            config.cleaning.role_patterns.get(Role::Gender),
            &["gender".to_string(), "sex".to_string()]
        );
        assert_eq!(
            config.cleaning.role_columns.get(Role::Age),
            Some(&["years".to_string()][..])
        );
        assert_eq!(config.cleaning.role_columns.get(Role::Phone), None);
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let err = Config::from_toml("[cleaning]\nmin_age = 50\nmax_age = 10\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = Config::from_toml("[cleaning]\nnumeric_threshold = 1.5\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = Config::from_toml("[cleaning\n").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        write!(file, "[cleaning]\ntext_fill = \"n.k.\"\n").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.cleaning.text_fill, "n.k.");
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = Config::load(Path::new("/nonexistent/clean.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/clean.toml"));
    }
}
