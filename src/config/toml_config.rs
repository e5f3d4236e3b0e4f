use crate::domain::model::OutputFiles;
use crate::utils::error::{NectaError, Result};
use crate::utils::validation::{validate_path, validate_url_template, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static ENV_VAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("pattern should compile"));

/// Optional settings file. Every section and key may be omitted.
///
/// ```toml
/// [source]
/// url_template = "https://matokeo.necta.go.tz/results/2025/csee/results/{centre}.htm"
/// timeout_seconds = 30
///
/// [load]
/// records_file = "results.json"
/// summary_file = "subjects.csv"
/// division_file = "divisions.csv"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub source: Option<SourceSection>,
    pub load: Option<LoadSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSection {
    pub url_template: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadSection {
    pub records_file: Option<String>,
    pub summary_file: Option<String>,
    pub division_file: Option<String>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(NectaError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        let config: FileConfig =
            toml::from_str(&processed).map_err(|e| NectaError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn url_template(&self) -> Option<String> {
        self.source.as_ref().and_then(|s| s.url_template.clone())
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.source.as_ref().and_then(|s| s.timeout_seconds)
    }

    pub fn output_files(&self) -> OutputFiles {
        let mut files = OutputFiles::default();
        if let Some(load) = &self.load {
            if let Some(name) = &load.records_file {
                files.records = name.clone();
            }
            if let Some(name) = &load.summary_file {
                files.summary = name.clone();
            }
            if let Some(name) = &load.division_file {
                files.divisions = name.clone();
            }
        }
        files
    }
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        if let Some(template) = self.url_template() {
            validate_url_template("source.url_template", &template)?;
        }
        if self.timeout_seconds() == Some(0) {
            return Err(NectaError::InvalidConfigValueError {
                field: "source.timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be at least 1 second".to_string(),
            });
        }
        let files = self.output_files();
        validate_path("load.records_file", &files.records)?;
        validate_path("load.summary_file", &files.summary)?;
        validate_path("load.division_file", &files.divisions)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = FileConfig::from_toml_str("").unwrap();
        assert_eq!(config.url_template(), None);
        assert_eq!(config.output_files(), OutputFiles::default());
    }

    #[test]
    fn test_parse_sections() {
        let toml_content = r#"
[source]
url_template = "https://matokeo.necta.go.tz/results/2024/csee/results/{centre}.htm"
timeout_seconds = 20

[load]
summary_file = "subjects.csv"
"#;

        let config = FileConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.timeout_seconds(), Some(20));
        assert!(config.url_template().unwrap().contains("2024/csee"));

        let files = config.output_files();
        assert_eq!(files.summary, "subjects.csv");
        assert_eq!(files.records, "necta_results.json");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("NECTA_TEST_YEAR", "2023");

        let toml_content = r#"
[source]
url_template = "https://matokeo.necta.go.tz/results/${NECTA_TEST_YEAR}/dsee/results/{centre}.htm"
"#;

        let config = FileConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.url_template().unwrap(),
            "https://matokeo.necta.go.tz/results/2023/dsee/results/{centre}.htm"
        );

        std::env::remove_var("NECTA_TEST_YEAR");
    }

    #[test]
    fn test_template_without_placeholder_rejected() {
        let toml_content = r#"
[source]
url_template = "https://matokeo.necta.go.tz/results/507.htm"
"#;
        assert!(FileConfig::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(FileConfig::from_toml_str("[source]\ntimeout_seconds = 0\n").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[load]\ndivision_file = \"divisions.csv\"\n")
            .unwrap();

        let config = FileConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_files().divisions, "divisions.csv");
    }
}
