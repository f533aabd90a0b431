use crate::core::splitter::DEFAULT_EXTENSION;
use crate::domain::model::HeadingLevel;
use crate::utils::error::{Result, SplitError};
use crate::utils::validation::{validate_extension, validate_plain_name, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "split-markdown.toml";
pub const DEFAULT_OUTPUT_DIR: &str = "_split";

/// Optional defaults file. Every key may be overridden on the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub split: SplitSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplitSection {
    pub level: Option<HeadingLevel>,
    pub numbered: Option<bool>,
    pub extension: Option<String>,
    pub output_dir: Option<String>,
    pub strict_names: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    pub json: Option<bool>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SplitError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SplitError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// An explicit path must exist; otherwise `split-markdown.toml` in the
    /// working directory is used when present.
    pub fn discover(explicit: Option<&Path>) -> Result<Option<Self>> {
        let config = match explicit {
            Some(path) => Self::from_file(path).map(Some),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default).map(Some)
                } else {
                    Ok(None)
                }
            }
        }?;

        if let Some(config) = &config {
            config.validate()?;
        }
        Ok(config)
    }

    /// 替換環境變數 (例如 ${SPLIT_LEVEL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SplitError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn extension(&self) -> &str {
        self.split.extension.as_deref().unwrap_or(DEFAULT_EXTENSION)
    }

    pub fn output_dir(&self) -> &str {
        self.split.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.json.unwrap_or(false)
    }

    pub fn verbose(&self) -> bool {
        self.logging.verbose.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_extension("split.extension", self.extension())?;
        validate_plain_name("split.output_dir", self.output_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[split]
level = 2
numbered = true
extension = "markdown"
output_dir = "chapters"
strict_names = true

[logging]
json = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.split.level.map(HeadingLevel::get), Some(2));
        assert_eq!(config.split.numbered, Some(true));
        assert_eq!(config.extension(), "markdown");
        assert_eq!(config.output_dir(), "chapters");
        assert!(config.json_logs());
        assert!(!config.verbose());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.split.level.is_none());
        assert_eq!(config.extension(), "md");
        assert_eq!(config.output_dir(), "_split");
    }

    #[test]
    fn test_out_of_range_level_is_rejected() {
        let err = TomlConfig::from_toml_str("[split]\nlevel = 7\n").unwrap_err();
        assert!(matches!(err, SplitError::ConfigError { .. }));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(TomlConfig::from_toml_str("[split]\nlevle = 2\n").is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SPLIT_MARKDOWN_TEST_DIR", "from_env");

        let config =
            TomlConfig::from_toml_str("[split]\noutput_dir = \"${SPLIT_MARKDOWN_TEST_DIR}\"\n")
                .unwrap();
        assert_eq!(config.output_dir(), "from_env");

        std::env::remove_var("SPLIT_MARKDOWN_TEST_DIR");
    }

    #[test]
    fn test_invalid_output_dir_fails_validation() {
        let config = TomlConfig::from_toml_str("[split]\noutput_dir = \"../out\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_discover_validates_explicit_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[split]\noutput_dir = \"a/b\"\n")
            .unwrap();

        let err = TomlConfig::discover(Some(temp_file.path())).unwrap_err();
        assert!(err.to_string().contains("split.output_dir"));

        let mut good = NamedTempFile::new().unwrap();
        good.write_all(b"[split]\nextension = \"txt\"\n").unwrap();
        let config = TomlConfig::discover(Some(good.path())).unwrap().unwrap();
        assert_eq!(config.extension(), "txt");
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[split]\nlevel = 3\n").unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.split.level.map(HeadingLevel::get), Some(3));
    }
}
