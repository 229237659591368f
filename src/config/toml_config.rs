use crate::config::{validate_sources, SheetsConfig};
use crate::domain::model::SheetAddressing;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PortfolioError, Result};
use crate::utils::validation::{validate_distinct_paths, validate_path, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub bundle: BundleConfig,
    pub snapshot: Option<SnapshotConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Directory with the bundled CSV files; ignored when `url` is set.
    #[serde(default = "default_bundle_path")]
    pub path: String,
    pub url: Option<String>,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            path: default_bundle_path(),
            url: None,
        }
    }
}

fn default_bundle_path() -> String {
    "./public/data".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    pub output_path: String,
}

impl TomlConfig {
    /// Loads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PortfolioError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML text after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PortfolioError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value. Unset variables become
    /// empty strings, which the resolver treats as "not configured".
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                std::env::var(&caps[1]).unwrap_or_default()
            })
            .into_owned()
    }

    pub fn snapshot_path(&self) -> Option<&str> {
        self.snapshot.as_ref().map(|s| s.output_path.as_str())
    }
}

impl ConfigProvider for TomlConfig {
    fn spreadsheet_id(&self) -> Option<&str> {
        self.sheets.spreadsheet_id()
    }

    fn api_key(&self) -> Option<&str> {
        self.sheets.api_key()
    }

    fn sheets_base_url(&self) -> &str {
        self.sheets.sheets_base_url()
    }

    fn api_base_url(&self) -> &str {
        self.sheets.api_base_url()
    }

    fn addressing(&self) -> SheetAddressing {
        self.sheets.addressing()
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.sheets.request_timeout()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_sources(self)?;
        match &self.bundle.url {
            Some(url) => validate_url("bundle.url", url)?,
            None => validate_path("bundle.path", &self.bundle.path)?,
        }
        if let Some(snapshot) = &self.snapshot {
            validate_path("snapshot.output_path", &snapshot.output_path)?;
            if self.bundle.url.is_none() {
                validate_distinct_paths(
                    "snapshot.output_path",
                    &snapshot.output_path,
                    "bundle.path",
                    &self.bundle.path,
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[sheets]
spreadsheet_id = "1padMyO8_TlahrywsMP8UOjeRCMpX2gvTkcOhjnVDgHU"
api_key = "abc123"
addressing = "gid"
timeout_seconds = 5

[bundle]
url = "https://portfolio.example.com/data"

[snapshot]
output_path = "./snapshot"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(
            config.spreadsheet_id(),
            Some("1padMyO8_TlahrywsMP8UOjeRCMpX2gvTkcOhjnVDgHU")
        );
        assert_eq!(config.addressing(), SheetAddressing::Gid);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.sheets_base_url(), crate::config::DEFAULT_SHEETS_BASE_URL);
        assert_eq!(config.snapshot_path(), Some("./snapshot"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.spreadsheet_id(), None);
        assert_eq!(config.bundle.path, "./public/data");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PORTFOLIO_TEST_SHEET_ID", "sheet_from_env");

        let toml_content = r#"
[sheets]
spreadsheet_id = "${PORTFOLIO_TEST_SHEET_ID}"
api_key = "${PORTFOLIO_TEST_UNSET_KEY}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.spreadsheet_id(), Some("sheet_from_env"));
        assert_eq!(config.api_key(), Some(""));

        std::env::remove_var("PORTFOLIO_TEST_SHEET_ID");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[sheets]
api_base_url = "invalid-url"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_snapshot_cannot_overwrite_local_bundle() {
        let toml_content = r#"
[bundle]
path = "./public/data"

[snapshot]
output_path = "public/data/"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(PortfolioError::InvalidConfigValueError { field, .. }) if field == "snapshot.output_path"
        ));

        let remote_bundle = r#"
[bundle]
path = "./public/data"
url = "https://example.com/data"

[snapshot]
output_path = "./public/data"
"#;
        let config = TomlConfig::from_toml_str(remote_bundle).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[sheets\nspreadsheet_id = 1").unwrap_err();
        assert!(matches!(err, PortfolioError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[bundle]
path = "./site/data"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.bundle.path, "./site/data");
    }
}
