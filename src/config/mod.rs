pub mod bundle;
pub mod toml_config;

use crate::domain::model::SheetAddressing;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_spreadsheet_id, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_SHEETS_BASE_URL: &str = "https://docs.google.com/spreadsheets/d";
pub const DEFAULT_API_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Where sheet data comes from. Blank ids and keys count as unset.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    pub spreadsheet_id: Option<String>,
    pub api_key: Option<String>,
    pub sheets_base_url: String,
    pub api_base_url: String,
    pub addressing: SheetAddressing,
    /// Per-request timeout; `0` disables it.
    pub timeout_seconds: u64,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            api_key: None,
            sheets_base_url: DEFAULT_SHEETS_BASE_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            addressing: SheetAddressing::Name,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl SheetsConfig {
    pub fn with_spreadsheet_id(mut self, id: impl Into<String>) -> Self {
        self.spreadsheet_id = Some(id.into());
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_sheets_base_url(mut self, url: impl Into<String>) -> Self {
        self.sheets_base_url = url.into();
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_addressing(mut self, addressing: SheetAddressing) -> Self {
        self.addressing = addressing;
        self
    }

    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

impl fmt::Debug for SheetsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetsConfig")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("sheets_base_url", &self.sheets_base_url)
            .field("api_base_url", &self.api_base_url)
            .field("addressing", &self.addressing)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

fn timeout_from_seconds(seconds: u64) -> Option<Duration> {
    (seconds > 0).then(|| Duration::from_secs(seconds))
}

impl ConfigProvider for SheetsConfig {
    fn spreadsheet_id(&self) -> Option<&str> {
        self.spreadsheet_id.as_deref()
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn sheets_base_url(&self) -> &str {
        &self.sheets_base_url
    }

    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn addressing(&self) -> SheetAddressing {
        self.addressing
    }

    fn request_timeout(&self) -> Option<Duration> {
        timeout_from_seconds(self.timeout_seconds)
    }
}

/// Checks the settings every config provider shares.
pub fn validate_sources<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_url("sheets_base_url", config.sheets_base_url())?;
    validate_url("api_base_url", config.api_base_url())?;

    if let Some(id) = config.spreadsheet_id().map(str::trim).filter(|id| !id.is_empty()) {
        validate_spreadsheet_id("spreadsheet_id", id)?;
    }

    let timeout = config.request_timeout().map(|d| d.as_secs()).unwrap_or(0);
    validate_range("timeout_seconds", timeout, 0, MAX_TIMEOUT_SECONDS)?;
    Ok(())
}

impl Validate for SheetsConfig {
    fn validate(&self) -> Result<()> {
        validate_sources(self)
    }
}

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

#[cfg(feature = "cli")]
mod cli {
    use super::*;
    use crate::utils::validation::{validate_distinct_paths, validate_path};
    use crate::app::commands::Selection;
    use clap::{Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "portfolio-sheets")]
    #[command(about = "Resolve portfolio data from a spreadsheet with local fallbacks")]
    pub struct CliConfig {
        #[arg(long, env = "SPREADSHEET_ID")]
        pub spreadsheet_id: Option<String>,

        #[arg(long, env = "GOOGLE_SHEETS_API_KEY", hide_env_values = true)]
        pub api_key: Option<String>,

        #[arg(long, default_value = DEFAULT_SHEETS_BASE_URL)]
        pub sheets_base_url: String,

        #[arg(long, default_value = DEFAULT_API_BASE_URL)]
        pub api_base_url: String,

        #[arg(long, value_enum, default_value_t = SheetAddressing::Name)]
        pub addressing: SheetAddressing,

        /// Directory holding the bundled CSV files
        #[arg(long, default_value = "./public/data")]
        pub bundle_path: String,

        /// Serve bundled CSV files from this URL instead of --bundle-path
        #[arg(long)]
        pub bundle_url: Option<String>,

        /// Per-request timeout in seconds, 0 for none
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
        pub timeout_secs: u64,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[command(subcommand)]
        pub command: Option<Command>,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Print resolved records as JSON
        Show {
            #[arg(long, value_enum, default_value_t = Selection::All)]
            kind: Selection,
        },
        /// Write resolved records out as bundle CSV files
        Snapshot {
            #[arg(long, default_value = "./snapshot")]
            out: String,
        },
        /// Print the source order without fetching anything
        Plan,
    }

    impl CliConfig {
        pub fn command(&self) -> Command {
            self.command
                .clone()
                .unwrap_or(Command::Show { kind: Selection::All })
        }
    }

    impl ConfigProvider for CliConfig {
        fn spreadsheet_id(&self) -> Option<&str> {
            self.spreadsheet_id.as_deref()
        }

        fn api_key(&self) -> Option<&str> {
            self.api_key.as_deref()
        }

        fn sheets_base_url(&self) -> &str {
            &self.sheets_base_url
        }

        fn api_base_url(&self) -> &str {
            &self.api_base_url
        }

        fn addressing(&self) -> SheetAddressing {
            self.addressing
        }

        fn request_timeout(&self) -> Option<Duration> {
            timeout_from_seconds(self.timeout_secs)
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_sources(self)?;
            match &self.bundle_url {
                Some(url) => validate_url("bundle_url", url)?,
                None => validate_path("bundle_path", &self.bundle_path)?,
            }
            if let Some(Command::Snapshot { out }) = &self.command {
                validate_path("out", out)?;
                if self.bundle_url.is_none() {
                    validate_distinct_paths("out", out, "bundle_path", &self.bundle_path)?;
                }
            }
            Ok(())
        }
    }

}
