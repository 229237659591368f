pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::bundle::{HttpBundle, LocalBundle};
pub use crate::config::{toml_config::TomlConfig, SheetsConfig};
pub use crate::core::kinds::{Downloads, Experiences, Projects, Skills};
pub use crate::core::resolver::{Portfolio, PortfolioSource, Resolved, Source, SourcePlan};
pub use crate::domain::model::{DownloadRecord, ExperienceRecord, Metrics, ProjectRecord, RawRow, Skill};
pub use crate::utils::error::{PortfolioError, Result};
