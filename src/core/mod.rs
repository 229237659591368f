pub mod fallback;
pub mod http;
pub mod kinds;
pub mod normalize;
pub mod parser;
pub mod resolver;
pub mod snapshot;

pub use crate::domain::model::{
    DownloadRecord, ExperienceRecord, Metrics, ProjectRecord, RawRow, SheetAddressing, Skill,
};
pub use crate::domain::ports::{BundleStore, ConfigProvider, RecordKind};
pub use crate::utils::error::Result;
