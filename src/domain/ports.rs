use crate::domain::model::{RawRow, SheetAddressing};
use crate::utils::error::Result;
use serde::Serialize;
use std::time::Duration;

/// Read-only access to the CSV documents shipped alongside a deployment.
pub trait BundleStore: Send + Sync {
    fn read_document(&self, path: &str) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn spreadsheet_id(&self) -> Option<&str>;
    fn api_key(&self) -> Option<&str>;
    fn sheets_base_url(&self) -> &str;
    fn api_base_url(&self) -> &str;
    fn addressing(&self) -> SheetAddressing;
    /// `None` means requests may wait indefinitely.
    fn request_timeout(&self) -> Option<Duration>;
}

/// Everything the fallback chain needs to know about one record kind.
pub trait RecordKind: Send + Sync + 'static {
    type Record: Clone + Serialize + Send + Sync + 'static;

    /// Short lowercase name used in logs and CLI output.
    const NAME: &'static str;
    /// Tab name for the public CSV export.
    const SHEET_NAME: &'static str;
    /// Tab index for the gid-addressed export.
    const SHEET_GID: u32;
    /// A1 range for the values API.
    const API_RANGE: &'static str;
    /// File name inside the bundle.
    const BUNDLE_FILE: &'static str;
    /// Header row written by snapshots.
    const HEADERS: &'static [&'static str];

    /// Builds a typed record, or `None` when required fields are missing.
    fn from_row(row: &RawRow) -> Option<Self::Record>;

    /// Inverse of `from_row`, one value per entry in `HEADERS`.
    fn to_fields(record: &Self::Record) -> Vec<String>;

    /// Built-in records used when every source has failed.
    fn fallback() -> Vec<Self::Record>;
}
