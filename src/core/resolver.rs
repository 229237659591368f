//! The per-kind fallback chain: public sheet export, values API, bundled
//! CSV, then built-in data. Sources are tried strictly in order and the
//! first success wins.

use crate::core::http::{build_client, check_response, fetch_text, join_segments, redact};
use crate::core::kinds::{normalize_rows, Downloads, Experiences, Projects, Skills};
use crate::core::parser::parse_document;
use crate::domain::model::{
    DownloadRecord, ExperienceRecord, ProjectRecord, RawRow, SheetAddressing, Skill,
};
use crate::domain::ports::{BundleStore, ConfigProvider, RecordKind};
use crate::utils::error::{PortfolioError, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    PublicSheet,
    ValuesApi,
    Bundle,
    BuiltIn,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Source::PublicSheet => "public sheet",
            Source::ValuesApi => "values API",
            Source::Bundle => "bundled CSV",
            Source::BuiltIn => "built-in data",
        };
        f.write_str(name)
    }
}

/// Ordered fallible sources for a configuration. Built-in data is implied
/// after the last step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePlan {
    steps: Vec<Source>,
}

impl SourcePlan {
    pub fn for_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        let mut steps = Vec::with_capacity(3);
        let has_id = present(config.spreadsheet_id()).is_some();

        if has_id {
            steps.push(Source::PublicSheet);
            if present(config.api_key()).is_some() {
                steps.push(Source::ValuesApi);
            }
        }
        steps.push(Source::Bundle);

        Self { steps }
    }

    pub fn steps(&self) -> &[Source] {
        &self.steps
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Records for one kind plus the source that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolved<T> {
    pub source: Source,
    pub records: Vec<T>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Portfolio {
    pub fetched_at: DateTime<Utc>,
    pub experiences: Resolved<ExperienceRecord>,
    pub skills: Resolved<Skill>,
    pub projects: Resolved<ProjectRecord>,
    pub downloads: Resolved<DownloadRecord>,
}

#[derive(Deserialize)]
struct ValuesResponse {
    values: Option<Vec<Vec<serde_json::Value>>>,
}

pub struct PortfolioSource<S: BundleStore, C: ConfigProvider> {
    bundle: S,
    config: C,
    client: Client,
}

impl<S: BundleStore, C: ConfigProvider> PortfolioSource<S, C> {
    pub fn new(bundle: S, config: C) -> Result<Self> {
        let client = build_client(config.request_timeout())?;
        Ok(Self::with_client(bundle, config, client))
    }

    pub fn with_client(bundle: S, config: C, client: Client) -> Self {
        Self {
            bundle,
            config,
            client,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn plan(&self) -> SourcePlan {
        SourcePlan::for_config(&self.config)
    }

    /// Walks the plan for `K`. Never fails: each source error is logged and
    /// the next source is tried, ending with `K::fallback()`.
    pub async fn resolve<K: RecordKind>(&self) -> Resolved<K::Record> {
        tracing::debug!("Fetching {} data", K::NAME);

        for &source in self.plan().steps() {
            match self.attempt::<K>(source).await {
                Ok(records) => {
                    tracing::info!(
                        "Loaded {} {} record(s) from {}",
                        records.len(),
                        K::NAME,
                        source
                    );
                    return Resolved { source, records };
                }
                Err(e) if e.is_remote_failure() => {
                    tracing::warn!(kind = K::NAME, %source, error = %e, "source unavailable");
                }
                Err(e) => {
                    tracing::warn!(kind = K::NAME, %source, error = %e, "source could not be read");
                }
            }
        }

        tracing::error!("All sources failed for {}, using built-in data", K::NAME);
        Resolved {
            source: Source::BuiltIn,
            records: K::fallback(),
        }
    }

    pub async fn fetch_experiences(&self) -> Vec<ExperienceRecord> {
        self.resolve::<Experiences>().await.records
    }

    pub async fn fetch_skills(&self) -> Vec<Skill> {
        self.resolve::<Skills>().await.records
    }

    pub async fn fetch_projects(&self) -> Vec<ProjectRecord> {
        self.resolve::<Projects>().await.records
    }

    pub async fn fetch_downloads(&self) -> Vec<DownloadRecord> {
        self.resolve::<Downloads>().await.records
    }

    /// Resolves every kind concurrently; kinds never affect each other.
    pub async fn fetch_all(&self) -> Portfolio {
        let (experiences, skills, projects, downloads) = tokio::join!(
            self.resolve::<Experiences>(),
            self.resolve::<Skills>(),
            self.resolve::<Projects>(),
            self.resolve::<Downloads>(),
        );

        Portfolio {
            fetched_at: Utc::now(),
            experiences,
            skills,
            projects,
            downloads,
        }
    }

    async fn attempt<K: RecordKind>(&self, source: Source) -> Result<Vec<K::Record>> {
        let rows = match source {
            Source::PublicSheet => self.fetch_public_sheet::<K>().await?,
            Source::ValuesApi => self.fetch_values_api::<K>().await?,
            Source::Bundle => self.read_bundle::<K>().await?,
            Source::BuiltIn => return Ok(K::fallback()),
        };
        Ok(normalize_rows::<K>(&rows))
    }

    pub fn public_sheet_url<K: RecordKind>(&self) -> Result<Url> {
        let id = self.require_spreadsheet_id()?;
        let base = self.config.sheets_base_url();

        let url = match self.config.addressing() {
            SheetAddressing::Name => {
                let mut url = join_segments(base, &[id, "gviz", "tq"])?;
                url.query_pairs_mut()
                    .append_pair("tqx", "out:csv")
                    .append_pair("sheet", K::SHEET_NAME);
                url
            }
            SheetAddressing::Gid => {
                let mut url = join_segments(base, &[id, "export"])?;
                url.query_pairs_mut()
                    .append_pair("format", "csv")
                    .append_pair("gid", &K::SHEET_GID.to_string());
                url
            }
        };
        Ok(url)
    }

    pub fn values_api_url<K: RecordKind>(&self) -> Result<Url> {
        let id = self.require_spreadsheet_id()?;
        let key = present(self.config.api_key()).ok_or_else(|| PortfolioError::ConfigError {
            message: "values API requires an API key".to_string(),
        })?;

        let mut url = join_segments(self.config.api_base_url(), &[id, "values", K::API_RANGE])?;
        url.query_pairs_mut().append_pair("key", key);
        Ok(url)
    }

    async fn fetch_public_sheet<K: RecordKind>(&self) -> Result<Vec<RawRow>> {
        let url = self.public_sheet_url::<K>()?;
        let body = fetch_text(&self.client, &url).await?;
        Ok(parse_document(&body))
    }

    async fn fetch_values_api<K: RecordKind>(&self) -> Result<Vec<RawRow>> {
        let url = self.values_api_url::<K>()?;
        tracing::debug!("GET {}", redact(&url));

        // reqwest errors carry the request URL, which holds the key
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PortfolioError::HttpError(e.without_url()))?;
        let data: ValuesResponse = check_response(resp)?.json().await.map_err(|e| {
            PortfolioError::MalformedResponse {
                message: format!("values API body for {}: {}", K::NAME, e.without_url()),
            }
        })?;
        Ok(rows_from_grid(data.values.unwrap_or_default()))
    }

    async fn read_bundle<K: RecordKind>(&self) -> Result<Vec<RawRow>> {
        let text = self.bundle.read_document(K::BUNDLE_FILE).await?;
        Ok(parse_document(&text))
    }

    fn require_spreadsheet_id(&self) -> Result<&str> {
        present(self.config.spreadsheet_id()).ok_or_else(|| PortfolioError::ConfigError {
            message: "no spreadsheet id configured".to_string(),
        })
    }
}

/// Turns a values API grid into rows keyed by its first row. Short rows are
/// padded with empty strings and cells past the header width are ignored.
pub fn rows_from_grid(grid: Vec<Vec<serde_json::Value>>) -> Vec<RawRow> {
    let mut grid = grid.into_iter();
    let headers: Vec<String> = match grid.next() {
        Some(first) => first.iter().map(cell_text).collect(),
        None => return Vec::new(),
    };

    grid.map(|row| {
        headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let value = row.get(i).map(cell_text).unwrap_or_default();
                (header.clone(), value)
            })
            .collect()
    })
    .collect()
}

fn cell_text(cell: &serde_json::Value) -> String {
    match cell {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
