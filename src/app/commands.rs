use crate::config::bundle::LocalBundle;
use crate::core::kinds::{Downloads, Experiences, Projects, Skills};
use crate::core::resolver::{PortfolioSource, Source, SourcePlan};
use crate::core::snapshot::write_snapshot;
use crate::domain::ports::{BundleStore, ConfigProvider, RecordKind};
use crate::utils::error::Result;
use std::path::PathBuf;

/// Which record kinds a command should resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Selection {
    All,
    Experiences,
    Skills,
    Projects,
    Downloads,
}

/// Resolves the selected kind(s) and renders them as pretty JSON.
pub async fn show<S, C>(source: &PortfolioSource<S, C>, selection: Selection) -> Result<String>
where
    S: BundleStore,
    C: ConfigProvider,
{
    let json = match selection {
        Selection::All => serde_json::to_string_pretty(&source.fetch_all().await)?,
        Selection::Experiences => serde_json::to_string_pretty(&source.resolve::<Experiences>().await)?,
        Selection::Skills => serde_json::to_string_pretty(&source.resolve::<Skills>().await)?,
        Selection::Projects => serde_json::to_string_pretty(&source.resolve::<Projects>().await)?,
        Selection::Downloads => serde_json::to_string_pretty(&source.resolve::<Downloads>().await)?,
    };
    Ok(json)
}

/// Resolves everything and writes it to `out` as bundle CSV files.
pub async fn snapshot<S, C>(source: &PortfolioSource<S, C>, out: &LocalBundle) -> Result<Vec<PathBuf>>
where
    S: BundleStore,
    C: ConfigProvider,
{
    let portfolio = source.fetch_all().await;
    for (kind, from) in [
        (Experiences::NAME, portfolio.experiences.source),
        (Skills::NAME, portfolio.skills.source),
        (Projects::NAME, portfolio.projects.source),
        (Downloads::NAME, portfolio.downloads.source),
    ] {
        if from == Source::BuiltIn {
            tracing::warn!("Snapshot of {} contains built-in data only", kind);
        }
    }
    write_snapshot(out, &portfolio).await
}

/// Human-readable source order for `config`, without any network access.
pub fn describe_plan<C: ConfigProvider + ?Sized>(config: &C) -> String {
    let plan = SourcePlan::for_config(config);
    let mut lines: Vec<String> = plan
        .steps()
        .iter()
        .chain(std::iter::once(&Source::BuiltIn))
        .enumerate()
        .map(|(i, source)| format!("{}. {}", i + 1, source))
        .collect();

    if config.request_timeout().is_none() {
        lines.push("(no request timeout)".to_string());
    }
    lines.join("\n")
}
