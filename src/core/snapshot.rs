//! Writes resolved records back out in the bundle CSV layout.

use crate::config::bundle::LocalBundle;
use crate::core::kinds::{Downloads, Experiences, Projects, Skills};
use crate::core::resolver::Portfolio;
use crate::domain::ports::RecordKind;
use crate::utils::error::{PortfolioError, Result};
use std::path::PathBuf;

/// Renders records as CSV with `K::HEADERS` as the header row. Fields that
/// contain commas are quoted. The bundle parser has no escaped quotes and no
/// multi-line fields, so double quotes are written as single quotes and line
/// breaks as spaces.
pub fn render_csv<K: RecordKind>(records: &[K::Record]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(K::HEADERS)?;
    let mut rewritten = 0usize;
    for record in records {
        let fields: Vec<String> = K::to_fields(record)
            .into_iter()
            .map(|field| match bundle_safe(&field) {
                Some(safe) => {
                    rewritten += 1;
                    safe
                }
                None => field,
            })
            .collect();
        writer.write_record(&fields)?;
    }

    if rewritten > 0 {
        tracing::warn!(
            "Rewrote {} {} field(s) containing double quotes or line breaks",
            rewritten,
            K::NAME
        );
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PortfolioError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| PortfolioError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

fn bundle_safe(field: &str) -> Option<String> {
    if !field.contains(['"', '\r', '\n']) {
        return None;
    }
    let single_line = field.replace("\r\n", " ").replace(['\r', '\n'], " ");
    Some(single_line.replace('"', "'"))
}

async fn write_kind<K: RecordKind>(bundle: &LocalBundle, records: &[K::Record]) -> Result<PathBuf> {
    let csv = render_csv::<K>(records)?;
    let path = bundle.write_document(K::BUNDLE_FILE, &csv).await?;
    tracing::debug!("Wrote {} {} record(s) to {}", records.len(), K::NAME, path.display());
    Ok(path)
}

/// Writes one bundle file per record kind and returns the written paths.
pub async fn write_snapshot(bundle: &LocalBundle, portfolio: &Portfolio) -> Result<Vec<PathBuf>> {
    Ok(vec![
        write_kind::<Experiences>(bundle, &portfolio.experiences.records).await?,
        write_kind::<Skills>(bundle, &portfolio.skills.records).await?,
        write_kind::<Projects>(bundle, &portfolio.projects.records).await?,
        write_kind::<Downloads>(bundle, &portfolio.downloads.records).await?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kinds::normalize_rows;
    use crate::core::parser::parse_document;

    #[test]
    fn test_render_skills() {
        let skills = vec!["Rust".to_string(), "Tailwind CSS".to_string()];
        assert_eq!(render_csv::<Skills>(&skills).unwrap(), "skill\nRust\nTailwind CSS\n");
    }

    #[test]
    fn test_rendered_experiences_parse_back() {
        let original = Experiences::fallback();
        let csv = render_csv::<Experiences>(&original).unwrap();
        assert!(csv.starts_with("title,company,location,period,type,"));

        let parsed = normalize_rows::<Experiences>(&parse_document(&csv));
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_rendered_projects_parse_back() {
        let original = Projects::fallback();
        let csv = render_csv::<Projects>(&original).unwrap();
        let parsed = normalize_rows::<Projects>(&parse_document(&csv));
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_quotes_and_line_breaks_survive_a_reload() {
        let mut projects = Projects::fallback();
        projects[0].description = "He said \"hi\", twice".to_string();
        projects[1].description = "line one\r\nline two\nline three".to_string();

        let csv = render_csv::<Projects>(&projects).unwrap();
        assert_eq!(csv.lines().count(), projects.len() + 1);

        let parsed = normalize_rows::<Projects>(&parse_document(&csv));
        assert_eq!(parsed.len(), projects.len());
        assert_eq!(parsed[0].description, "He said 'hi', twice");
        assert_eq!(parsed[1].description, "line one line two line three");
        assert_eq!(parsed[2..], projects[2..]);
    }

    #[test]
    fn test_plain_fields_are_not_rewritten() {
        assert_eq!(bundle_safe("Maps, tiles and routing"), None);
        assert_eq!(bundle_safe("a\"b"), Some("a'b".to_string()));
    }
}
