use crate::utils::error::{PortfolioError, Result};
use std::path::{Component, Path};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PortfolioError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    let invalid = |reason: String| PortfolioError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: url_str.to_string(),
        reason,
    };

    let url = Url::parse(url_str).map_err(|e| invalid(format!("Invalid URL format: {}", e)))?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(invalid(format!("Unsupported URL scheme: {}", scheme))),
    }

    // Sheet ids, ranges and bundle file names are appended as path segments.
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(
            "Base URL cannot carry a query string or fragment".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PortfolioError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PortfolioError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Fails when `path` names the same directory as `other`. Lexical only:
/// `./data/` and `data` match, symlinks are not followed.
pub fn validate_distinct_paths(field_name: &str, path: &str, other_field: &str, other: &str) -> Result<()> {
    fn normalized(p: &str) -> Vec<Component<'_>> {
        Path::new(p)
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    }

    if normalized(path) == normalized(other) {
        return Err(PortfolioError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: format!("Must differ from {}, which is read as a fallback source", other_field),
        });
    }
    Ok(())
}

/// Spreadsheet ids are the `/d/<id>/` segment of a sheet URL.
pub fn validate_spreadsheet_id(field_name: &str, id: &str) -> Result<()> {
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(PortfolioError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: id.to_string(),
            reason: "Spreadsheet id may only contain letters, digits, '-' and '_'".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(PortfolioError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
