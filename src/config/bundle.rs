use crate::core::http::{build_client, check_response, join_segments};
use crate::domain::ports::BundleStore;
use crate::utils::error::Result;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

/// Bundle CSV files in a directory on disk.
#[derive(Debug, Clone)]
pub struct LocalBundle {
    base_path: PathBuf,
}

impl LocalBundle {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Writes `contents` to `path` under the bundle directory, creating
    /// parent directories as needed.
    pub async fn write_document(&self, path: &str, contents: &str) -> Result<PathBuf> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, contents).await?;
        Ok(full_path)
    }
}

impl BundleStore for LocalBundle {
    async fn read_document(&self, path: &str) -> Result<String> {
        let full_path = self.base_path.join(path);
        tracing::debug!("Reading bundle file {}", full_path.display());
        Ok(tokio::fs::read_to_string(full_path).await?)
    }
}

/// Bundle CSV files served as static files under a base URL.
#[derive(Debug, Clone)]
pub struct HttpBundle {
    base_url: String,
    client: Client,
}

impl HttpBundle {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            base_url: base_url.into(),
            client: build_client(timeout)?,
        })
    }
}

impl BundleStore for HttpBundle {
    async fn read_document(&self, path: &str) -> Result<String> {
        let url = join_segments(&self.base_url, &[path])?;
        tracing::debug!("Fetching bundle file {}", url);
        let resp = check_response(self.client.get(url).send().await?)?;
        Ok(resp.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::PortfolioError;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_local_bundle_write_then_read() {
        let dir = TempDir::new().unwrap();
        let bundle = LocalBundle::new(dir.path());

        let written = bundle
            .write_document("nested/skills.csv", "skill\nRust\n")
            .await
            .unwrap();
        assert!(written.exists());

        let text = bundle.read_document("nested/skills.csv").await.unwrap();
        assert_eq!(text, "skill\nRust\n");
    }

    #[tokio::test]
    async fn test_local_bundle_missing_file() {
        let dir = TempDir::new().unwrap();
        let bundle = LocalBundle::new(dir.path());
        let err = bundle.read_document("projects.csv").await.unwrap_err();
        assert!(matches!(err, PortfolioError::IoError(_)));
    }

    #[tokio::test]
    async fn test_http_bundle_reads_and_checks_status() {
        let server = MockServer::start();
        let ok = server.mock(|when, then| {
            when.method(GET).path("/data/skills.csv");
            then.status(200).body("skill\nRust\n");
        });
        let missing = server.mock(|when, then| {
            when.method(GET).path("/data/projects.csv");
            then.status(404);
        });

        let bundle = HttpBundle::new(server.url("/data"), None).unwrap();

        assert_eq!(bundle.read_document("skills.csv").await.unwrap(), "skill\nRust\n");
        let err = bundle.read_document("projects.csv").await.unwrap_err();
        assert!(matches!(err, PortfolioError::StatusError { status: 404, .. }));

        ok.assert();
        missing.assert();
    }
}
