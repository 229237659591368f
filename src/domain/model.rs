use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One parsed CSV (or API grid) line, keyed by the sheet's header row.
///
/// Column order follows the header. A repeated header keeps the last value,
/// the same way a plain object assignment would.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        let header = header.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(h, _)| *h == header) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((header, value)),
        }
    }

    /// Value for `header`, or `""` when the column is missing.
    pub fn get(&self, header: &str) -> &str {
        self.fields
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

/// Project statistics, e.g. `users -> 10K+`. Keeps insertion order and
/// serializes as a JSON object in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metrics(Vec<(String, String)>);

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `key`. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metrics {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metrics = Metrics::new();
        for (k, v) in iter {
            metrics.insert(k, v);
        }
        metrics
    }
}

impl Serialize for Metrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperienceRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    pub period: String,
    #[serde(rename = "type")]
    pub employment_type: String,
    pub description: String,
    pub achievements: Vec<String>,
    pub technologies: Vec<String>,
}

pub type Skill = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRecord {
    pub title: String,
    pub description: String,
    pub category: String,
    pub year: String,
    pub tags: Vec<String>,
    pub github: String,
    pub live: String,
    pub status: String,
    pub featured: bool,
    pub metrics: Metrics,
    pub image: String,
}

impl ProjectRecord {
    /// `#` is the sheet's placeholder for "no image".
    pub fn has_image(&self) -> bool {
        let image = self.image.trim();
        !image.is_empty() && image != "#"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadRecord {
    pub label: String,
    pub url: String,
    pub filename: String,
    pub version: String,
    pub updated: String,
}

impl DownloadRecord {
    /// Direct-download form of `url` (Drive share links are rewritten).
    pub fn download_url(&self) -> String {
        crate::utils::links::drive_download_url(&self.url)
    }
}

/// How the public sheet export addresses a tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum SheetAddressing {
    /// `gviz/tq?tqx=out:csv&sheet=<tab name>`
    #[default]
    Name,
    /// `export?format=csv&gid=<tab index>`
    Gid,
}
