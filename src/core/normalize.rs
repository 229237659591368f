use crate::domain::model::Metrics;

const LIST_DELIMITER: char = '|';

/// Splits a `|`-joined cell into trimmed, non-empty items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_DELIMITER)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Sheet booleans: only `TRUE`, `true` and `1` count as true.
pub fn parse_flag(raw: &str) -> bool {
    matches!(raw, "TRUE" | "true" | "1")
}

/// Parses `key:value|key:value`. Each pair splits on its first `:`; pairs
/// with an empty key or value are skipped.
pub fn parse_metrics(raw: &str) -> Metrics {
    let mut metrics = Metrics::new();
    for pair in raw.split(LIST_DELIMITER) {
        let Some((key, value)) = pair.split_once(':') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            continue;
        }
        metrics.insert(key, value);
    }
    metrics
}

pub fn join_list(items: &[String]) -> String {
    items.join("|")
}

pub fn format_flag(flag: bool) -> String {
    let raw = if flag { "TRUE" } else { "FALSE" };
    raw.to_string()
}

pub fn format_metrics(metrics: &Metrics) -> String {
    metrics
        .iter()
        .map(|(k, v)| format!("{}:{}", k, v))
        .collect::<Vec<_>>()
        .join("|")
}
