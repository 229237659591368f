//! Minimal quoted-CSV dialect used by the sheet exports and bundle files.
//!
//! A `"` toggles quoted mode and is never part of a value; a `,` inside
//! quotes is literal. Escaped quotes (`""`) and newlines inside quoted
//! fields are not supported.

use crate::domain::model::RawRow;

/// Splits one line into raw field values. Quote characters are consumed,
/// whitespace is kept, and a trailing empty field is still emitted.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }

    fields.push(current);
    fields
}

/// `parse_line` with every field trimmed, as stored in a `RawRow`.
pub fn parse_row_fields(line: &str) -> Vec<String> {
    parse_line(line)
        .into_iter()
        .map(|field| field.trim().to_string())
        .collect()
}

/// Parses a whole document. The first line is the header; data rows whose
/// field count differs from the header's are dropped. A leading UTF-8 byte
/// order mark is ignored.
pub fn parse_document(text: &str) -> Vec<RawRow> {
    let mut lines = text.trim_start_matches('\u{feff}').trim().lines();

    let headers = match lines.next() {
        Some(header_line) => parse_row_fields(header_line),
        None => return Vec::new(),
    };

    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for line in lines {
        let values = parse_row_fields(line);
        if values.len() != headers.len() {
            dropped += 1;
            continue;
        }
        rows.push(headers.iter().cloned().zip(values).collect());
    }

    if dropped > 0 {
        tracing::debug!(
            "Dropped {} row(s) whose field count did not match {} header column(s)",
            dropped,
            headers.len()
        );
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_inside_quotes_is_literal() {
        assert_eq!(
            parse_line(r#""Doe, John",Engineer"#),
            vec!["Doe, John", "Engineer"]
        );
    }

    #[test]
    fn test_trailing_empty_field_is_kept() {
        assert_eq!(parse_line("a,b,"), vec!["a", "b", ""]);
        assert_eq!(parse_line(""), vec![""]);
    }

    #[test]
    fn test_parse_line_keeps_whitespace_row_fields_trim() {
        assert_eq!(parse_line(" a , b"), vec![" a ", " b"]);
        assert_eq!(parse_row_fields(" a , \"b\" "), vec!["a", "b"]);
    }

    #[test]
    fn test_quote_in_middle_of_field_is_dropped() {
        assert_eq!(parse_line(r#"say "hi",x"#), vec!["say hi", "x"]);
    }

    #[test]
    fn test_document_maps_headers_to_values() {
        let doc = "title,company\n\"Senior Engineer\",\"Acme, Inc.\"\nDev,Startup\n";
        let rows = parse_document(doc);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("title"), "Senior Engineer");
        assert_eq!(rows[0].get("company"), "Acme, Inc.");
        assert_eq!(rows[1].get("company"), "Startup");
    }

    #[test]
    fn test_mismatched_rows_are_dropped() {
        let doc = "a,b,c\n1,2,3\n4,5\n6,7,8,9\n10,11,12";
        let rows = parse_document(doc);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("a"), "1");
        assert_eq!(rows[1].get("c"), "12");
    }

    #[test]
    fn test_header_only_yields_no_rows() {
        assert!(parse_document("title,company").is_empty());
        assert!(parse_document("title,company\n").is_empty());
        assert!(parse_document("").is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let rows = parse_document("skill\r\nRust\r\nGo\r\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("skill"), "Rust");
        assert_eq!(rows[1].get("skill"), "Go");
    }

    #[test]
    fn test_byte_order_mark_before_header_is_ignored() {
        let rows = parse_document("\u{feff}title,company\nDev,Acme\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("title"), "Dev");
        assert_eq!(rows[0].get("company"), "Acme");
    }

    #[test]
    fn test_quoted_header_names_are_stripped() {
        let rows = parse_document("\"title\",\"year\"\nApp,2024");
        assert_eq!(rows[0].get("title"), "App");
        assert_eq!(rows[0].get("year"), "2024");
    }
}
