//! CSV export of uniform records.
//!
//! Records are serialized with `serde_json`; the keys of the first record, in
//! field declaration order, become the header row. Each cell is the JSON
//! encoding of the value, so strings are double-quoted with JSON escaping and
//! numbers are bare. Rows are joined with `\n` and there is no trailing
//! newline.

use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Message shown when an export is requested with nothing to export.
pub const NO_DATA_MESSAGE: &str = "No data to export!";

/// Errors that can occur while building a CSV export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The sequence was empty or absent.
    #[error("No data to export!")]
    NoData,

    /// A record did not serialize to a JSON object.
    #[error("record {index} is not a flat record")]
    NotARecord { index: usize },

    /// A record's fields differ from the first record's.
    #[error("record {index} has fields {found:?}, expected {expected:?}")]
    HeterogeneousRecord {
        index: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Serialization failed.
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Render `records` as CSV text.
///
/// A standard CSV reader recovers every value whose JSON encoding needs no
/// escaping, which covers all seeded datasets. Strings containing `"` or `\`
/// keep their JSON escapes: the reader sees `\"` where RFC 4180 expects `""`,
/// so such values do not read back verbatim.
///
/// # Errors
///
/// Returns `ExportError::NoData` for an empty slice, and
/// `ExportError::HeterogeneousRecord` if any record's fields differ from the
/// first record's.
pub fn to_csv<R: Serialize>(records: &[R]) -> Result<String, ExportError> {
    let rows = records
        .iter()
        .enumerate()
        .map(|(index, record)| match serde_json::to_value(record)? {
            Value::Object(map) => Ok(map),
            _ => Err(ExportError::NotARecord { index }),
        })
        .collect::<Result<Vec<Map<String, Value>>, ExportError>>()?;

    let Some(first) = rows.first() else {
        return Err(ExportError::NoData);
    };
    let headers: Vec<String> = first.keys().cloned().collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(headers.join(","));

    for (index, row) in rows.iter().enumerate() {
        if row.len() != headers.len() || !headers.iter().all(|key| row.contains_key(key)) {
            return Err(ExportError::HeterogeneousRecord {
                index,
                expected: headers.clone(),
                found: row.keys().cloned().collect(),
            });
        }

        let cells = headers
            .iter()
            .map(|key| serde_json::to_string(row.get(key).unwrap_or(&Value::Null)))
            .collect::<Result<Vec<_>, _>>()?;
        lines.push(cells.join(","));
    }

    Ok(lines.join("\n"))
}

/// A CSV file ready to be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    filename: String,
    body: String,
}

impl CsvExport {
    /// Build a download named `<filename>.csv` from `records`.
    ///
    /// `None` and an empty slice both produce `ExportError::NoData`.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`to_csv`].
    pub fn build<R: Serialize>(records: Option<&[R]>, filename: &str) -> Result<Self, ExportError> {
        let records = records.ok_or(ExportError::NoData)?;
        let body = to_csv(records)?;

        tracing::info!(filename, rows = records.len(), "CSV export built");

        Ok(Self {
            filename: sanitize_filename(filename),
            body,
        })
    }

    /// File name including the `.csv` extension.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.filename)
    }

    /// CSV text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consume the export, returning the CSV text.
    #[must_use]
    pub fn into_body(self) -> String {
        self.body
    }
}

impl IntoResponse for CsvExport {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.file_name());
        (
            [
                (header::CONTENT_TYPE, "text/csv;charset=utf-8".to_owned()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.body,
        )
            .into_response()
    }
}

/// Keep only characters that are safe inside a quoted header value.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();
    if cleaned.is_empty() {
        "export".to_owned()
    } else {
        cleaned
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use axum::http::StatusCode;

    use super::*;

    #[derive(Serialize)]
    struct Row {
        id: u32,
        user: &'static str,
        amount: f64,
        note: Option<&'static str>,
    }

    #[test]
    fn test_to_csv_header_follows_field_order() {
        let csv = to_csv(&[Row {
            id: 1024,
            user: "Alex Morgan",
            amount: 120.0,
            note: None,
        }])
        .unwrap();

        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("id,user,amount,note"));
        assert_eq!(lines.next(), Some(r#"1024,"Alex Morgan",120.0,null"#));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_to_csv_escapes_like_json() {
        let csv = to_csv(&[Row {
            id: 1,
            user: "Say \"hi\", ok",
            amount: 0.5,
            note: Some("line\nbreak"),
        }])
        .unwrap();

        assert!(csv.ends_with(r#"1,"Say \"hi\", ok",0.5,"line\nbreak""#));
        assert_eq!(csv.lines().count(), 2);
    }

    /// Read `csv` with a header-aware reader and compare every cell with the
    /// JSON value it came from. Strings must match exactly, other values by
    /// their JSON text.
    fn assert_reads_back<R: Serialize>(csv: &str, records: &[R]) {
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let headers = reader.headers().unwrap().clone();
        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), records.len());

        for (row, record) in rows.iter().zip(records) {
            let Value::Object(expected) = serde_json::to_value(record).unwrap() else {
                panic!("record is not an object");
            };
            for (name, field) in headers.iter().zip(row.iter()) {
                match &expected[name] {
                    Value::String(text) => assert_eq!(field, text.as_str(), "column {name}"),
                    other => assert_eq!(field, other.to_string(), "column {name}"),
                }
            }
        }
    }

    #[test]
    fn test_seeded_customers_read_back() {
        let fixtures = crate::api::Fixtures::seeded().unwrap();
        let customers = fixtures.customers.as_slice();
        let csv = to_csv(customers).unwrap();
        assert_reads_back(&csv, customers);
        assert!(csv.starts_with("id,name,email,status,spent,color\n"));
    }

    #[test]
    fn test_seeded_transactions_read_back() {
        let fixtures = crate::api::Fixtures::seeded().unwrap();
        let transactions = fixtures.sales.transactions.as_slice();
        let csv = to_csv(transactions).unwrap();
        assert_reads_back(&csv, transactions);
        assert!(csv.contains(r#"1023,"Sarah Connor","Dec 06, 2025",450.5,"Processing""#));
    }

    #[test]
    fn test_json_escapes_do_not_read_back_verbatim() {
        #[derive(Serialize)]
        struct Note {
            text: &'static str,
        }

        let csv = to_csv(&[Note { text: "back\\slash" }, Note { text: "Say \"hi\"" }]).unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let fields: Vec<String> = reader
            .records()
            .map(|row| row.unwrap()[0].to_string())
            .collect();

        assert_eq!(fields[0], r"back\\slash");
        assert_ne!(fields[1], "Say \"hi\"");
    }

    #[test]
    fn test_to_csv_has_no_trailing_newline() {
        let rows = [
            Row {
                id: 1,
                user: "a",
                amount: 1.0,
                note: None,
            },
            Row {
                id: 2,
                user: "b",
                amount: 2.0,
                note: None,
            },
        ];
        let csv = to_csv(&rows).unwrap();
        assert!(!csv.ends_with('\n'));
        assert_eq!(csv.split('\n').count(), 3);
    }

    #[test]
    fn test_to_csv_empty_is_no_data() {
        let rows: [Row; 0] = [];
        assert!(matches!(to_csv(&rows), Err(ExportError::NoData)));
    }

    #[test]
    fn test_build_absent_is_no_data() {
        let err = CsvExport::build::<Row>(None, "report").unwrap_err();
        assert_eq!(err.to_string(), NO_DATA_MESSAGE);
    }

    #[test]
    fn test_to_csv_rejects_heterogeneous_records() {
        let mut first = BTreeMap::new();
        first.insert("a", 1);
        first.insert("b", 2);
        let mut second = BTreeMap::new();
        second.insert("a", 3);
        second.insert("c", 4);

        let err = to_csv(&[first, second]).unwrap_err();
        assert!(matches!(
            err,
            ExportError::HeterogeneousRecord { index: 1, .. }
        ));
    }

    #[test]
    fn test_to_csv_rejects_scalars() {
        assert!(matches!(
            to_csv(&[1, 2, 3]),
            Err(ExportError::NotARecord { index: 0 })
        ));
    }

    #[test]
    fn test_export_response_headers() {
        let export = CsvExport::build(
            Some(&[Row {
                id: 1,
                user: "a",
                amount: 1.0,
                note: None,
            }][..]),
            "sales_transactions",
        )
        .unwrap();
        assert_eq!(export.file_name(), "sales_transactions.csv");

        let response = export.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv;charset=utf-8"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"sales_transactions.csv\""
        );
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("overview_report"), "overview_report");
        assert_eq!(sanitize_filename("a\"b/c"), "abc");
        assert_eq!(sanitize_filename("\"\""), "export");
    }
}
