//! CSV loading, column type inference, and descriptive statistics.
//!
//! Cells that are empty or spelled `NA`, `NaN`, `nan` or `null` count as
//! missing. A column is `integer` when every cell parses as an integer,
//! `float` when every present cell parses as a number (missing cells force
//! float), and `text` otherwise.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

const MISSING_MARKERS: &[&str] = &["", "NA", "NaN", "nan", "null"];

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file has no header row")]
    Empty,

    #[error("unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },

    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error("column '{0}' is not numeric")]
    NotNumeric(String),

    #[error("column '{0}' has no values")]
    NoValues(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Float,
    Integer,
    Text,
}

impl ColumnKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Float | ColumnKind::Integer)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Float => "float",
            ColumnKind::Integer => "integer",
            ColumnKind::Text => "text",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

/// A parsed CSV file: header-derived columns plus raw string cells.
#[derive(Debug)]
pub struct CsvReport {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl CsvReport {
    pub fn load(path: &Path) -> Result<Self, CsvError> {
        let text = std::fs::read_to_string(path).map_err(|source| CsvError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_text(&text)
    }

    pub fn from_text(text: &str) -> Result<Self, CsvError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut records = parse_records(text)?.into_iter();
        let (_, header) = records.next().ok_or(CsvError::Empty)?;

        let mut rows = Vec::new();
        for (line, record) in records {
            if record.len() != header.len() {
                return Err(CsvError::FieldCount {
                    line,
                    expected: header.len(),
                    found: record.len(),
                });
            }
            rows.push(record);
        }

        let columns = header
            .into_iter()
            .enumerate()
            .map(|(idx, name)| Column {
                name: name.trim().to_string(),
                kind: infer_kind(rows.iter().map(|r| r[idx].as_str()), rows.len()),
            })
            .collect();

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The first `n` data rows, fewer when the file is shorter.
    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Names of the `float` columns, in file order.
    pub fn float_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Float)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Present values of a numeric column, missing cells skipped.
    pub fn numeric_values(&self, column: &str) -> Result<Vec<f64>, CsvError> {
        let idx = self
            .columns
            .iter()
            .position(|c| c.name == column)
            .ok_or_else(|| CsvError::UnknownColumn(column.to_string()))?;
        if !self.columns[idx].kind.is_numeric() {
            return Err(CsvError::NotNumeric(column.to_string()));
        }
        Ok(self
            .rows
            .iter()
            .map(|r| r[idx].trim())
            .filter(|cell| !is_missing(cell))
            .filter_map(|cell| cell.parse::<f64>().ok())
            .collect())
    }

    pub fn summary(&self, column: &str) -> Result<Summary, CsvError> {
        let values = self.numeric_values(column)?;
        Summary::from_values(&values).ok_or_else(|| CsvError::NoValues(column.to_string()))
    }
}

fn is_missing(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell)
}

fn infer_kind<'a>(cells: impl Iterator<Item = &'a str>, row_count: usize) -> ColumnKind {
    if row_count == 0 {
        return ColumnKind::Text;
    }
    let mut any_missing = false;
    let mut all_integer = true;
    for cell in cells {
        let cell = cell.trim();
        if is_missing(cell) {
            any_missing = true;
            continue;
        }
        if cell.parse::<i64>().is_ok() {
            continue;
        }
        if cell.parse::<f64>().is_ok() {
            all_integer = false;
            continue;
        }
        return ColumnKind::Text;
    }
    if all_integer && !any_missing {
        ColumnKind::Integer
    } else {
        ColumnKind::Float
    }
}

/// Split `text` into records, tagging each with the line it starts on.
/// Handles quoted fields with `""` escapes and embedded newlines, CRLF line
/// endings, and skips blank lines.
fn parse_records(text: &str) -> Result<Vec<(usize, Vec<String>)>, CsvError> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                finish_record(&mut records, &mut record, &mut field, record_line);
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(CsvError::UnterminatedQuote { line: record_line });
    }
    finish_record(&mut records, &mut record, &mut field, record_line);
    Ok(records)
}

fn finish_record(
    records: &mut Vec<(usize, Vec<String>)>,
    record: &mut Vec<String>,
    field: &mut String,
    line: usize,
) {
    if record.is_empty() && field.is_empty() {
        return;
    }
    record.push(std::mem::take(field));
    records.push((line, std::mem::take(record)));
}

/// Descriptive statistics for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; NaN with fewer than two values.
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl Summary {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std = if count < 2 {
            f64::NAN
        } else {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        };

        Some(Self {
            count,
            mean,
            std,
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[count - 1],
        })
    }
}

/// Linear interpolation between closest ranks. `sorted` must be non-empty.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Equal-width histogram over `[min, max]`; the last bucket is closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub min: f64,
    pub width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn new(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if values.is_empty() {
            return Self {
                min: 0.0,
                width: 1.0,
                counts: vec![0; bins],
            };
        }

        let span = max - min;
        let width = if span > 0.0 { span / bins as f64 } else { 1.0 };
        let mut counts = vec![0; bins];
        for v in values {
            let idx = (((v - min) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }
        Self { min, width, counts }
    }

    pub fn bucket_bounds(&self, i: usize) -> (f64, f64) {
        let lo = self.min + self.width * i as f64;
        (lo, lo + self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "city,temp,visitors,rating\n\
                          Paris,12.5,100,good\n\
                          Lyon,,250,bad\n\
                          Nice,18.0,75,good\n";

    #[test]
    fn test_infers_column_kinds() {
        let report = CsvReport::from_text(SAMPLE).unwrap();
        let kinds: Vec<_> = report.columns().iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![ColumnKind::Text, ColumnKind::Float, ColumnKind::Integer, ColumnKind::Text]
        );
        assert_eq!(report.row_count(), 3);
        assert_eq!(report.float_columns(), vec!["temp"]);
    }

    #[test]
    fn test_head_is_bounded_by_row_count() {
        let report = CsvReport::from_text(SAMPLE).unwrap();
        let head = report.head(2);
        assert_eq!(head.len(), 2);
        assert_eq!(head[0][0], "Paris");
        assert_eq!(head[1][0], "Lyon");
        assert_eq!(report.head(50).len(), 3);
        assert!(report.head(0).is_empty());
    }

    #[test]
    fn test_integer_with_missing_becomes_float() {
        let report = CsvReport::from_text("n\n1\nNA\n3\n").unwrap();
        assert_eq!(report.columns()[0].kind, ColumnKind::Float);
        assert_eq!(report.numeric_values("n").unwrap(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_quoted_fields_and_crlf() {
        let text = "name,note\r\n\"Doe, Jane\",\"said \"\"hi\"\"\"\r\n\r\nBob,\"two\nlines\"\r\n";
        let report = CsvReport::from_text(text).unwrap();
        assert_eq!(report.row_count(), 2);
        assert_eq!(report.rows[0], vec!["Doe, Jane", "said \"hi\""]);
        assert_eq!(report.rows[1], vec!["Bob", "two\nlines"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(CsvReport::from_text(""), Err(CsvError::Empty)));
        assert!(matches!(
            CsvReport::from_text("a,b\n1,2\n3\n"),
            Err(CsvError::FieldCount { line: 3, expected: 2, found: 1 })
        ));
        assert!(matches!(
            CsvReport::from_text("a\n\"open\n"),
            Err(CsvError::UnterminatedQuote { line: 2 })
        ));
    }

    #[test]
    fn test_column_lookup_errors() {
        let report = CsvReport::from_text(SAMPLE).unwrap();
        assert!(matches!(report.summary("missing"), Err(CsvError::UnknownColumn(_))));
        assert!(matches!(report.summary("city"), Err(CsvError::NotNumeric(_))));

        let empty = CsvReport::from_text("x\nNA\n\"\"\n").unwrap();
        assert!(matches!(empty.summary("x"), Err(CsvError::NoValues(_))));
    }

    #[test]
    fn test_summary_matches_describe() {
        let summary = Summary::from_values(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, 2.5);
        assert!((summary.std - 1.290_994_448_735_805_6).abs() < 1e-12);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.q1, 1.75);
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.q3, 3.25);
        assert_eq!(summary.max, 4.0);
    }

    #[test]
    fn test_single_value_has_nan_std() {
        let summary = Summary::from_values(&[7.0]).unwrap();
        assert!(summary.std.is_nan());
        assert_eq!(summary.median, 7.0);
        assert!(Summary::from_values(&[]).is_none());
    }

    #[test]
    fn test_histogram_buckets() {
        let hist = Histogram::new(&[0.0, 1.0, 2.0, 3.0, 4.0, 10.0], 5);
        assert_eq!(hist.counts, vec![2, 2, 1, 0, 1]);
        assert_eq!(hist.bucket_bounds(1), (2.0, 4.0));

        let flat = Histogram::new(&[5.0, 5.0], 3);
        assert_eq!(flat.counts, vec![2, 0, 0]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let report = CsvReport::load(file.path()).unwrap();
        let summary = report.summary("temp").unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean, 15.25);

        let err = CsvReport::load(Path::new("/nonexistent/data.csv")).unwrap_err();
        assert!(matches!(err, CsvError::Io { .. }));
    }
}
