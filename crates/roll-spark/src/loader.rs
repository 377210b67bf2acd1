//! Loading spark catalogs from disk.
//!
//! Two shapes are accepted. A `.json` file is decoded directly into the
//! catalog. Anything else is treated as the semicolon-delimited text a
//! spreadsheet export produces:
//!
//! ```text
//! DRAMA:
//! ;Motive;
//! ;Want;Obstacle
//! 1;Revenge;A locked door
//! 2;Love;An old rival
//! ```
//!
//! A line with `:` and no `;` names the current sheet. A line `;Name;` opens a
//! table, the next line holds its column labels, and numbered lines after that
//! are its rows until the first line that is not a row.

use std::path::Path;

use crate::catalog::{SparkCatalog, SparkTable};
use crate::error::{SparkError, SparkResult};

/// Data file used when neither a flag nor `SPARK_FILE` names one.
pub const DEFAULT_SPARK_FILE: &str = "Spark Tables PL.csv";

/// Sheet that receives tables appearing before any sheet header.
pub const UNKNOWN_SHEET: &str = "UNKNOWN";

const FIELD_DELIMITER: char = ';';
const SHEET_SEPARATOR: char = ':';
const DEFAULT_COLUMNS: (&str, &str) = ("Col1", "Col2");

/// Load a spark catalog from a JSON or delimited text file.
pub fn load_catalog(path: &Path) -> SparkResult<SparkCatalog> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => SparkError::FileNotFound(path.to_path_buf()),
        _ => SparkError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let catalog = if is_structured(path) {
        let text = String::from_utf8_lossy(&bytes);
        parse_structured(&text).map_err(|source| SparkError::Parse {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        parse_delimited(&decode_lossy(&bytes))
    };

    tracing::debug!(
        path = %path.display(),
        sheets = catalog.len(),
        tables = catalog.table_count(),
        "loaded spark catalog"
    );
    Ok(catalog)
}

/// Decode the structured (JSON) form.
pub fn parse_structured(text: &str) -> Result<SparkCatalog, serde_json::Error> {
    serde_json::from_str(text)
}

/// Parse the delimited text form.
///
/// Lines may end in `\n`, `\r\n`, or a lone `\r`.
pub fn parse_delimited(text: &str) -> SparkCatalog {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut scanner = Scanner::default();
    for line in text.lines() {
        scanner.step(line);
    }
    scanner.finish()
}

fn is_structured(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Best-effort UTF-8 decoding: undecodable bytes and a leading BOM are dropped.
fn decode_lossy(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&*text);
    text.replace(char::REPLACEMENT_CHARACTER, "")
}

/// A table whose header has been seen but whose rows are still being read.
#[derive(Debug)]
struct PendingTable {
    sheet: String,
    name: String,
    table: SparkTable,
}

/// Where the scanner is in the file.
#[derive(Debug, Default)]
enum Mode {
    /// No sheet header seen yet.
    #[default]
    SeekingSheet,
    /// Inside a sheet, waiting for a table header.
    SeekingTable { sheet: String },
    /// The next line carries the column labels.
    ReadingHeader(PendingTable),
    /// Consuming numbered rows.
    ReadingRows(PendingTable),
}

#[derive(Debug, Default)]
struct Scanner {
    catalog: SparkCatalog,
    mode: Mode,
    skipped: usize,
}

impl Scanner {
    fn step(&mut self, line: &str) {
        self.mode = match std::mem::take(&mut self.mode) {
            Mode::SeekingSheet => self.seek(None, line),
            Mode::SeekingTable { sheet } => self.seek(Some(sheet), line),
            Mode::ReadingHeader(mut pending) => {
                let fields = split_fields(line);
                if fields.len() >= 3 {
                    pending.table.columns = (fields[1].to_string(), fields[2].to_string());
                }
                Mode::ReadingRows(pending)
            }
            Mode::ReadingRows(mut pending) => match data_row(line) {
                Some(row) => {
                    pending.table.rows.push(row);
                    Mode::ReadingRows(pending)
                }
                None => {
                    // The line that ended the table is examined afresh.
                    let sheet = self.commit(pending);
                    self.seek(Some(sheet), line)
                }
            },
        };
    }

    fn seek(&mut self, current: Option<String>, line: &str) -> Mode {
        let raw = line.trim();

        if let Some(sheet) = sheet_header(raw) {
            self.catalog.sheet_entry(sheet);
            return Mode::SeekingTable {
                sheet: sheet.to_string(),
            };
        }

        if let Some(name) = table_header(raw) {
            let sheet = current.unwrap_or_else(|| UNKNOWN_SHEET.to_string());
            return Mode::ReadingHeader(PendingTable {
                sheet,
                name: name.to_string(),
                table: SparkTable::new(DEFAULT_COLUMNS.0, DEFAULT_COLUMNS.1),
            });
        }

        if !raw.is_empty() {
            self.skipped += 1;
        }
        match current {
            Some(sheet) => Mode::SeekingTable { sheet },
            None => Mode::SeekingSheet,
        }
    }

    /// Store a finished table and return the sheet it went into.
    fn commit(&mut self, pending: PendingTable) -> String {
        let PendingTable { sheet, name, table } = pending;
        if table.len() < crate::roller::SPARK_DIE as usize {
            tracing::debug!(sheet = %sheet, table = %name, rows = table.len(), "short spark table");
        }
        self.catalog.insert_table(&sheet, name, table);
        sheet
    }

    fn finish(mut self) -> SparkCatalog {
        match std::mem::take(&mut self.mode) {
            Mode::ReadingHeader(pending) | Mode::ReadingRows(pending) => {
                self.commit(pending);
            }
            Mode::SeekingSheet | Mode::SeekingTable { .. } => {}
        }
        if self.skipped > 0 {
            tracing::debug!(lines = self.skipped, "skipped unrecognized spark lines");
        }
        self.catalog
    }
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split(FIELD_DELIMITER).map(str::trim).collect()
}

/// `Name: anything` without a field delimiter names a sheet.
fn sheet_header(raw: &str) -> Option<&str> {
    if raw.contains(FIELD_DELIMITER) {
        return None;
    }
    raw.split_once(SHEET_SEPARATOR).map(|(name, _)| name.trim())
}

/// `;Name;` (empty, name, empty, ...) opens a table.
fn table_header(raw: &str) -> Option<&str> {
    if raw.matches(FIELD_DELIMITER).count() < 2 {
        return None;
    }
    match split_fields(raw).as_slice() {
        ["", name, "", ..] if !name.is_empty() => Some(*name),
        _ => None,
    }
}

/// `N;first;second` with a decimal row number is a data row.
fn data_row(line: &str) -> Option<(String, String)> {
    match split_fields(line).as_slice() {
        [number, first, second, ..]
            if !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()) =>
        {
            Some((first.to_string(), second.to_string()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn numbered_rows(n: usize) -> String {
        (1..=n)
            .map(|i| format!("{i};first {i};second {i};\n"))
            .collect()
    }

    #[test]
    fn any_line_ending_splits_lines() {
        let unix = format!("DRAMA:\n;Motive;;\n;Want;Obstacle;\n{}", numbered_rows(12));
        let mac = unix.replace('\n', "\r");
        let windows = unix.replace('\n', "\r\n");
        for text in [&unix, &mac, &windows] {
            let catalog = parse_delimited(text);
            let table = catalog.table("DRAMA", "Motive").unwrap();
            assert_eq!(table.len(), 12);
            assert_eq!(table.rows[11].1, "second 12");
        }
    }

    #[test]
    fn parses_sheet_table_header_and_rows() {
        let text = format!("DRAMA:;\n;Motive;;\n;Want;Obstacle;\n{}", numbered_rows(12));
        // "DRAMA:;" has a delimiter, so it is not a sheet header
        let catalog = parse_delimited(&text);
        assert!(catalog.sheet("DRAMA").is_none());
        assert!(catalog.table(UNKNOWN_SHEET, "Motive").is_some());

        let text = format!("DRAMA:\n;Motive;;\n;Want;Obstacle;\n{}", numbered_rows(12));
        let catalog = parse_delimited(&text);
        let table = catalog.table("DRAMA", "Motive").unwrap();
        assert_eq!(table.columns, ("Want".to_string(), "Obstacle".to_string()));
        assert_eq!(table.len(), 12);
        assert_eq!(table.rows[0], ("first 1".to_string(), "second 1".to_string()));
        assert_eq!(table.rows[11], ("first 12".to_string(), "second 12".to_string()));
    }

    #[test]
    fn short_column_line_uses_defaults() {
        let text = "S:\n;T;\nno labels here\n1;a;b\n";
        let catalog = parse_delimited(text);
        let table = catalog.table("S", "T").unwrap();
        assert_eq!(table.columns, ("Col1".to_string(), "Col2".to_string()));
        assert_eq!(table.rows, vec![("a".to_string(), "b".to_string())]);
    }

    #[test]
    fn column_line_is_always_consumed() {
        // A numbered line right after the header is still the label line.
        let text = "S:\n;T;\n1;a;b\n2;c;d\n";
        let catalog = parse_delimited(text);
        let table = catalog.table("S", "T").unwrap();
        assert_eq!(table.columns, ("a".to_string(), "b".to_string()));
        assert_eq!(table.rows, vec![("c".to_string(), "d".to_string())]);
    }

    #[test]
    fn row_run_ends_at_first_non_row_which_is_reexamined() {
        let text = "\
First:
;One;
;A;B
1;a1;b1
2;a2;b2
;Two;
;C;D
1;c1;d1
Second:
;Three;
;E;F
1;e1;f1
";
        let catalog = parse_delimited(text);
        let first: Vec<_> = catalog.sheet("First").unwrap().table_names().collect();
        assert_eq!(first, ["One", "Two"]);
        assert_eq!(catalog.table("First", "One").unwrap().len(), 2);
        assert_eq!(catalog.table("First", "Two").unwrap().len(), 1);
        assert_eq!(catalog.table("Second", "Three").unwrap().len(), 1);
    }

    #[test]
    fn tables_before_any_sheet_go_to_unknown() {
        let text = ";Loose;\n;X;Y\n1;a;b\n;Other;\n;X;Y\n";
        let catalog = parse_delimited(text);
        assert_eq!(catalog.len(), 1);
        let names: Vec<_> = catalog.sheet(UNKNOWN_SHEET).unwrap().table_names().collect();
        assert_eq!(names, ["Loose", "Other"]);
    }

    #[test]
    fn header_at_end_of_file() {
        let catalog = parse_delimited("S:\n;Lonely;");
        let table = catalog.table("S", "Lonely").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns, ("Col1".to_string(), "Col2".to_string()));
    }

    #[test]
    fn empty_sheet_is_kept() {
        let catalog = parse_delimited("Empty:\nFull:\n;T;\n;A;B\n");
        let names: Vec<_> = catalog.sheets().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Empty", "Full"]);
        assert!(catalog.sheet("Empty").unwrap().tables.is_empty());
    }

    #[test]
    fn sheet_name_is_text_before_first_separator() {
        let catalog = parse_delimited("  Court: intrigue: 2  \n");
        assert!(catalog.sheet("Court").is_some());
    }

    #[test]
    fn other_lines_are_skipped() {
        let text = "random prose\nS:\n;;\na;b;c\n;T;x\n;T2;;\n;L1;L2\n";
        let catalog = parse_delimited(text);
        let names: Vec<_> = catalog.sheet("S").unwrap().table_names().collect();
        assert_eq!(names, ["T2"]);
    }

    #[test]
    fn crlf_and_padding_tolerated() {
        let text = "S:\r\n ; Padded ; \r\n ; L1 ; L2 \r\n 1 ; a ; b \r\n";
        let catalog = parse_delimited(text);
        let table = catalog.table("S", "Padded").unwrap();
        assert_eq!(table.columns, ("L1".to_string(), "L2".to_string()));
        assert_eq!(table.rows, vec![("a".to_string(), "b".to_string())]);
    }

    #[test]
    fn duplicate_table_replaced() {
        let text = "S:\n;T;\n;A;B\n1;old;old\n;T;\n;A;B\n1;new;new\n";
        let catalog = parse_delimited(text);
        let table = catalog.table("S", "T").unwrap();
        assert_eq!(table.rows, vec![("new".to_string(), "new".to_string())]);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, SparkError::FileNotFound(_)));
    }

    #[test]
    fn load_delimited_skips_invalid_bytes() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"\xef\xbb\xbfMap\xff:\n;Ro\xfeads;\n;From;To\n1;a;b\n")
            .unwrap();
        let catalog = load_catalog(file.path()).unwrap();
        let table = catalog.table("Map", "Roads").unwrap();
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn load_structured_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".JSON").tempfile().unwrap();
        file.write_all(br#"{"S": {"T": {"columns": ["A", "B"], "rows": [["1", "2"]]}}}"#)
            .unwrap();
        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.table("S", "T").unwrap().len(), 1);
    }

    #[test]
    fn load_malformed_structured() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(b"{ not json").unwrap();
        let err = load_catalog(file.path()).unwrap_err();
        assert!(matches!(err, SparkError::Parse { .. }));
    }
}
