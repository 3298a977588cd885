//! In-memory tables loaded from CSV exports.
//!
//! Cells are `Option<String>`: an empty CSV field is a missing value. Columns
//! are looked up by header name and the lookup itself is optional, so callers
//! decide explicitly what an absent column means.

use crate::errors::LoadError;
use crate::model::TestRecord;
use std::io::Read;
use std::path::Path;

type Row = Vec<Option<String>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
}

/// Position of a named column inside a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column(usize);

/// Borrowed, contiguous slice of a table's rows sharing its headers.
#[derive(Debug, Clone, Copy)]
pub struct TableView<'a> {
    headers: &'a [String],
    rows: &'a [Row],
}

#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    cells: &'a [Option<String>],
}

/// Header names the classifiers read from.
#[derive(Debug, Clone, Copy)]
pub struct ColumnNames<'c> {
    pub identifier: &'c str,
    pub desktop_status: &'c str,
    pub mobile_status: &'c str,
    pub device: &'c str,
    pub status: &'c str,
    pub na_reason: &'c str,
}

/// [`ColumnNames`] resolved against one table's headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolvedColumns {
    pub identifier: Option<Column>,
    pub desktop_status: Option<Column>,
    pub mobile_status: Option<Column>,
    pub device: Option<Column>,
    pub status: Option<Column>,
    pub na_reason: Option<Column>,
}

impl Table {
    /// Rows shorter than the header are padded with missing cells, longer
    /// rows are truncated.
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut r| {
                r.resize(width, None);
                r
            })
            .collect();
        Self { headers, rows }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, path)
    }

    /// Parses CSV with a header row. `origin` only labels errors.
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self, LoadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| LoadError::Parse {
                path: origin.to_path_buf(),
                record: 0,
                message: e.to_string(),
            })?
            .iter()
            .map(str::to_string)
            .collect();

        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(LoadError::Empty {
                path: origin.to_path_buf(),
            });
        }

        let mut rows = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| LoadError::Parse {
                path: origin.to_path_buf(),
                record: idx + 1,
                message: e.to_string(),
            })?;
            rows.push(
                record
                    .iter()
                    .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                    .collect(),
            );
        }

        tracing::debug!(
            event = "statboard.table.loaded",
            origin = %origin.display(),
            columns = headers.len(),
            rows = rows.len()
        );

        Ok(Self::new(headers, rows))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn view(&self) -> TableView<'_> {
        TableView {
            headers: &self.headers,
            rows: &self.rows,
        }
    }
}

impl<'a> TableView<'a> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn headers(&self) -> &'a [String] {
        self.headers
    }

    /// First column with this exact header name.
    pub fn column(&self, name: &str) -> Option<Column> {
        self.headers.iter().position(|h| h == name).map(Column)
    }

    pub fn rows(&self) -> impl Iterator<Item = RowRef<'a>> + 'a {
        let rows: &'a [Row] = self.rows;
        rows.iter().map(|r| RowRef { cells: r })
    }

    /// Rows before `idx` and rows after it; the row at `idx` belongs to
    /// neither half.
    pub fn split_around(&self, idx: usize) -> (TableView<'a>, TableView<'a>) {
        let head = &self.rows[..idx];
        let tail = self.rows.get(idx + 1..).unwrap_or(&[]);
        (
            TableView {
                headers: self.headers,
                rows: head,
            },
            TableView {
                headers: self.headers,
                rows: tail,
            },
        )
    }

    /// Same headers, no rows.
    pub fn empty(&self) -> TableView<'a> {
        TableView {
            headers: self.headers,
            rows: &[],
        }
    }

    pub fn resolve(&self, names: &ColumnNames<'_>) -> ResolvedColumns {
        ResolvedColumns {
            identifier: self.column(names.identifier),
            desktop_status: self.column(names.desktop_status),
            mobile_status: self.column(names.mobile_status),
            device: self.column(names.device),
            status: self.column(names.status),
            na_reason: self.column(names.na_reason),
        }
    }

    pub fn records(&self, cols: &ResolvedColumns) -> Vec<TestRecord<'a>> {
        self.rows().map(|row| row.record(cols)).collect()
    }
}

impl<'a> RowRef<'a> {
    /// Cell text, or `None` when the column is absent or the cell is empty.
    pub fn get(&self, col: Option<Column>) -> Option<&'a str> {
        let Column(idx) = col?;
        self.cells.get(idx).and_then(|c| c.as_deref())
    }

    pub fn record(&self, cols: &ResolvedColumns) -> TestRecord<'a> {
        TestRecord {
            identifier: self.get(cols.identifier),
            desktop_status: self.get(cols.desktop_status),
            mobile_status: self.get(cols.mobile_status),
            device: self.get(cols.device),
            status: self.get(cols.status),
            na_reason: self.get(cols.na_reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &str) -> Result<Table, LoadError> {
        Table::from_reader(data.as_bytes(), Path::new("inline.csv"))
    }

    #[test]
    fn empty_fields_are_missing() {
        let t = parse("ID,Device\n1,\n,Mobile\n").unwrap();
        let view = t.view();
        let id = view.column("ID");
        let device = view.column("Device");
        let rows: Vec<_> = view.rows().collect();
        assert_eq!(rows[0].get(id), Some("1"));
        assert_eq!(rows[0].get(device), None);
        assert_eq!(rows[1].get(id), None);
        assert_eq!(rows[1].get(device), Some("Mobile"));
    }

    #[test]
    fn whitespace_cells_are_kept() {
        let t = parse("ID,Status\n1,\"  \"\n").unwrap();
        let view = t.view();
        let row = view.rows().next().unwrap();
        assert_eq!(row.get(view.column("Status")), Some("  "));
    }

    #[test]
    fn short_rows_are_padded() {
        let t = parse("ID,Device,Status\n1\n").unwrap();
        let view = t.view();
        let row = view.rows().next().unwrap();
        assert_eq!(row.get(view.column("Status")), None);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn absent_column_reads_as_missing() {
        let t = parse("ID\n1\n").unwrap();
        let view = t.view();
        assert!(view.column("Device").is_none());
        let row = view.rows().next().unwrap();
        assert_eq!(row.get(view.column("Device")), None);
    }

    #[test]
    fn empty_input_is_a_load_error() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));
    }

    #[test]
    fn header_only_is_an_empty_table() {
        let t = parse("ID,Device\n").unwrap();
        assert!(t.is_empty());
        assert_eq!(t.headers().len(), 2);
    }

    #[test]
    fn split_around_excludes_pivot_row() {
        let t = parse("ID\n1\n2\n\"\"\n3\n").unwrap();
        let (head, tail) = t.view().split_around(2);
        assert_eq!(head.len(), 2);
        assert_eq!(tail.len(), 1);
        let id = tail.column("ID");
        assert_eq!(tail.rows().next().unwrap().get(id), Some("3"));
    }

    #[test]
    fn split_around_last_row_leaves_empty_tail() {
        let t = parse("ID\n1\n\"\"\n").unwrap();
        let (head, tail) = t.view().split_around(1);
        assert_eq!(head.len(), 1);
        assert!(tail.is_empty());
    }
}
