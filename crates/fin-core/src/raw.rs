//! Raw tabular input, as handed over by a market-data source.
//!
//! A [`RawTable`] makes no promises: headers may span several levels, dates
//! may live in a column or in the row index, and any cell may be missing or
//! hold text where a number was expected. The
//! [`Normalizer`](crate::normalize::Normalizer) turns it into a
//! [`CanonicalTable`](crate::CanonicalTable).

use std::io::Read;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{NormalizeError, NormalizeResult};

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%d %H:%M:%S%z"];

/// A single untyped cell.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RawCell {
    /// Empty or absent.
    Missing,
    /// Numeric value.
    Number(f64),
    /// Anything else, kept verbatim.
    Text(String),
}

impl RawCell {
    /// Classify a text field: blank is missing, a parseable float is a
    /// number, everything else stays text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(v) => Self::Number(v),
            Err(_) => Self::Text(trimmed.to_string()),
        }
    }

    /// Numeric value, reading numeric text as well.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Missing => None,
            Self::Number(v) => Some(*v),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Calendar date of the cell.
    ///
    /// Text is read as `YYYY-MM-DD`, a naive datetime, an RFC 3339 timestamp
    /// or a datetime with a UTC offset (the local date is kept). Numbers are
    /// read as Unix seconds.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Missing => None,
            Self::Number(secs) => {
                if !secs.is_finite() {
                    return None;
                }
                DateTime::from_timestamp(*secs as i64, 0).map(|dt| dt.date_naive())
            }
            Self::Text(s) => parse_date_text(s.trim()),
        }
    }

    /// `true` for [`RawCell::Missing`].
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<f64> for RawCell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawCell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl<T: Into<RawCell>> From<Option<T>> for RawCell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

fn parse_date_text(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local().date());
    }
    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.naive_local().date())
}

/// A column with its header path, outermost level first.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawColumn {
    header: Vec<String>,
    cells: Vec<RawCell>,
}

impl RawColumn {
    /// Create a column from its header levels and cells.
    #[must_use]
    pub fn new<S: Into<String>>(header: impl IntoIterator<Item = S>, cells: Vec<RawCell>) -> Self {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            cells,
        }
    }

    /// Every header level.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// The outermost header label, or `""` for a headerless column.
    #[must_use]
    pub fn label(&self) -> &str {
        self.header.first().map_or("", String::as_str)
    }

    /// Cell values.
    #[must_use]
    pub fn cells(&self) -> &[RawCell] {
        &self.cells
    }
}

/// Row index of a raw table, optionally named.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawIndex {
    name: Option<String>,
    cells: Vec<RawCell>,
}

impl RawIndex {
    /// Create an index.
    #[must_use]
    pub fn new(name: Option<String>, cells: Vec<RawCell>) -> Self {
        Self { name, cells }
    }

    /// Index name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Index values.
    #[must_use]
    pub fn cells(&self) -> &[RawCell] {
        &self.cells
    }
}

/// How to read a CSV source into a [`RawTable`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CsvOptions {
    /// Number of header rows (at least 1).
    pub header_rows: usize,
    /// Column holding the row index. With more than one header row the first
    /// column is the index unless this says otherwise.
    pub index_column: Option<usize>,
    /// Field delimiter.
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            header_rows: 1,
            index_column: None,
            delimiter: b',',
        }
    }
}

impl CsvOptions {
    /// Create options with the given number of header rows.
    #[must_use]
    pub fn new(header_rows: usize) -> Self {
        Self {
            header_rows,
            ..Self::default()
        }
    }

    /// Set the index column.
    #[must_use]
    pub fn with_index_column(mut self, column: usize) -> Self {
        self.index_column = Some(column);
        self
    }

    /// Set the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn effective_index(&self) -> Option<usize> {
        self.index_column
            .or_else(|| (self.header_rows > 1).then_some(0))
    }
}

/// Untyped table with multi-level headers and an optional row index.
///
/// # Example
///
/// ```rust
/// use fin_core::{CsvOptions, RawTable};
///
/// let csv = "Date,Open,High,Low,Close,Volume\n2024-01-02,1,2,0.5,1.5,100\n";
/// let raw = RawTable::from_csv_reader(csv.as_bytes(), &CsvOptions::default()).unwrap();
///
/// assert_eq!(raw.row_count(), 1);
/// assert_eq!(raw.labels(), vec!["Date", "Open", "High", "Low", "Close", "Volume"]);
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawTable {
    columns: Vec<RawColumn>,
    index: Option<RawIndex>,
    rows: usize,
}

impl RawTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table with single-level headers from row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::Ragged`] if a row's width differs from the
    /// header's.
    pub fn from_rows<S: AsRef<str>>(headers: &[S], rows: Vec<Vec<RawCell>>) -> NormalizeResult<Self> {
        let mut columns: Vec<Vec<RawCell>> = vec![Vec::with_capacity(rows.len()); headers.len()];
        for row in rows {
            if row.len() != headers.len() {
                return Err(NormalizeError::Ragged {
                    expected: headers.len(),
                    actual: row.len(),
                });
            }
            for (column, cell) in columns.iter_mut().zip(row) {
                column.push(cell);
            }
        }

        let mut table = Self::new();
        for (header, cells) in headers.iter().zip(columns) {
            table.push_column(RawColumn::new([header.as_ref()], cells))?;
        }
        Ok(table)
    }

    /// Append a column.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::Ragged`] if its length differs from the
    /// table's row count.
    pub fn push_column(&mut self, column: RawColumn) -> NormalizeResult<()> {
        let len = column.cells.len();
        if self.has_shape() && len != self.rows {
            return Err(NormalizeError::Ragged {
                expected: self.rows,
                actual: len,
            });
        }
        self.rows = len;
        self.columns.push(column);
        Ok(())
    }

    /// Attach a row index.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::Ragged`] if its length differs from the
    /// table's row count.
    pub fn set_index(&mut self, index: RawIndex) -> NormalizeResult<()> {
        let len = index.cells.len();
        if self.has_shape() && len != self.rows {
            return Err(NormalizeError::Ragged {
                expected: self.rows,
                actual: len,
            });
        }
        self.rows = len;
        self.index = Some(index);
        Ok(())
    }

    /// Builder form of [`RawTable::set_index`].
    ///
    /// # Errors
    ///
    /// See [`RawTable::set_index`].
    pub fn with_index(mut self, index: RawIndex) -> NormalizeResult<Self> {
        self.set_index(index)?;
        Ok(self)
    }

    fn has_shape(&self) -> bool {
        !self.columns.is_empty() || self.index.is_some()
    }

    /// Number of data rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// `true` when there are no rows or no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns.is_empty()
    }

    /// Columns in source order.
    #[must_use]
    pub fn columns(&self) -> &[RawColumn] {
        &self.columns
    }

    /// Outermost header label of every column.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(RawColumn::label).collect()
    }

    /// Row index, if any.
    #[must_use]
    pub fn index(&self) -> Option<&RawIndex> {
        self.index.as_ref()
    }

    /// Read CSV text.
    ///
    /// The first `header_rows` records are header levels. When an index
    /// column is in effect its header cells are dropped, and with several
    /// header rows a following record whose only non-empty cell is the index
    /// cell names the index (the layout market-data downloaders write).
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::Csv`] if the reader fails or a header row is
    /// missing.
    pub fn from_csv_reader<R: Read>(reader: R, options: &CsvOptions) -> NormalizeResult<Self> {
        let header_rows = options.header_rows.max(1);
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .delimiter(options.delimiter)
            .from_reader(reader);

        let mut records = rdr.records();
        let mut headers: Vec<StringRecord> = Vec::with_capacity(header_rows);
        for level in 0..header_rows {
            match records.next() {
                Some(record) => headers.push(
                    record.map_err(|e| NormalizeError::csv(format!("header row {level}"), e))?,
                ),
                None if level == 0 => return Ok(Self::new()),
                None => {
                    return Err(NormalizeError::csv(
                        format!("header row {level}"),
                        "unexpected end of input",
                    ))
                }
            }
        }

        let width = headers.iter().map(StringRecord::len).max().unwrap_or(0);
        let index_col = options.effective_index().filter(|&i| i < width);

        let mut index_name = index_col.and_then(|i| {
            (header_rows == 1)
                .then(|| headers[0].get(i).map(str::to_string))
                .flatten()
                .filter(|s| !s.is_empty())
        });

        let mut body: Vec<StringRecord> = Vec::new();
        for (row, record) in records.enumerate() {
            let record = record.map_err(|e| NormalizeError::csv(format!("data row {row}"), e))?;
            if row == 0 && header_rows > 1 {
                if let Some(name) = index_col.and_then(|i| index_name_row(&record, i)) {
                    index_name = Some(name);
                    continue;
                }
            }
            body.push(record);
        }

        let mut table = Self::new();
        let cell_at = |record: &StringRecord, col: usize| {
            record.get(col).map_or(RawCell::Missing, RawCell::parse)
        };

        for col in 0..width {
            let cells: Vec<RawCell> = body.iter().map(|r| cell_at(r, col)).collect();
            if Some(col) == index_col {
                table.set_index(RawIndex::new(index_name.clone(), cells))?;
            } else {
                let header = headers.iter().map(|h| h.get(col).unwrap_or("").to_string());
                table.push_column(RawColumn::new(header, cells))?;
            }
        }

        Ok(table)
    }
}

fn index_name_row(record: &StringRecord, index_col: usize) -> Option<String> {
    let name = record.get(index_col)?;
    let others_empty = record
        .iter()
        .enumerate()
        .all(|(i, cell)| i == index_col || cell.is_empty());
    (!name.is_empty() && others_empty && RawCell::parse(name).as_date().is_none())
        .then(|| name.to_string())
}
