//! Columnar dataset with declared column kinds.
//!
//! Every column carries a [`ColumnKind`] decided once, when the column is
//! added or loaded. Plotters dispatch on that tag and never re-inspect the
//! values to guess a chart type.

use crate::error::{Error, Result};
use std::fmt;
use std::io;
use std::path::Path;
use tracing::debug;

/// Cell spellings treated as missing when loading CSV.
const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL"];

/// A single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// A numeric value.
    Number(f32),
    /// A text value.
    Text(String),
    /// A missing value.
    Null,
}

impl DataValue {
    /// Get as f32, or None if not a number.
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            DataValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// True for [`DataValue::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// Label used when the value acts as a category (`None` for missing).
    #[must_use]
    pub fn label(&self) -> Option<String> {
        match self {
            DataValue::Number(n) => Some(n.to_string()),
            DataValue::Text(s) => Some(s.clone()),
            DataValue::Null => None,
        }
    }
}

impl From<f32> for DataValue {
    fn from(v: f32) -> Self {
        DataValue::Number(v)
    }
}

impl From<Option<f32>> for DataValue {
    fn from(v: Option<f32>) -> Self {
        v.map_or(DataValue::Null, DataValue::Number)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::Text(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::Text(s)
    }
}

/// Declared semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Continuous numbers: histograms, scatter plots.
    Numeric,
    /// Explicit categories: count bars, violins grouped by category.
    Categorical,
    /// Anything else (free text, identifiers, dates...).
    Other,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
            ColumnKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// A named, typed column.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    kind: ColumnKind,
    values: Vec<DataValue>,
    /// Declared category order. Only populated for categorical columns.
    categories: Vec<String>,
}

impl Column {
    /// Create a column with an explicit kind.
    #[must_use]
    pub fn new(name: &str, kind: ColumnKind, values: Vec<DataValue>) -> Self {
        let mut column = Self {
            name: name.to_string(),
            kind,
            values,
            categories: Vec::new(),
        };
        if kind == ColumnKind::Categorical {
            column.categories = column.labels_in_appearance_order();
        }
        column
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared kind.
    #[must_use]
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Raw cell values.
    #[must_use]
    pub fn values(&self) -> &[DataValue] {
        &self.values
    }

    /// Number of cells, missing ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the column has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Category order for categorical columns; empty otherwise.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Numbers of a numeric column, missing cells skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeInspection`] if any cell holds text.
    pub fn numeric_values(&self) -> Result<Vec<f32>> {
        self.values
            .iter()
            .filter(|v| !v.is_null())
            .map(|v| {
                v.as_f32().ok_or_else(|| Error::TypeInspection {
                    column: self.name.clone(),
                })
            })
            .collect()
    }

    /// Per-row numbers, `None` where the cell is missing or not numeric.
    #[must_use]
    pub fn numbers_by_row(&self) -> Vec<Option<f32>> {
        self.values.iter().map(DataValue::as_f32).collect()
    }

    /// Occurrences of each distinct value, missing cells excluded.
    ///
    /// Categorical columns report every declared category (zero counts
    /// included) in declared order; other columns report values in order of
    /// first appearance.
    #[must_use]
    pub fn value_counts(&self) -> Vec<(String, usize)> {
        let order = if self.kind == ColumnKind::Categorical {
            self.categories.clone()
        } else {
            self.labels_in_appearance_order()
        };

        let mut counts: Vec<(String, usize)> = order.into_iter().map(|c| (c, 0)).collect();
        for label in self.values.iter().filter_map(DataValue::label) {
            if let Some(entry) = counts.iter_mut().find(|(c, _)| *c == label) {
                entry.1 += 1;
            }
        }
        counts
    }

    fn labels_in_appearance_order(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for label in self.values.iter().filter_map(DataValue::label) {
            if !seen.contains(&label) {
                seen.push(label);
            }
        }
        seen
    }

    fn retag(&mut self, kind: ColumnKind) {
        self.kind = kind;
        self.categories = if kind == ColumnKind::Categorical {
            self.labels_in_appearance_order()
        } else {
            Vec::new()
        };
    }
}

/// Ordered collection of uniquely named columns.
///
/// Column order is insertion order and is significant: the relation plots
/// treat the last column as the target.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    /// Create a new empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateColumn`] if the name is already taken.
    pub fn push(&mut self, column: Column) -> Result<()> {
        if self.has_column(column.name()) {
            return Err(Error::DuplicateColumn(column.name));
        }
        self.columns.push(column);
        Ok(())
    }

    /// Append a numeric column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateColumn`] if the name is already taken.
    pub fn add_numeric(&mut self, name: &str, data: &[f32]) -> Result<()> {
        let values = data.iter().map(|&v| DataValue::Number(v)).collect();
        self.push(Column::new(name, ColumnKind::Numeric, values))
    }

    /// Append a categorical column; categories are ordered by first appearance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateColumn`] if the name is already taken.
    pub fn add_categorical(&mut self, name: &str, data: &[&str]) -> Result<()> {
        self.push(Column::new(name, ColumnKind::Categorical, text_values(data)))
    }

    /// Append a free-text column (kind [`ColumnKind::Other`]).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateColumn`] if the name is already taken.
    pub fn add_text(&mut self, name: &str, data: &[&str]) -> Result<()> {
        self.push(Column::new(name, ColumnKind::Other, text_values(data)))
    }

    /// Change the declared kind of a column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownColumn`] if no column has this name.
    pub fn set_kind(&mut self, name: &str, kind: ColumnKind) -> Result<()> {
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))?;
        column.retag(kind);
        Ok(())
    }

    /// Declare several columns categorical.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownColumn`] on the first name that does not exist.
    pub fn mark_categorical(&mut self, names: &[&str]) -> Result<()> {
        for name in names {
            self.set_kind(name, ColumnKind::Categorical)?;
        }
        Ok(())
    }

    /// Columns in order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Check if a column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Column names in order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Number of columns.
    #[must_use]
    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows (length of the longest column).
    #[must_use]
    pub fn nrow(&self) -> usize {
        self.columns.iter().map(Column::len).max().unwrap_or(0)
    }

    /// True when there are no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Load a CSV file with a header row.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading csv");
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Load CSV from any reader, inferring each column's kind.
    ///
    /// A column whose non-missing cells all parse as numbers is
    /// [`ColumnKind::Numeric`]; anything else is [`ColumnKind::Other`].
    /// Categorical is never inferred; use [`Dataset::mark_categorical`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Csv`] on malformed input.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for record in reader.records() {
            let record = record?;
            for (idx, column) in cells.iter_mut().enumerate() {
                column.push(record.get(idx).unwrap_or("").trim().to_string());
            }
        }

        let mut dataset = Self::new();
        for (name, raw) in headers.iter().zip(cells) {
            let column = infer_column(name, &raw);
            debug!(column = %name, kind = %column.kind(), "inferred column kind");
            dataset.push(column)?;
        }
        Ok(dataset)
    }
}

fn text_values(data: &[&str]) -> Vec<DataValue> {
    data.iter().map(|&s| DataValue::Text(s.to_string())).collect()
}

fn is_missing(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell)
}

fn infer_column(name: &str, raw: &[String]) -> Column {
    let all_numeric = raw
        .iter()
        .filter(|s| !is_missing(s.as_str()))
        .all(|s| s.parse::<f32>().is_ok());

    let (kind, values) = if all_numeric {
        let values: Vec<DataValue> = raw
            .iter()
            .map(|s| DataValue::from(s.parse::<f32>().ok().filter(|_| !is_missing(s.as_str()))))
            .collect();
        (ColumnKind::Numeric, values)
    } else {
        let values: Vec<DataValue> = raw
            .iter()
            .map(|s| {
                if is_missing(s.as_str()) {
                    DataValue::Null
                } else {
                    DataValue::Text(s.clone())
                }
            })
            .collect();
        (ColumnKind::Other, values)
    };

    Column::new(name, kind, values)
}
