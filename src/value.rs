//! Cell values and axis labels.
//!
//! [`Cell`] is what a tabular source yields per (row, column): a plain
//! scalar, a temporal value, a missing marker, or the string form of
//! anything richer. [`CellValue`] is the JSON-safe encoded form that ends
//! up in a snapshot payload, and [`Label`] is a row or column label of
//! either kind of index (flat or multi-level).

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A single source-side cell value.
///
/// Sources hand these to the snapshot builder; encoding to the JSON-safe
/// [`CellValue`] happens exactly once per cell during the build.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Missing value, whatever the source calls it (None, NaN, NaT, null).
    Missing,
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// Floating-point value. NaN counts as missing.
    Float(f64),
    /// UTF-8 string value.
    Str(String),
    /// Calendar date with no time of day.
    Date(NaiveDate),
    /// Date and time of day, timezone-naive.
    DateTime(NaiveDateTime),
    /// Any richer value, carried by its plain string form.
    Other(String),
}

impl Cell {
    /// Whether the missing-value predicate flags this cell.
    ///
    /// NaN floats are missing: the viewer payload never carries a NaN
    /// sentinel, only an explicit null.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Whether the cell carries a time of day other than midnight.
    ///
    /// Only hour, minute and second are consulted; subsecond precision is
    /// deliberately ignored, so `00:00:00.250` still counts as midnight.
    pub fn has_time_of_day(&self) -> bool {
        match self {
            Self::DateTime(dt) => dt.hour() != 0 || dt.minute() != 0 || dt.second() != 0,
            _ => false,
        }
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<NaiveDate> for Cell {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// A JSON-safe cell as it appears in a snapshot payload.
///
/// Serialized untagged, so the wire form is a bare JSON scalar: `null`,
/// `true`, `42`, `3.5` or `"text"`. Re-encoding an already-encoded value
/// is the identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// JSON null, the one missing-value marker in a payload.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON integer.
    Int(i64),
    /// JSON float.
    Float(f64),
    /// JSON string.
    Str(String),
}

impl CellValue {
    /// Encode a source cell into its JSON-safe form.
    ///
    /// Total over every cell: missing values (including NaN floats) become
    /// [`CellValue::Null`], infinities take their plain string form (JSON
    /// has no number for them), temporal values take their ISO-8601 text
    /// form, and anything richer falls back to its plain string form.
    pub fn encode(cell: &Cell) -> Self {
        match cell {
            Cell::Missing => Self::Null,
            Cell::Bool(b) => Self::Bool(*b),
            Cell::Int(v) => Self::Int(*v),
            Cell::Float(v) if v.is_nan() => Self::Null,
            Cell::Float(v) if !v.is_finite() => Self::Str(v.to_string()),
            Cell::Float(v) => Self::Float(*v),
            Cell::Str(s) => Self::Str(s.clone()),
            Cell::Date(d) => Self::Str(iso_date(*d)),
            Cell::DateTime(dt) => Self::Str(iso_datetime(*dt)),
            Cell::Other(s) => Self::Str(s.clone()),
        }
    }

    /// Whether this is the null marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<CellValue> for Cell {
    fn from(value: CellValue) -> Self {
        match value {
            CellValue::Null => Self::Missing,
            CellValue::Bool(b) => Self::Bool(b),
            CellValue::Int(v) => Self::Int(v),
            CellValue::Float(v) => Self::Float(v),
            CellValue::Str(s) => Self::Str(s),
        }
    }
}

/// ISO-8601 text form of a date.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// ISO-8601 text form of a timestamp.
///
/// The fractional-seconds suffix appears only when the value carries
/// subsecond precision, so whole seconds read `2024-01-01T13:00:00`.
pub fn iso_datetime(datetime: NaiveDateTime) -> String {
    if datetime.nanosecond() == 0 {
        datetime.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        datetime.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
    }
}

/// A row or column label.
///
/// Flat indices carry one scalar per position; multi-level indices carry
/// one scalar per level. Composite labels serialize as JSON arrays and
/// scalar labels as bare values, which is the shape the client viewer
/// expects when it picks a level out of a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    /// Single-level label.
    Scalar(CellValue),
    /// Multi-level label, one entry per index level.
    Composite(Vec<CellValue>),
}

impl Label {
    /// Number of index levels this label spans.
    pub fn levels(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Composite(parts) => parts.len(),
        }
    }

    /// Positional label for row `i`, used when a source has no explicit
    /// row labels.
    pub fn position(row: usize) -> Self {
        Self::Scalar(CellValue::Int(i64::try_from(row).unwrap_or(i64::MAX)))
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Self::Scalar(CellValue::Str(value.to_string()))
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Self::Scalar(CellValue::Str(value))
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Self::Scalar(CellValue::Int(value))
    }
}

impl From<(&str, &str)> for Label {
    fn from(value: (&str, &str)) -> Self {
        Self::Composite(vec![
            CellValue::Str(value.0.to_string()),
            CellValue::Str(value.1.to_string()),
        ])
    }
}
