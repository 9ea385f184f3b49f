//! Arrow adapter.
//!
//! [`RecordBatchSource`] presents one or more Arrow `RecordBatch`es as a
//! [`TabularSource`], so Arrow-resident data renders without first being
//! copied into a [`Table`](crate::Table). Rows are addressed globally
//! across batches through precomputed offsets.

use std::sync::Arc;

use arrow::array::{
    Array, BinaryArray, BooleanArray, Date32Array, Date64Array, Float32Array, Float64Array,
    Int16Array, Int32Array, Int64Array, Int8Array, LargeBinaryArray, LargeStringArray,
    RecordBatch, StringArray, TimestampMicrosecondArray, TimestampMillisecondArray,
    TimestampNanosecondArray, TimestampSecondArray, UInt16Array, UInt32Array, UInt64Array,
    UInt8Array,
};
use arrow::datatypes::{DataType, Schema, SchemaRef, TimeUnit};
use arrow::temporal_conversions::{
    date32_to_datetime, date64_to_datetime, timestamp_ms_to_datetime, timestamp_ns_to_datetime,
    timestamp_s_to_datetime, timestamp_us_to_datetime,
};

use crate::error::{Error, Result};
use crate::source::{ColumnType, TabularSource};
use crate::value::{Cell, CellValue, Label};

/// Arrow-backed tabular source.
///
/// Column labels come from the schema's field names, row labels are
/// positional, and both axes have a single unnamed level.
///
/// # Example
///
/// ```ignore
/// let source = RecordBatchSource::from_batch(batch);
/// let snapshot = TableSnapshot::from_source(&source)?;
/// ```
#[derive(Debug, Clone)]
pub struct RecordBatchSource {
    batches: Vec<RecordBatch>,
    schema: SchemaRef,
    total_rows: usize,
    /// Cumulative row offsets for batch lookup.
    batch_offsets: Vec<usize>,
}

impl RecordBatchSource {
    /// Create a source from batches sharing a schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaMismatch`] if any batch's schema differs
    /// from `schema`.
    pub fn new(batches: Vec<RecordBatch>, schema: SchemaRef) -> Result<Self> {
        for (i, batch) in batches.iter().enumerate() {
            if batch.schema() != schema {
                return Err(Error::schema_mismatch(format!(
                    "batch {i} does not match the source schema"
                )));
            }
        }

        let total_rows = batches.iter().map(RecordBatch::num_rows).sum();

        // Pre-compute offsets for O(log n) row lookup.
        let mut batch_offsets = Vec::with_capacity(batches.len() + 1);
        batch_offsets.push(0);
        let mut offset = 0;
        for batch in &batches {
            offset += batch.num_rows();
            batch_offsets.push(offset);
        }

        Ok(Self {
            batches,
            schema,
            total_rows,
            batch_offsets,
        })
    }

    /// Create a source from a single batch.
    pub fn from_batch(batch: RecordBatch) -> Self {
        let schema = batch.schema();
        let total_rows = batch.num_rows();
        Self {
            batches: vec![batch],
            schema,
            total_rows,
            batch_offsets: vec![0, total_rows],
        }
    }

    /// Create an empty source.
    pub fn empty() -> Self {
        Self {
            batches: Vec::new(),
            schema: Arc::new(Schema::empty()),
            total_rows: 0,
            batch_offsets: vec![0],
        }
    }

    /// The shared schema.
    #[inline]
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Locate a global row within the batch structure.
    fn locate_row(&self, global_row: usize) -> Option<(usize, usize)> {
        if global_row >= self.total_rows {
            return None;
        }

        let batch_idx = match self.batch_offsets.binary_search(&global_row) {
            Ok(idx) => {
                if idx < self.batches.len() {
                    idx
                } else {
                    idx.saturating_sub(1)
                }
            }
            Err(idx) => idx.saturating_sub(1),
        };

        let batch_start = self.batch_offsets.get(batch_idx).copied().unwrap_or(0);
        let local_row = global_row.saturating_sub(batch_start);

        Some((batch_idx, local_row))
    }
}

impl TabularSource for RecordBatchSource {
    fn row_count(&self) -> usize {
        self.total_rows
    }

    fn column_count(&self) -> usize {
        self.schema.fields().len()
    }

    fn cell(&self, row: usize, col: usize) -> Result<Cell> {
        let (batch_idx, local_row) = self.locate_row(row).ok_or(Error::IndexOutOfBounds {
            index: row,
            len: self.total_rows,
        })?;
        let batch = self
            .batches
            .get(batch_idx)
            .ok_or_else(|| Error::source("batch offsets out of sync with batches"))?;
        let array = batch.columns().get(col).ok_or_else(|| {
            Error::source(format!(
                "column {col} out of bounds for schema with {} fields",
                self.schema.fields().len()
            ))
        })?;
        extract_cell(array.as_ref(), local_row)
    }

    fn column_label(&self, col: usize) -> Label {
        self.schema
            .fields()
            .get(col)
            .map_or(Label::Scalar(CellValue::Null), |field| {
                Label::from(field.name().clone())
            })
    }

    fn row_label(&self, row: usize) -> Label {
        Label::position(row)
    }

    fn column_type(&self, col: usize) -> ColumnType {
        self.schema
            .fields()
            .get(col)
            .map_or(ColumnType::Other, |field| {
                column_type_of(field.data_type())
            })
    }

    fn column_names(&self) -> Vec<Option<String>> {
        vec![None]
    }

    fn index_names(&self) -> Vec<Option<String>> {
        vec![None]
    }
}

/// Map an Arrow data type onto the declared column classes.
fn column_type_of(data_type: &DataType) -> ColumnType {
    match data_type {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => ColumnType::Int,
        DataType::Float32 | DataType::Float64 => ColumnType::Float,
        DataType::Boolean => ColumnType::Bool,
        DataType::Utf8 | DataType::LargeUtf8 => ColumnType::Text,
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => ColumnType::Temporal,
        _ => ColumnType::Other,
    }
}

/// Extract the cell at `row` from an Arrow array.
///
/// Nulls map to [`Cell::Missing`]; unsupported types carry a placeholder
/// string so rendering stays total.
fn extract_cell(array: &dyn Array, row: usize) -> Result<Cell> {
    if row >= array.len() {
        return Err(Error::IndexOutOfBounds {
            index: row,
            len: array.len(),
        });
    }
    if array.is_null(row) {
        return Ok(Cell::Missing);
    }

    let cell = match array.data_type() {
        DataType::Utf8 => Cell::Str(downcast::<StringArray>(array)?.value(row).to_string()),
        DataType::LargeUtf8 => {
            Cell::Str(downcast::<LargeStringArray>(array)?.value(row).to_string())
        }

        DataType::Boolean => Cell::Bool(downcast::<BooleanArray>(array)?.value(row)),

        DataType::Int8 => Cell::Int(i64::from(downcast::<Int8Array>(array)?.value(row))),
        DataType::Int16 => Cell::Int(i64::from(downcast::<Int16Array>(array)?.value(row))),
        DataType::Int32 => Cell::Int(i64::from(downcast::<Int32Array>(array)?.value(row))),
        DataType::Int64 => Cell::Int(downcast::<Int64Array>(array)?.value(row)),
        DataType::UInt8 => Cell::Int(i64::from(downcast::<UInt8Array>(array)?.value(row))),
        DataType::UInt16 => Cell::Int(i64::from(downcast::<UInt16Array>(array)?.value(row))),
        DataType::UInt32 => Cell::Int(i64::from(downcast::<UInt32Array>(array)?.value(row))),
        DataType::UInt64 => {
            let v = downcast::<UInt64Array>(array)?.value(row);
            // Values past i64::MAX keep their string form instead of wrapping.
            i64::try_from(v).map_or_else(|_| Cell::Other(v.to_string()), Cell::Int)
        }

        DataType::Float32 => Cell::Float(f64::from(downcast::<Float32Array>(array)?.value(row))),
        DataType::Float64 => Cell::Float(downcast::<Float64Array>(array)?.value(row)),

        DataType::Date32 => {
            let days = downcast::<Date32Array>(array)?.value(row);
            date32_to_datetime(days)
                .map_or_else(|| Cell::Other(format!("date:{days}")), |dt| Cell::Date(dt.date()))
        }
        // Date64 carries milliseconds, which may encode a time of day;
        // keep it so classification can see it.
        DataType::Date64 => {
            let millis = downcast::<Date64Array>(array)?.value(row);
            date64_to_datetime(millis)
                .map_or_else(|| Cell::Other(format!("date64:{millis}")), Cell::DateTime)
        }
        DataType::Timestamp(unit, _) => extract_timestamp(array, row, *unit)?,

        DataType::Binary => {
            let bytes = downcast::<BinaryArray>(array)?.value(row);
            Cell::Other(format_bytes_preview(bytes))
        }
        DataType::LargeBinary => {
            let bytes = downcast::<LargeBinaryArray>(array)?.value(row);
            Cell::Other(format_bytes_preview(bytes))
        }

        DataType::Null => Cell::Missing,

        other => Cell::Other(format!("<{}>", type_name(other))),
    };

    Ok(cell)
}

/// Extract a timestamp cell for the given unit.
///
/// Timezone annotations are ignored; the raw value is presented as a
/// naive timestamp.
fn extract_timestamp(array: &dyn Array, row: usize, unit: TimeUnit) -> Result<Cell> {
    let (raw, converted) = match unit {
        TimeUnit::Second => {
            let v = downcast::<TimestampSecondArray>(array)?.value(row);
            (v, timestamp_s_to_datetime(v))
        }
        TimeUnit::Millisecond => {
            let v = downcast::<TimestampMillisecondArray>(array)?.value(row);
            (v, timestamp_ms_to_datetime(v))
        }
        TimeUnit::Microsecond => {
            let v = downcast::<TimestampMicrosecondArray>(array)?.value(row);
            (v, timestamp_us_to_datetime(v))
        }
        TimeUnit::Nanosecond => {
            let v = downcast::<TimestampNanosecondArray>(array)?.value(row);
            (v, timestamp_ns_to_datetime(v))
        }
    };
    Ok(converted.map_or_else(|| Cell::Other(format!("ts:{raw}")), Cell::DateTime))
}

fn downcast<T: Array + 'static>(array: &dyn Array) -> Result<&T> {
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| Error::source("array storage does not match its declared data type"))
}

/// Format binary data as a hex preview.
fn format_bytes_preview(bytes: &[u8]) -> String {
    if bytes.len() <= 8 {
        format!("0x{}", hex_encode(bytes))
    } else {
        format!("0x{}... ({} bytes)", hex_encode(&bytes[..8]), bytes.len())
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut result = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(result, "{b:02x}");
    }
    result
}

/// Human-readable name for unsupported types, used in placeholders.
fn type_name(dt: &DataType) -> &'static str {
    match dt {
        DataType::Float16 => "f16",
        DataType::Decimal128(_, _) => "decimal128",
        DataType::Decimal256(_, _) => "decimal256",
        DataType::Time32(_) => "time32",
        DataType::Time64(_) => "time64",
        DataType::Duration(_) => "duration",
        DataType::Interval(_) => "interval",
        DataType::List(_) => "list",
        DataType::LargeList(_) => "large_list",
        DataType::Struct(_) => "struct",
        DataType::Map(_, _) => "map",
        DataType::Dictionary(_, _) => "dict",
        _ => "unknown",
    }
}
