use arrow::{
    array::{Array, AsArray},
    buffer::ScalarBuffer,
    datatypes::{
        DataType, Float64Type, Int64Type, TimeUnit, TimestampMicrosecondType,
        TimestampMillisecondType, TimestampNanosecondType, TimestampSecondType,
    },
};
use chrono::{DateTime, Utc};

use super::{fault, CopyError, FieldVector, FrameField};
use crate::{
    datatype::{timestamp_to_datetime, LogicalType},
    observability::{log_debug, log_warn},
    option::ConvertOptions,
};

/// Appends every row of `array` to `field` using default options.
///
/// See [`copy_column_with_options`].
pub fn copy_column(field: &mut FrameField, array: &dyn Array) -> Result<usize, CopyError> {
    copy_column_with_options(field, array, &ConvertOptions::default())
}

/// Appends every row of `array` to `field`.
///
/// Nullable columns receive a null marker for each null source row; dense
/// columns receive the raw value slot and never consult the null bitmap.
/// Returns the number of appended rows, which equals `array.len()` on
/// success.
///
/// Arrays of an unsupported type are ignored and append nothing. A source
/// array whose type differs from the column's is rejected before any row is
/// touched. Panics raised while copying are caught and returned as
/// [`CopyError::Panicked`]; the column may then be partially populated.
pub fn copy_column_with_options(
    field: &mut FrameField,
    array: &dyn Array,
    options: &ConvertOptions,
) -> Result<usize, CopyError> {
    let Some(source_type) = LogicalType::from_arrow(array.data_type()) else {
        log_debug!(
            component = "copy",
            event = "column_skipped",
            column = field.name(),
            data_type = %array.data_type(),
        );
        return Ok(0);
    };
    if source_type != field.logical_type() {
        log_warn!(
            component = "copy",
            event = "column_type_mismatch",
            column = field.name(),
            expected = %field.logical_type(),
            actual = %array.data_type(),
        );
        return Err(CopyError::TypeMismatch {
            column: field.name().to_owned(),
            expected: field.logical_type(),
            actual: array.data_type().to_string(),
        });
    }

    let column = field.name().to_owned();
    fault::guard(&column, options, || append_rows(field, array))?;
    Ok(array.len())
}

fn append_rows(field: &mut FrameField, array: &dyn Array) -> Result<(), CopyError> {
    let (column, values) = field.split_mut();
    match values {
        FieldVector::Text(rows) => {
            let source = array.as_string::<i32>();
            append_dense(rows, source.len(), |row| Ok(source.value(row).to_owned()))
        }
        FieldVector::NullableText(rows) => {
            let source = array.as_string::<i32>();
            append_nullable(rows, source, |row| Ok(source.value(row).to_owned()))
        }
        FieldVector::Int64(rows) => {
            let source = array.as_primitive::<Int64Type>();
            append_dense(rows, source.len(), |row| Ok(source.value(row)))
        }
        FieldVector::NullableInt64(rows) => {
            let source = array.as_primitive::<Int64Type>();
            append_nullable(rows, source, |row| Ok(source.value(row)))
        }
        FieldVector::Float64(rows) => {
            let source = array.as_primitive::<Float64Type>();
            append_dense(rows, source.len(), |row| Ok(source.value(row)))
        }
        FieldVector::NullableFloat64(rows) => {
            let source = array.as_primitive::<Float64Type>();
            append_nullable(rows, source, |row| Ok(source.value(row)))
        }
        FieldVector::Bool(rows) => {
            let source = array.as_boolean();
            append_dense(rows, source.len(), |row| Ok(source.value(row)))
        }
        FieldVector::NullableBool(rows) => {
            let source = array.as_boolean();
            append_nullable(rows, source, |row| Ok(source.value(row)))
        }
        FieldVector::Timestamp(rows) => {
            let source = TimestampSource::new(column, array)?;
            append_dense(rows, array.len(), |row| source.datetime(row))
        }
        FieldVector::NullableTimestamp(rows) => {
            let source = TimestampSource::new(column, array)?;
            append_nullable(rows, array, |row| source.datetime(row))
        }
    }
}

fn append_dense<T>(
    rows: &mut Vec<T>,
    len: usize,
    mut read: impl FnMut(usize) -> Result<T, CopyError>,
) -> Result<(), CopyError> {
    rows.reserve(len);
    for row in 0..len {
        rows.push(read(row)?);
    }
    Ok(())
}

fn append_nullable<T>(
    rows: &mut Vec<Option<T>>,
    source: &dyn Array,
    mut read: impl FnMut(usize) -> Result<T, CopyError>,
) -> Result<(), CopyError> {
    rows.reserve(source.len());
    for row in 0..source.len() {
        if source.is_null(row) {
            rows.push(None);
            continue;
        }
        rows.push(Some(read(row)?));
    }
    Ok(())
}

/// Raw timestamp slots of an arrow timestamp array of any unit.
struct TimestampSource<'a> {
    column: &'a str,
    values: &'a ScalarBuffer<i64>,
    unit: TimeUnit,
}

impl<'a> TimestampSource<'a> {
    fn new(column: &'a str, array: &'a dyn Array) -> Result<Self, CopyError> {
        let (values, unit) = match array.data_type() {
            DataType::Timestamp(TimeUnit::Second, _) => (
                array.as_primitive::<TimestampSecondType>().values(),
                TimeUnit::Second,
            ),
            DataType::Timestamp(TimeUnit::Millisecond, _) => (
                array.as_primitive::<TimestampMillisecondType>().values(),
                TimeUnit::Millisecond,
            ),
            DataType::Timestamp(TimeUnit::Microsecond, _) => (
                array.as_primitive::<TimestampMicrosecondType>().values(),
                TimeUnit::Microsecond,
            ),
            DataType::Timestamp(TimeUnit::Nanosecond, _) => (
                array.as_primitive::<TimestampNanosecondType>().values(),
                TimeUnit::Nanosecond,
            ),
            other => {
                return Err(CopyError::TypeMismatch {
                    column: column.to_owned(),
                    expected: LogicalType::Timestamp,
                    actual: other.to_string(),
                })
            }
        };
        Ok(Self {
            column,
            values,
            unit,
        })
    }

    fn datetime(&self, row: usize) -> Result<DateTime<Utc>, CopyError> {
        let value = self.values[row];
        timestamp_to_datetime(value, self.unit).ok_or_else(|| CopyError::TimestampOutOfRange {
            column: self.column.to_owned(),
            row,
            value,
        })
    }
}
