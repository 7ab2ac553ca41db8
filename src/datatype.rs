use std::fmt;

use arrow::datatypes::{DataType as ArrowDataType, TimeUnit};
use chrono::{DateTime, Utc};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// The closed set of column types a frame can carry.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum LogicalType {
    /// UTF-8 text.
    Text,
    /// Signed 64-bit integer.
    Int64,
    /// 64-bit float.
    Float64,
    /// Boolean.
    Bool,
    /// UTC instant at nanosecond precision.
    Timestamp,
}

impl LogicalType {
    /// Maps an arrow data type onto a frame column type.
    ///
    /// Returns `None` for every arrow type outside the supported set; callers
    /// skip such fields instead of failing.
    pub fn from_arrow(datatype: &ArrowDataType) -> Option<Self> {
        match datatype {
            ArrowDataType::Utf8 => Some(LogicalType::Text),
            ArrowDataType::Int64 => Some(LogicalType::Int64),
            ArrowDataType::Float64 => Some(LogicalType::Float64),
            ArrowDataType::Boolean => Some(LogicalType::Bool),
            ArrowDataType::Timestamp(_, _) => Some(LogicalType::Timestamp),
            _ => None,
        }
    }

    /// Short lowercase name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            LogicalType::Text => "text",
            LogicalType::Int64 => "int64",
            LogicalType::Float64 => "float64",
            LogicalType::Bool => "bool",
            LogicalType::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn units_per_second(unit: TimeUnit) -> i64 {
    match unit {
        TimeUnit::Second => 1,
        TimeUnit::Millisecond => 1_000,
        TimeUnit::Microsecond => 1_000_000,
        TimeUnit::Nanosecond => NANOS_PER_SECOND,
    }
}

/// Converts a raw arrow timestamp in `unit` since the epoch into a UTC instant.
///
/// Returns `None` when the instant is outside chrono's representable range.
pub(crate) fn timestamp_to_datetime(value: i64, unit: TimeUnit) -> Option<DateTime<Utc>> {
    let per_second = units_per_second(unit);
    let secs = value.div_euclid(per_second);
    let nanos = value.rem_euclid(per_second) * (NANOS_PER_SECOND / per_second);
    DateTime::from_timestamp(secs, nanos as u32)
}
