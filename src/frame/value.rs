use chrono::{DateTime, Utc};

use crate::datatype::LogicalType;

/// An owned cell read back out of a [`FrameField`](super::FrameField).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit null marker of a nullable column.
    Null,
    /// Text cell.
    Text(String),
    /// Int64 cell.
    Int64(i64),
    /// Float64 cell.
    Float64(f64),
    /// Bool cell.
    Bool(bool),
    /// Timestamp cell.
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Type of the cell, `None` for [`Value::Null`].
    pub fn logical_type(&self) -> Option<LogicalType> {
        match self {
            Value::Null => None,
            Value::Text(_) => Some(LogicalType::Text),
            Value::Int64(_) => Some(LogicalType::Int64),
            Value::Float64(_) => Some(LogicalType::Float64),
            Value::Bool(_) => Some(LogicalType::Bool),
            Value::Timestamp(_) => Some(LogicalType::Timestamp),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float64(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
