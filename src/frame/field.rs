use chrono::{DateTime, Utc};

use super::Value;
use crate::datatype::LogicalType;

macro_rules! implement_field_vector {
    ($( { $logical:ident, $nullable:ident, $native:ty } ),* $(,)?) => {
        /// Typed storage of one frame column.
        ///
        /// Every logical type has a dense container, holding a value per row,
        /// and a nullable container, holding a value or an explicit null per
        /// row. The container is chosen at allocation and never switched.
        #[derive(Debug, Clone, PartialEq)]
        pub enum FieldVector {
            $(
                #[doc = concat!("Dense `", stringify!($native), "` rows.")]
                $logical(Vec<$native>),
                #[doc = concat!("Nullable `", stringify!($native), "` rows.")]
                $nullable(Vec<Option<$native>>),
            )*
        }

        impl FieldVector {
            /// Allocates an empty container for `logical_type`.
            pub fn new(logical_type: LogicalType, nullable: bool, capacity: usize) -> Self {
                match (logical_type, nullable) {
                    $(
                        (LogicalType::$logical, false) => {
                            FieldVector::$logical(Vec::with_capacity(capacity))
                        }
                        (LogicalType::$logical, true) => {
                            FieldVector::$nullable(Vec::with_capacity(capacity))
                        }
                    )*
                }
            }

            /// Logical type of the stored values.
            pub fn logical_type(&self) -> LogicalType {
                match self {
                    $(
                        FieldVector::$logical(_) | FieldVector::$nullable(_) => {
                            LogicalType::$logical
                        }
                    )*
                }
            }

            /// Whether rows may hold an explicit null marker.
            pub fn is_nullable(&self) -> bool {
                match self {
                    $(
                        FieldVector::$logical(_) => false,
                        FieldVector::$nullable(_) => true,
                    )*
                }
            }

            /// Number of rows appended so far.
            pub fn len(&self) -> usize {
                match self {
                    $(
                        FieldVector::$logical(rows) => rows.len(),
                        FieldVector::$nullable(rows) => rows.len(),
                    )*
                }
            }

            /// Reads the cell at `row`, `None` past the end.
            pub fn value(&self, row: usize) -> Option<Value> {
                match self {
                    $(
                        FieldVector::$logical(rows) => {
                            rows.get(row).cloned().map(Value::$logical)
                        }
                        FieldVector::$nullable(rows) => rows
                            .get(row)
                            .cloned()
                            .map(|cell| cell.map_or(Value::Null, Value::$logical)),
                    )*
                }
            }
        }
    };
}

implement_field_vector!(
    { Text, NullableText, String },
    { Int64, NullableInt64, i64 },
    { Float64, NullableFloat64, f64 },
    { Bool, NullableBool, bool },
    { Timestamp, NullableTimestamp, DateTime<Utc> },
);

impl FieldVector {
    /// Whether no rows have been appended.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One output column of a [`Frame`](super::Frame).
#[derive(Debug, Clone, PartialEq)]
pub struct FrameField {
    name: String,
    source_index: usize,
    values: FieldVector,
}

impl FrameField {
    /// Creates a column named `name` fed from schema position `source_index`.
    pub fn new(name: impl Into<String>, source_index: usize, values: FieldVector) -> Self {
        Self {
            name: name.into(),
            source_index,
            values,
        }
    }

    /// Column name, copied from the schema field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the schema field (and source array) this column mirrors.
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    /// Stored rows.
    pub fn values(&self) -> &FieldVector {
        &self.values
    }

    /// Logical type fixed at allocation.
    pub fn logical_type(&self) -> LogicalType {
        self.values.logical_type()
    }

    /// Nullable mode fixed at allocation.
    pub fn is_nullable(&self) -> bool {
        self.values.is_nullable()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column holds no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reads the cell at `row`, `None` past the end.
    pub fn value(&self, row: usize) -> Option<Value> {
        self.values.value(row)
    }

    /// Collects every row as owned cells.
    pub fn to_values(&self) -> Vec<Value> {
        (0..self.len()).filter_map(|row| self.value(row)).collect()
    }

    pub(crate) fn split_mut(&mut self) -> (&str, &mut FieldVector) {
        (&self.name, &mut self.values)
    }
}
