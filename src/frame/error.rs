use thiserror::Error;

use crate::datatype::LogicalType;

/// Failure of a single column copy.
///
/// Never fatal for the frame: the batch driver records it and moves on to
/// the next column.
#[derive(Debug, Error)]
pub enum CopyError {
    /// The source array does not carry the column's logical type.
    #[error("column `{column}` holds {expected} values, source array is {actual}")]
    TypeMismatch {
        /// Column name.
        column: String,
        /// Type the column was allocated with.
        expected: LogicalType,
        /// Arrow type of the source array.
        actual: String,
    },
    /// A timestamp outside the representable calendar range.
    #[error("column `{column}` row {row}: timestamp {value} is out of range")]
    TimestampOutOfRange {
        /// Column name.
        column: String,
        /// Source row.
        row: usize,
        /// Raw value in the array's time unit.
        value: i64,
    },
    /// The column points at a source position the input does not have.
    #[error("column `{column}` reads source array {source_index}, which does not exist")]
    MissingSource {
        /// Column name.
        column: String,
        /// Recorded schema position of the column.
        source_index: usize,
    },
    /// The copy panicked and the fault barrier suppressed it.
    #[error("column `{column}` copy panicked: {message}")]
    Panicked {
        /// Column name.
        column: String,
        /// Panic payload rendered as text.
        message: String,
        /// Rendered backtrace of the panic, when captured.
        backtrace: Option<String>,
    },
}

/// Structural errors of a frame as a whole.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// A batch does not line up with the schema the frame was built from.
    #[error("batch has {actual} columns, schema has {expected} fields")]
    ColumnCountMismatch {
        /// Field count of the schema.
        expected: usize,
        /// Column count of the batch.
        actual: usize,
    },
    /// Arrays of one append do not share a row count.
    #[error("array {source_index} has {actual} rows, expected {expected}")]
    UnevenArrays {
        /// Position of the first array whose length differs.
        source_index: usize,
        /// Row count of the append.
        expected: usize,
        /// Row count of the array at `source_index`.
        actual: usize,
    },
    /// Columns disagree on their row count.
    #[error("column `{column}` has {actual} rows, expected {expected}")]
    RaggedColumns {
        /// First column whose length differs.
        column: String,
        /// Row count of the first column.
        expected: usize,
        /// Row count of `column`.
        actual: usize,
    },
}
