#![deny(missing_docs)]
//! Arrow-to-frame conversion for FlightSQL query results.
//!
//! A query result arrives as an Arrow schema plus a stream of record batches.
//! [`new_frame`] allocates a [`Frame`] whose columns mirror the schema, each
//! one dense or nullable according to its field, and [`Frame::append_batch`]
//! copies every batch column into its frame column with [`copy_column`].
//!
//! Conversion is best effort. Fields of an unsupported type get no column,
//! and a column whose copy fails is reported in a [`CopyReport`] without
//! stopping the other columns. Panics raised while copying a column are
//! caught at the column boundary and never reach the caller.
//!
//! ## Panic hook
//!
//! The first column copy in a process replaces the global panic hook with one
//! that chains to the hook installed before it. While a column copy is running
//! on a thread, panics on that thread are recorded (location and backtrace)
//! and not printed; every other panic goes to the previous hook unchanged.
//! Applications that install their own hook should do so before converting
//! the first frame. A hook installed afterwards replaces this one, and copy
//! faults then report a backtrace of the catch site instead of the panic site.
//!
//! ```
//! use std::sync::Arc;
//!
//! use flightframe::{
//!     arrow::{
//!         array::{Int64Array, StringArray},
//!         datatypes::{DataType, Field, Schema},
//!         record_batch::RecordBatch,
//!     },
//!     new_frame, Value,
//! };
//!
//! let schema = Arc::new(Schema::new(vec![
//!     Field::new("id", DataType::Int64, false),
//!     Field::new("label", DataType::Utf8, true),
//! ]));
//! let batch = RecordBatch::try_new(
//!     schema.clone(),
//!     vec![
//!         Arc::new(Int64Array::from(vec![1, 2, 3])),
//!         Arc::new(StringArray::from(vec![Some("a"), None, Some("c")])),
//!     ],
//! )
//! .unwrap();
//!
//! let mut frame = new_frame(&schema, "SELECT id, label FROM t");
//! assert!(frame.append_batch(&batch).unwrap().is_clean());
//! assert_eq!(frame.fields()[1].value(1), Some(Value::Null));
//! ```

mod observability;

/// Column types a frame can carry.
pub mod datatype;
/// Frame allocation and column copying.
pub mod frame;
/// Conversion options.
pub mod option;

pub use arrow;

pub use crate::{
    datatype::LogicalType,
    frame::{
        copy_column, copy_column_with_options, frame_from_batches, new_frame,
        new_frame_with_options, ColumnFailure, CopyError, CopyReport, DataTopic, FieldVector,
        Frame, FrameError, FrameField, FrameMeta, Value,
    },
    option::ConvertOptions,
};
