//! Typed, nullable-aware frames built from Arrow results.

mod builder;
mod copy;
mod error;
mod fault;
mod field;
mod report;
mod value;

use std::fmt;

use arrow::{array::ArrayRef, record_batch::RecordBatch};
pub use builder::*;
pub use copy::*;
pub use error::*;
pub use field::*;
pub use report::*;
pub use value::*;

use crate::{
    observability::{log_debug, log_warn},
    option::ConvertOptions,
};

/// Label correlating streamed result sets with the query that produced them.
///
/// The label is the query text itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataTopic(String);

impl DataTopic {
    /// The label as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DataTopic {
    fn from(sql: &str) -> Self {
        DataTopic(sql.to_owned())
    }
}

impl From<String> for DataTopic {
    fn from(sql: String) -> Self {
        DataTopic(sql)
    }
}

impl fmt::Display for DataTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Frame-level metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameMeta {
    executed_query_string: String,
    data_topic: DataTopic,
}

impl FrameMeta {
    /// Query text the frame was built for.
    pub fn executed_query_string(&self) -> &str {
        &self.executed_query_string
    }

    /// Topic label derived from the query text.
    pub fn data_topic(&self) -> &DataTopic {
        &self.data_topic
    }
}

/// A tabular result: ordered typed columns plus query metadata.
#[derive(Debug, Clone)]
pub struct Frame {
    fields: Vec<FrameField>,
    meta: FrameMeta,
    // field count of the schema the frame was allocated from
    source_width: usize,
    options: ConvertOptions,
}

impl Frame {
    /// Columns in schema order.
    pub fn fields(&self) -> &[FrameField] {
        &self.fields
    }

    /// Mutable columns, e.g. to copy distinct columns on separate threads.
    pub fn fields_mut(&mut self) -> &mut [FrameField] {
        &mut self.fields
    }

    /// First column named `name`.
    pub fn field(&self, name: &str) -> Option<&FrameField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Frame metadata.
    pub fn meta(&self) -> &FrameMeta {
        &self.meta
    }

    /// Field count of the schema the frame was allocated from.
    pub fn source_width(&self) -> usize {
        self.source_width
    }

    /// Options the frame was allocated with.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Consumes the frame, returning its columns.
    pub fn into_fields(self) -> Vec<FrameField> {
        self.fields
    }

    /// Common row count of all columns.
    ///
    /// Columns only disagree after a column copy failed part way.
    pub fn row_count(&self) -> Result<usize, FrameError> {
        let Some(first) = self.fields.first() else {
            return Ok(0);
        };
        let expected = first.len();
        match self.fields.iter().find(|field| field.len() != expected) {
            Some(field) => Err(FrameError::RaggedColumns {
                column: field.name().to_owned(),
                expected,
                actual: field.len(),
            }),
            None => Ok(expected),
        }
    }

    /// Appends one record batch, pairing every column with the batch column
    /// at its schema position.
    pub fn append_batch(&mut self, batch: &RecordBatch) -> Result<CopyReport, FrameError> {
        self.append_columns(batch.columns(), batch.num_rows())
    }

    /// Appends a sequence of arrays laid out like the frame's schema.
    ///
    /// All arrays must have the same length.
    pub fn append_arrays(&mut self, arrays: &[ArrayRef]) -> Result<CopyReport, FrameError> {
        let rows = arrays.first().map_or(0, |array| array.len());
        self.append_columns(arrays, rows)
    }

    fn append_columns(
        &mut self,
        arrays: &[ArrayRef],
        rows: usize,
    ) -> Result<CopyReport, FrameError> {
        if arrays.len() != self.source_width {
            return Err(FrameError::ColumnCountMismatch {
                expected: self.source_width,
                actual: arrays.len(),
            });
        }
        if let Some((source_index, array)) = arrays
            .iter()
            .enumerate()
            .find(|(_, array)| array.len() != rows)
        {
            return Err(FrameError::UnevenArrays {
                source_index,
                expected: rows,
                actual: array.len(),
            });
        }

        let mut report = CopyReport::default();
        for (column, field) in self.fields.iter_mut().enumerate() {
            let source_index = field.source_index();
            let copied = match arrays.get(source_index) {
                Some(array) => copy_column_with_options(field, array.as_ref(), &self.options),
                None => {
                    log_warn!(
                        component = "frame",
                        event = "column_source_missing",
                        column = field.name(),
                        source_index = source_index,
                        arrays = arrays.len(),
                    );
                    Err(CopyError::MissingSource {
                        column: field.name().to_owned(),
                        source_index,
                    })
                }
            };
            if let Err(error) = copied {
                report.record_failure(ColumnFailure {
                    column,
                    source_index,
                    error,
                });
            }
        }
        report.record_batch(rows);

        log_debug!(
            component = "frame",
            event = "batch_appended",
            topic = %self.meta.data_topic,
            rows = rows,
            failed_columns = report.failures().len(),
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::{
        array::{ArrayData, ArrayRef, BooleanArray, Int64Array, StringArray},
        buffer::{Buffer, NullBuffer},
        datatypes::{DataType, Field, Schema},
        record_batch::RecordBatch,
    };

    use super::{new_frame, CopyError, FieldVector, FrameError, FrameField};
    use crate::datatype::LogicalType;

    fn schema() -> Arc<Schema> {
        Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("raw", DataType::Binary, true),
            Field::new("ok", DataType::Boolean, true),
        ]))
    }

    #[test]
    fn append_batch_pairs_columns_by_schema_position() {
        let schema = schema();
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![1, 2])),
                Arc::new(arrow::array::BinaryArray::from(vec![
                    Some(b"x".as_ref()),
                    None,
                ])),
                Arc::new(BooleanArray::from(vec![None, Some(true)])),
            ],
        )
        .unwrap();

        let mut frame = new_frame(&schema, "q");
        let report = frame.append_batch(&batch).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.rows(), 2);
        assert_eq!(report.batches(), 1);

        assert_eq!(frame.fields().len(), 2);
        assert_eq!(
            frame.field("id").unwrap().values(),
            &FieldVector::Int64(vec![1, 2])
        );
        assert_eq!(
            frame.field("ok").unwrap().values(),
            &FieldVector::NullableBool(vec![None, Some(true)])
        );
        assert_eq!(frame.row_count(), Ok(2));
    }

    #[test]
    fn misaligned_arrays_are_rejected() {
        let mut frame = new_frame(&schema(), "q");
        let arrays: Vec<ArrayRef> = vec![Arc::new(Int64Array::from(vec![1]))];

        assert_eq!(
            frame.append_arrays(&arrays).unwrap_err(),
            FrameError::ColumnCountMismatch {
                expected: 3,
                actual: 1
            }
        );
        assert!(frame.fields().iter().all(|field| field.is_empty()));
    }

    #[test]
    fn faulty_column_does_not_stop_the_others() {
        let mut frame = new_frame(&schema(), "q");
        let arrays: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec!["not", "ints"])),
            Arc::new(Int64Array::from(vec![0, 0])),
            Arc::new(BooleanArray::from(vec![true, false])),
        ];

        let report = frame.append_arrays(&arrays).unwrap();
        assert_eq!(report.failures().len(), 1);
        let failure = &report.failures()[0];
        assert_eq!(failure.column, 0);
        assert_eq!(failure.source_index, 0);
        assert!(matches!(failure.error, CopyError::TypeMismatch { .. }));

        assert!(frame.field("id").unwrap().is_empty());
        assert_eq!(
            frame.field("ok").unwrap().values(),
            &FieldVector::NullableBool(vec![Some(true), Some(false)])
        );
        assert_eq!(
            frame.row_count(),
            Err(FrameError::RaggedColumns {
                column: "ok".into(),
                expected: 0,
                actual: 2
            })
        );
    }

    #[test]
    fn column_with_out_of_range_source_is_reported() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("ok", DataType::Boolean, true),
        ]));
        let mut frame = new_frame(&schema, "q");
        frame.fields_mut()[0] =
            FrameField::new("id", 5, FieldVector::new(LogicalType::Int64, false, 0));
        let arrays: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from(vec![1])),
            Arc::new(BooleanArray::from(vec![true])),
        ];

        let report = frame.append_arrays(&arrays).unwrap();
        assert_eq!(report.failures().len(), 1);
        let failure = &report.failures()[0];
        assert_eq!(failure.column, 0);
        assert_eq!(failure.source_index, 5);
        assert!(matches!(
            &failure.error,
            CopyError::MissingSource { column, source_index: 5 } if column == "id"
        ));
        assert!(frame.fields()[0].is_empty());
        assert_eq!(
            frame.field("ok").unwrap().values(),
            &FieldVector::NullableBool(vec![Some(true)])
        );
    }

    #[test]
    fn uneven_arrays_are_rejected() {
        let mut frame = new_frame(&schema(), "q");
        let arrays: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from(vec![1, 2, 3])),
            Arc::new(Int64Array::from(vec![0, 0, 0])),
            Arc::new(BooleanArray::from(vec![true])),
        ];

        assert_eq!(
            frame.append_arrays(&arrays).unwrap_err(),
            FrameError::UnevenArrays {
                source_index: 2,
                expected: 3,
                actual: 1
            }
        );
        assert!(frame.fields().iter().all(|field| field.is_empty()));
    }

    #[test]
    fn panicking_copy_does_not_stop_the_others() {
        // null bitmap covers one row of three, so reading row 1 panics
        let data = ArrayData::builder(DataType::Int64)
            .len(3)
            .add_buffer(Buffer::from_vec(vec![1_i64, 2, 3]))
            .nulls(Some(NullBuffer::from(vec![false])));
        let broken = Int64Array::from(unsafe { data.build_unchecked() });

        let schema = Arc::new(Schema::new(vec![
            Field::new("n", DataType::Int64, true),
            Field::new("ok", DataType::Boolean, false),
        ]));
        let mut frame = new_frame(&schema, "q");
        let arrays: Vec<ArrayRef> = vec![
            Arc::new(broken),
            Arc::new(BooleanArray::from(vec![true, false, true])),
        ];

        let report = frame.append_arrays(&arrays).unwrap();
        assert_eq!(report.failures().len(), 1);
        assert!(matches!(
            &report.failures()[0].error,
            CopyError::Panicked { column, .. } if column == "n"
        ));
        assert_eq!(
            frame.field("n").unwrap().values(),
            &FieldVector::NullableInt64(vec![None])
        );
        assert_eq!(
            frame.field("ok").unwrap().values(),
            &FieldVector::Bool(vec![true, false, true])
        );
    }
}
