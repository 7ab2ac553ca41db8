use std::borrow::Borrow;

use arrow::{datatypes::Schema, record_batch::RecordBatch};

use super::{CopyReport, DataTopic, FieldVector, Frame, FrameError, FrameField, FrameMeta};
use crate::{
    datatype::LogicalType,
    observability::{log_debug, log_info},
    option::ConvertOptions,
};

/// Allocates an empty frame mirroring `schema`, using default options.
///
/// See [`new_frame_with_options`].
pub fn new_frame(schema: &Schema, sql: &str) -> Frame {
    new_frame_with_options(schema, sql, ConvertOptions::default())
}

/// Allocates an empty frame mirroring `schema`.
///
/// One column is allocated per field of a supported type, in schema order,
/// dense or nullable according to the field's nullable flag. Fields of any
/// other type get no column, so the frame may be narrower than the schema.
/// The frame metadata records `sql` verbatim and a topic label derived from
/// it.
pub fn new_frame_with_options(schema: &Schema, sql: &str, options: ConvertOptions) -> Frame {
    log_info!(
        component = "frame",
        event = "frame_allocated",
        metadata = ?schema.metadata(),
        fields = %describe_fields(schema),
    );

    let mut fields = Vec::with_capacity(schema.fields().len());
    for (source_index, field) in schema.fields().iter().enumerate() {
        let Some(logical_type) = LogicalType::from_arrow(field.data_type()) else {
            log_debug!(
                component = "frame",
                event = "field_skipped",
                field = field.name().as_str(),
                data_type = %field.data_type(),
            );
            continue;
        };
        let values = FieldVector::new(logical_type, field.is_nullable(), options.reserve_rows);
        fields.push(FrameField::new(field.name().as_str(), source_index, values));
    }

    Frame {
        fields,
        meta: FrameMeta {
            executed_query_string: sql.to_owned(),
            data_topic: DataTopic::from(sql),
        },
        source_width: schema.fields().len(),
        options,
    }
}

/// Builds a frame for `schema` and appends every batch of a query result.
///
/// Column faults are collected into the returned [`CopyReport`]; only a batch
/// that does not line up with `schema` aborts the conversion.
pub fn frame_from_batches<I>(
    schema: &Schema,
    sql: &str,
    batches: I,
    options: ConvertOptions,
) -> Result<(Frame, CopyReport), FrameError>
where
    I: IntoIterator,
    I::Item: Borrow<RecordBatch>,
{
    let mut frame = new_frame_with_options(schema, sql, options);
    let mut report = CopyReport::default();
    for batch in batches {
        report.merge(frame.append_batch(batch.borrow())?);
    }
    Ok((frame, report))
}

fn describe_fields(schema: &Schema) -> String {
    schema
        .fields()
        .iter()
        .map(|field| {
            format!(
                "{}:{}{}",
                field.name(),
                field.data_type(),
                if field.is_nullable() { "?" } else { "" }
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}
