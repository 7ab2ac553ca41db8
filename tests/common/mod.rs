//! Common test utilities for integration tests.

use std::sync::Arc;

use flightframe::arrow::{
    array::ArrayRef,
    datatypes::{Field, Schema},
    record_batch::RecordBatch,
};

/// Builds a shared schema from `fields`.
pub fn schema(fields: Vec<Field>) -> Arc<Schema> {
    Arc::new(Schema::new(fields))
}

/// Builds a record batch, panicking if the arrays do not fit `schema`.
pub fn batch(schema: &Arc<Schema>, columns: Vec<ArrayRef>) -> RecordBatch {
    RecordBatch::try_new(schema.clone(), columns)
        .expect("test batch should match its schema")
}
