use super::CopyError;

/// A column whose copy failed while appending a batch.
#[derive(Debug)]
pub struct ColumnFailure {
    /// Position of the column in the frame.
    pub column: usize,
    /// Position of the source array in the batch.
    pub source_index: usize,
    /// What went wrong.
    pub error: CopyError,
}

/// Outcome of appending one or more batches to a frame.
#[derive(Debug, Default)]
pub struct CopyReport {
    batches: usize,
    rows: usize,
    failures: Vec<ColumnFailure>,
}

impl CopyReport {
    pub(crate) fn record_batch(&mut self, rows: usize) {
        self.batches += 1;
        self.rows += rows;
    }

    pub(crate) fn record_failure(&mut self, failure: ColumnFailure) {
        self.failures.push(failure);
    }

    /// Folds `other` into this report.
    pub fn merge(&mut self, other: CopyReport) {
        self.batches += other.batches;
        self.rows += other.rows;
        self.failures.extend(other.failures);
    }

    /// Number of batches appended.
    pub fn batches(&self) -> usize {
        self.batches
    }

    /// Source rows offered to the frame across all batches.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Column copies that failed.
    pub fn failures(&self) -> &[ColumnFailure] {
        &self.failures
    }

    /// True when every column copy succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
