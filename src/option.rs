/// Knobs for frame allocation and column copying.
///
/// Built with consuming setters:
///
/// ```
/// use flightframe::ConvertOptions;
///
/// let options = ConvertOptions::default()
///     .reserve_rows(1024)
///     .capture_backtrace(false);
/// assert_eq!(options.reserved_rows(), 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    pub(crate) capture_backtrace: bool,
    pub(crate) reserve_rows: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            capture_backtrace: true,
            reserve_rows: 0,
        }
    }
}

impl ConvertOptions {
    /// Capture a backtrace when a column copy faults. Enabled by default.
    pub fn capture_backtrace(self, capture_backtrace: bool) -> Self {
        ConvertOptions {
            capture_backtrace,
            ..self
        }
    }

    /// Initial row capacity of every allocated column.
    pub fn reserve_rows(self, reserve_rows: usize) -> Self {
        ConvertOptions {
            reserve_rows,
            ..self
        }
    }

    /// Whether suppressed faults record a backtrace.
    pub fn captures_backtrace(&self) -> bool {
        self.capture_backtrace
    }

    /// Row capacity reserved per column at allocation.
    pub fn reserved_rows(&self) -> usize {
        self.reserve_rows
    }
}

#[cfg(test)]
mod tests {
    use super::ConvertOptions;

    #[test]
    fn setters_override_defaults() {
        let options = ConvertOptions::default();
        assert!(options.captures_backtrace());
        assert_eq!(options.reserved_rows(), 0);

        let options = options.capture_backtrace(false).reserve_rows(16);
        assert!(!options.captures_backtrace());
        assert_eq!(options.reserved_rows(), 16);
    }
}
