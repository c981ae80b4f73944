use intake_map::CONFIDENCE_THRESHOLD;

/// Pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Minimum header score, 0-100.
    pub confidence_threshold: u8,
    /// Leading records returned as `preview` by an import.
    pub preview_records: usize,
    /// Leading raw rows returned by an analysis.
    pub preview_rows: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            confidence_threshold: CONFIDENCE_THRESHOLD,
            preview_records: 5,
            preview_rows: 3,
        }
    }
}

impl ImportOptions {
    #[must_use]
    pub fn with_confidence_threshold(mut self, threshold: u8) -> Self {
        self.confidence_threshold = threshold.min(100);
        self
    }

    #[must_use]
    pub fn with_preview_records(mut self, count: usize) -> Self {
        self.preview_records = count;
        self
    }

    #[must_use]
    pub fn with_preview_rows(mut self, count: usize) -> Self {
        self.preview_rows = count;
        self
    }
}
