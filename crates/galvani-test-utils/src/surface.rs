//! Recording render surface.

use galvani_graph::{DrawBatch, DrawBatchStats, RenderSurface};
use parking_lot::Mutex;

/// Keeps a copy of every batch submitted to it.
///
/// # Example
///
/// ```rust
/// use galvani_graph::{DrawBatch, RenderSurface};
/// use galvani_test_utils::RecordingSurface;
///
/// let surface = RecordingSurface::new();
/// surface.submit(&DrawBatch::new());
/// assert_eq!(surface.submission_count(), 1);
/// assert!(surface.last_batch().unwrap().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct RecordingSurface {
    batches: Mutex<Vec<DrawBatch>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submission_count(&self) -> usize {
        self.batches.lock().len()
    }

    /// Most recent batch, if any was submitted.
    pub fn last_batch(&self) -> Option<DrawBatch> {
        self.batches.lock().last().cloned()
    }

    pub fn last_stats(&self) -> Option<DrawBatchStats> {
        self.batches.lock().last().map(DrawBatch::stats)
    }

    /// Every text of the most recent batch.
    pub fn last_texts(&self) -> Vec<String> {
        self.batches
            .lock()
            .last()
            .map(|batch| batch.texts().map(|t| t.text.clone()).collect())
            .unwrap_or_default()
    }

    /// Drain the recorded batches.
    pub fn take(&self) -> Vec<DrawBatch> {
        std::mem::take(&mut *self.batches.lock())
    }

    pub fn clear(&self) {
        self.batches.lock().clear();
    }
}

impl RenderSurface for RecordingSurface {
    fn submit(&self, batch: &DrawBatch) {
        self.batches.lock().push(batch.clone());
    }
}
