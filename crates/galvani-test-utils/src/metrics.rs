//! Deterministic text metrics.

use std::sync::atomic::{AtomicUsize, Ordering};

use galvani_graph::TextMeasure;
use glam::Vec2;

/// Measures every character as `advance x line_height` pixels, ignoring the
/// font size.
#[derive(Debug)]
pub struct FixedMetrics {
    pub advance: f32,
    pub line_height: f32,
    calls: AtomicUsize,
}

impl FixedMetrics {
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `measure` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self::new(10.0, 20.0)
    }
}

impl TextMeasure for FixedMetrics {
    fn measure(&self, text: &str, _font_size: f32) -> Vec2 {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if text.is_empty() {
            return Vec2::ZERO;
        }
        Vec2::new(text.chars().count() as f32 * self.advance, self.line_height)
    }
}
