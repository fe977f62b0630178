//! Test utilities for Galvani.
//!
//! This crate provides host-side doubles for exercising a
//! [`GraphCanvas`](galvani_graph::GraphCanvas) without a window or GPU.
//!
//! # Overview
//!
//! - [`RecordingSurface`] - a [`RenderSurface`](galvani_graph::RenderSurface)
//!   that keeps every submitted batch
//! - [`FixedMetrics`] - a [`TextMeasure`](galvani_graph::TextMeasure) with
//!   exact, font-independent extents that counts its calls
//!
//! # Example
//!
//! ```rust
//! use galvani_graph::{GraphCanvas, GraphConfig, Plot};
//! use galvani_test_utils::{FixedMetrics, RecordingSurface};
//!
//! let surface = RecordingSurface::new();
//! let mut canvas = GraphCanvas::new(GraphConfig::default(), FixedMetrics::new(8.0, 16.0)).unwrap();
//! canvas.add_plot(Plot::line([(0.0, 0.0), (100.0, 100.0)])).unwrap();
//!
//! canvas.on_frame(&surface);
//! canvas.on_frame(&surface);
//! assert_eq!(surface.submission_count(), 1);
//! ```
//!
//! # Design Philosophy
//!
//! ## 1. Interior Mutability
//!
//! Host seams take `&self`, so the doubles record through
//! `parking_lot::Mutex` and atomics.
//!
//! ## 2. Deterministic Text
//!
//! Layout assertions need exact pixel values. [`FixedMetrics`] gives every
//! character the same advance regardless of font size.

pub mod metrics;
pub mod surface;

pub use metrics::*;
pub use surface::*;
