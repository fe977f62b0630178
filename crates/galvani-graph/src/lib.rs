//! Galvani Graph - 2D chart engine
//!
//! This crate provides:
//! - Linear and logarithmic axes with major/minor tick planning
//! - Data to pixel mapping that round-trips on every scale
//! - Line, smooth line, stem, dot, bar, reference line and contour plots
//! - Automatic layout of titles, axis labels and tick labels
//! - A legend of the labeled, visible plots
//! - Focal-point zoom and pixel panning
//!
//! The engine never talks to a GPU. A [`GraphCanvas`] turns its state into a
//! [`DrawBatch`] of plain draw commands and hands it to a host
//! [`RenderSurface`] at most once per frame.
//!
//! # Example
//!
//! ```
//! use galvani_graph::*;
//!
//! let config = GraphConfig::new()
//!     .with_x_range(0.0, 10.0)
//!     .with_y_range(-1.0, 1.0)
//!     .with_x_ticks(1.0, 5)
//!     .with_x_grid_label(true)
//!     .with_legend(LegendPosition::TopRight);
//! let mut canvas = GraphCanvas::new(config, MonospaceMetrics::default()).unwrap();
//! canvas.set_size(640.0, 480.0);
//!
//! let samples = (0..=100).map(|i| {
//!     let x = i as f64 / 10.0;
//!     (x, x.sin())
//! });
//! canvas
//!     .add_plot(Plot::line(samples).with_color(Color::RED).with_label("sin"))
//!     .unwrap();
//!
//! let batch = canvas.redraw_now();
//! assert!(batch.stats().polylines >= 1);
//! ```

// Scales and mapping
mod axis;
mod mapper;
mod rect;
pub mod ticks;

// Plots
mod color;
mod plot;
pub mod renderers;

// Output
mod geometry;

// Chart furniture
mod config;
pub mod layout;
pub mod legend;
pub mod text;

// Canvas
mod canvas;
mod frame;
mod zoom;

mod error;

pub use axis::*;
pub use mapper::*;
pub use rect::*;
pub use ticks::{TickPlanner, TickSet};

pub use color::*;
pub use plot::*;

pub use geometry::*;

pub use config::*;
pub use layout::{ChartLayout, ChartMargins};
pub use legend::{LegendBox, LegendEntry, LegendLayout, LegendStyle};
pub use text::{CachedMeasure, MonospaceMetrics, TextMeasure, TickFormat};

pub use canvas::*;
pub use frame::*;
pub use zoom::*;

pub use error::*;
