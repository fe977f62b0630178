//! Geometry generators, one per plot kind.
//!
//! Every renderer maps points through the [`CoordinateMapper`] of the plot's
//! axes and returns draw commands. Points that do not map to a finite pixel
//! (non-positive values on a log axis) are skipped.

pub mod bar;
pub mod contour;
pub mod dot;
pub mod line;
pub mod reference;

use galvani_core::math::PackedVec2;
use galvani_core::profiling::profile_scope;
use glam::Vec2;

use crate::geometry::DrawCommand;
use crate::mapper::CoordinateMapper;
use crate::plot::{DataPoint, Plot, PlotKind};

pub use bar::{MAX_BARS, bar_width_px};

/// Draw commands for one plot.
pub fn render_plot(plot: &Plot, mapper: &CoordinateMapper) -> Vec<DrawCommand> {
    profile_scope!("render_plot", plot.kind.name());
    let command = match &plot.kind {
        PlotKind::Line { width } => line::polyline(plot, mapper, *width, false),
        PlotKind::SmoothLine { width } => line::polyline(plot, mapper, *width, true),
        PlotKind::Stem => line::stems(plot, mapper),
        PlotKind::Dot { point_size } => dot::points(plot, mapper, *point_size),
        PlotKind::Bar { spacing, width } => bar::bars(plot, mapper, *spacing, *width),
        PlotKind::HBar => reference::horizontal(plot, mapper),
        PlotKind::VBar => reference::vertical(plot, mapper),
        PlotKind::Contour(data) => contour::raster(data, plot.color, mapper),
    };
    tracing::trace!(
        kind = plot.kind.name(),
        points = plot.points.len(),
        emitted = command.is_some(),
        "rendered plot"
    );
    command.into_iter().collect()
}

/// Pixel position of `point`, or `None` if it does not map to a finite pixel.
#[inline]
pub(crate) fn map_point(mapper: &CoordinateMapper, point: &DataPoint) -> Option<Vec2> {
    let px = mapper.to_pixel(point.x, point.y);
    px.is_finite().then_some(px)
}

pub(crate) fn map_points(mapper: &CoordinateMapper, points: &[DataPoint]) -> Vec<PackedVec2> {
    points
        .iter()
        .filter_map(|p| map_point(mapper, p))
        .map(|v| PackedVec2::new(v.x, v.y))
        .collect()
}

/// Pixel row of the `y = 0` baseline. Log axes have no zero, so their
/// baseline sits at the axis minimum.
pub(crate) fn baseline_y(mapper: &CoordinateMapper) -> f32 {
    let y_axis = mapper.y_axis();
    let base = if y_axis.is_log() { y_axis.min } else { 0.0 };
    mapper.to_pixel_y(base) as f32
}
