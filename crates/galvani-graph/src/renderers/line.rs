use galvani_core::math::PackedVec2;

use super::{baseline_y, map_point, map_points};
use crate::geometry::{DrawCommand, PolylineCommand, SegmentsCommand};
use crate::mapper::CoordinateMapper;
use crate::plot::Plot;

/// One connected polyline through the mapped points, in order.
pub fn polyline(
    plot: &Plot,
    mapper: &CoordinateMapper,
    width: f32,
    smooth: bool,
) -> Option<DrawCommand> {
    let points = map_points(mapper, &plot.points);
    if points.is_empty() {
        return None;
    }
    Some(DrawCommand::Polyline(PolylineCommand {
        points,
        color: plot.color,
        width,
        smooth,
    }))
}

/// A vertical segment from the baseline to every point.
pub fn stems(plot: &Plot, mapper: &CoordinateMapper) -> Option<DrawCommand> {
    let base = baseline_y(mapper);
    let mut points = Vec::with_capacity(plot.points.len() * 2);
    for p in &plot.points {
        let Some(top) = map_point(mapper, p) else {
            continue;
        };
        points.push(PackedVec2::new(top.x, base));
        points.push(PackedVec2::new(top.x, top.y));
    }
    if points.is_empty() {
        return None;
    }
    Some(DrawCommand::Segments(SegmentsCommand {
        points,
        color: plot.color,
        width: 1.0,
    }))
}
