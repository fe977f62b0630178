use galvani_core::math::PackedVec2;

use crate::geometry::{DrawCommand, SegmentsCommand};
use crate::mapper::CoordinateMapper;
use crate::plot::Plot;

/// Full-width line at each point's Y, spanning the X axis bounds.
pub fn horizontal(plot: &Plot, mapper: &CoordinateMapper) -> Option<DrawCommand> {
    let bounds = mapper.px_bounds();
    let (x0, x1) = (bounds.x0 as f32, bounds.x1 as f32);
    let points: Vec<PackedVec2> = plot
        .points
        .iter()
        .map(|p| mapper.to_pixel_y(p.y) as f32)
        .filter(|y| y.is_finite())
        .flat_map(|y| [PackedVec2::new(x0, y), PackedVec2::new(x1, y)])
        .collect();
    segments(plot, points)
}

/// Full-height line at each point's X, spanning the Y axis bounds.
pub fn vertical(plot: &Plot, mapper: &CoordinateMapper) -> Option<DrawCommand> {
    let bounds = mapper.px_bounds();
    let (y0, y1) = (bounds.y0 as f32, bounds.y1 as f32);
    let points: Vec<PackedVec2> = plot
        .points
        .iter()
        .map(|p| mapper.to_pixel_x(p.x) as f32)
        .filter(|x| x.is_finite())
        .flat_map(|x| [PackedVec2::new(x, y0), PackedVec2::new(x, y1)])
        .collect();
    segments(plot, points)
}

fn segments(plot: &Plot, points: Vec<PackedVec2>) -> Option<DrawCommand> {
    if points.is_empty() {
        return None;
    }
    Some(DrawCommand::Segments(SegmentsCommand {
        points,
        color: plot.color,
        width: 1.0,
    }))
}
