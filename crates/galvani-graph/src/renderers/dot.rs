use super::map_points;
use crate::geometry::{DrawCommand, PointsCommand};
use crate::mapper::CoordinateMapper;
use crate::plot::Plot;

/// One sprite per mapped point.
pub fn points(plot: &Plot, mapper: &CoordinateMapper, size: f32) -> Option<DrawCommand> {
    let points = map_points(mapper, &plot.points);
    if points.is_empty() {
        return None;
    }
    Some(DrawCommand::Points(PointsCommand {
        points,
        color: plot.color,
        size,
    }))
}
