use crate::color::Color;
use crate::geometry::{DrawCommand, RasterCommand};
use crate::mapper::CoordinateMapper;
use crate::plot::ContourData;
use crate::rect::Rect;

/// Intensity used when every value in the matrix is equal.
const FLAT_INTENSITY: u8 = 128;

/// Normalize `data` into an 8-bit greyscale raster spanning its data ranges.
pub fn raster(data: &ContourData, tint: Color, mapper: &CoordinateMapper) -> Option<DrawCommand> {
    let (x0, x1) = data.x_range();
    let (y0, y1) = data.y_range();
    let a = mapper.to_pixel(x0, y0);
    let b = mapper.to_pixel(x1, y1);
    if !a.is_finite() || !b.is_finite() {
        tracing::debug!(?a, ?b, "contour bounds do not map to finite pixels");
        return None;
    }
    let min = a.min(b);
    let size = (a - b).abs();
    let bounds = Rect::new(min.x, min.y, size.x, size.y);

    Some(DrawCommand::Raster(RasterCommand {
        width: data.cols() as u32,
        height: data.rows() as u32,
        pixels: greyscale(data),
        bounds,
        tint,
    }))
}

fn greyscale(data: &ContourData) -> Vec<u8> {
    let (lo, hi) = data.value_range();
    let span = hi - lo;
    let mut pixels = Vec::with_capacity(data.values().len() * RasterCommand::CHANNELS);
    for v in data.values() {
        let level = if span > 0.0 {
            ((v - lo) / span * 255.0) as u8
        } else {
            FLAT_INTENSITY
        };
        pixels.extend([level; RasterCommand::CHANNELS]);
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Axis;
    use crate::rect::Viewport;

    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(
            Axis::linear(0.0, 10.0),
            Axis::linear(0.0, 10.0),
            Viewport::new(0.0, 100.0, 100.0, 0.0),
        )
    }

    #[test]
    fn test_raster_normalizes_values() {
        let data = ContourData::from_rows(
            &[vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]],
            (0.0, 5.0),
            (0.0, 10.0),
        )
        .unwrap();
        let Some(DrawCommand::Raster(cmd)) = raster(&data, Color::RED, &mapper()) else {
            panic!("expected raster");
        };
        assert_eq!((cmd.width, cmd.height), (3, 2));
        assert_eq!(cmd.pixels.len(), 18);
        assert_eq!(cmd.pixel(0, 0), Some([0, 0, 0]));
        assert_eq!(cmd.pixel(2, 1), Some([255, 255, 255]));
        assert_eq!(cmd.pixel(1, 0), Some([51, 51, 51]));
        assert_eq!(cmd.bounds, Rect::new(0.0, 0.0, 50.0, 100.0));
        assert_eq!(cmd.tint, Color::RED);
    }

    #[test]
    fn test_flat_matrix_is_mid_grey() {
        let data = ContourData::new(2, 2, vec![7.0; 4], (0.0, 1.0), (0.0, 1.0)).unwrap();
        let Some(DrawCommand::Raster(cmd)) = raster(&data, Color::WHITE, &mapper()) else {
            panic!("expected raster");
        };
        assert!(cmd.pixels.iter().all(|p| *p == FLAT_INTENSITY));
    }

    #[test]
    fn test_unmappable_bounds_emit_nothing() {
        let log = CoordinateMapper::new(
            Axis::log10(1.0, 10.0),
            Axis::linear(0.0, 1.0),
            Viewport::new(0.0, 100.0, 100.0, 0.0),
        );
        let data = ContourData::new(1, 1, vec![1.0], (-1.0, 1.0), (0.0, 1.0)).unwrap();
        assert!(raster(&data, Color::WHITE, &log).is_none());
    }
}
