//! Data to pixel mapping.
//!
//! Each dimension interpolates linearly between `(f(min), start)` and
//! `(f(max), end)`, where `f` is `log10` for logarithmic axes and the
//! identity otherwise. The inverse applies `10^x` on log axes so pixel
//! queries round-trip on every scale.

use glam::Vec2;

use crate::axis::Axis;
use crate::rect::Viewport;

/// Cached interpolation parameters for one dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisTransform {
    axis: Axis,
    lo: f64,
    span: f64,
    start: f64,
    end: f64,
    valid: bool,
}

impl AxisTransform {
    fn new(axis: Axis, start: f64, end: f64) -> Self {
        let (lo, hi) = axis.scaled_bounds();
        let span = hi - lo;
        Self {
            axis,
            lo,
            span,
            start,
            end,
            valid: !axis.is_degenerate(),
        }
    }

    #[inline]
    fn to_pixel(&self, value: f64) -> f64 {
        if !self.valid {
            return self.start;
        }
        (self.axis.scale.forward(value) - self.lo) / self.span * (self.end - self.start)
            + self.start
    }

    #[inline]
    fn to_data(&self, pixel: f64) -> f64 {
        let extent = self.end - self.start;
        if !self.valid || extent == 0.0 {
            return self.axis.min;
        }
        let t = (pixel - self.start) / extent;
        self.axis.scale.inverse(self.lo + t * self.span)
    }
}

/// Bidirectional mapping between data space and viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    x: AxisTransform,
    y: AxisTransform,
    viewport: Viewport,
}

impl CoordinateMapper {
    pub fn new(x: Axis, y: Axis, viewport: Viewport) -> Self {
        Self {
            x: AxisTransform::new(x, viewport.x0, viewport.x1),
            y: AxisTransform::new(y, viewport.y0, viewport.y1),
            viewport,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn x_axis(&self) -> &Axis {
        &self.x.axis
    }

    pub fn y_axis(&self) -> &Axis {
        &self.y.axis
    }

    /// False when the X axis has zero width; every X maps to `x0`.
    pub fn x_valid(&self) -> bool {
        self.x.valid
    }

    /// False when the Y axis has zero width; every Y maps to `y0`.
    pub fn y_valid(&self) -> bool {
        self.y.valid
    }

    /// Either axis has an unusable scale.
    pub fn is_degenerate(&self) -> bool {
        !self.x.valid || !self.y.valid
    }

    #[inline]
    pub fn to_pixel_x(&self, x: f64) -> f64 {
        self.x.to_pixel(x)
    }

    #[inline]
    pub fn to_pixel_y(&self, y: f64) -> f64 {
        self.y.to_pixel(y)
    }

    /// Both coordinates as an `f32` pixel position.
    #[inline]
    pub fn to_pixel(&self, x: f64, y: f64) -> Vec2 {
        Vec2::new(self.to_pixel_x(x) as f32, self.to_pixel_y(y) as f32)
    }

    /// Inverse of [`to_pixel_x`](Self::to_pixel_x) / [`to_pixel_y`](Self::to_pixel_y).
    pub fn to_data(&self, px: f64, py: f64) -> (f64, f64) {
        (self.x.to_data(px), self.y.to_data(py))
    }

    /// Pixel positions of the axis bounds.
    pub fn px_bounds(&self) -> Viewport {
        Viewport {
            x0: self.to_pixel_x(self.x.axis.min),
            y0: self.to_pixel_y(self.y.axis.min),
            x1: self.to_pixel_x(self.x.axis.max),
            y1: self.to_pixel_y(self.y.axis.max),
        }
    }
}
