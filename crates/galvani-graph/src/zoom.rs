//! Focal-point zoom and pixel panning.
//!
//! Zoom keeps the data value under the focal pixel at the same fractional
//! position within the new range. Logarithmic axes follow the same rule in
//! `log10` space, so the focal value stays under the cursor on every scale.

use crate::axis::Axis;
use crate::mapper::CoordinateMapper;
use crate::rect::Viewport;

/// New primary axis bounds produced by a zoom or pan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomResult {
    pub x: Axis,
    pub y: Axis,
}

/// Computes axis bounds for interactive zoom and pan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomController {
    pub zoom_enabled: bool,
    pub pan_enabled: bool,
    /// Smallest span, relative to the current span, a single zoom may
    /// produce. Deeper zooms are rejected.
    pub min_relative_span: f64,
}

impl Default for ZoomController {
    fn default() -> Self {
        Self {
            zoom_enabled: true,
            pan_enabled: true,
            min_relative_span: 1e-12,
        }
    }
}

impl ZoomController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zoom by `dx`/`dy` (`2.0` halves the visible range) around the focal
    /// pixel. Returns `None` for non-positive or non-finite factors and for
    /// degenerate axes.
    #[allow(clippy::too_many_arguments)]
    pub fn zoom(
        &self,
        dx: f64,
        dy: f64,
        focal_px: f64,
        focal_py: f64,
        x: &Axis,
        y: &Axis,
        viewport: Viewport,
    ) -> Option<ZoomResult> {
        if !self.zoom_enabled {
            return None;
        }
        if !(dx > 0.0 && dx.is_finite() && dy > 0.0 && dy.is_finite()) {
            tracing::trace!(dx, dy, "zoom rejected: factors must be positive");
            return None;
        }
        if x.is_degenerate() || y.is_degenerate() {
            tracing::trace!("zoom rejected: degenerate axis");
            return None;
        }
        let mapper = CoordinateMapper::new(*x, *y, viewport);
        let (fx, fy) = mapper.to_data(focal_px, focal_py);
        Some(ZoomResult {
            x: self.zoom_axis(x, fx, dx)?,
            y: self.zoom_axis(y, fy, dy)?,
        })
    }

    fn zoom_axis(&self, axis: &Axis, focus: f64, factor: f64) -> Option<Axis> {
        let (lo, hi) = axis.scaled_bounds();
        let span = hi - lo;
        let center = axis.scale.forward(focus);
        let new_span = span / factor;
        let new_lo = center - axis.normalize(focus) * new_span;
        let new_hi = new_lo + new_span;
        if !new_lo.is_finite() || !new_hi.is_finite() {
            return None;
        }
        // Collapse is judged against the old span, and against float
        // resolution at the new bounds.
        let magnitude = new_lo.abs().max(new_hi.abs());
        if new_span.abs() < span.abs() * self.min_relative_span
            || new_span.abs() <= magnitude * f64::EPSILON * 16.0
        {
            tracing::debug!(new_span, "zoom rejected: range would collapse");
            return None;
        }
        let zoomed = axis.with_range(axis.scale.inverse(new_lo), axis.scale.inverse(new_hi));
        (zoomed.min.is_finite() && zoomed.max.is_finite() && !zoomed.is_degenerate())
            .then_some(zoomed)
    }

    /// Translate both axes so the content follows a drag of
    /// `(dx_px, dy_px)` pixels.
    pub fn pan(
        &self,
        dx_px: f64,
        dy_px: f64,
        x: &Axis,
        y: &Axis,
        viewport: Viewport,
    ) -> Option<ZoomResult> {
        if !self.pan_enabled || !dx_px.is_finite() || !dy_px.is_finite() {
            return None;
        }
        if x.is_degenerate() || y.is_degenerate() {
            return None;
        }
        Some(ZoomResult {
            x: pan_axis(x, dx_px, viewport.x1 - viewport.x0)?,
            y: pan_axis(y, dy_px, viewport.y1 - viewport.y0)?,
        })
    }
}

fn pan_axis(axis: &Axis, delta_px: f64, extent_px: f64) -> Option<Axis> {
    if extent_px == 0.0 {
        return None;
    }
    let t = -delta_px / extent_px;
    let panned = axis.with_range(axis.denormalize(t), axis.denormalize(1.0 + t));
    (panned.min.is_finite() && panned.max.is_finite()).then_some(panned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(0.0, 200.0, 400.0, 0.0)
    }

    #[test]
    fn test_zoom_at_center_halves_range() {
        let x = Axis::linear(0.0, 100.0);
        let y = Axis::linear(0.0, 100.0);
        let result = ZoomController::new()
            .zoom(2.0, 2.0, 200.0, 100.0, &x, &y, viewport())
            .unwrap();
        assert_eq!(result.x, Axis::linear(25.0, 75.0));
        assert_eq!(result.y, Axis::linear(25.0, 75.0));
    }

    #[test]
    fn test_zoom_keeps_focal_point_fixed() {
        let x = Axis::linear(-10.0, 30.0);
        let y = Axis::linear(5.0, 6.0);
        let controller = ZoomController::new();
        for (fx, fy) in [(0.0, 0.0), (37.0, 150.0), (399.0, 13.0)] {
            let before = CoordinateMapper::new(x, y, viewport()).to_data(fx, fy);
            let zoomed = controller.zoom(3.0, 0.5, fx, fy, &x, &y, viewport()).unwrap();
            let after = CoordinateMapper::new(zoomed.x, zoomed.y, viewport()).to_data(fx, fy);
            assert!((before.0 - after.0).abs() < 1e-9);
            assert!((before.1 - after.1).abs() < 1e-9);
            assert!(((zoomed.x.max - zoomed.x.min) - 40.0 / 3.0).abs() < 1e-9);
            assert!(((zoomed.y.max - zoomed.y.min) - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_log_zoom_in_decade_space() {
        let x = Axis::log10(1.0, 10_000.0);
        let y = Axis::linear(0.0, 1.0);
        // Focal pixel 100 of 400 sits on 10.
        let result = ZoomController::new()
            .zoom(2.0, 1.0, 100.0, 100.0, &x, &y, viewport())
            .unwrap();
        assert!(result.x.is_log());
        assert!((result.x.min.log10() - 0.5).abs() < 1e-9);
        assert!((result.x.max.log10() - 2.5).abs() < 1e-9);
        let mapper = CoordinateMapper::new(result.x, result.y, viewport());
        assert!((mapper.to_pixel_x(10.0) - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_rejections() {
        let x = Axis::linear(0.0, 100.0);
        let y = Axis::linear(0.0, 100.0);
        let controller = ZoomController::new();
        assert!(controller.zoom(0.0, 2.0, 0.0, 0.0, &x, &y, viewport()).is_none());
        assert!(controller.zoom(2.0, -1.0, 0.0, 0.0, &x, &y, viewport()).is_none());
        assert!(controller.zoom(f64::NAN, 2.0, 0.0, 0.0, &x, &y, viewport()).is_none());
        assert!(controller.zoom(f64::INFINITY, 2.0, 0.0, 0.0, &x, &y, viewport()).is_none());

        let flat = Axis::linear(5.0, 5.0);
        assert!(controller.zoom(2.0, 2.0, 0.0, 0.0, &flat, &y, viewport()).is_none());

        // Focus on 0: the new bounds are tiny but the range has collapsed.
        assert!(controller.zoom(1e20, 1.0, 0.0, 0.0, &x, &y, viewport()).is_none());
        assert!(controller.zoom(1e13, 1.0, 0.0, 0.0, &x, &y, viewport()).is_none());
        assert!(controller.zoom(1e11, 1.0, 0.0, 0.0, &x, &y, viewport()).is_some());

        // Far from zero the float resolution of the bounds wins.
        let far = Axis::linear(1e15, 1e15 + 100.0);
        assert!(controller.zoom(1e6, 1.0, 200.0, 0.0, &far, &y, viewport()).is_none());

        let disabled = ZoomController {
            zoom_enabled: false,
            ..Default::default()
        };
        assert!(disabled.zoom(2.0, 2.0, 0.0, 0.0, &x, &y, viewport()).is_none());
    }

    #[test]
    fn test_pan_follows_drag() {
        let x = Axis::linear(0.0, 100.0);
        let y = Axis::linear(0.0, 100.0);
        let result = ZoomController::new()
            .pan(40.0, 20.0, &x, &y, viewport())
            .unwrap();
        // Dragging right reveals smaller X values.
        assert!((result.x.min + 10.0).abs() < 1e-9);
        assert!((result.x.max - 90.0).abs() < 1e-9);
        // Dragging down reveals larger Y values.
        assert!((result.y.min - 10.0).abs() < 1e-9);
        assert!((result.y.max - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_pan_log_axis_by_decades() {
        let x = Axis::log10(1.0, 100.0);
        let y = Axis::linear(0.0, 1.0);
        let result = ZoomController::new()
            .pan(-200.0, 0.0, &x, &y, viewport())
            .unwrap();
        assert!((result.x.min - 10.0).abs() < 1e-9);
        assert!((result.x.max - 1000.0).abs() < 1e-6);
    }
}
