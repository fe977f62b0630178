//! Tick placement for linear and logarithmic axes.
//!
//! Spacing is given as a major distance plus the number of subdivisions of
//! each major step. On a log axis the major distance is measured in decades
//! (`1.0` = one major per decade, `0.5` = two) and all returned positions are
//! `log10` of the tick value, which is what the coordinate mapper consumes.

use galvani_core::profiling::profile_function;

use crate::axis::{Axis, ScaleType};
use crate::error::{AxisKind, GraphResult};

/// Upper bound on ticks emitted for a single axis.
pub const MAX_TICKS: usize = 4096;

/// Relative slack used when comparing tick positions to range ends.
const RANGE_EPSILON: f64 = 1e-9;

/// Whether consecutive ticks `step` apart stay distinct around `magnitude`.
fn resolvable(step: f64, magnitude: f64) -> bool {
    step > magnitude * f64::EPSILON * 16.0
}

/// Ordered major and minor tick positions of one axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickSet {
    pub major: Vec<f64>,
    pub minor: Vec<f64>,
}

impl TickSet {
    pub fn is_empty(&self) -> bool {
        self.major.is_empty() && self.minor.is_empty()
    }

    pub fn len(&self) -> usize {
        self.major.len() + self.minor.len()
    }

    fn push(&mut self, position: f64, is_major: bool) -> bool {
        if self.len() >= MAX_TICKS {
            tracing::warn!(
                max = MAX_TICKS,
                "tick spacing too dense for axis range, dropping remaining ticks"
            );
            return false;
        }
        if is_major {
            self.major.push(position);
        } else {
            self.minor.push(position);
        }
        true
    }
}

/// Major distance and subdivision count for one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickPlanner {
    /// Distance between major ticks (decades on a log axis).
    pub major: f64,
    /// Subdivisions per major step. `0` behaves like `1`: every tick is major.
    pub minor: u32,
}

impl Default for TickPlanner {
    fn default() -> Self {
        Self::none()
    }
}

impl TickPlanner {
    pub fn new(major: f64, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Planner that never emits ticks.
    pub fn none() -> Self {
        Self {
            major: 0.0,
            minor: 0,
        }
    }

    /// Spacing that puts one major tick every `px_per_major` pixels.
    ///
    /// `span` is the axis width in scaled units (decades on a log axis).
    pub fn auto(span: f64, pixel_extent: f64, px_per_major: f64, minor: u32) -> Self {
        if !(span > 0.0) || !(pixel_extent > 0.0) || !(px_per_major > 0.0) {
            return Self::none();
        }
        Self::new(span / (pixel_extent / px_per_major), minor)
    }

    fn subdivisions(&self) -> u32 {
        self.minor.max(1)
    }

    fn is_configured(&self) -> bool {
        self.major > 0.0 && self.major.is_finite()
    }

    /// Ticks for `axis`.
    ///
    /// Unusable spacing or an empty/inverted range yields an empty set. A log
    /// axis with a non-positive bound is an error.
    pub fn plan(&self, kind: AxisKind, axis: &Axis) -> GraphResult<TickSet> {
        profile_function!();
        if !self.is_configured() || !(axis.max > axis.min) {
            return Ok(TickSet::default());
        }
        axis.validate(kind)?;
        let ticks = match axis.scale {
            ScaleType::Linear => self.plan_linear(axis.min, axis.max),
            ScaleType::Log10 => self.plan_log(axis.min, axis.max),
        };
        tracing::trace!(
            %kind,
            major = ticks.major.len(),
            minor = ticks.minor.len(),
            "planned ticks"
        );
        Ok(ticks)
    }

    fn plan_linear(&self, min: f64, max: f64) -> TickSet {
        let subdivisions = self.subdivisions() as u64;
        let step = self.major / subdivisions as f64;
        // Anchor on a major multiple when the range crosses zero so that zero
        // is always a major tick.
        let start = if min < 0.0 && max > 0.0 {
            (min / self.major).floor() * self.major
        } else {
            min
        };
        if !resolvable(step, start.abs().max(max.abs())) {
            tracing::warn!(step, min, max, "tick step below float resolution of axis range");
            return TickSet::default();
        }
        let slack = step * RANGE_EPSILON;
        // Counts stay in f64 until clamped; huge ranges would overflow u64.
        let first = ((min - start) / step - RANGE_EPSILON).ceil().max(0.0);
        let last = ((max - start) / step + RANGE_EPSILON)
            .floor()
            .min(first + MAX_TICKS as f64);
        if !(last >= first) {
            return TickSet::default();
        }

        let mut ticks = TickSet::default();
        for m in (first as u64)..=(last as u64) {
            let position = start + m as f64 * step;
            if position < min - slack {
                continue;
            }
            if position > max + slack {
                break;
            }
            if !ticks.push(position, m % subdivisions == 0) {
                break;
            }
        }
        ticks
    }

    /// Decade-space walk.
    ///
    /// Candidate `k` sits at `pos = k * decade_dist`. With `pos = d + f`
    /// (`d` integral, `0 <= f < 1`) an integral `pos` is the boundary
    /// `10^d`; otherwise the candidate is the value `f * 10^(d + 1)`. Fractions
    /// at or below `0.1` would land on or under the decade's first value and
    /// are skipped, so each decade boundary is produced exactly once.
    fn plan_log(&self, min: f64, max: f64) -> TickSet {
        let subdivisions = self.subdivisions() as i64;
        let decade_dist = self.major / subdivisions as f64;
        let snap = 0.001 * decade_dist;
        let lo = min.log10();
        let hi = max.log10();
        let slack = RANGE_EPSILON * (hi - lo).abs().max(1.0);
        if !resolvable(decade_dist, lo.abs().max(hi.abs()).max(1.0)) {
            tracing::warn!(decade_dist, min, max, "tick step below float resolution of axis range");
            return TickSet::default();
        }

        let lo_decade = lo.floor();
        let lo_pos = lo_decade + 10f64.powf(lo - lo_decade - 1.0);
        // |k| <= magnitude / decade_dist, which the resolution check keeps
        // far inside i64.
        let mut k = (lo_pos / decade_dist).floor() as i64 - 1;
        let k_end = ((hi + slack) / decade_dist).ceil() as i64 + 1;

        let mut ticks = TickSet::default();
        while k <= k_end {
            let pos = k as f64 * decade_dist;
            let decade = pos.floor();
            let fraction = pos - decade;
            let position = if fraction < snap {
                Some(decade)
            } else if 1.0 - fraction < snap {
                Some(decade + 1.0)
            } else if fraction > 0.1 + snap {
                Some(fraction.log10() + decade + 1.0)
            } else {
                None
            };

            if let Some(position) = position {
                if position > hi + slack {
                    break;
                }
                if position >= lo - slack
                    && !ticks.push(position, k.rem_euclid(subdivisions) == 0)
                {
                    break;
                }
            }
            k += 1;
        }
        ticks
    }
}
