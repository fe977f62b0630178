//! Text measurement and tick label formatting.
//!
//! The engine never rasterizes glyphs. It asks the host for text extents
//! through [`TextMeasure`] and emits [`TextCommand`](crate::geometry::TextCommand)s
//! the host draws with its own font stack.

use std::fmt;
use std::str::FromStr;

use galvani_core::alloc::HashMap;
use glam::Vec2;

use crate::error::{GraphError, GraphResult};

/// Host seam for text extents.
pub trait TextMeasure: Send + Sync {
    /// Width and height of `text` rendered on one line at `font_size`.
    fn measure(&self, text: &str, font_size: f32) -> Vec2;
}

impl<T: TextMeasure + ?Sized> TextMeasure for std::sync::Arc<T> {
    fn measure(&self, text: &str, font_size: f32) -> Vec2 {
        (**self).measure(text, font_size)
    }
}

/// Fixed-advance metrics for hosts without a font stack.
///
/// Every character advances `font_size * advance`; lines are
/// `font_size * line_height` tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub advance: f32,
    pub line_height: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.2,
        }
    }
}

impl TextMeasure for MonospaceMetrics {
    fn measure(&self, text: &str, font_size: f32) -> Vec2 {
        if text.is_empty() {
            return Vec2::ZERO;
        }
        Vec2::new(
            text.chars().count() as f32 * font_size * self.advance,
            font_size * self.line_height,
        )
    }
}

/// A [`TextMeasure`] with memoized extents, keyed by string and font size.
///
/// Tick labels repeat across redraws, so most lookups never reach the host.
pub struct CachedMeasure {
    inner: Box<dyn TextMeasure>,
    entries: HashMap<(String, u32), Vec2>,
}

impl CachedMeasure {
    /// Entries kept before the cache starts over.
    pub const CAPACITY: usize = 4096;

    pub fn new(inner: impl TextMeasure + 'static) -> Self {
        Self::from_boxed(Box::new(inner))
    }

    pub fn from_boxed(inner: Box<dyn TextMeasure>) -> Self {
        Self {
            inner,
            entries: HashMap::new(),
        }
    }

    pub fn measure(&mut self, text: &str, font_size: f32) -> Vec2 {
        if text.is_empty() {
            return Vec2::ZERO;
        }
        let key = (text.to_owned(), font_size.to_bits());
        if let Some(size) = self.entries.get(&key) {
            return *size;
        }
        if self.entries.len() >= Self::CAPACITY {
            tracing::trace!(entries = self.entries.len(), "text measure cache reset");
            self.entries.clear();
        }
        let size = self.inner.measure(text, font_size);
        self.entries.insert(key, size);
        size
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Debug for CachedMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedMeasure")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

/// Printf-style number format for tick labels.
///
/// Parses `%g`, `%f`, `%e` with an optional `.N` precision. `Compact` uses
/// K/M suffixes for large magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFormat {
    /// `%.Ng`: `N` significant digits, trailing zeros removed.
    General(usize),
    /// `%.Nf`
    Fixed(usize),
    /// `%.Ne`
    Exponent(usize),
    Compact,
}

impl Default for TickFormat {
    fn default() -> Self {
        Self::General(6)
    }
}

impl FromStr for TickFormat {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GraphError::InvalidTickFormat {
            format: s.to_owned(),
        };
        let body = s.trim().strip_prefix('%').ok_or_else(invalid)?;
        let (precision, conversion) = match body.strip_prefix('.') {
            Some(rest) => {
                let (split, _) = rest.char_indices().next_back().ok_or_else(invalid)?;
                let (digits, conversion) = rest.split_at(split);
                (Some(digits.parse::<usize>().map_err(|_| invalid())?), conversion)
            }
            None => (None, body),
        };
        let precision = precision.unwrap_or(6).min(17);
        match conversion {
            "g" | "G" => Ok(Self::General(precision)),
            "f" | "F" => Ok(Self::Fixed(precision)),
            "e" | "E" => Ok(Self::Exponent(precision)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for TickFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::General(p) => write!(f, "%.{p}g"),
            Self::Fixed(p) => write!(f, "%.{p}f"),
            Self::Exponent(p) => write!(f, "%.{p}e"),
            Self::Compact => write!(f, "compact"),
        }
    }
}

impl TickFormat {
    pub fn parse(s: &str) -> GraphResult<Self> {
        s.parse()
    }

    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        // Avoid "-0".
        let value = if value == 0.0 { 0.0 } else { value };
        match *self {
            Self::General(p) => format_general(value, p),
            Self::Fixed(p) => format!("{value:.p$}"),
            Self::Exponent(p) => {
                let sci = format!("{value:.p$e}");
                let (mantissa, exp) = split_exponent(&sci);
                c_exponent(mantissa, exp)
            }
            Self::Compact => format_tick_value(value),
        }
    }
}

/// Split Rust's `1.5e3` into mantissa and exponent.
fn split_exponent(s: &str) -> (&str, i32) {
    match s.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse().unwrap_or(0)),
        None => (s, 0),
    }
}

/// C-style exponent suffix: sign and at least two digits.
fn c_exponent(mantissa: &str, exp: i32) -> String {
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn format_general(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    let p = precision.max(1);
    let sci = format!("{value:.prec$e}", prec = p - 1);
    let (mantissa, exp) = split_exponent(&sci);
    if exp < -4 || exp >= p as i32 {
        c_exponent(trim_fraction(mantissa), exp)
    } else {
        let decimals = (p as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_owned()
    }
}

/// Format a tick value for display.
///
/// Uses appropriate formatting based on the magnitude:
/// - Values >= 1M: "1.2M"
/// - Values >= 1K: "1.2K"
/// - Integer values: "42"
/// - Fractional values: "3.14" (trimmed trailing zeros)
pub fn format_tick_value(value: f64) -> String {
    let abs_value = value.abs();

    if abs_value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs_value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else if value == value.round() {
        format!("{:.0}", value)
    } else if abs_value >= 100.0 {
        format!("{:.1}", value)
    } else if abs_value >= 1.0 {
        format!("{:.2}", value)
    } else {
        trim_fraction(&format!("{:.3}", value)).to_owned()
    }
}
