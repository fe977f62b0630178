//! Legend layout.
//!
//! A legend is a two-column box: a fixed-width symbol slot followed by the
//! plot label. Rows follow plot insertion order; only visible plots with a
//! non-empty label take part. The box is rebuilt from scratch on every
//! redraw.

use galvani_core::profiling::profile_function;
use glam::Vec2;

use crate::color::Color;
use crate::config::LegendPosition;
use crate::geometry::{DrawCommand, PointsCommand, QuadCommand, SegmentsCommand, TextCommand, packed};
use crate::plot::{LegendSymbol, Plot};
use crate::rect::Rect;
use crate::text::CachedMeasure;

/// Width of the symbol column.
pub const SYMBOL_SLOT_WIDTH: f32 = 75.0;
/// Vertical padding added to each row's label height.
pub const ENTRY_PADDING: f32 = 10.0;
/// Distance between the legend and the plot-area corner it is anchored to.
pub const LEGEND_MARGIN: f32 = 5.0;
/// Extra size taken by the border outline.
pub const BORDER_GROWTH: Vec2 = Vec2::new(8.0, 3.0);

const CORNER_RADIUS: f32 = 10.0;
/// The background extends past the content on the right.
const BACKGROUND_OVERHANG: f32 = 5.0;

/// One row of the legend.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub symbol: LegendSymbol,
    pub color: Color,
    pub label: String,
    pub label_size: Vec2,
    /// Row bounds relative to the legend origin.
    pub bounds: Rect,
}

impl LegendEntry {
    /// Symbol slot relative to the legend origin.
    pub fn symbol_slot(&self) -> Rect {
        Rect::new(
            self.bounds.x,
            self.bounds.y,
            SYMBOL_SLOT_WIDTH,
            self.bounds.height,
        )
    }
}

/// Colors and font used to draw a legend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendStyle {
    pub background: Color,
    pub border: Color,
    pub text: Color,
    pub font_size: f32,
}

/// Measured legend, positioned with [`LegendBox::anchor`].
#[derive(Debug, Clone, PartialEq)]
pub struct LegendBox {
    pub entries: Vec<LegendEntry>,
    /// Size of the entry grid.
    pub content_size: Vec2,
    pub border: bool,
    /// Top-left corner in canvas pixels.
    pub position: Vec2,
}

impl LegendBox {
    /// Outer size including the border allowance.
    pub fn size(&self) -> Vec2 {
        if self.border {
            self.content_size + BORDER_GROWTH
        } else {
            self.content_size
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Place the box inside `plot_area` at `corner`, offset by [`LEGEND_MARGIN`].
    pub fn anchor(&mut self, corner: LegendPosition, plot_area: &Rect) {
        let size = self.size();
        let x = if corner.is_right() {
            plot_area.right() - LEGEND_MARGIN - size.x
        } else {
            plot_area.x + LEGEND_MARGIN
        };
        let y = if corner.is_top() {
            plot_area.y + LEGEND_MARGIN
        } else {
            plot_area.bottom() - LEGEND_MARGIN - size.y
        };
        self.position = Vec2::new(x, y);
    }

    /// Background, border, then symbol and label per entry.
    pub fn draw(&self, style: &LegendStyle) -> Vec<DrawCommand> {
        profile_function!();
        let mut commands = Vec::with_capacity(2 + self.entries.len() * 2);
        let background = Rect::from_pos_size(
            self.position,
            self.content_size + Vec2::new(BACKGROUND_OVERHANG, 0.0),
        );
        commands.push(DrawCommand::Quad(
            QuadCommand::filled(background, style.background).with_corner_radius(CORNER_RADIUS),
        ));
        if self.border {
            commands.push(DrawCommand::Quad(
                QuadCommand::outlined(background, style.border, 1.0)
                    .with_corner_radius(CORNER_RADIUS),
            ));
        }

        for entry in &self.entries {
            let mut slot = entry.symbol_slot();
            slot.x += self.position.x;
            slot.y += self.position.y;
            commands.push(symbol_command(entry, &slot));

            let label_pos = Vec2::new(
                slot.right(),
                slot.y + (slot.height - entry.label_size.y) * 0.5,
            );
            commands.push(DrawCommand::Text(TextCommand {
                text: entry.label.clone(),
                position: label_pos,
                size: entry.label_size,
                font_size: style.font_size,
                color: style.text,
                angle: 0.0,
            }));
        }
        commands
    }
}

fn symbol_command(entry: &LegendEntry, slot: &Rect) -> DrawCommand {
    let center = slot.center();
    let quarter = slot.width * 0.25;
    match entry.symbol {
        LegendSymbol::Dot { size } => DrawCommand::Points(PointsCommand {
            points: vec![packed(center)],
            color: entry.color,
            size,
        }),
        LegendSymbol::Line { width } => DrawCommand::Segments(SegmentsCommand {
            points: vec![
                packed(Vec2::new(slot.x + quarter, center.y)),
                packed(Vec2::new(slot.x + 3.0 * quarter, center.y)),
            ],
            color: entry.color,
            width,
        }),
        LegendSymbol::Swatch => DrawCommand::Quad(QuadCommand::filled(
            Rect::new(
                slot.x + quarter,
                center.y - slot.height * 0.25,
                slot.width * 0.5,
                slot.height * 0.5,
            ),
            entry.color,
        )),
    }
}

/// Builds [`LegendBox`]es from a plot sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendLayout {
    pub font_size: f32,
    pub border: bool,
}

impl LegendLayout {
    pub fn new(font_size: f32) -> Self {
        Self {
            font_size,
            border: true,
        }
    }

    pub fn with_border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    /// Measure a legend for `plots`, or `None` when no plot is legended.
    ///
    /// The box is positioned at the origin; call [`LegendBox::anchor`].
    pub fn layout<'a>(
        &self,
        plots: impl IntoIterator<Item = &'a Plot>,
        measure: &mut CachedMeasure,
    ) -> Option<LegendBox> {
        let mut entries = Vec::new();
        let mut y = 0.0;
        let mut label_width: f32 = 0.0;
        for plot in plots.into_iter().filter(|p| p.is_legended()) {
            let label_size = measure.measure(&plot.label, self.font_size);
            let height = label_size.y + ENTRY_PADDING;
            label_width = label_width.max(label_size.x);
            entries.push(LegendEntry {
                symbol: plot.kind.legend_symbol(),
                color: plot.color,
                label: plot.label.clone(),
                label_size,
                bounds: Rect::new(0.0, y, 0.0, height),
            });
            y += height;
        }
        if entries.is_empty() {
            return None;
        }

        let width = SYMBOL_SLOT_WIDTH + label_width;
        for entry in &mut entries {
            entry.bounds.width = width;
        }
        tracing::trace!(entries = entries.len(), width, height = y, "legend laid out");
        Some(LegendBox {
            entries,
            content_size: Vec2::new(width, y),
            border: self.border,
            position: Vec2::ZERO,
        })
    }
}
