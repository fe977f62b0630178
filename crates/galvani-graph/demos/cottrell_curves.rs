//! Cottrell Curves Example
//!
//! Plots the Cottrell equation `I(t) = n F S C sqrt(D / (pi t))` for an
//! increasing electron count, one host frame per step:
//! - A theoretical curve and an offset "experimental" curve
//! - Title, axis labels, tick labels and a legend
//! - A zoom into the early transient halfway through
//!
//! The surface only logs what it receives; a real host would upload the
//! batch to its renderer.
//!
//! Run with `RUST_LOG=debug cargo run -p galvani-graph --example cottrell_curves`.

use std::sync::atomic::{AtomicUsize, Ordering};

use galvani_core::logging;
use galvani_graph::*;

const FARADAY: f64 = 96_485.332_9;
const SAMPLES: usize = 1000;
const FRAMES: usize = 8;

/// Cottrell current for `n` electrons at time `t`.
fn cottrell(n: f64, area: f64, concentration: f64, diffusion: f64, t: f64) -> f64 {
    n * FARADAY * area * concentration * (diffusion / std::f64::consts::PI).sqrt() * (1.0 / t).sqrt()
}

fn curve(n: f64, offset: f64) -> Vec<(f64, f64)> {
    (0..SAMPLES)
        .map(|i| {
            let t = 1e-5 + (20.0 - 1e-5) * i as f64 / (SAMPLES - 1) as f64;
            (t, cottrell(n, 1.0, 1e-3, 1e-5, t) + offset)
        })
        .collect()
}

#[derive(Default)]
struct LogSurface {
    frames: AtomicUsize,
}

impl RenderSurface for LogSurface {
    fn submit(&self, batch: &DrawBatch) {
        let frame = self.frames.fetch_add(1, Ordering::Relaxed);
        let stats = batch.stats();
        tracing::info!(
            frame,
            commands = stats.total_commands,
            vertices = stats.vertices,
            texts = stats.texts,
            "frame submitted"
        );
    }
}

fn main() -> Result<(), GraphError> {
    logging::init();

    let config = GraphConfig::new()
        .with_title("Cottrell evolution")
        .with_xlabel("time (s)")
        .with_ylabel("Intensity (A)")
        .with_x_range(0.0, 20.0)
        .with_y_range(0.0, 50.0)
        .with_x_ticks(5.0, 5)
        .with_y_ticks(10.0, 2)
        .with_x_grid_label(true)
        .with_y_grid_label(true)
        .with_y_grid(true)
        .with_tick_format(TickFormat::parse("%.0f")?)
        .with_legend(LegendPosition::TopRight);

    let mut canvas = GraphCanvas::new(config, MonospaceMetrics::default())?;
    canvas.set_size(800.0, 600.0);

    let theoretical = canvas.add_plot(
        Plot::line(curve(1.0, 0.0))
            .with_color(Color::rgb(0.2, 0.6, 1.0))
            .with_label("Theoretical"),
    )?;
    let experimental = canvas.add_plot(
        Plot::smooth_line(curve(1.0, 30.0))
            .with_color(Color::rgb(1.0, 0.5, 0.1))
            .with_label("Experimental"),
    )?;

    let surface = LogSurface::default();
    for step in 1..=FRAMES {
        let n = step as f64;
        canvas.set_points(theoretical, curve(n, 0.0));
        canvas.set_points(experimental, curve(n, 30.0));
        if step == FRAMES / 2 {
            let area = canvas.plot_area();
            canvas.zoom_at(4.0, 1.0, area.x as f64, area.center().y as f64);
        }
        canvas.on_frame(&surface);
    }

    let stats = canvas.frame_stats();
    tracing::info!(
        frames = stats.frames,
        redraws = stats.redraws,
        coalesced = stats.coalesced,
        x = ?canvas.x_axis(),
        "done"
    );
    Ok(())
}
