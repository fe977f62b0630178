//! Redraw coalescing.
//!
//! Mutations on a canvas only record what changed. The host drives
//! [`FrameScheduler::take`] once per frame; all mutations recorded since the
//! previous frame collapse into a single redraw.

bitflags::bitflags! {
    /// What changed since the last redraw.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GraphDirtyFlags: u16 {
        /// Plot points changed.
        const DATA = 0b0000_0001;
        /// Plot color, label or visibility changed.
        const STYLE = 0b0000_0010;
        /// A plot was added or removed.
        const PLOTS = 0b0000_0100;
        /// Axis bounds or scale changed (range, zoom, pan).
        const AXES = 0b0000_1000;
        /// Tick spacing changed.
        const TICKS = 0b0001_0000;
        /// Canvas size or position changed.
        const BOUNDS = 0b0010_0000;
        /// Chart text, legend or colors changed.
        const CONFIG = 0b0100_0000;
    }
}

impl GraphDirtyFlags {
    /// Labels, ticks and the plot area have to be recomputed.
    pub fn needs_layout(&self) -> bool {
        self.intersects(Self::AXES | Self::TICKS | Self::BOUNDS | Self::CONFIG)
    }

    /// Legend membership, text or anchor may differ.
    pub fn needs_legend(&self) -> bool {
        self.needs_layout() || self.intersects(Self::PLOTS | Self::STYLE)
    }

    /// Only plot data or styling changed; the previous layout still holds.
    pub fn is_plot_only(&self) -> bool {
        !self.is_empty() && !self.needs_layout()
    }
}

/// Counters kept by a [`FrameScheduler`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames the host has driven.
    pub frames: u64,
    /// Redraws that produced a new batch.
    pub redraws: u64,
    /// Mutations absorbed into an already pending redraw.
    pub coalesced: u64,
}

/// Defers redraws to the next host frame.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    pending: GraphDirtyFlags,
    stats: FrameStats,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scheduler with a full redraw already pending.
    pub fn primed() -> Self {
        Self {
            pending: GraphDirtyFlags::all(),
            stats: FrameStats::default(),
        }
    }

    /// Record a mutation. Never redraws by itself.
    pub fn mark(&mut self, flags: GraphDirtyFlags) {
        if flags.is_empty() {
            return;
        }
        if self.pending.is_empty() {
            tracing::trace!(?flags, "redraw scheduled");
        } else {
            self.stats.coalesced += 1;
        }
        self.pending.insert(flags);
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending(&self) -> GraphDirtyFlags {
        self.pending
    }

    /// Advance one frame, handing out everything recorded since the last
    /// redraw, or `None` if nothing changed.
    pub fn take(&mut self) -> Option<GraphDirtyFlags> {
        self.stats.frames += 1;
        if self.pending.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.pending))
    }

    /// Count a redraw that replaced the previous batch.
    pub fn record_redraw(&mut self) {
        self.stats.redraws += 1;
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }
}
