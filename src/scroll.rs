use crate::foundation::core::Progress;

/// Desktop pages end in a spacer this many viewports tall.
pub const WIDE_PAGE_VIEWPORTS: f64 = 5.0;
/// Narrow pages give each section card this many viewports.
pub const NARROW_SECTION_VIEWPORTS: f64 = 1.5;

/// Scroll state of the container that drives the illustration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    /// Page extent a host would produce for `sections` story sections.
    pub fn page_for(viewport_height: f64, sections: usize, narrow: bool) -> Self {
        let scroll_height = if narrow {
            viewport_height * NARROW_SECTION_VIEWPORTS * sections as f64
        } else {
            viewport_height * WIDE_PAGE_VIEWPORTS
        };
        Self {
            scroll_top: 0.0,
            scroll_height,
            viewport_height,
        }
    }

    /// Scrollable distance; `0` when content fits the viewport.
    pub fn range(&self) -> f64 {
        (self.scroll_height - self.viewport_height).max(0.0)
    }

    /// `scroll_top / range`, clamped; `0` when there is nothing to scroll.
    pub fn progress(&self) -> Progress {
        let range = self.range();
        if range <= 0.0 || !range.is_finite() {
            return Progress::START;
        }
        Progress::new(self.scroll_top / range)
    }

    /// Scroll offset that yields `p`.
    pub fn offset_for(&self, p: Progress) -> f64 {
        self.range() * p.get()
    }
}

/// Converts scroll and resize events into progress.
///
/// Repeated events that leave progress unchanged report `None`.
#[derive(Clone, Copy, Debug)]
pub struct ScrollSource {
    metrics: ScrollMetrics,
    progress: Progress,
}

impl ScrollSource {
    pub fn new(metrics: ScrollMetrics) -> Self {
        Self {
            metrics,
            progress: metrics.progress(),
        }
    }

    pub fn metrics(&self) -> ScrollMetrics {
        self.metrics
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn on_scroll(&mut self, scroll_top: f64) -> Option<Progress> {
        self.metrics.scroll_top = scroll_top;
        self.recompute()
    }

    pub fn on_resize(&mut self, scroll_height: f64, viewport_height: f64) -> Option<Progress> {
        self.metrics.scroll_height = scroll_height;
        self.metrics.viewport_height = viewport_height;
        self.recompute()
    }

    /// Scroll to the offset that yields `p`, keeping `p` exactly rather than the value
    /// recomputed from that offset.
    pub fn seek(&mut self, p: Progress) -> Option<Progress> {
        self.metrics.scroll_top = self.metrics.offset_for(p);
        let next = if self.metrics.range() > 0.0 {
            p
        } else {
            Progress::START
        };
        self.update(next)
    }

    fn recompute(&mut self) -> Option<Progress> {
        self.update(self.metrics.progress())
    }

    fn update(&mut self, next: Progress) -> Option<Progress> {
        if next == self.progress {
            return None;
        }
        tracing::trace!(progress = next.get(), "scroll progress");
        self.progress = next;
        Some(next)
    }
}
