//! Presentation shell: owns the static scene and the per-frame animation state, and threads
//! scroll progress explicitly into the section selector and the edge springs.

use std::time::Duration;

use crate::{
    animation::{
        interval::RangeMap,
        spring::{Spring, SpringConfig},
    },
    config::{SceneInputs, StageConfig},
    foundation::{core::Progress, error::GrowResult},
    layout::{
        branch::{BranchEdge, EdgeTargets},
        scene::SceneLayout,
    },
    model::{
        story::{Story, StorySection},
        tree::FileNode,
    },
    panel::PanelTransition,
    scroll::{ScrollMetrics, ScrollSource},
    selector::{SectionChange, SectionSelector},
};

/// Upper bound on simulated time spent in [`Stage::settle`].
const SETTLE_LIMIT: Duration = Duration::from_secs(30);

const HINT_OPACITY: RangeMap = RangeMap::new((0.0, 0.1), (1.0, 0.0));

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ViewMode {
    /// Animated canvas plus info panel.
    Wide,
    /// Static stacked cards.
    Narrow,
}

/// Smoothing state of one edge, indexed like [`SceneLayout::edges`].
#[derive(Clone, Copy, Debug)]
struct EdgeSprings {
    draw: Spring,
    opacity: Spring,
    scale: Spring,
}

impl EdgeSprings {
    fn new() -> Self {
        Self {
            draw: Spring::new(SpringConfig::DRAW, 0.0),
            opacity: Spring::new(SpringConfig::FADE, 0.0),
            scale: Spring::new(SpringConfig::POP, 0.0),
        }
    }

    fn retarget(&mut self, t: EdgeTargets) {
        self.draw.set_target(t.draw);
        self.opacity.set_target(t.opacity);
        self.scale.set_target(t.scale);
    }

    fn snap(&mut self, t: EdgeTargets) {
        self.draw.snap_to(t.draw);
        self.opacity.snap_to(t.opacity);
        self.scale.snap_to(t.scale);
    }

    fn advance(&mut self, dt: Duration) {
        self.draw.advance(dt);
        self.opacity.advance(dt);
        self.scale.advance(dt);
    }

    fn settled_on(&self, t: EdgeTargets) -> bool {
        let settled = |s: &Spring, target: f64| s.is_at_rest() && s.target() == target;
        settled(&self.draw, t.draw)
            && settled(&self.opacity, t.opacity)
            && settled(&self.scale, t.scale)
    }
}

/// One edge with its smoothed animation values.
#[derive(Clone, Copy, Debug)]
pub struct EdgeFrame<'a> {
    pub edge: &'a BranchEdge,
    pub draw: f64,
    pub opacity: f64,
    pub scale: f64,
    pub highlighted: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RootsFrame {
    pub opacity: f64,
    pub seed_scale: f64,
    pub draw: Vec<f64>, // per root curve
}

#[derive(Clone, Copy, Debug)]
pub struct PanelFrame<'a> {
    pub section: &'a StorySection,
    pub opacity: f64,
    pub offset_x: f64,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct SceneFrame<'a> {
    pub progress: Progress,
    pub mode: ViewMode,
    pub layout: &'a SceneLayout,
    pub edges: Vec<EdgeFrame<'a>>,
    pub roots: RootsFrame,
    pub hint_opacity: f64,
    pub panel: PanelFrame<'a>,
    pub story: &'a Story,
}

pub struct Stage {
    config: StageConfig,
    inputs: SceneInputs,
    layout: SceneLayout,
    scroll: ScrollSource,
    viewport_width: f64,
    selector: SectionSelector,
    springs: Vec<EdgeSprings>,
    panel: PanelTransition,
    clock: Duration,
}

impl Stage {
    /// Stage at the configured viewport, scrolled to the top.
    pub fn new(inputs: SceneInputs, config: StageConfig) -> GrowResult<Self> {
        let layout = SceneLayout::build(&inputs.tree, &config)?;
        let (w, h) = (config.viewport_width, config.viewport_height);
        let narrow = w < config.narrow_breakpoint;
        let scroll = ScrollSource::new(ScrollMetrics::page_for(h, inputs.story.len(), narrow));
        let springs = vec![EdgeSprings::new(); layout.edges.len()];
        let panel = PanelTransition::with_ease(0, config.panel_ease);

        let mut stage = Self {
            config,
            inputs,
            layout,
            scroll,
            viewport_width: w,
            selector: SectionSelector::new(),
            springs,
            panel,
            clock: Duration::ZERO,
        };
        stage.on_progress(stage.scroll.progress());
        Ok(stage)
    }

    pub fn builtin(config: StageConfig) -> GrowResult<Self> {
        Self::new(SceneInputs::builtin(), config)
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    pub fn tree(&self) -> &FileNode {
        &self.inputs.tree
    }

    pub fn story(&self) -> &Story {
        &self.inputs.story
    }

    pub fn progress(&self) -> Progress {
        self.scroll.progress()
    }

    pub fn scroll_metrics(&self) -> ScrollMetrics {
        self.scroll.metrics()
    }

    /// Simulated time since the stage was created.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn active_section(&self) -> &StorySection {
        &self.story().sections()[self.selector.active()]
    }

    pub fn mode(&self) -> ViewMode {
        if self.viewport_width < self.config.narrow_breakpoint {
            ViewMode::Narrow
        } else {
            ViewMode::Wide
        }
    }

    /// Host scrolled the container to `scroll_top`.
    pub fn scroll_to(&mut self, scroll_top: f64) -> Option<SectionChange> {
        let p = self.scroll.on_scroll(scroll_top)?;
        self.on_progress(p)
    }

    /// Scroll so that progress becomes exactly `p`.
    pub fn scroll_to_progress(&mut self, p: Progress) -> Option<SectionChange> {
        let p = self.scroll.seek(p)?;
        self.on_progress(p)
    }

    /// Host viewport changed size; the page extent follows the view mode.
    pub fn resize(&mut self, viewport_width: f64, viewport_height: f64) -> Option<SectionChange> {
        self.viewport_width = viewport_width;
        let narrow = self.mode() == ViewMode::Narrow;
        let page = ScrollMetrics::page_for(viewport_height, self.story().len(), narrow);
        let p = self.scroll.on_resize(page.scroll_height, viewport_height)?;
        self.on_progress(p)
    }

    fn on_progress(&mut self, p: Progress) -> Option<SectionChange> {
        let change = self.selector.update(&self.inputs.story, p)?;
        self.panel.request(change.to);
        Some(change)
    }

    fn targets(&self) -> impl Iterator<Item = EdgeTargets> + '_ {
        let p = self.progress();
        self.layout.edges.iter().map(move |e| e.timing.targets(p))
    }

    /// Advance one frame of `dt`.
    #[tracing::instrument(level = "trace", skip(self), fields(progress = self.progress().get()))]
    pub fn tick(&mut self, dt: Duration) {
        let targets: Vec<EdgeTargets> = self.targets().collect();
        for (springs, t) in self.springs.iter_mut().zip(targets) {
            springs.retarget(t);
            springs.advance(dt);
        }
        self.panel.advance(dt);
        self.clock += dt;
    }

    /// Tick at the configured frame rate until every spring and the panel are at rest.
    ///
    /// Returns the number of frames advanced.
    pub fn settle(&mut self) -> usize {
        let dt = self.config.frame_duration();
        let mut frames = 0usize;
        let mut spent = Duration::ZERO;
        loop {
            self.tick(dt);
            frames += 1;
            spent += dt;
            if self.is_at_rest() {
                break;
            }
            if spent >= SETTLE_LIMIT {
                tracing::warn!(frames, "stage did not settle");
                break;
            }
        }
        frames
    }

    /// Jump every spring straight to its target.
    pub fn snap(&mut self) {
        let targets: Vec<EdgeTargets> = self.targets().collect();
        for (springs, t) in self.springs.iter_mut().zip(targets) {
            springs.snap(t);
        }
        self.panel.advance(crate::panel::PANEL_FADE * 2);
    }

    pub fn is_at_rest(&self) -> bool {
        self.panel.is_idle()
            && self
                .springs
                .iter()
                .zip(self.targets())
                .all(|(s, t)| s.settled_on(t))
    }

    pub fn frame(&self) -> SceneFrame<'_> {
        let p = self.progress();
        let active = self.active_section();
        let edges = self
            .layout
            .edges
            .iter()
            .zip(&self.springs)
            .map(|(edge, s)| EdgeFrame {
                edge,
                draw: s.draw.value(),
                opacity: s.opacity.value(),
                scale: s.scale.value(),
                highlighted: active.highlights(&edge.node_id),
            })
            .collect();

        let roots = &self.layout.roots;
        let visual = self.panel.visual();
        let section = self
            .story()
            .get(visual.section)
            .unwrap_or_else(|| self.active_section());

        SceneFrame {
            progress: p,
            mode: self.mode(),
            layout: &self.layout,
            edges,
            roots: RootsFrame {
                opacity: roots.opacity(p),
                seed_scale: roots.seed_scale(p),
                draw: roots.curves.iter().map(|c| c.draw_progress(p)).collect(),
            },
            hint_opacity: HINT_OPACITY.apply(p.get()),
            panel: PanelFrame {
                section,
                opacity: visual.opacity,
                offset_x: visual.offset_x,
            },
            story: self.story(),
        }
    }
}
