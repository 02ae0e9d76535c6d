//! Growtree renders a scroll-driven "growing tree" illustration of a project's file structure.
//!
//! A single progress scalar, derived from the host's scroll position, drives everything:
//!
//! - [`SectionSelector`] picks the active [`StorySection`] for the info panel
//! - [`SceneLayout`] lays out the tree once; each edge's growth window turns progress into
//!   spring targets that a [`Stage`] smooths frame by frame
//! - [`SvgWriter`] turns a [`SceneFrame`] into a standalone SVG document
#![forbid(unsafe_code)]

pub mod animation;
pub mod config;
mod foundation;
pub mod layout;
pub mod model;
pub mod panel;
pub mod render;
pub mod scroll;
pub mod selector;
pub mod stage;

pub use crate::config::{SceneInputs, StageConfig};
pub use crate::foundation::core::{Line, Point, Progress, QuadBez, Rect, Rgb8, Viewbox};
pub use crate::foundation::error::{GrowError, GrowResult};
pub use crate::layout::branch::{BranchEdge, EdgeTargets, EdgeTiming, LabelSide};
pub use crate::layout::scene::SceneLayout;
pub use crate::model::story::{Story, StorySection};
pub use crate::model::tree::{FileNode, Icon, NodeKind};
pub use crate::render::glyph::{GlyphSource, NoGlyphs, OutlineGlyphs};
pub use crate::render::raster::{FrameRgba, rasterize, write_png};
pub use crate::render::svg::SvgWriter;
pub use crate::scroll::{ScrollMetrics, ScrollSource};
pub use crate::selector::{SectionChange, SectionSelector};
pub use crate::stage::{SceneFrame, Stage, ViewMode};
