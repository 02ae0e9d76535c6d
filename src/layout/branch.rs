//! Recursive branch layout.
//!
//! Geometry depends only on the tree, the placement of the trunk and the jitter seed, so it is
//! computed once per stage. Scroll progress only feeds [`EdgeTiming::targets`], which yields the
//! per-frame spring targets for each edge.

use crate::{
    animation::interval::RangeMap,
    foundation::{
        core::{Line, Point, Progress, Rect, Rgb8, polar_from},
        math::{Salt, keyed_uniform},
    },
    model::tree::{FileNode, Icon, NodeKind},
};

/// Progress at which depth 0 starts growing.
pub const DEPTH_START: f64 = 0.1;
/// Extra delay per depth level.
pub const DEPTH_STAGGER: f64 = 0.15;
/// Width of each level's growth window.
pub const GROW_SPAN: f64 = 0.2;
/// Fade-in covers the head of the growth window.
pub const FADE_SPAN: f64 = 0.05;
/// Pop-in covers the tail of the growth window.
pub const POP_SPAN: f64 = 0.1;

pub const LENGTH_DECAY: f64 = 0.75;
pub const TRUNK_SPREAD_DEG: f64 = 60.0;
pub const BRANCH_SPREAD_DEG: f64 = 80.0;
pub const SINGLE_CHILD_JITTER_DEG: f64 = 10.0;
pub const WOBBLE_DEG: f64 = 5.0;

pub const TRUNK_COLOR: Rgb8 = Rgb8::hex(0x475569);
pub const BRANCH_COLOR: Rgb8 = Rgb8::hex(0x059669);
pub const TWIG_COLOR: Rgb8 = Rgb8::hex(0x0ea5e9);

pub const JOINT_RADIUS: f64 = 5.0;

const PILL_WIDTH: f64 = 130.0;
const PILL_HALF_HEIGHT: f64 = 14.0;
const ICON_SIZE: f64 = 20.0;

/// Children fan out across this many degrees below a node at `depth`.
pub fn spread_for_depth(depth: usize) -> f64 {
    if depth == 0 {
        TRUNK_SPREAD_DEG
    } else {
        BRANCH_SPREAD_DEG
    }
}

pub fn stroke_width(depth: usize) -> f64 {
    (10.0 - depth as f64 * 2.5).max(1.0)
}

pub fn stroke_color(depth: usize) -> Rgb8 {
    match depth {
        0 => TRUNK_COLOR,
        1 => BRANCH_COLOR,
        _ => TWIG_COLOR,
    }
}

/// Evenly stepped angle offset of child `index` among `count` (`count > 1`).
pub fn fan_offset(spread: f64, index: usize, count: usize) -> f64 {
    if count <= 1 {
        return 0.0;
    }
    -spread / 2.0 + index as f64 * (spread / (count - 1) as f64)
}

/// Scroll window of one depth level.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct EdgeTiming {
    pub start: f64,
}

/// Pre-smoothing animation targets, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct EdgeTargets {
    pub draw: f64,
    pub opacity: f64,
    pub scale: f64,
}

impl EdgeTiming {
    pub fn for_depth(depth: usize) -> Self {
        Self {
            start: DEPTH_START + depth as f64 * DEPTH_STAGGER,
        }
    }

    pub fn end(&self) -> f64 {
        self.start + GROW_SPAN
    }

    pub fn draw(&self) -> RangeMap {
        RangeMap::unit(self.start, self.end())
    }

    pub fn fade(&self) -> RangeMap {
        RangeMap::unit(self.start, self.start + FADE_SPAN)
    }

    pub fn pop(&self) -> RangeMap {
        RangeMap::unit(self.end() - POP_SPAN, self.end())
    }

    pub fn targets(&self, p: Progress) -> EdgeTargets {
        let x = p.get();
        EdgeTargets {
            draw: self.draw().apply(x),
            opacity: self.fade().apply(x),
            scale: self.pop().apply(x),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum LabelSide {
    Left,
    Right,
}

impl LabelSide {
    /// First half of the sibling group labels to the left.
    pub fn for_index(index: usize, siblings: usize) -> Self {
        if (index as f64) < siblings as f64 / 2.0 {
            Self::Left
        } else {
            Self::Right
        }
    }
}

/// Label pill geometry, relative to the joint at the edge's end point.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Label {
    pub side: LabelSide,
    pub pill: Rect,
    pub icon_box: Option<Rect>,
    pub text_at: Point,
}

impl Label {
    pub fn place(side: LabelSide, has_icon: bool) -> Self {
        let x0 = match side {
            LabelSide::Left => -(PILL_WIDTH + 10.0),
            LabelSide::Right => 15.0,
        };
        let icon_x = x0 + 5.0;
        Self {
            side,
            pill: Rect::new(x0, -PILL_HALF_HEIGHT, x0 + PILL_WIDTH, PILL_HALF_HEIGHT),
            icon_box: has_icon.then(|| {
                Rect::new(icon_x, -ICON_SIZE / 2.0, icon_x + ICON_SIZE, ICON_SIZE / 2.0)
            }),
            text_at: Point::new(x0 + 30.0, 5.0),
        }
    }
}

/// One laid-out edge from a parent's position to this node.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BranchEdge {
    pub node_id: String,
    pub name: String,
    pub kind: NodeKind,
    pub icon: Option<Icon>,
    pub depth: usize,
    pub index: usize,
    pub siblings: usize,
    pub angle_deg: f64,
    pub length: f64,
    pub line: Line,
    pub stroke_width: f64,
    pub stroke: Rgb8,
    pub joint_radius: f64,
    pub timing: EdgeTiming,
    pub label: Option<Label>, // none on the trunk
}

impl BranchEdge {
    pub fn end(&self) -> Point {
        self.line.p1
    }
}

/// Where and how an edge is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub depth: usize,
    pub index: usize,
    pub siblings: usize,
    pub origin: Point,
    pub angle_deg: f64,
    pub length: f64,
}

impl Placement {
    /// Depth-0 trunk pointing straight up.
    pub fn trunk(origin: Point, length: f64) -> Self {
        Self {
            depth: 0,
            index: 0,
            siblings: 1,
            origin,
            angle_deg: 0.0,
            length,
        }
    }
}

/// Per-node angular irregularity, fixed for a given seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Jitter {
    pub seed: u64,
    pub enabled: bool,
}

impl Jitter {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            enabled: true,
        }
    }

    pub fn off() -> Self {
        Self {
            seed: 0,
            enabled: false,
        }
    }

    /// Offset given to an only child in place of going straight on.
    pub fn single_child_offset(&self, node_id: &str) -> f64 {
        self.uniform(node_id, Salt::SingleChildOffset, SINGLE_CHILD_JITTER_DEG)
    }

    pub fn wobble(&self, node_id: &str) -> f64 {
        self.uniform(node_id, Salt::Wobble, WOBBLE_DEG)
    }

    fn uniform(&self, node_id: &str, salt: Salt, half_width: f64) -> f64 {
        if !self.enabled {
            return 0.0;
        }
        keyed_uniform(self.seed, node_id, salt, -half_width, half_width)
    }
}

/// Lay out `node` at `place` and recurse into its children, appending edges in pre-order.
pub fn layout_branch(node: &FileNode, place: Placement, jitter: Jitter, out: &mut Vec<BranchEdge>) {
    let end = polar_from(place.origin, place.angle_deg, place.length);
    let label = (place.depth > 0).then(|| {
        Label::place(
            LabelSide::for_index(place.index, place.siblings),
            node.icon.is_some(),
        )
    });

    out.push(BranchEdge {
        node_id: node.id.clone(),
        name: node.name.clone(),
        kind: node.kind,
        icon: node.icon,
        depth: place.depth,
        index: place.index,
        siblings: place.siblings,
        angle_deg: place.angle_deg,
        length: place.length,
        line: Line::new(place.origin, end),
        stroke_width: stroke_width(place.depth),
        stroke: stroke_color(place.depth),
        joint_radius: if place.depth == 0 { 0.0 } else { JOINT_RADIUS },
        timing: EdgeTiming::for_depth(place.depth),
        label,
    });

    let count = node.children.len();
    let spread = spread_for_depth(place.depth);
    for (i, child) in node.children.iter().enumerate() {
        let offset = if count > 1 {
            fan_offset(spread, i, count)
        } else {
            jitter.single_child_offset(&child.id)
        };
        let child_place = Placement {
            depth: place.depth + 1,
            index: i,
            siblings: count,
            origin: end,
            angle_deg: place.angle_deg + offset + jitter.wobble(&child.id),
            length: place.length * LENGTH_DECAY,
        };
        layout_branch(child, child_place, jitter, out);
    }
}
