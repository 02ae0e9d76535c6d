use crate::{
    animation::interval::RangeMap,
    foundation::{
        core::{Point, Progress, QuadBez, Rgb8, polar_from},
        math::{Salt, keyed_uniform},
    },
};

pub const ROOT_COUNT: usize = 6;
pub const ROOT_STAGGER_START: f64 = 0.05;
pub const ROOT_STAGGER_STEP: f64 = 0.02;
pub const ROOT_END: f64 = 0.35;

pub const ROOT_COLOR: Rgb8 = Rgb8::hex(0x92400e);
pub const ROOT_STROKE_OPACITY: f64 = 0.7;
pub const SEED_RADIUS: f64 = 8.0;
pub const SEED_FILL: Rgb8 = Rgb8::hex(0xfcd34d);
pub const SEED_STROKE: Rgb8 = Rgb8::hex(0xb45309);

const ROOT_OPACITY: RangeMap = RangeMap::new((0.0, 0.1), (0.0, 0.8));
const SEED_SCALE: RangeMap = RangeMap::unit(0.0, 0.1);

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RootCurve {
    /// 1-based, as in the stagger formula.
    pub index: usize,
    pub curve: QuadBez,
    pub stroke_width: f64,
    pub dashed: bool,
    pub growth: RangeMap,
}

impl RootCurve {
    /// Unsmoothed: roots track the scroll directly.
    pub fn draw_progress(&self, p: Progress) -> f64 {
        self.growth.apply(p.get())
    }
}

/// Decorative roots and seed beneath the trunk.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RootSystem {
    pub base: Point,
    pub curves: Vec<RootCurve>,
}

impl RootSystem {
    pub fn generate(base: Point, seed: u64, organic: bool) -> Self {
        let jitter = |key: &str, salt, lo: f64, hi: f64| {
            if organic {
                keyed_uniform(seed, key, salt, lo, hi)
            } else {
                lo
            }
        };

        let curves = (1..=ROOT_COUNT)
            .map(|i| {
                let key = format!("root-{i}");
                let angle = 135.0 + i as f64 * 12.0 + jitter(&key, Salt::RootAngle, 0.0, 10.0);
                let length = 60.0 + jitter(&key, Salt::RootLength, 0.0, 50.0);
                let control = Point::new(
                    base.x + jitter(&key, Salt::RootControlX, -20.0, 20.0),
                    base.y + jitter(&key, Salt::RootControlY, 0.0, 40.0),
                );
                let end = polar_from(base, angle, length);
                let even = i % 2 == 0;
                RootCurve {
                    index: i,
                    curve: QuadBez::new(base, control, end),
                    stroke_width: if even { 2.0 } else { 1.0 },
                    dashed: !even,
                    growth: RangeMap::unit(
                        ROOT_STAGGER_START + i as f64 * ROOT_STAGGER_STEP,
                        ROOT_END,
                    ),
                }
            })
            .collect();

        Self { base, curves }
    }

    /// Shared opacity of all root curves.
    pub fn opacity(&self, p: Progress) -> f64 {
        ROOT_OPACITY.apply(p.get())
    }

    pub fn seed_scale(&self, p: Progress) -> f64 {
        SEED_SCALE.apply(p.get())
    }
}
