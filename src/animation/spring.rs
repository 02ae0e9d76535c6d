//! Damped spring used to smooth every animated edge parameter.
//!
//! Each spring chases a target derived from scroll progress:
//!
//!   a = -stiffness * (position - target) - damping * velocity
//!
//! integrated with semi-implicit Euler in sub-steps of at most 4 ms, so a long frame cannot
//! destabilize a stiff spring. A spring whose position and velocity both fall under the rest
//! thresholds snaps onto its target and stops integrating until the target moves again.

use std::time::Duration;

const MAX_STEP_SECS: f64 = 0.004;
const REST_DELTA: f64 = 0.001;
const REST_SPEED: f64 = 0.01;
const MIN_STIFFNESS: f64 = 0.1;

/// Stiffness/damping pair (unit mass).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
}

impl SpringConfig {
    /// Branch path drawing.
    pub const DRAW: Self = Self::new(40.0, 20.0);
    /// Branch fade-in.
    pub const FADE: Self = Self::new(60.0, 20.0);
    /// Label/joint pop-in; underdamped so it overshoots slightly.
    pub const POP: Self = Self::new(150.0, 12.0);

    pub const fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
        }
    }

    /// Damping at which the spring stops oscillating.
    pub fn critical_damping(self) -> f64 {
        2.0 * self.stiffness.max(MIN_STIFFNESS).sqrt()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
    at_rest: bool,
}

impl Spring {
    /// Spring resting at `initial`.
    pub fn new(config: SpringConfig, initial: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target: initial,
            stiffness: config.stiffness.max(MIN_STIFFNESS),
            damping: config.damping.max(0.0),
            at_rest: true,
        }
    }

    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Position clamped to `[0, 1]`.
    #[inline]
    pub fn value(&self) -> f64 {
        self.position.clamp(0.0, 1.0)
    }

    /// Retarget; an unchanged target leaves a resting spring asleep.
    pub fn set_target(&mut self, target: f64) {
        if target != self.target {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Jump to `value` with no motion.
    pub fn snap_to(&mut self, value: f64) {
        self.position = value;
        self.target = value;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }
        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        if (self.position - self.target).abs() < REST_DELTA && self.velocity.abs() < REST_SPEED {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_micros(16_667);

    fn run(spring: &mut Spring, frames: usize) -> f64 {
        let mut peak = spring.position();
        for _ in 0..frames {
            spring.advance(FRAME);
            peak = peak.max(spring.position());
        }
        peak
    }

    #[test]
    fn new_spring_is_at_rest() {
        let mut s = Spring::new(SpringConfig::DRAW, 0.0);
        assert!(s.is_at_rest());
        s.advance(FRAME);
        assert_eq!(s.position(), 0.0);
    }

    #[test]
    fn draw_spring_converges_without_overshoot() {
        let mut s = Spring::new(SpringConfig::DRAW, 0.0);
        s.set_target(1.0);
        let peak = run(&mut s, 60 * 10);
        assert!(peak <= 1.0 + 1e-9, "overdamped spring overshot: {peak}");
        assert!(s.is_at_rest());
        assert_eq!(s.position(), 1.0);
    }

    #[test]
    fn pop_spring_overshoots_then_settles() {
        let cfg = SpringConfig::POP;
        assert!(cfg.damping < cfg.critical_damping());
        let mut s = Spring::new(cfg, 0.0);
        s.set_target(1.0);
        let peak = run(&mut s, 60 * 5);
        assert!(peak > 1.0);
        assert!(s.is_at_rest());
        assert_eq!(s.value(), 1.0);
    }

    #[test]
    fn value_is_clamped_while_overshooting() {
        let mut s = Spring::new(SpringConfig::POP, 0.0);
        s.set_target(1.0);
        for _ in 0..30 {
            s.advance(FRAME);
            assert!((0.0..=1.0).contains(&s.value()));
        }
    }

    #[test]
    fn long_frame_is_stable() {
        let mut s = Spring::new(SpringConfig::POP, 0.0);
        s.set_target(1.0);
        s.advance(Duration::from_secs(5));
        assert!((s.position() - 1.0).abs() < 0.01);
    }

    #[test]
    fn unchanged_target_is_a_noop() {
        let mut s = Spring::new(SpringConfig::FADE, 0.5);
        s.set_target(0.5);
        assert!(s.is_at_rest());
        s.snap_to(0.25);
        assert_eq!(s.position(), 0.25);
        assert_eq!(s.target(), 0.25);
        assert_eq!(s.velocity(), 0.0);
    }
}
