use crate::foundation::math::lerp;

/// Clamped linear map from an input interval onto an output interval.
///
/// Inputs below `from.0` produce `to.0`, inputs above `from.1` produce `to.1`; the map never
/// extrapolates. A degenerate input interval acts as a step at `from.1`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RangeMap {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

impl RangeMap {
    pub const fn new(from: (f64, f64), to: (f64, f64)) -> Self {
        Self { from, to }
    }

    /// `[start, end] -> [0, 1]`.
    pub const fn unit(start: f64, end: f64) -> Self {
        Self::new((start, end), (0.0, 1.0))
    }

    /// Normalized position of `x` inside the input interval, clamped to `[0, 1]`.
    pub fn t(&self, x: f64) -> f64 {
        let (a, b) = self.from;
        if !x.is_finite() {
            return 0.0;
        }
        if b <= a {
            return if x >= b { 1.0 } else { 0.0 };
        }
        ((x - a) / (b - a)).clamp(0.0, 1.0)
    }

    pub fn apply(&self, x: f64) -> f64 {
        lerp(self.to.0, self.to.1, self.t(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_both_sides() {
        let m = RangeMap::unit(0.25, 0.45);
        assert_eq!(m.apply(0.0), 0.0);
        assert_eq!(m.apply(0.25), 0.0);
        assert!((m.apply(0.35) - 0.5).abs() < 1e-12);
        assert_eq!(m.apply(0.45), 1.0);
        assert_eq!(m.apply(2.0), 1.0);
        assert_eq!(m.apply(-3.0), 0.0);
    }

    #[test]
    fn maps_onto_arbitrary_output() {
        let fade = RangeMap::new((0.0, 0.1), (1.0, 0.0));
        assert_eq!(fade.apply(0.0), 1.0);
        assert!((fade.apply(0.05) - 0.5).abs() < 1e-12);
        assert_eq!(fade.apply(0.5), 0.0);

        let roots = RangeMap::new((0.0, 0.1), (0.0, 0.8));
        assert!((roots.apply(1.0) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn degenerate_interval_is_a_step() {
        let m = RangeMap::unit(0.5, 0.5);
        assert_eq!(m.apply(0.49), 0.0);
        assert_eq!(m.apply(0.5), 1.0);
    }

    #[test]
    fn nan_maps_to_output_start() {
        assert_eq!(RangeMap::unit(0.0, 1.0).apply(f64::NAN), 0.0);
    }
}
