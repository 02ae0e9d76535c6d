use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ease {
    Linear,
    OutQuad,
    InOutQuad,
    OutCubic,
    InOutCubic,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

/// Fixed-duration eased clock, advanced by frame deltas.
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    duration: Duration,
    elapsed: Duration,
    ease: Ease,
}

impl Tween {
    pub fn new(duration: Duration, ease: Ease) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            ease,
        }
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Eased progress in `[0, 1]`; zero-length tweens are immediately complete.
    pub fn value(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        self.ease
            .apply(self.elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }

    /// Time past the end that `dt` would have consumed.
    pub fn overflow(&self, dt: Duration) -> Duration {
        (self.elapsed + dt).saturating_sub(self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 5] = [
        Ease::Linear,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::OutCubic,
        Ease::InOutCubic,
    ];

    #[test]
    fn endpoints_are_stable() {
        for ease in ALL {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
        }
    }

    #[test]
    fn monotonic_spot_check() {
        for ease in ALL {
            let a = ease.apply(0.25);
            let b = ease.apply(0.5);
            let c = ease.apply(0.75);
            assert!(a < b);
            assert!(b < c);
        }
    }

    #[test]
    fn serde_names_are_kebab_case() {
        assert_eq!(serde_json::to_string(&Ease::InOutQuad).unwrap(), r#""in-out-quad""#);
        let e: Ease = serde_json::from_str(r#""out-cubic""#).unwrap();
        assert_eq!(e, Ease::OutCubic);
    }

    #[test]
    fn tween_runs_to_completion() {
        let mut tw = Tween::new(Duration::from_millis(500), Ease::Linear);
        assert_eq!(tw.value(), 0.0);
        tw.advance(Duration::from_millis(250));
        assert!((tw.value() - 0.5).abs() < 1e-9);
        assert!(!tw.is_done());
        assert_eq!(tw.overflow(Duration::from_millis(400)), Duration::from_millis(150));
        tw.advance(Duration::from_millis(400));
        assert!(tw.is_done());
        assert_eq!(tw.value(), 1.0);
    }

    #[test]
    fn zero_length_tween_is_done() {
        let tw = Tween::new(Duration::ZERO, Ease::OutCubic);
        assert!(tw.is_done());
        assert_eq!(tw.value(), 1.0);
    }
}
