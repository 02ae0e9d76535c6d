use std::time::Duration;

use crate::animation::ease::{Ease, Tween};

pub const PANEL_FADE: Duration = Duration::from_millis(500);
/// Horizontal offset of a panel that is fully faded out.
pub const PANEL_SLIDE_X: f64 = -20.0;
/// Easing of both fade halves unless configured otherwise.
pub const PANEL_EASE: Ease = Ease::InOutQuad;

#[derive(Clone, Copy, Debug)]
enum Phase {
    Entering(Tween),
    Shown,
    Exiting { tween: Tween, from_opacity: f64 },
}

/// What the info panel looks like this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelVisual {
    pub section: usize,
    pub opacity: f64,
    pub offset_x: f64,
}

/// Sequential cross-fade between story sections: the outgoing panel leaves completely before
/// the incoming one enters, so two panels are never visible together.
#[derive(Clone, Copy, Debug)]
pub struct PanelTransition {
    shown: usize,
    pending: Option<usize>,
    phase: Phase,
    ease: Ease,
}

impl PanelTransition {
    /// Panel for `section`, entering from hidden.
    pub fn new(section: usize) -> Self {
        Self::with_ease(section, PANEL_EASE)
    }

    pub fn with_ease(section: usize, ease: Ease) -> Self {
        Self {
            shown: section,
            pending: None,
            phase: Phase::Entering(Tween::new(PANEL_FADE, ease)),
            ease,
        }
    }

    pub fn shown(&self) -> usize {
        self.shown
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Shown)
    }

    /// Switch to `section` once the current panel has left.
    pub fn request(&mut self, section: usize) {
        match self.phase {
            Phase::Exiting { .. } => self.pending = Some(section),
            _ if section == self.shown => self.pending = None,
            _ => {
                let from_opacity = self.visual().opacity;
                self.pending = Some(section);
                self.phase = Phase::Exiting {
                    tween: Tween::new(PANEL_FADE, self.ease),
                    from_opacity,
                };
            }
        }
    }

    pub fn advance(&mut self, dt: Duration) {
        match &mut self.phase {
            Phase::Shown => {}
            Phase::Entering(tween) => {
                tween.advance(dt);
                if tween.is_done() {
                    self.phase = Phase::Shown;
                }
            }
            Phase::Exiting { tween, .. } => {
                let overflow = tween.overflow(dt);
                tween.advance(dt);
                if tween.is_done() {
                    if let Some(next) = self.pending.take() {
                        self.shown = next;
                    }
                    self.phase = Phase::Entering(Tween::new(PANEL_FADE, self.ease));
                    if !overflow.is_zero() {
                        self.advance(overflow);
                    }
                }
            }
        }
    }

    pub fn visual(&self) -> PanelVisual {
        let (opacity, offset_x) = match self.phase {
            Phase::Shown => (1.0, 0.0),
            Phase::Entering(tween) => {
                let v = tween.value();
                (v, PANEL_SLIDE_X * (1.0 - v))
            }
            Phase::Exiting {
                tween,
                from_opacity,
            } => {
                let v = tween.value();
                (from_opacity * (1.0 - v), PANEL_SLIDE_X * v)
            }
        };
        PanelVisual {
            section: self.shown,
            opacity,
            offset_x,
        }
    }
}
