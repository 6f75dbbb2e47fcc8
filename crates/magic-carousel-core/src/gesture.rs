use crate::Vec2;
use crate::input::PointerId;

/// Resistance applied to drag distance past the first or last snap.
pub const OVERSCROLL_DAMPING: f32 = 0.3;

/// Tolerance so that an exact threshold angle (e.g. 10/10 at 45°) stays horizontal.
const ANGLE_EPSILON: f64 = 1e-6;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// Down seen, no movement yet.
    Pressed,
    /// Moved without displacement; the axis is still undecided.
    Classifying,
    HorizontalDrag,
    /// Handed to native vertical scrolling for the rest of the gesture.
    VerticalPassthrough,
}

impl GesturePhase {
    pub fn is_active(self) -> bool {
        self != GesturePhase::Idle
    }

    pub fn is_classified(self) -> bool {
        matches!(
            self,
            GesturePhase::HorizontalDrag | GesturePhase::VerticalPassthrough
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeAxis {
    Horizontal,
    Vertical,
}

/// Decide the swipe axis from the displacement since the anchor.
///
/// The gesture is horizontal when `atan2(|dy|, |dx|)` is at most
/// `max_angle_degrees`. Returns `None` when there is no displacement.
pub fn classify(anchor: Vec2, current: Vec2, max_angle_degrees: f32) -> Option<SwipeAxis> {
    let dx = (current.x - anchor.x).abs() as f64;
    let dy = (current.y - anchor.y).abs() as f64;
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    let angle = dy.atan2(dx).to_degrees();
    if angle <= max_angle_degrees as f64 + ANGLE_EPSILON {
        Some(SwipeAxis::Horizontal)
    } else {
        Some(SwipeAxis::Vertical)
    }
}

/// Translation for a drag, rubber-banded outside `[lo, hi]`.
pub fn damped_translate(raw: f32, lo: f32, hi: f32) -> f32 {
    if raw < lo {
        lo - (lo - raw) * OVERSCROLL_DAMPING
    } else if raw > hi {
        hi + (raw - hi) * OVERSCROLL_DAMPING
    } else {
        raw
    }
}

/// Per-gesture state; lives for one press-to-release cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureState {
    pub phase: GesturePhase,
    pub anchor: Vec2,
    pub last: Vec2,
    pub drag_start_translate: f32,
    pub pointer: Option<PointerId>,
}

impl GestureState {
    pub fn press(&mut self, at: Vec2, translate: f32, pointer: Option<PointerId>) {
        *self = GestureState {
            phase: GesturePhase::Pressed,
            anchor: at,
            last: at,
            drag_start_translate: translate,
            pointer,
        };
    }

    /// A sample from `id` belongs to this gesture unless both sides carry
    /// different identifiers.
    pub fn tracks(&self, id: Option<PointerId>) -> bool {
        match (self.pointer, id) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }

    /// Rounded horizontal travel since the anchor.
    pub fn movement_x(&self) -> f32 {
        (self.last.x - self.anchor.x).round()
    }

    /// Apply a move sample. Classification happens once and then sticks.
    pub fn advance(&mut self, at: Vec2, max_angle_degrees: f32) -> GesturePhase {
        if matches!(self.phase, GesturePhase::Pressed | GesturePhase::Classifying) {
            self.phase = match classify(self.anchor, at, max_angle_degrees) {
                None => GesturePhase::Classifying,
                Some(SwipeAxis::Horizontal) => GesturePhase::HorizontalDrag,
                Some(SwipeAxis::Vertical) => GesturePhase::VerticalPassthrough,
            };
        }
        if self.phase == GesturePhase::HorizontalDrag {
            self.last = at;
        }
        self.phase
    }

    /// Live translation for the current drag.
    pub fn drag_translate(&self, bounds: (f32, f32)) -> f32 {
        let raw = self.drag_start_translate - self.movement_x();
        damped_translate(raw, bounds.0, bounds.1)
    }

    pub fn reset(&mut self) {
        *self = GestureState::default();
    }
}
