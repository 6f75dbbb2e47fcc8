use crate::Vec2;

/// Touch identifier reported by the host (mouse pointers usually carry none).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerKind {
    Mouse,
    #[default]
    Touch,
    Pen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    /// The platform took the pointer away (scroll takeover, touchcancel).
    Cancel,
}

/// One raw sample. Gestures are measured in screen coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerSample {
    pub client: Vec2,
    pub screen: Vec2,
}

impl PointerSample {
    /// Sample whose client and screen coordinates coincide.
    pub fn at(x: f32, y: f32) -> Self {
        let p = Vec2 { x, y };
        Self {
            client: p,
            screen: p,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    pub id: Option<PointerId>,
    pub kind: PointerKind,
    pub event: PointerEventKind,
    pub sample: PointerSample,
    /// Touches currently on the surface, including this one.
    pub touches: u32,
}

impl PointerEvent {
    pub fn new(event: PointerEventKind, kind: PointerKind, sample: PointerSample) -> Self {
        Self {
            id: None,
            kind,
            event,
            sample,
            touches: 1,
        }
    }

    pub fn touch(event: PointerEventKind, x: f32, y: f32) -> Self {
        Self::new(event, PointerKind::Touch, PointerSample::at(x, y))
    }

    pub fn mouse(event: PointerEventKind, x: f32, y: f32) -> Self {
        Self::new(event, PointerKind::Mouse, PointerSample::at(x, y))
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(PointerId(id));
        self
    }

    pub fn with_touches(mut self, touches: u32) -> Self {
        self.touches = touches;
        self
    }

    pub fn position(&self) -> Vec2 {
        self.sample.screen
    }
}

/// What the host should do with the native event after the carousel saw it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerResponse {
    /// The carousel owns the gesture; suppress the default (native scroll).
    Consumed,
    /// Tracked, but native handling should continue.
    PassThrough,
    /// Not relevant to this carousel.
    Ignored,
}

impl PointerResponse {
    pub fn prevent_default(self) -> bool {
        matches!(self, PointerResponse::Consumed)
    }
}
