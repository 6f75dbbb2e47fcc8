use slotmap::{SlotMap, new_key_type};

/// Everything a host can observe about a carousel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "name", content = "data", rename_all = "camelCase"))]
pub enum CarouselEvent {
    /// Fired once, after the first geometry computation.
    Ready,
    TouchStart,
    Move,
    TouchEnd,
    GoTo(usize),
    TransitionEnd,
}

new_key_type! {
    pub struct SubId;
}

type Handler = Box<dyn FnMut(&CarouselEvent)>;

/// Ordered fan-out of carousel events to subscribers.
#[derive(Default)]
pub struct EventBus {
    subs: SlotMap<SubId, Handler>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, f: impl FnMut(&CarouselEvent) + 'static) -> SubId {
        self.subs.insert(Box::new(f))
    }

    pub fn unsubscribe(&mut self, id: SubId) -> bool {
        self.subs.remove(id).is_some()
    }

    pub fn emit(&mut self, event: CarouselEvent) {
        log::trace!("carousel event {event:?} -> {} subscriber(s)", self.subs.len());
        for s in self.subs.values_mut() {
            s(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.subs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    pub fn clear(&mut self) {
        self.subs.clear();
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subs.len())
            .finish()
    }
}
