//! # Carousel engine
//!
//! [`Carousel`] owns everything one carousel needs between frames: the
//! configuration, the last computed [`Geometry`], the in-flight
//! [`GestureState`], the active index, the current translation and a
//! single-slot transition timer. The host feeds it three kinds of input:
//!
//! - layout: [`Carousel::mount`], [`Carousel::on_resize`],
//!   [`Carousel::content_changed`],
//! - pointer samples: [`Carousel::handle_pointer`],
//! - commands: [`Carousel::next`], [`Carousel::prev`], [`Carousel::go_to`].
//!
//! Every call runs to completion on `&mut self` and reports what happened
//! through [`CarouselEvent`]s delivered to subscribers, in order. Hosts read
//! [`Carousel::render_offset`] after a `Move` or `GoTo` and call
//! [`Carousel::tick`] once per frame (or at [`Carousel::next_deadline`]) so
//! that `TransitionEnd` can fire.
//!
//! ```rust
//! use magic_carousel_core::*;
//!
//! let clock = TestClock::new();
//! let mut carousel = Carousel::new(CarouselConfig::new(100.0), clock.clone());
//! carousel.mount(5, 300.0);
//!
//! carousel.next();
//! assert_eq!(carousel.active_index(), 1);
//! assert_eq!(carousel.render_offset(), -116.0);
//!
//! clock.advance_ms(300);
//! assert!(!carousel.tick());
//! ```

use bitflags::bitflags;

use crate::clock::{Clock, SystemClock, TransitionTimer};
use crate::config::{CarouselConfig, NavigationMode, check_angle};
use crate::event::{CarouselEvent, EventBus, SubId};
use crate::geometry::{CellGeometry, Geometry, GeometryParams, compute_geometry};
use crate::gesture::{GesturePhase, GestureState};
use crate::input::{PointerEvent, PointerEventKind, PointerKind, PointerResponse};

bitflags! {
    /// Navigation control state, derived from the availability predicates.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NavFlags: u8 {
        const PREV = 1 << 0;
        const NEXT = 1 << 1;
        /// Cleared only while dragging at the end with nothing left to show.
        const NEXT_VISIBLE = 1 << 2;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Layout {
    cell_count: usize,
    viewport_width: f32,
}

pub struct Carousel {
    config: CarouselConfig,
    layout: Layout,
    geometry: Geometry,
    gesture: GestureState,
    active: usize,
    translate_x: f32,
    timer: TransitionTimer,
    events: EventBus,
    clock: Box<dyn Clock>,
    ready: bool,
}

impl Carousel {
    pub fn new(config: CarouselConfig, clock: impl Clock) -> Self {
        Self {
            config: config.validated(),
            layout: Layout::default(),
            geometry: Geometry::default(),
            gesture: GestureState::default(),
            active: 0,
            translate_x: 0.0,
            timer: TransitionTimer::default(),
            events: EventBus::new(),
            clock: Box::new(clock),
            ready: false,
        }
    }

    pub fn with_system_clock(config: CarouselConfig) -> Self {
        Self::new(config, SystemClock)
    }

    pub fn subscribe(&mut self, f: impl FnMut(&CarouselEvent) + 'static) -> SubId {
        self.events.subscribe(f)
    }

    pub fn unsubscribe(&mut self, id: SubId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Tear down: cancel the pending transition and drop every subscriber.
    pub fn dispose(mut self) {
        log::debug!("carousel disposed ({} subscriber(s))", self.events.len());
        self.timer.cancel();
        self.gesture.reset();
        self.events.clear();
    }

    // ---- layout ----

    /// First layout pass. Emits `Ready` exactly once per carousel.
    pub fn mount(&mut self, cell_count: usize, viewport_width: f32) {
        self.layout = Layout {
            cell_count,
            viewport_width: viewport_width.max(0.0),
        };
        self.recompute();
        if !self.ready {
            self.ready = true;
            self.events.emit(CarouselEvent::Ready);
        }
    }

    pub fn on_resize(&mut self, viewport_width: f32) {
        let viewport_width = viewport_width.max(0.0);
        if viewport_width == self.layout.viewport_width {
            return;
        }
        self.layout.viewport_width = viewport_width;
        self.recompute();
    }

    pub fn content_changed(&mut self, cell_count: usize) {
        self.layout.cell_count = cell_count;
        self.recompute();
    }

    /// Replace the configuration and relayout; the active index is kept.
    /// An out-of-range angle keeps the current threshold.
    pub fn reconfigure(&mut self, config: CarouselConfig) {
        let angle = self.config.max_angle_degrees;
        let keep_angle = check_angle(config.max_angle_degrees).is_err();
        self.config = config.validated();
        if keep_angle {
            self.config.max_angle_degrees = angle;
        }
        self.recompute();
    }

    /// Rejected angles are logged and the current threshold is kept.
    pub fn set_max_angle(&mut self, degrees: f32) {
        match check_angle(degrees) {
            Ok(d) => self.config.max_angle_degrees = d,
            Err(e) => log::warn!(
                "carousel: {e}; keeping {}°",
                self.config.max_angle_degrees
            ),
        }
    }

    fn recompute(&mut self) {
        let (margin_first, margin_last) = self.config.effective_edge_margins();
        self.geometry = compute_geometry(&GeometryParams {
            cell_count: self.layout.cell_count,
            cell_width: self.config.cell_width,
            margin: self.config.margin,
            margin_first,
            margin_last,
            viewport_width: self.layout.viewport_width,
            cells_to_show: self.config.cells_to_show,
        });

        match self.geometry.last_index() {
            Some(last) if self.active > last => {
                log::warn!(
                    "carousel: active index {} past last index {last} after relayout; clamping",
                    self.active
                );
                self.active = last;
            }
            Some(_) => {}
            None => self.active = 0,
        }

        // A drag in progress keeps its classification and picks up the new
        // bounds on its next move.
        if !self.is_dragging() {
            self.settle();
        }
        log::debug!(
            "carousel relayout: {} cell(s), {} snap(s), {} in view",
            self.geometry.cell_count(),
            self.geometry.snap_offsets.len(),
            self.geometry.slides_in_view
        );
    }

    fn settle(&mut self) {
        self.translate_x = self.geometry.snap(self.active).unwrap_or(0.0);
    }

    // ---- queries ----

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn cells(&self) -> &[CellGeometry] {
        &self.geometry.cells
    }

    pub fn slides_in_view(&self) -> usize {
        self.geometry.slides_in_view
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn translate_x(&self) -> f32 {
        self.translate_x
    }

    /// Horizontal offset to apply to the cell container. Never `-0.0`.
    pub fn render_offset(&self) -> f32 {
        0.0 - self.translate_x
    }

    pub fn gesture_phase(&self) -> GesturePhase {
        self.gesture.phase
    }

    /// Hosts drop the CSS transition while this is true.
    pub fn is_dragging(&self) -> bool {
        self.gesture.phase == GesturePhase::HorizontalDrag
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Whether the settled position is the final snap.
    pub fn is_last_transform(&self) -> bool {
        self.geometry.last_index() == Some(self.active)
    }

    pub fn prev_available(&self) -> bool {
        if self.geometry.is_empty() {
            return false;
        }
        self.config.loop_mode || self.active >= self.config.cells_to_scroll
    }

    pub fn next_available(&self) -> bool {
        let Some(last) = self.geometry.last_index() else {
            return false;
        };
        if self.config.loop_mode {
            return true;
        }
        match self.config.mode {
            NavigationMode::Discrete => self
                .active
                .checked_add(self.config.cells_to_scroll)
                .is_some_and(|target| target <= last),
            NavigationMode::Continuous => {
                self.translate_x < self.geometry.snap_offsets[last]
            }
        }
    }

    pub fn next_can_be_shown(&self) -> bool {
        self.next_available() || !(self.is_dragging() && self.is_last_transform())
    }

    pub fn nav_flags(&self) -> NavFlags {
        let mut flags = NavFlags::empty();
        flags.set(NavFlags::PREV, self.prev_available());
        flags.set(NavFlags::NEXT, self.next_available());
        flags.set(NavFlags::NEXT_VISIBLE, self.next_can_be_shown());
        flags
    }

    // ---- navigation ----

    pub fn next(&mut self) -> bool {
        if !self.next_available() {
            log::debug!("carousel: next unavailable at {}", self.active);
            return false;
        }
        let Some(last) = self.geometry.last_index() else {
            return false;
        };
        let step = self.config.cells_to_scroll;
        let len = last + 1;
        let target = match self.active.checked_add(step) {
            Some(target) if target <= last => target,
            _ if self.config.loop_mode => (self.active + step % len) % len,
            // Continuous mode may take a partial step to reach the end.
            _ => last,
        };
        self.navigate_to(target);
        true
    }

    pub fn prev(&mut self) -> bool {
        if !self.prev_available() {
            log::debug!("carousel: prev unavailable at {}", self.active);
            return false;
        }
        let len = self.geometry.snap_offsets.len();
        let step = self.config.cells_to_scroll;
        let target = match self.active.checked_sub(step) {
            Some(target) => target,
            None => (self.active + len - step % len) % len,
        };
        self.navigate_to(target);
        true
    }

    /// Jump to `index`. Out-of-range requests are clamped (or wrapped in loop
    /// mode). Returns the index actually selected, `None` with no slides.
    pub fn go_to(&mut self, index: isize) -> Option<usize> {
        let Some(last) = self.geometry.last_index() else {
            log::debug!("carousel: go_to({index}) ignored, no slides");
            return None;
        };
        let target = if self.config.loop_mode {
            index.rem_euclid(last as isize + 1) as usize
        } else if index < 0 || index as usize > last {
            let clamped = index.clamp(0, last as isize) as usize;
            log::warn!("carousel: index {index} out of range 0..={last}; clamping to {clamped}");
            clamped
        } else {
            index as usize
        };
        self.navigate_to(target);
        Some(target)
    }

    fn navigate_to(&mut self, index: usize) {
        log::debug!("carousel: {} -> {index}", self.active);
        self.active = index;
        if !self.is_dragging() {
            self.settle();
        }
        self.events.emit(CarouselEvent::GoTo(index));
        self.timer
            .schedule(self.clock.now(), self.config.transition());
    }

    // ---- timer ----

    /// Fire `TransitionEnd` if its deadline passed. Returns true while one is
    /// still pending.
    pub fn tick(&mut self) -> bool {
        if self.timer.poll(self.clock.now()) {
            self.events.emit(CarouselEvent::TransitionEnd);
        }
        self.timer.is_pending()
    }

    pub fn next_deadline(&self) -> Option<web_time::Instant> {
        self.timer.deadline()
    }

    // ---- pointer input ----

    pub fn handle_pointer(&mut self, ev: &PointerEvent) -> PointerResponse {
        if ev.kind == PointerKind::Mouse && !self.config.swipe_by_mouse {
            return PointerResponse::Ignored;
        }
        // Cancel carries no meaningful position.
        if ev.event != PointerEventKind::Cancel && !ev.position().is_finite() {
            log::trace!("carousel: non-finite {:?} sample dropped", ev.event);
            return PointerResponse::Ignored;
        }
        match ev.event {
            PointerEventKind::Down => self.pointer_down(ev),
            PointerEventKind::Move => self.pointer_move(ev),
            PointerEventKind::Up => self.pointer_up(ev),
            PointerEventKind::Cancel => self.pointer_cancel(ev),
        }
    }

    fn pointer_down(&mut self, ev: &PointerEvent) -> PointerResponse {
        if self.gesture.phase.is_active() {
            log::trace!("carousel: press during {:?} ignored", self.gesture.phase);
            return PointerResponse::Ignored;
        }
        if ev.touches > 1 {
            log::trace!("carousel: multi-touch press ignored");
            return PointerResponse::Ignored;
        }
        if self.geometry.is_empty() {
            return PointerResponse::Ignored;
        }
        self.gesture.press(ev.position(), self.translate_x, ev.id);
        self.events.emit(CarouselEvent::TouchStart);
        PointerResponse::PassThrough
    }

    fn pointer_move(&mut self, ev: &PointerEvent) -> PointerResponse {
        if !self.gesture.phase.is_active() {
            return PointerResponse::Ignored;
        }
        if !self.gesture.tracks(ev.id) {
            log::trace!("carousel: move from untracked pointer {:?} dropped", ev.id);
            return PointerResponse::Ignored;
        }
        match self
            .gesture
            .advance(ev.position(), self.config.max_angle_degrees)
        {
            GesturePhase::HorizontalDrag => {
                self.translate_x = self.gesture.drag_translate(self.geometry.bounds());
                self.events.emit(CarouselEvent::Move);
                PointerResponse::Consumed
            }
            _ => PointerResponse::PassThrough,
        }
    }

    fn pointer_up(&mut self, ev: &PointerEvent) -> PointerResponse {
        if !self.gesture.phase.is_active() {
            return PointerResponse::Ignored;
        }
        if !self.gesture.tracks(ev.id) {
            log::trace!("carousel: release from untracked pointer {:?} dropped", ev.id);
            return PointerResponse::Ignored;
        }
        let horizontal = self.is_dragging();
        let movement = self.gesture.movement_x();
        let released_at = self.translate_x;
        self.gesture.reset();
        self.settle();

        if horizontal && movement.abs() >= self.config.min_swipe_distance {
            self.snap_from(released_at, movement);
        }

        self.events.emit(CarouselEvent::TouchEnd);
        if horizontal {
            PointerResponse::Consumed
        } else {
            PointerResponse::PassThrough
        }
    }

    fn pointer_cancel(&mut self, ev: &PointerEvent) -> PointerResponse {
        if !self.gesture.phase.is_active() || !self.gesture.tracks(ev.id) {
            return PointerResponse::Ignored;
        }
        self.gesture.reset();
        self.settle();
        self.events.emit(CarouselEvent::TouchEnd);
        PointerResponse::PassThrough
    }

    /// Resolve a finished swipe to a slide. A swipe that lands back on the
    /// active slide still moves one step in its direction.
    fn snap_from(&mut self, translate: f32, movement: f32) {
        match self.geometry.nearest_index(translate) {
            Some(nearest) if nearest == self.active => {
                if movement < 0.0 {
                    self.next();
                } else if movement > 0.0 {
                    self.prev();
                }
            }
            Some(nearest) => self.navigate_to(nearest),
            None => {}
        }
    }
}

impl std::fmt::Debug for Carousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("active", &self.active)
            .field("translate_x", &self.translate_x)
            .field("phase", &self.gesture.phase)
            .field("snaps", &self.geometry.snap_offsets)
            .field("timer", &self.timer)
            .field("events", &self.events)
            .finish()
    }
}
