//! # Carousel navigation engine
//!
//! `magic-carousel-core` is the part of a swipeable carousel that has real
//! invariants: slide geometry, swipe classification, drag translation,
//! snapping and index navigation. Rendering, DOM/widget wiring and styling
//! stay with the host, which talks to the engine through plain values.
//!
//! There are three main pieces:
//!
//! - [`compute_geometry`]: cell widths, offsets and the snap offsets the
//!   carousel can settle on.
//! - [`GestureState`]: one press-to-release cycle with its anchor, sticky
//!   horizontal/vertical classification and rubber-banded drag math.
//! - [`Carousel`]: owns both, plus the active index and a single-slot
//!   transition timer, and reports what happened as [`CarouselEvent`]s.
//!
//! ## Driving a carousel
//!
//! ```rust
//! use magic_carousel_core::*;
//! use std::{cell::RefCell, rc::Rc};
//!
//! let clock = TestClock::new();
//! let mut carousel = Carousel::new(CarouselConfig::new(100.0), clock.clone());
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! carousel.subscribe({
//!     let seen = seen.clone();
//!     move |e| seen.borrow_mut().push(*e)
//! });
//! carousel.mount(5, 300.0);
//!
//! // Swipe left by 50px.
//! carousel.handle_pointer(&PointerEvent::touch(PointerEventKind::Down, 200.0, 10.0));
//! let r = carousel.handle_pointer(&PointerEvent::touch(PointerEventKind::Move, 150.0, 10.0));
//! assert!(r.prevent_default());
//! carousel.handle_pointer(&PointerEvent::touch(PointerEventKind::Up, 150.0, 10.0));
//!
//! assert_eq!(carousel.active_index(), 1);
//! clock.advance_ms(300);
//! carousel.tick();
//! assert_eq!(seen.borrow().last(), Some(&CarouselEvent::TransitionEnd));
//! ```
//!
//! ## Time
//!
//! The engine never sleeps or spawns. `GoTo` arms a deadline on the
//! carousel's [`Clock`]; the host calls [`Carousel::tick`] from its frame
//! loop (or at [`Carousel::next_deadline`]) and `TransitionEnd` fires once.
//! Starting another navigation before that replaces the deadline.
//!
//! ## Failure model
//!
//! Nothing in the engine returns an error to the host. Bad configuration
//! values are logged through `log` and replaced, out-of-range indices are
//! clamped, and stray pointer samples are dropped.

pub mod carousel;
pub mod clock;
pub mod config;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod input;
pub mod prelude;
pub mod tests;

pub use carousel::*;
pub use clock::*;
pub use config::*;
pub use event::*;
pub use geometry::*;
pub use gesture::*;
pub use input::*;
