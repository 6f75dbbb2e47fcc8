#[cfg(test)]
mod tests {
    use crate::PointerEventKind::{Cancel, Down, Move, Up};
    use crate::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Rig {
        carousel: Carousel,
        clock: TestClock,
        log: Rc<RefCell<Vec<CarouselEvent>>>,
    }

    impl Rig {
        fn new(config: CarouselConfig, cells: usize, width: f32) -> Self {
            let clock = TestClock::new();
            let mut carousel = Carousel::new(config, clock.clone());
            let log = Rc::new(RefCell::new(Vec::new()));
            let sink = log.clone();
            carousel.subscribe(move |e| sink.borrow_mut().push(*e));
            carousel.mount(cells, width);
            Self {
                carousel,
                clock,
                log,
            }
        }

        /// 5 cells of 100px, margin 16, 300px viewport: snaps [0, 116, 232, 264].
        fn standard() -> Self {
            Self::new(CarouselConfig::new(100.0), 5, 300.0)
        }

        fn take(&self) -> Vec<CarouselEvent> {
            std::mem::take(&mut *self.log.borrow_mut())
        }

        fn touch(&mut self, kind: PointerEventKind, x: f32, y: f32) -> PointerResponse {
            self.carousel.handle_pointer(&PointerEvent::touch(kind, x, y))
        }

        fn swipe(&mut self, from: f32, to: f32) {
            self.touch(Down, from, 50.0);
            self.touch(Move, to, 50.0);
            self.touch(Up, to, 50.0);
        }

        fn settle(&mut self, ms: u64) {
            self.clock.advance_ms(ms);
            self.carousel.tick();
        }
    }

    #[test]
    fn test_ready_fires_once() {
        let mut rig = Rig::standard();
        assert_eq!(rig.take(), vec![CarouselEvent::Ready]);
        assert!(rig.carousel.is_ready());

        rig.carousel.mount(5, 300.0);
        rig.carousel.on_resize(280.0);
        rig.carousel.content_changed(3);
        assert!(rig.take().is_empty());
    }

    #[test]
    fn test_short_swipe_emits_events_in_order() {
        let mut rig = Rig::standard();
        rig.take();

        rig.touch(Down, 200.0, 50.0);
        assert_eq!(rig.touch(Move, 150.0, 52.0), PointerResponse::Consumed);
        assert_eq!(rig.carousel.translate_x(), 50.0);
        rig.touch(Up, 150.0, 52.0);
        assert_eq!(rig.carousel.active_index(), 1);
        assert_eq!(rig.carousel.translate_x(), 116.0);

        rig.settle(299);
        rig.settle(1);
        insta::assert_debug_snapshot!(rig.take(), @r"
        [
            TouchStart,
            Move,
            GoTo(
                1,
            ),
            TouchEnd,
            TransitionEnd,
        ]
        ");
    }

    #[test]
    fn test_below_min_distance_keeps_index() {
        let mut rig = Rig::standard();
        rig.take();

        rig.touch(Down, 200.0, 50.0);
        rig.touch(Move, 205.0, 50.0);
        rig.touch(Move, 195.4, 50.0);
        rig.touch(Up, 195.4, 50.0);

        assert_eq!(rig.carousel.active_index(), 0);
        assert_eq!(rig.carousel.translate_x(), 0.0);
        let events = rig.take();
        assert_eq!(
            events
                .iter()
                .filter(|e| **e == CarouselEvent::TouchEnd)
                .count(),
            1
        );
        assert!(!events.iter().any(|e| matches!(e, CarouselEvent::GoTo(_))));
        assert!(!rig.carousel.tick());
    }

    #[test]
    fn test_long_swipe_goes_to_nearest() {
        let mut rig = Rig::standard();
        rig.take();

        rig.swipe(300.0, 100.0);
        assert_eq!(rig.carousel.active_index(), 2);
        assert_eq!(rig.carousel.translate_x(), 232.0);
        assert!(rig.take().contains(&CarouselEvent::GoTo(2)));
    }

    #[test]
    fn test_swipe_back_to_active_steps_once() {
        let mut rig = Rig::standard();
        rig.carousel.go_to(2);
        rig.take();

        // Rightward 20px lands nearest to 2 again; still moves back one.
        rig.swipe(100.0, 120.0);
        assert_eq!(rig.carousel.active_index(), 1);

        // Leftward 15px from 1.
        rig.swipe(200.0, 185.0);
        assert_eq!(rig.carousel.active_index(), 2);
    }

    #[test]
    fn test_overscroll_is_damped_and_snaps_back() {
        let mut rig = Rig::standard();
        rig.take();

        rig.touch(Down, 100.0, 50.0);
        rig.touch(Move, 200.0, 50.0);
        assert!((rig.carousel.translate_x() + 30.0).abs() < 1e-3);
        assert_eq!(rig.carousel.render_offset(), -rig.carousel.translate_x());
        rig.touch(Up, 200.0, 50.0);

        // Rightward swipe at index 0: prev is unavailable, nothing to go to.
        assert_eq!(rig.carousel.active_index(), 0);
        assert_eq!(rig.carousel.translate_x(), 0.0);
        assert_eq!(
            rig.take(),
            vec![
                CarouselEvent::TouchStart,
                CarouselEvent::Move,
                CarouselEvent::TouchEnd
            ]
        );
    }

    #[test]
    fn test_go_to_active_is_idempotent() {
        let mut rig = Rig::standard();
        rig.take();
        let before = rig.carousel.geometry().clone();

        assert_eq!(rig.carousel.go_to(0), Some(0));
        assert_eq!(rig.take(), vec![CarouselEvent::GoTo(0)]);
        rig.settle(100);
        assert!(rig.take().is_empty());
        rig.settle(200);
        assert_eq!(rig.take(), vec![CarouselEvent::TransitionEnd]);
        assert_eq!(rig.carousel.geometry(), &before);
        assert_eq!(rig.carousel.translate_x(), 0.0);
    }

    #[test]
    fn test_prev_at_start() {
        let mut rig = Rig::standard();
        rig.take();
        assert!(!rig.carousel.prev());
        assert!(rig.take().is_empty());

        let mut looped = Rig::new(CarouselConfig::new(100.0).with_loop(true), 5, 300.0);
        looped.take();
        assert!(looped.carousel.prev());
        assert_eq!(looped.carousel.active_index(), 3);
        assert_eq!(looped.take(), vec![CarouselEvent::GoTo(3)]);

        assert!(looped.carousel.next());
        assert_eq!(looped.carousel.active_index(), 0);
    }

    #[test]
    fn test_go_to_clamps_or_wraps() {
        let mut rig = Rig::standard();
        assert_eq!(rig.carousel.go_to(10), Some(3));
        assert_eq!(rig.carousel.go_to(-2), Some(0));

        let mut looped = Rig::new(CarouselConfig::new(100.0).with_loop(true), 5, 300.0);
        assert_eq!(looped.carousel.go_to(-1), Some(3));
        assert_eq!(looped.carousel.go_to(9), Some(1));
    }

    #[test]
    fn test_transition_end_is_single_slot() {
        let mut rig = Rig::standard();
        rig.take();

        rig.carousel.next();
        rig.settle(200);
        rig.carousel.next();
        rig.settle(200);
        assert!(rig.carousel.next_deadline().is_some());
        rig.settle(100);
        assert!(rig.carousel.next_deadline().is_none());

        let ends = rig
            .take()
            .into_iter()
            .filter(|e| *e == CarouselEvent::TransitionEnd)
            .count();
        assert_eq!(ends, 1);
    }

    #[test]
    fn test_zero_cells_disables_navigation() {
        let mut rig = Rig::new(CarouselConfig::new(100.0), 0, 300.0);
        assert_eq!(rig.take(), vec![CarouselEvent::Ready]);

        assert!(!rig.carousel.next());
        assert!(!rig.carousel.prev());
        assert_eq!(rig.carousel.go_to(0), None);
        rig.swipe(200.0, 100.0);
        assert_eq!(rig.carousel.nav_flags() & (NavFlags::PREV | NavFlags::NEXT), NavFlags::empty());
        assert!(rig.take().is_empty());
    }

    #[test]
    fn test_vertical_gesture_passes_through() {
        let mut rig = Rig::standard();
        rig.take();

        rig.touch(Down, 200.0, 100.0);
        assert_eq!(rig.touch(Move, 195.0, 140.0), PointerResponse::PassThrough);
        assert_eq!(rig.touch(Move, 60.0, 141.0), PointerResponse::PassThrough);
        assert_eq!(rig.carousel.gesture_phase(), GesturePhase::VerticalPassthrough);
        rig.touch(Up, 60.0, 141.0);

        assert_eq!(rig.carousel.active_index(), 0);
        assert_eq!(
            rig.take(),
            vec![CarouselEvent::TouchStart, CarouselEvent::TouchEnd]
        );
    }

    #[test]
    fn test_angle_threshold() {
        let mut rig = Rig::standard();
        rig.touch(Down, 100.0, 100.0);
        assert_eq!(rig.touch(Move, 90.0, 110.0), PointerResponse::Consumed);
        rig.touch(Up, 90.0, 110.0);

        rig.touch(Down, 100.0, 100.0);
        assert_eq!(rig.touch(Move, 90.0, 111.0), PointerResponse::PassThrough);
        rig.touch(Up, 90.0, 111.0);
    }

    #[test]
    fn test_invalid_angle_keeps_previous() {
        let mut rig = Rig::standard();
        rig.carousel.set_max_angle(30.0);
        rig.carousel.set_max_angle(120.0);
        rig.carousel.set_max_angle(-1.0);
        assert_eq!(rig.carousel.config().max_angle_degrees, 30.0);

        rig.carousel
            .reconfigure(CarouselConfig::new(100.0).with_max_angle(200.0).with_loop(true));
        assert_eq!(rig.carousel.config().max_angle_degrees, 30.0);
        assert!(rig.carousel.config().loop_mode);

        let c = Carousel::new(CarouselConfig::new(100.0).with_max_angle(95.0), TestClock::new());
        assert_eq!(c.config().max_angle_degrees, 45.0);
    }

    #[test]
    fn test_redundant_and_multi_touch_presses_ignored() {
        let mut rig = Rig::standard();
        rig.take();

        rig.touch(Down, 200.0, 50.0);
        assert_eq!(rig.touch(Down, 210.0, 50.0), PointerResponse::Ignored);
        rig.touch(Up, 200.0, 50.0);

        let pinch = PointerEvent::touch(Down, 200.0, 50.0).with_touches(2);
        assert_eq!(rig.carousel.handle_pointer(&pinch), PointerResponse::Ignored);
        assert_eq!(rig.carousel.gesture_phase(), GesturePhase::Idle);

        assert_eq!(
            rig.take(),
            vec![CarouselEvent::TouchStart, CarouselEvent::TouchEnd]
        );
    }

    #[test]
    fn test_untracked_pointer_dropped() {
        let mut rig = Rig::standard();
        rig.take();

        rig.carousel
            .handle_pointer(&PointerEvent::touch(Down, 200.0, 50.0).with_id(1));
        let stray = PointerEvent::touch(Move, 100.0, 50.0).with_id(2);
        assert_eq!(rig.carousel.handle_pointer(&stray), PointerResponse::Ignored);
        assert_eq!(rig.carousel.translate_x(), 0.0);

        let own = PointerEvent::touch(Move, 180.0, 50.0).with_id(1);
        assert_eq!(rig.carousel.handle_pointer(&own), PointerResponse::Consumed);
        let stray_up = PointerEvent::touch(Up, 180.0, 50.0).with_id(2);
        assert_eq!(rig.carousel.handle_pointer(&stray_up), PointerResponse::Ignored);
        assert!(rig.carousel.is_dragging());

        assert_eq!(
            rig.take(),
            vec![CarouselEvent::TouchStart, CarouselEvent::Move]
        );
    }

    #[test]
    fn test_mouse_requires_opt_in() {
        let mut rig = Rig::standard();
        let down = PointerEvent::mouse(Down, 200.0, 50.0);
        assert_eq!(rig.carousel.handle_pointer(&down), PointerResponse::Ignored);

        let mut mouse = Rig::new(
            CarouselConfig::new(100.0).with_swipe_by_mouse(true),
            5,
            300.0,
        );
        mouse.take();
        assert_eq!(mouse.carousel.handle_pointer(&down), PointerResponse::PassThrough);
        assert_eq!(mouse.take(), vec![CarouselEvent::TouchStart]);
    }

    #[test]
    fn test_discrete_and_continuous_availability() {
        let base = CarouselConfig::new(100.0).with_cells_to_scroll(3);

        let mut discrete = Rig::new(base.clone().with_mode(NavigationMode::Discrete), 5, 300.0);
        assert!(discrete.carousel.next_available());
        discrete.carousel.go_to(1);
        assert!(!discrete.carousel.next_available());
        assert!(!discrete.carousel.next());

        let mut continuous = Rig::new(base.with_mode(NavigationMode::Continuous), 5, 300.0);
        continuous.carousel.go_to(1);
        assert!(continuous.carousel.next_available());
        assert!(continuous.carousel.next());
        assert_eq!(continuous.carousel.active_index(), 3);
        assert!(continuous.carousel.is_last_transform());
        assert!(!continuous.carousel.next_available());
        assert!(continuous.carousel.prev());
        assert_eq!(continuous.carousel.active_index(), 0);
    }

    #[test]
    fn test_nav_flags() {
        let mut rig = Rig::standard();
        assert_eq!(
            rig.carousel.nav_flags(),
            NavFlags::NEXT | NavFlags::NEXT_VISIBLE
        );

        rig.carousel.go_to(3);
        assert_eq!(
            rig.carousel.nav_flags(),
            NavFlags::PREV | NavFlags::NEXT_VISIBLE
        );

        // Dragging further left at the end hides the next control.
        rig.touch(Down, 200.0, 50.0);
        rig.touch(Move, 160.0, 50.0);
        assert!(rig.carousel.translate_x() > 264.0);
        assert_eq!(rig.carousel.nav_flags(), NavFlags::PREV);
        rig.touch(Up, 160.0, 50.0);
        assert!(rig.carousel.next_can_be_shown());
    }

    #[test]
    fn test_cancel_resets_without_snap() {
        let mut rig = Rig::standard();
        rig.take();

        rig.touch(Down, 200.0, 50.0);
        rig.touch(Move, 100.0, 50.0);
        rig.touch(Cancel, 100.0, 50.0);
        assert_eq!(rig.carousel.gesture_phase(), GesturePhase::Idle);
        assert_eq!(rig.carousel.active_index(), 0);
        assert_eq!(rig.carousel.translate_x(), 0.0);
        assert_eq!(
            rig.take(),
            vec![
                CarouselEvent::TouchStart,
                CarouselEvent::Move,
                CarouselEvent::TouchEnd
            ]
        );
    }

    #[test]
    fn test_relayout_reclamps_and_keeps_drag() {
        let mut rig = Rig::standard();
        rig.carousel.go_to(3);
        rig.carousel.content_changed(2);
        assert_eq!(rig.carousel.active_index(), 0);
        assert_eq!(rig.carousel.translate_x(), 0.0);

        rig.carousel.content_changed(5);
        rig.touch(Down, 200.0, 50.0);
        rig.touch(Move, 150.0, 50.0);
        rig.carousel.on_resize(400.0);
        assert!(rig.carousel.is_dragging());
        assert_eq!(rig.carousel.translate_x(), 50.0);
        rig.touch(Move, 140.0, 50.0);
        assert_eq!(rig.carousel.translate_x(), 60.0);
    }

    #[test]
    fn test_same_width_resize_is_noop() {
        let mut rig = Rig::standard();
        rig.take();
        rig.touch(Down, 200.0, 50.0);
        rig.touch(Move, 120.0, 50.0);
        let before = rig.carousel.geometry().clone();
        assert_eq!(rig.take(), vec![CarouselEvent::TouchStart, CarouselEvent::Move]);

        rig.carousel.on_resize(300.0);
        assert!(rig.carousel.is_dragging());
        assert_eq!(rig.carousel.translate_x(), 80.0);
        assert_eq!(rig.carousel.geometry(), &before);
        assert!(rig.take().is_empty());

        rig.touch(Up, 120.0, 50.0);
        assert_eq!(rig.carousel.active_index(), 1);
    }

    #[test]
    fn test_oversized_step_never_overflows() {
        let discrete = CarouselConfig::new(100.0)
            .with_cells_to_scroll(usize::MAX)
            .with_mode(NavigationMode::Discrete);
        let mut rig = Rig::new(discrete, 5, 300.0);
        rig.carousel.go_to(1);
        assert!(!rig.carousel.next_available());
        assert!(!rig.carousel.prev_available());
        assert!(!rig.carousel.next());
        assert!(!rig.carousel.prev());
        assert_eq!(rig.carousel.active_index(), 1);

        // Continuous mode takes the partial step to the end.
        let mut continuous = Rig::new(
            CarouselConfig::new(100.0).with_cells_to_scroll(usize::MAX),
            5,
            300.0,
        );
        assert!(continuous.carousel.next());
        assert_eq!(continuous.carousel.active_index(), 3);

        // usize::MAX steps over 4 snaps is 3 steps either way.
        let mut looped = Rig::new(
            CarouselConfig::new(100.0)
                .with_cells_to_scroll(usize::MAX)
                .with_loop(true),
            5,
            300.0,
        );
        looped.carousel.go_to(1);
        assert!(looped.carousel.prev());
        assert_eq!(looped.carousel.active_index(), 2);
        assert!(looped.carousel.next());
        assert_eq!(looped.carousel.active_index(), 1);
    }

    #[test]
    fn test_non_finite_samples_ignored() {
        let mut rig = Rig::standard();
        rig.take();

        assert_eq!(rig.touch(Down, f32::NAN, 50.0), PointerResponse::Ignored);
        assert_eq!(rig.carousel.gesture_phase(), GesturePhase::Idle);
        assert!(rig.take().is_empty());

        rig.touch(Down, 200.0, 50.0);
        rig.touch(Move, 150.0, 50.0);
        rig.take();
        assert_eq!(rig.touch(Move, f32::NAN, 50.0), PointerResponse::Ignored);
        assert_eq!(rig.touch(Move, 150.0, f32::INFINITY), PointerResponse::Ignored);
        assert_eq!(rig.touch(Up, f32::NEG_INFINITY, 50.0), PointerResponse::Ignored);
        assert_eq!(rig.carousel.translate_x(), 50.0);
        assert!(rig.carousel.next_available());
        assert!(rig.take().is_empty());

        rig.touch(Up, 150.0, 50.0);
        assert_eq!(rig.carousel.active_index(), 1);
    }

    #[test]
    fn test_render_offset_at_rest_is_positive_zero() {
        let mut rig = Rig::standard();
        assert!(rig.carousel.render_offset().is_sign_positive());
        rig.carousel.next();
        assert_eq!(rig.carousel.render_offset(), -116.0);
        rig.carousel.prev();
        assert_eq!(rig.carousel.render_offset(), 0.0);
        assert!(rig.carousel.render_offset().is_sign_positive());
    }

    #[test]
    fn test_dispose_drops_subscribers() {
        let rig = Rig::standard();
        let Rig {
            mut carousel, log, ..
        } = rig;
        carousel.next();
        assert_eq!(Rc::strong_count(&log), 2);
        carousel.dispose();
        assert_eq!(Rc::strong_count(&log), 1);
    }
}
