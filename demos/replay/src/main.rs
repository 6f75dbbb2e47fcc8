use std::{cell::RefCell, rc::Rc};

use anyhow::Context;
use magic_carousel_core::prelude::*;
use serde::Deserialize;

const DEFAULT_SCRIPT: &str = include_str!("../scripts/swipe.json");

#[derive(Deserialize)]
struct Script {
    #[serde(default)]
    config: CarouselConfig,
    cells: usize,
    viewport: f32,
    steps: Vec<Step>,
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum Step {
    Down([f32; 2]),
    Move([f32; 2]),
    Up([f32; 2]),
    Cancel,
    Next,
    Prev,
    GoTo(isize),
    Resize(f32),
    Content(usize),
    /// Advance the clock by this many milliseconds, then tick.
    Wait(u64),
}

fn pointer(kind: PointerEventKind, [x, y]: [f32; 2]) -> PointerEvent {
    PointerEvent::touch(kind, x, y)
}

fn run(script: Script) -> anyhow::Result<()> {
    let clock = TestClock::new();
    let mut carousel = Carousel::new(script.config, clock.clone());

    let seen = Rc::new(RefCell::new(Vec::<CarouselEvent>::new()));
    carousel.subscribe({
        let seen = seen.clone();
        move |e| seen.borrow_mut().push(*e)
    });

    carousel.mount(script.cells, script.viewport);
    println!("snaps: {:?}", carousel.geometry().snap_offsets.as_slice());

    for step in script.steps {
        let response = match step {
            Step::Down(p) => Some(carousel.handle_pointer(&pointer(PointerEventKind::Down, p))),
            Step::Move(p) => Some(carousel.handle_pointer(&pointer(PointerEventKind::Move, p))),
            Step::Up(p) => Some(carousel.handle_pointer(&pointer(PointerEventKind::Up, p))),
            Step::Cancel => Some(carousel.handle_pointer(&pointer(
                PointerEventKind::Cancel,
                [0.0, 0.0],
            ))),
            Step::Next => {
                carousel.next();
                None
            }
            Step::Prev => {
                carousel.prev();
                None
            }
            Step::GoTo(i) => {
                carousel.go_to(i);
                None
            }
            Step::Resize(w) => {
                carousel.on_resize(w);
                None
            }
            Step::Content(n) => {
                carousel.content_changed(n);
                None
            }
            Step::Wait(ms) => {
                clock.advance_ms(ms);
                carousel.tick();
                None
            }
        };

        let events: Vec<CarouselEvent> = seen.borrow_mut().drain(..).collect();
        let line = serde_json::json!({
            "step": format!("{step:?}"),
            "response": response.map(|r| format!("{r:?}")),
            "events": events,
            "active": carousel.active_index(),
            "offset": carousel.render_offset(),
            "flags": format!("{:?}", carousel.nav_flags()),
        });
        println!("{line}");
    }

    carousel.dispose();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let source = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading script {path}"))?,
        None => DEFAULT_SCRIPT.to_string(),
    };
    let script: Script = serde_json::from_str(&source).context("parsing script")?;
    log::info!(
        "replaying {} step(s) over {} cell(s)",
        script.steps.len(),
        script.cells
    );
    run(script)
}
