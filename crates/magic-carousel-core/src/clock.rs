use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use web_time::Instant;

/// Time source for transition deadlines.
pub trait Clock: 'static {
    fn now(&self) -> Instant;
}

pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A test clock you can drive deterministically. Clones share the same time.
#[derive(Clone)]
pub struct TestClock {
    t: Rc<Cell<Instant>>,
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            t: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.t.set(self.t.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        self.t.get()
    }
}

/// Single-slot delayed callback: scheduling replaces whatever was pending.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTimer {
    deadline: Option<Instant>,
}

impl TransitionTimer {
    pub fn schedule(&mut self, now: Instant, after: Duration) {
        self.deadline = Some(now + after);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
