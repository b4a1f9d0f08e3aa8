//! Tick scheduling for real-time games.
//!
//! The loop owns the cadence; the controller owns the state. Between ticks
//! the caller gets the controller back to drain input and render.

use std::ops::ControlFlow;
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use super::controller::SessionController;
use crate::core::SessionConfig;
use crate::rules::{RulesEngine, Transition};

/// Something that blocks until the next tick is due.
pub trait Ticker {
    fn wait(&mut self);
}

/// Fixed-rate wall-clock ticker.
///
/// Deadlines are spaced by the interval from the first wait. A loop that
/// falls behind resumes from now instead of firing a burst of late ticks.
#[derive(Clone, Debug)]
pub struct IntervalTicker {
    interval: Duration,
    next: Option<Instant>,
}

impl IntervalTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval, next: None }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.tick_interval())
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Ticker for IntervalTicker {
    fn wait(&mut self) {
        let interval = self.interval;
        let deadline = *self.next.get_or_insert_with(|| Instant::now() + interval);
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        }
        self.next = Some(deadline.max(now) + interval);
    }
}

/// Ticker that never sleeps. Counts how often it was asked to wait.
#[derive(Clone, Debug, Default)]
pub struct ImmediateTicker {
    waits: u64,
}

impl ImmediateTicker {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn waits(&self) -> u64 {
        self.waits
    }
}

impl Ticker for ImmediateTicker {
    fn wait(&mut self) {
        self.waits += 1;
    }
}

/// Drive `controller` until the round ends or the loop is cancelled.
///
/// Each iteration waits for the ticker, hands the controller to
/// `between_ticks`, then advances one tick. The loop stops when the round
/// ends, when `between_ticks` breaks, or when the controller stops running
/// (a `reset` or `stop` inside `between_ticks`). No tick is applied after
/// any of those.
///
/// Returns the outcome if the round ended inside the loop.
pub fn run<G, T, F>(controller: &mut SessionController<G>, ticker: &mut T, mut between_ticks: F) -> Option<G::Outcome>
where
    G: RulesEngine,
    T: Ticker,
    F: FnMut(&mut SessionController<G>) -> ControlFlow<()>,
{
    while controller.is_running() {
        ticker.wait();

        if between_ticks(controller).is_break() {
            controller.stop();
            debug!("tick loop cancelled by caller");
            return None;
        }
        if !controller.is_running() {
            debug!("tick loop cancelled");
            return None;
        }

        match controller.tick() {
            Some(Transition::Terminal(outcome)) => return Some(outcome),
            Some(Transition::Continuing) => {}
            None => return None,
        }
    }
    None
}
