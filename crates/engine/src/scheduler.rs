//! Periodic tick delivery.
//!
//! A single tokio task per schedule posts [`Event::Tick`] into the session
//! queue. Every (re)start or stop bumps a generation counter; ticks carry the
//! generation they were produced under, so anything still queued from an old
//! schedule is recognised and dropped.

use std::time::Duration;

use log::debug;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use grid_games_core::TickChange;

use crate::session::Event;

#[derive(Debug)]
pub struct TickScheduler {
    tx: UnboundedSender<Event>,
    generation: u64,
    interval_ms: Option<u32>,
    task: Option<JoinHandle<()>>,
}

impl TickScheduler {
    pub fn new(tx: UnboundedSender<Event>) -> Self {
        Self {
            tx,
            generation: 0,
            interval_ms: None,
            task: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Interval of the running schedule, if any
    pub fn interval_ms(&self) -> Option<u32> {
        self.interval_ms
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Whether a tick stamped with `generation` belongs to the live schedule.
    pub fn is_current(&self, generation: u64) -> bool {
        self.task.is_some() && generation == self.generation
    }

    pub fn apply(&mut self, change: TickChange) {
        match change {
            TickChange::Stop => self.stop(),
            TickChange::Start(ms) => self.start(ms),
        }
    }

    /// Replace any running schedule with one firing every `ms` milliseconds.
    ///
    /// The first tick arrives one full period after the call.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, ms: u32) {
        self.abort_task();
        self.generation += 1;
        self.interval_ms = Some(ms);
        debug!("scheduler: start gen={} every {}ms", self.generation, ms);

        let generation = self.generation;
        let tx = self.tx.clone();
        let period = Duration::from_millis(u64::from(ms.max(1)));
        self.task = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(Event::Tick(generation)).is_err() {
                    break;
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if self.task.is_none() {
            return;
        }
        self.abort_task();
        self.generation += 1;
        self.interval_ms = None;
        debug!("scheduler: stop gen={}", self.generation);
    }

    fn abort_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.abort_task();
    }
}
