//! The contract every game engine implements.
//!
//! An engine is a run-to-completion state machine: each call applies one event
//! atomically and reports what happened through an [`Outcome`]. Engines never
//! touch timers themselves; when the tick schedule must change they say so in
//! [`Outcome::tick`] and the runtime acts on it.

use crate::snapshot::GameSnapshot;
use crate::types::{Command, GameKind, Status};

/// Requested change to the tick schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickChange {
    /// Stop delivering ticks
    Stop,
    /// (Re)start ticking at the given interval, replacing any running schedule
    Start(u32),
}

/// Result of applying one event to an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    /// Whether anything visible changed (the grid, score or status)
    pub changed: bool,
    /// Schedule change the runtime must apply, if any
    pub tick: Option<TickChange>,
}

impl Outcome {
    /// Nothing happened (rejected or ignored event)
    pub const fn unchanged() -> Self {
        Self {
            changed: false,
            tick: None,
        }
    }

    pub const fn changed() -> Self {
        Self {
            changed: true,
            tick: None,
        }
    }

    pub const fn with_tick(mut self, tick: TickChange) -> Self {
        self.tick = Some(tick);
        self
    }

    /// Combine two outcomes produced by one event; the later schedule wins.
    pub fn merge(self, later: Outcome) -> Outcome {
        Outcome {
            changed: self.changed || later.changed,
            tick: later.tick.or(self.tick),
        }
    }
}

/// A grid game driven by ticks and discrete commands
pub trait GameEngine {
    fn kind(&self) -> GameKind;

    /// Reset to a fresh game and begin playing
    fn start(&mut self) -> Outcome;

    /// One scheduled "advance" event
    fn tick(&mut self) -> Outcome;

    /// One input command
    fn command(&mut self, command: Command) -> Outcome;

    fn status(&self) -> Status;

    /// Read-only view for the renderer
    fn snapshot(&self) -> GameSnapshot;
}

impl<E: GameEngine + ?Sized> GameEngine for Box<E> {
    fn kind(&self) -> GameKind {
        (**self).kind()
    }

    fn start(&mut self) -> Outcome {
        (**self).start()
    }

    fn tick(&mut self) -> Outcome {
        (**self).tick()
    }

    fn command(&mut self, command: Command) -> Outcome {
        (**self).command(command)
    }

    fn status(&self) -> Status {
        (**self).status()
    }

    fn snapshot(&self) -> GameSnapshot {
        (**self).snapshot()
    }
}
