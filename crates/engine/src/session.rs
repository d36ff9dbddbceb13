//! Single-threaded event loop around one game engine.
//!
//! Ticks, commands and redraw requests all arrive through one unbounded queue
//! and are applied strictly in arrival order. Each event runs to completion
//! before the next is taken, and the renderer is called after every event that
//! changed something.

use anyhow::Result;
use log::{debug, info};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use grid_games_core::{GameEngine, GameSnapshot, Outcome};
use grid_games_types::Command;

use crate::scheduler::TickScheduler;

/// Everything the session loop reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Scheduled advance, stamped with the scheduler generation
    Tick(u64),
    Command(Command),
    /// Repaint everything (terminal resized or damaged)
    Redraw,
    Quit,
}

/// Draws snapshots somewhere.
///
/// Called on the session task; must not block for long.
pub trait Renderer {
    fn draw(&mut self, snapshot: &GameSnapshot) -> Result<()>;

    /// Forget anything cached so the next draw repaints fully.
    fn invalidate(&mut self) {}
}

/// What the loop should do after handling one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Idle,
    Draw,
    Redraw,
    Quit,
}

pub struct Session<E> {
    engine: E,
    scheduler: TickScheduler,
    tx: UnboundedSender<Event>,
    rx: UnboundedReceiver<Event>,
}

impl<E: GameEngine> Session<E> {
    pub fn new(engine: E) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            engine,
            scheduler: TickScheduler::new(tx.clone()),
            tx,
            rx,
        }
    }

    /// Handle for producers (input thread, tests) to post events.
    pub fn sender(&self) -> UnboundedSender<Event> {
        self.tx.clone()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    fn apply(&mut self, outcome: Outcome) -> Step {
        if let Some(change) = outcome.tick {
            self.scheduler.apply(change);
        }
        if outcome.changed {
            Step::Draw
        } else {
            Step::Idle
        }
    }

    /// Start the game; the first tick schedule comes from the engine.
    pub fn start(&mut self) -> Step {
        info!("session: starting {}", self.engine.kind().as_str());
        let outcome = self.engine.start();
        self.apply(outcome)
    }

    /// Apply one event to the engine.
    pub fn handle(&mut self, event: Event) -> Step {
        match event {
            Event::Tick(generation) => {
                if !self.scheduler.is_current(generation) {
                    debug!("session: dropping stale tick gen={}", generation);
                    return Step::Idle;
                }
                let outcome = self.engine.tick();
                self.apply(outcome)
            }
            Event::Command(command) => {
                debug!("session: command {}", command.as_str());
                let outcome = self.engine.command(command);
                self.apply(outcome)
            }
            Event::Redraw => Step::Redraw,
            Event::Quit => Step::Quit,
        }
    }

    /// Run until [`Event::Quit`] arrives.
    ///
    /// Renderer errors end the loop and are returned.
    pub async fn run<R: Renderer>(&mut self, renderer: &mut R) -> Result<()> {
        self.start();
        renderer.draw(&self.engine.snapshot())?;

        while let Some(event) = self.rx.recv().await {
            match self.handle(event) {
                Step::Idle => {}
                Step::Draw => renderer.draw(&self.engine.snapshot())?,
                Step::Redraw => {
                    renderer.invalidate();
                    renderer.draw(&self.engine.snapshot())?;
                }
                Step::Quit => break,
            }
        }

        self.scheduler.stop();
        info!(
            "session: finished {} status={} score={}",
            self.engine.kind().as_str(),
            self.engine.status().as_str(),
            self.engine.snapshot().score()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_games_core::rng::SequenceRng;
    use grid_games_core::{SnakeConfig, SnakeEngine, Twenty48Engine};
    use grid_games_types::{Point, Status};

    #[derive(Default)]
    struct Recorder {
        frames: Vec<GameSnapshot>,
        invalidations: usize,
    }

    impl Renderer for Recorder {
        fn draw(&mut self, snapshot: &GameSnapshot) -> Result<()> {
            self.frames.push(snapshot.clone());
            Ok(())
        }

        fn invalidate(&mut self) {
            self.invalidations += 1;
        }
    }

    fn snake() -> SnakeEngine<SequenceRng> {
        SnakeEngine::new(SnakeConfig::default(), SequenceRng::new(vec![0, 0]))
    }

    #[tokio::test]
    async fn test_stale_tick_is_dropped() {
        let mut session = Session::new(snake());
        session.start();
        let stale = session.scheduler().generation() + 7;

        assert_eq!(session.handle(Event::Tick(stale)), Step::Idle);
        assert_eq!(session.engine().head(), Some(Point::new(10, 10)));
    }

    #[tokio::test]
    async fn test_current_tick_advances() {
        let mut session = Session::new(snake());
        session.start();
        let generation = session.scheduler().generation();

        assert_eq!(session.handle(Event::Tick(generation)), Step::Draw);
        assert_eq!(session.engine().head(), Some(Point::new(9, 10)));
    }

    #[tokio::test]
    async fn test_pause_stops_scheduler() {
        let mut session = Session::new(snake());
        session.start();
        let before = session.scheduler().generation();

        assert_eq!(session.handle(Event::Command(Command::Pause)), Step::Draw);
        assert!(!session.scheduler().is_running());
        assert_eq!(session.handle(Event::Tick(before)), Step::Idle);

        session.handle(Event::Command(Command::Pause));
        assert_eq!(session.scheduler().interval_ms(), Some(350));
    }

    #[tokio::test]
    async fn test_untimed_game_has_no_schedule() {
        let mut session = Session::new(Twenty48Engine::new(SequenceRng::new(vec![0])));
        session.start();
        assert!(!session.scheduler().is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_draws_and_quits() {
        let mut session = Session::new(Twenty48Engine::new(SequenceRng::new(vec![0])));
        let tx = session.sender();
        tx.send(Event::Command(Command::MoveRight)).unwrap();
        tx.send(Event::Command(Command::RotateRight)).unwrap();
        tx.send(Event::Redraw).unwrap();
        tx.send(Event::Quit).unwrap();

        let mut recorder = Recorder::default();
        session.run(&mut recorder).await.unwrap();

        // Initial frame, the slide, then the forced redraw. Rotate is ignored.
        assert_eq!(recorder.frames.len(), 3);
        assert_eq!(recorder.invalidations, 1);
        assert_eq!(recorder.frames[0].status(), Status::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_delivers_ticks_over_time() {
        let mut session = Session::new(snake());
        let tx = session.sender();
        let quit = tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(1000)).await;
            let _ = tx.send(Event::Quit);
        });

        let mut recorder = Recorder::default();
        session.run(&mut recorder).await.unwrap();
        quit.await.unwrap();

        // Ticks at 350ms and 700ms.
        assert_eq!(session.engine().head(), Some(Point::new(8, 10)));
        assert_eq!(recorder.frames.len(), 3);
        assert!(!session.scheduler().is_running());
    }

    #[tokio::test]
    async fn test_renderer_error_ends_run() {
        struct Broken;
        impl Renderer for Broken {
            fn draw(&mut self, _: &GameSnapshot) -> Result<()> {
                anyhow::bail!("terminal gone")
            }
        }

        let mut session = Session::new(snake());
        let err = session.run(&mut Broken).await.unwrap_err();
        assert!(err.to_string().contains("terminal gone"));
    }
}
