//! Snake engine - movement, growth and collision
//!
//! The snake is an ordered list of cells, head first. Moving prepends a new head
//! and drops the tail unless food was eaten. Hitting a wall or any body cell
//! ends the round and a fresh one starts immediately.

use std::collections::VecDeque;

use log::{debug, info};

use crate::game::{GameEngine, Outcome, TickChange};
use crate::rng::{RandomSource, SimpleRng};
use crate::snapshot::{GameSnapshot, SnakeSnapshot};
use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnakeConfig {
    pub width: u8,
    pub height: u8,
    pub tick_ms: u32,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            width: SNAKE_BOARD_WIDTH,
            height: SNAKE_BOARD_HEIGHT,
            tick_ms: SNAKE_TICK_MS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SnakeEngine<R = SimpleRng> {
    config: SnakeConfig,
    body: VecDeque<Point>,
    direction: Direction,
    food: Option<Point>,
    status: Status,
    deaths: u32,
    rng: R,
}

impl<R: RandomSource> SnakeEngine<R> {
    pub fn new(config: SnakeConfig, rng: R) -> Self {
        Self {
            config,
            body: VecDeque::new(),
            direction: Direction::Left,
            food: None,
            status: Status::NotStarted,
            deaths: 0,
            rng,
        }
    }

    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }

    pub fn body(&self) -> &VecDeque<Point> {
        &self.body
    }

    pub fn head(&self) -> Option<Point> {
        self.body.front().copied()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Option<Point> {
        self.food
    }

    /// Rounds lost since the engine was built
    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    /// Replace body and heading, for setting up positions.
    pub fn set_body(&mut self, body: impl IntoIterator<Item = Point>, direction: Direction) {
        self.body = body.into_iter().collect();
        self.direction = direction;
    }

    /// Place food explicitly, for setting up positions.
    pub fn set_food(&mut self, food: Option<Point>) {
        debug_assert!(food.map_or(true, |f| !self.body.contains(&f)));
        self.food = food;
    }

    /// One-cell snake in the middle heading left, fresh food
    pub fn start(&mut self) -> Outcome {
        let center = Point::new(
            (self.config.width / 2) as i16,
            (self.config.height / 2) as i16,
        );
        self.body.clear();
        self.body.push_back(center);
        self.direction = Direction::Left;
        self.status = Status::Running;
        self.spawn_food();
        info!("snake: start at ({}, {})", center.x, center.y);

        Outcome::changed().with_tick(TickChange::Start(self.config.tick_ms))
    }

    fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.config.width as i16 && p.y >= 0 && p.y < self.config.height as i16
    }

    /// Sample coordinates until one is off the body.
    ///
    /// When the body covers the whole grid there is nowhere to put food and it
    /// stays absent.
    pub fn spawn_food(&mut self) {
        let cells = self.config.width as usize * self.config.height as usize;
        if self.body.len() >= cells {
            self.food = None;
            return;
        }

        loop {
            let p = Point::new(
                self.rng.next_int(self.config.width as u32) as i16,
                self.rng.next_int(self.config.height as u32) as i16,
            );
            if !self.body.contains(&p) {
                self.food = Some(p);
                return;
            }
        }
    }

    /// Advance one cell in the current direction.
    ///
    /// Returns false when the move collided; the round has then already been
    /// restarted.
    pub fn try_move(&mut self) -> bool {
        let Some(head) = self.head() else {
            return false;
        };
        let next = head.step(self.direction);

        if !self.in_bounds(next) || self.body.contains(&next) {
            self.deaths += 1;
            info!(
                "snake: collision at ({}, {}) with length {}",
                next.x,
                next.y,
                self.body.len()
            );
            self.start();
            return false;
        }

        self.body.push_front(next);
        if self.food == Some(next) {
            debug!("snake: ate food, length {}", self.body.len());
            self.spawn_food();
        } else {
            self.body.pop_back();
        }
        true
    }

    /// Accept a new heading unless it lies on the current axis.
    pub fn turn(&mut self, dir: Direction) -> bool {
        if !self.status.is_running() || dir.same_axis(self.direction) {
            return false;
        }
        self.direction = dir;
        true
    }

    fn advance(&mut self) -> Outcome {
        if self.try_move() {
            Outcome::changed()
        } else {
            Outcome::changed().with_tick(TickChange::Start(self.config.tick_ms))
        }
    }

    fn toggle_pause(&mut self) -> Outcome {
        match self.status {
            Status::Running => {
                self.status = Status::Paused;
                Outcome::changed().with_tick(TickChange::Stop)
            }
            Status::Paused => {
                self.status = Status::Running;
                Outcome::changed().with_tick(TickChange::Start(self.config.tick_ms))
            }
            Status::NotStarted | Status::GameOver => Outcome::unchanged(),
        }
    }
}

impl<R: RandomSource> GameEngine for SnakeEngine<R> {
    fn kind(&self) -> GameKind {
        GameKind::Snake
    }

    fn start(&mut self) -> Outcome {
        SnakeEngine::start(self)
    }

    fn tick(&mut self) -> Outcome {
        if !self.status.is_running() {
            return Outcome::unchanged();
        }
        self.advance()
    }

    fn command(&mut self, command: Command) -> Outcome {
        match command {
            Command::Pause => self.toggle_pause(),
            Command::Restart => SnakeEngine::start(self),
            Command::RotateRight => Outcome::unchanged(),
            Command::MoveLeft | Command::MoveRight | Command::MoveUp | Command::MoveDown => {
                match command.direction() {
                    // An accepted turn moves right away.
                    Some(dir) if self.turn(dir) => self.advance(),
                    _ => Outcome::unchanged(),
                }
            }
        }
    }

    fn status(&self) -> Status {
        self.status
    }

    fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::Snake(SnakeSnapshot {
            width: self.config.width,
            height: self.config.height,
            body: self.body.iter().copied().collect(),
            food: self.food,
            direction: self.direction,
            deaths: self.deaths,
            status: self.status,
        })
    }
}

impl Default for SnakeEngine<SimpleRng> {
    fn default() -> Self {
        Self::new(SnakeConfig::default(), SimpleRng::default())
    }
}
