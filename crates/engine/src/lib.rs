//! Runtime that drives a [`GameEngine`](grid_games_core::GameEngine) in real time.
//!
//! - [`scheduler`]: tokio-backed periodic ticks with generation stamping
//! - [`session`]: the event queue, the loop and the [`Renderer`] seam
//!
//! Engines stay timer-free; this crate turns their [`TickChange`] requests
//! into actual ticks and serialises ticks with input.
//!
//! [`TickChange`]: grid_games_core::TickChange

pub mod scheduler;
pub mod session;

pub use scheduler::TickScheduler;
pub use session::{Event, Renderer, Session, Step};
