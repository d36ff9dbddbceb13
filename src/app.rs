//! Wiring: terminal input thread, session and frontend.

use std::thread;

use anyhow::Result;
use crossterm::event::{self, Event as TermEvent};
use log::{info, warn};
use tokio::sync::mpsc::UnboundedSender;

use crate::config::AppConfig;
use crate::core::build_engine;
use crate::engine::{Event, Renderer, Session};
use crate::input::{handle_key_event, should_quit};

/// Translate one terminal event into a session event.
pub fn translate(event: &TermEvent) -> Option<Event> {
    match event {
        TermEvent::Key(key) if should_quit(*key) => Some(Event::Quit),
        TermEvent::Key(key) => handle_key_event(*key).map(Event::Command),
        TermEvent::Resize(_, _) => Some(Event::Redraw),
        _ => None,
    }
}

/// Read terminal events on a dedicated thread and post them to the session.
///
/// The thread ends after posting [`Event::Quit`] or when the session is gone.
pub fn spawn_input(tx: UnboundedSender<Event>) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        let event = match event::read() {
            Ok(event) => event,
            Err(e) => {
                warn!("input: read failed: {}", e);
                let _ = tx.send(Event::Quit);
                return;
            }
        };

        if let Some(event) = translate(&event) {
            let quit = event == Event::Quit;
            if tx.send(event).is_err() || quit {
                return;
            }
        }
    })
}

/// Play the configured game until the player quits.
pub async fn run<R: Renderer>(config: &AppConfig, renderer: &mut R) -> Result<()> {
    info!(
        "app: game={} board={} seed={}",
        config.game.as_str(),
        config.preset.as_str(),
        config.seed
    );
    let engine = build_engine(config.game, config.preset, config.seed);
    let mut session = Session::new(engine);
    // Detached: it may be blocked in `read` when the session ends.
    spawn_input(session.sender());
    session.run(renderer).await
}
