//! Terminal frontend: the session's [`Renderer`] backed by a framebuffer view.

use std::io::{self, Write};

use anyhow::Result;

use crate::core::GameSnapshot;
use crate::engine::Renderer;
use crate::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

pub struct TermFrontend<W: Write = io::Stdout> {
    term: TerminalRenderer<W>,
    view: GameView,
    fb: FrameBuffer,
    /// Fixed size; `None` follows the real terminal.
    viewport: Option<Viewport>,
}

impl TermFrontend<io::Stdout> {
    pub fn new() -> Self {
        Self {
            term: TerminalRenderer::new(),
            view: GameView::default(),
            fb: FrameBuffer::new(0, 0),
            viewport: None,
        }
    }
}

impl Default for TermFrontend<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TermFrontend<W> {
    /// Frontend drawing into `out` at a fixed size.
    pub fn with_writer(out: W, viewport: Viewport) -> Self {
        Self {
            term: TerminalRenderer::with_writer(out),
            view: GameView::default(),
            fb: FrameBuffer::new(viewport.width, viewport.height),
            viewport: Some(viewport),
        }
    }

    pub fn terminal(&mut self) -> &mut TerminalRenderer<W> {
        &mut self.term
    }

    fn current_viewport(&self) -> Viewport {
        self.viewport.unwrap_or_else(|| {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            Viewport::new(w, h)
        })
    }
}

impl<W: Write> Renderer for TermFrontend<W> {
    fn draw(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        let viewport = self.current_viewport();
        self.view.render_into(snapshot, viewport, &mut self.fb);
        self.term.draw_swap(&mut self.fb)
    }

    fn invalidate(&mut self) {
        self.term.invalidate();
    }
}
