//! Render sink that draws snapshots to the terminal.

use std::io::{self, Write};

use anyhow::Result;

use crate::core::GameSnapshot;
use crate::engine::RenderSink;
use crate::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

pub struct TerminalSink<W: Write = io::Stdout> {
    renderer: TerminalRenderer<W>,
    view: GameView,
    fb: FrameBuffer,
    /// Fixed size; `None` follows the terminal
    viewport: Option<Viewport>,
}

impl TerminalSink<io::Stdout> {
    pub fn new(renderer: TerminalRenderer) -> Self {
        Self {
            renderer,
            view: GameView::default(),
            fb: FrameBuffer::new(0, 0),
            viewport: None,
        }
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn with_viewport(renderer: TerminalRenderer<W>, viewport: Viewport) -> Self {
        Self {
            renderer,
            view: GameView::default(),
            fb: FrameBuffer::new(viewport.width, viewport.height),
            viewport: Some(viewport),
        }
    }

    pub fn renderer(&self) -> &TerminalRenderer<W> {
        &self.renderer
    }

    fn viewport(&self) -> Viewport {
        self.viewport.unwrap_or_else(|| {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            Viewport::new(w, h)
        })
    }
}

impl<W: Write + Send> RenderSink for TerminalSink<W> {
    fn render(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        let viewport = self.viewport();
        self.view.render_into(snapshot, viewport, &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }
}
