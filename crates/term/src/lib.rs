//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. Snapshots are
//! drawn into a framebuffer by [`GameView`] and flushed by
//! [`TerminalRenderer`], which only rewrites glyphs that changed.
//!
//! Stage cells are drawn 2 columns wide to compensate for the usual terminal
//! glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, leave_terminal, TerminalRenderer};
