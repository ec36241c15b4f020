//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof and hosts the glue that
//! needs more than one of them, such as [`TerminalSink`].

pub mod logging;
pub mod terminal_sink;

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use logging::logger_builder;
pub use terminal_sink::TerminalSink;
