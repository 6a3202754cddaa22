//! Falling-block puzzle engine with a terminal front end.
//!
//! The `core` module holds the complete game state machine and has no
//! terminal dependency; `term` renders sessions to a cell framebuffer
//! and `input` maps key events to game actions.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
