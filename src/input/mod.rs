//! Keyboard input: bindings plus DAS/ARR repeat handling.

pub mod keys;
pub mod repeat;

pub use keys::{action_for_key, should_quit};
pub use repeat::KeyRepeat;
