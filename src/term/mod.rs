//! Terminal rendering: framebuffer, screen, and the game view.

pub mod fb;
pub mod game_view;
pub mod screen;

pub use fb::{CellStyle, FrameBuffer, Rgb, TermCell};
pub use game_view::{GameView, Viewport};
pub use screen::TermScreen;
