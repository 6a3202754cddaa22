//! Game logic, independent of terminal and input handling.

pub mod bag;
pub mod board;
pub mod config;
pub mod game;
pub mod pieces;
pub mod scoring;
pub mod supply;

pub use bag::SevenBag;
pub use board::Board;
pub use config::GameConfig;
pub use game::{ActivePiece, GameSession};
pub use supply::PieceSupply;
