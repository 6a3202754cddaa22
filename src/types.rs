//! Core types shared across the application.
//!
//! Pure data types with no external dependencies.

/// Default board dimensions.
pub const DEFAULT_BOARD_WIDTH: u8 = 10;
pub const DEFAULT_BOARD_HEIGHT: u8 = 20;

/// Fixed-rate loop tick (milliseconds).
pub const TICK_MS: u32 = 16;

/// DAS/ARR timing defaults (milliseconds).
pub const DEFAULT_DAS_MS: u32 = 150;
pub const DEFAULT_ARR_MS: u32 = 50;

/// Tetromino piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All seven kinds, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Single-letter label used by the side panel.
    pub fn letter(self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// Rotation states (North = spawn orientation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub fn cw(self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    pub fn ccw(self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }
}

/// Discrete input intents the engine accepts.
///
/// Raw key-repeat debouncing is the input layer's job; each value here is a
/// single already-debounced intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    Hold,
    Pause,
    Restart,
}

/// A board cell: empty, or filled with the kind that locked there.
pub type Cell = Option<PieceKind>;
