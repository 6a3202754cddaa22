//! Piece shape catalog: tetromino cell offsets, kick tables, render colors.
//!
//! Shape data follows the Standard Rotation System (SRS); each of the 28
//! (kind, rotation) pairs maps to four fixed offsets inside a 4x4 box.
//! Reference: https://tetris.wiki/SRS

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to the piece anchor.
pub type MinoOffset = (i8, i8);

/// Four mino offsets for one (kind, rotation) pair.
pub type PieceShape = [MinoOffset; 4];

/// Shape lookup for a piece kind and rotation. Total, never fails.
pub fn shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES[kind as usize][rotation as usize]
}

/// Render color tag for a kind (consumed by the terminal view only).
pub fn color(kind: PieceKind) -> (u8, u8, u8) {
    match kind {
        PieceKind::I => (0, 240, 240),
        PieceKind::O => (240, 240, 0),
        PieceKind::T => (160, 0, 240),
        PieceKind::S => (0, 240, 0),
        PieceKind::Z => (240, 0, 0),
        PieceKind::J => (0, 0, 240),
        PieceKind::L => (240, 160, 0),
    }
}

/// Rows are indexed by `PieceKind` discriminant, columns by `Rotation`
/// (North, East, South, West).
const SHAPES: [[PieceShape; 4]; 7] = [
    // I
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // O (rotation-invariant)
    [
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
    ],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
];

/// One ordered list of (dx, dy) candidates per rotation transition.
/// The first candidate is always (0, 0).
pub type KickRow = [(i8, i8); 5];

type KickTable = [KickRow; 8];

/// Kick candidates for rotating `kind` from `from` to `to`.
///
/// Keyed by piece class (O / I / everything else) and the transition;
/// candidates must be tried strictly in order.
pub fn kick_offsets(kind: PieceKind, from: Rotation, to: Rotation) -> &'static KickRow {
    let table: &KickTable = match kind {
        PieceKind::O => &O_KICKS,
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    };
    &table[kick_index(from, to == from.cw())]
}

/// O pieces never kick.
const O_KICKS: KickTable = [[(0, 0); 5]; 8];

/// Shared by J, L, S, T, Z.
const JLSTZ_KICKS: KickTable = [
    // N->E
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // N->W
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // E->N
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // E->S
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // S->E
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // S->W
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // W->S
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // W->N
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

/// The I piece uses its own offsets.
const I_KICKS: KickTable = [
    // N->E
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // N->W
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // E->N
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // E->S
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // S->E
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // S->W
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // W->S
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // W->N
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
];

fn kick_index(from: Rotation, clockwise: bool) -> usize {
    match (from, clockwise) {
        (Rotation::North, true) => 0,
        (Rotation::North, false) => 1,
        (Rotation::East, false) => 2,
        (Rotation::East, true) => 3,
        (Rotation::South, false) => 4,
        (Rotation::South, true) => 5,
        (Rotation::West, false) => 6,
        (Rotation::West, true) => 7,
    }
}

/// Try a rotation with kicks against an arbitrary legality predicate.
///
/// Returns the new rotation and the kick offset that made it legal, or
/// `None` when every candidate fails (caller leaves the piece unchanged).
pub fn try_rotate(
    kind: PieceKind,
    rotation: Rotation,
    x: i8,
    y: i8,
    clockwise: bool,
    is_open: impl Fn(i8, i8) -> bool,
) -> Option<(Rotation, (i8, i8))> {
    let target = if clockwise {
        rotation.cw()
    } else {
        rotation.ccw()
    };
    let cells = shape(kind, target);

    for &(dx, dy) in kick_offsets(kind, rotation, target) {
        let fits = cells
            .iter()
            .all(|&(mx, my)| is_open(x + dx + mx, y + dy + my));
        if fits {
            return Some((target, (dx, dy)));
        }
    }

    None
}
