//! Rotation and kick behavior against real board geometry.

use term_tetris::core::pieces::{self, shape};
use term_tetris::core::Board;
use term_tetris::types::{PieceKind, Rotation};

fn open_on(board: &Board) -> impl Fn(i8, i8) -> bool + '_ {
    |x, y| board.is_open(x, y)
}

#[test]
fn left_wall_kick_shifts_right() {
    let board = Board::new(10, 20);
    // T East hugging the left wall; the un-kicked South shape pokes out.
    let (rotation, kick) =
        pieces::try_rotate(PieceKind::T, Rotation::East, -1, 5, true, open_on(&board))
            .expect("kick should rescue the rotation");
    assert_eq!(rotation, Rotation::South);
    assert_eq!(kick, (1, 0));
}

#[test]
fn right_wall_kick_shifts_left() {
    let board = Board::new(10, 20);
    // T West at the right wall, rotating counterclockwise into South.
    let (rotation, kick) =
        pieces::try_rotate(PieceKind::T, Rotation::West, 8, 5, false, open_on(&board))
            .expect("kick should rescue the rotation");
    assert_eq!(rotation, Rotation::South);
    assert_eq!(kick, (-1, 0));
}

#[test]
fn i_piece_floor_kick_lifts_the_piece() {
    let board = Board::new(10, 20);
    // Flat I resting one row above the floor; upright needs a lift.
    let (rotation, kick) =
        pieces::try_rotate(PieceKind::I, Rotation::North, 3, 17, true, open_on(&board))
            .expect("floor kick should apply");
    assert_eq!(rotation, Rotation::East);
    assert_eq!(kick, (-2, -1));

    let cells = shape(PieceKind::I, rotation);
    assert!(cells
        .iter()
        .all(|&(mx, my)| board.is_open(3 - 2 + mx, 17 - 1 + my)));
}

#[test]
fn fully_boxed_piece_cannot_rotate() {
    let mut board = Board::new(10, 20);
    // A snug one-cell-high slot around a flat I piece.
    for x in 0..10 {
        board.set(x, 17, Some(PieceKind::J));
        board.set(x, 19, Some(PieceKind::J));
    }
    for y in 17..20 {
        board.set(1, y, Some(PieceKind::J));
        board.set(7, y, Some(PieceKind::J));
    }
    // I North at x=2 occupies (2..6, 18), inside the slot.
    assert!(shape(PieceKind::I, Rotation::North)
        .iter()
        .all(|&(mx, my)| board.is_open(2 + mx, 17 + my)));
    assert!(
        pieces::try_rotate(PieceKind::I, Rotation::North, 2, 17, true, open_on(&board)).is_none()
    );
}

#[test]
fn o_piece_rotation_never_moves() {
    let board = Board::new(10, 20);
    for clockwise in [true, false] {
        let (_, kick) =
            pieces::try_rotate(PieceKind::O, Rotation::North, 4, 4, clockwise, open_on(&board))
                .expect("O rotation always succeeds");
        assert_eq!(kick, (0, 0));
    }
}

#[test]
fn rotation_above_the_visible_top_is_allowed() {
    let board = Board::new(10, 20);
    // Anchor high enough that some target cells have y < 0.
    assert!(
        pieces::try_rotate(PieceKind::S, Rotation::North, 4, -1, true, open_on(&board)).is_some()
    );
}

#[test]
fn cw_then_ccw_restores_shape_everywhere_open() {
    let board = Board::new(10, 20);
    for kind in PieceKind::ALL {
        let (after_cw, _) =
            pieces::try_rotate(kind, Rotation::North, 3, 5, true, open_on(&board))
                .expect("open-space rotation");
        let (after_ccw, _) = pieces::try_rotate(kind, after_cw, 3, 5, false, open_on(&board))
            .expect("open-space rotation");
        assert_eq!(after_ccw, Rotation::North);
    }
}
