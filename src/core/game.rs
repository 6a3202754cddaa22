//! Game session: ties board, pieces, supply, and scoring together.
//!
//! The session is turn-driven by the surrounding loop: discrete input
//! intents plus a gravity tick. Every operation runs to completion; the
//! loop applies intents before the gravity step so the lock decision sees
//! the latest input.

use crate::core::config::GameConfig;
use crate::core::pieces::{self, PieceShape};
use crate::core::scoring;
use crate::core::supply::PieceSupply;
use crate::core::Board;
use crate::types::{GameAction, PieceKind, Rotation};

/// The currently falling piece: kind, orientation, and anchor position.
///
/// `y` may be negative while the piece is still entering from above the
/// visible area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// A fresh piece at the spawn anchor (top center, North).
    pub fn spawn(kind: PieceKind, board_width: u8) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: (board_width / 2) as i8 - 2,
            y: 0,
        }
    }

    pub fn shape(&self) -> PieceShape {
        pieces::shape(self.kind, self.rotation)
    }

    /// Absolute board coordinates of the four minos.
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Whether every mino sits on an open cell (or a spawn row).
    pub fn fits(&self, board: &Board) -> bool {
        self.cells().iter().all(|&(x, y)| board.is_open(x, y))
    }
}

/// Complete game state for one run.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    supply: PieceSupply,
    active: Option<ActivePiece>,
    score: u32,
    level: u32,
    lines: u32,
    gravity_timer_ms: u32,
    started: bool,
    paused: bool,
    game_over: bool,
}

impl GameSession {
    pub fn new(config: GameConfig, seed: u32) -> Self {
        let board = Board::new(config.width, config.height);
        let supply = PieceSupply::new(seed, config.lookahead);
        Self {
            config,
            board,
            supply,
            active: None,
            score: 0,
            level: 1,
            lines: 0,
            gravity_timer_ms: 0,
            started: false,
            paused: false,
            game_over: false,
        }
    }

    /// Spawn the first piece. Idempotent.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_next();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scenario setup in tests and tooling.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.supply.held()
    }

    pub fn can_hold(&self) -> bool {
        self.supply.can_hold()
    }

    /// Upcoming pieces, front first.
    pub fn preview(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.supply.preview()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Gravity interval for the current level.
    pub fn gravity_interval_ms(&self) -> u32 {
        self.config.gravity_interval_ms(self.level)
    }

    /// Apply one discrete input intent.
    ///
    /// Returns false for rejected actions; the state is unchanged in that
    /// case. After game over only Restart is accepted; while paused only
    /// Pause and Restart are.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.game_over && action != GameAction::Restart {
            return false;
        }
        if self.paused && !matches!(action, GameAction::Pause | GameAction::Restart) {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.try_rotate(true),
            GameAction::RotateCcw => self.try_rotate(false),
            GameAction::Hold => self.hold(),
            GameAction::Pause => {
                if !self.started {
                    return false;
                }
                self.paused = !self.paused;
                true
            }
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Advance timers by `elapsed_ms`; on each due gravity step the active
    /// piece moves down one row or locks in place.
    ///
    /// Returns true when the piece moved or locked.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.started || self.paused || self.game_over || self.active.is_none() {
            return false;
        }

        self.gravity_timer_ms += elapsed_ms;
        let interval = self.gravity_interval_ms();
        let mut advanced = false;

        while self.gravity_timer_ms >= interval {
            self.gravity_timer_ms -= interval;
            if self.try_move(0, 1) {
                advanced = true;
            } else {
                self.lock_piece();
                advanced = true;
                break;
            }
        }

        advanced
    }

    /// Translate the active piece by (dx, dy) if the target cells are open.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(piece) = self.active else {
            return false;
        };

        let candidate = ActivePiece {
            x: piece.x + dx,
            y: piece.y + dy,
            ..piece
        };
        if candidate.fits(&self.board) {
            self.active = Some(candidate);
            true
        } else {
            false
        }
    }

    /// Rotate the active piece, trying kick offsets in table order.
    pub fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(piece) = self.active else {
            return false;
        };

        let result = pieces::try_rotate(
            piece.kind,
            piece.rotation,
            piece.x,
            piece.y,
            clockwise,
            |x, y| self.board.is_open(x, y),
        );

        match result {
            Some((rotation, (dx, dy))) => {
                self.active = Some(ActivePiece {
                    rotation,
                    x: piece.x + dx,
                    y: piece.y + dy,
                    ..piece
                });
                true
            }
            None => false,
        }
    }

    /// One soft-drop step; scores per cell of travel.
    pub fn soft_drop(&mut self) -> bool {
        if self.try_move(0, 1) {
            self.score += scoring::drop_score(1, self.config.soft_drop_per_cell);
            true
        } else {
            false
        }
    }

    /// Drop to the floor and lock immediately; scores per cell of travel.
    pub fn hard_drop(&mut self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };

        let distance = self.drop_distance();
        if distance > 0 {
            self.active = Some(ActivePiece {
                y: piece.y + distance as i8,
                ..piece
            });
        }
        self.score += scoring::drop_score(distance, self.config.hard_drop_per_cell);
        self.lock_piece();
        true
    }

    /// Exchange the active piece with the hold slot (once per lifetime).
    pub fn hold(&mut self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let Some(incoming) = self.supply.hold(piece.kind) else {
            return false;
        };

        let replacement = ActivePiece::spawn(incoming, self.config.width);
        if replacement.fits(&self.board) {
            self.active = Some(replacement);
        } else {
            // The swapped-in piece cannot enter the board.
            self.active = None;
            self.game_over = true;
        }
        true
    }

    /// Rows the active piece can still fall via vertical translation.
    fn drop_distance(&self) -> u32 {
        let Some(piece) = self.active else {
            return 0;
        };

        let cells = piece.cells();
        let mut distance: u32 = 0;
        while cells
            .iter()
            .all(|&(x, y)| self.board.is_open(x, y + distance as i8 + 1))
        {
            distance += 1;
        }
        distance
    }

    /// Anchor row the active piece would rest on after a hard drop.
    pub fn ghost_row(&self) -> Option<i8> {
        let piece = self.active?;
        Some(piece.y + self.drop_distance() as i8)
    }

    /// Absolute cells of the ghost piece.
    pub fn ghost_cells(&self) -> Option<[(i8, i8); 4]> {
        let piece = self.active?;
        let distance = self.drop_distance() as i8;
        Some(piece.cells().map(|(x, y)| (x, y + distance)))
    }

    /// Integrate the active piece into the board, clear rows, score, and
    /// spawn the next piece. Locking above the visible top or a blocked
    /// spawn ends the game.
    fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        if !self.board.place(&piece.cells(), piece.kind) {
            self.game_over = true;
        }

        let cleared = self.board.clear_full_rows();
        if cleared > 0 {
            self.score += scoring::line_clear_score(&self.config.line_scores, cleared, self.level);
            self.lines += cleared;
            self.level = scoring::level_for_lines(self.lines, self.config.lines_per_level);
        }

        self.supply.reset_hold();
        self.gravity_timer_ms = 0;

        if !self.game_over {
            self.spawn_next();
        }
    }

    fn spawn_next(&mut self) -> bool {
        let kind = self.supply.next_piece();
        let piece = ActivePiece::spawn(kind, self.config.width);
        if piece.fits(&self.board) {
            self.active = Some(piece);
            true
        } else {
            self.game_over = true;
            false
        }
    }

    /// Fresh session continuing the current RNG sequence.
    fn restart(&mut self) {
        let seed = self.supply.rng_state();
        *self = Self::new(self.config.clone(), seed);
        self.start();
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameConfig::default(), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(seed: u32) -> GameSession {
        let mut session = GameSession::new(GameConfig::default(), seed);
        session.start();
        session
    }

    #[test]
    fn new_session_is_idle() {
        let session = GameSession::new(GameConfig::default(), 12345);
        assert!(!session.started());
        assert!(!session.game_over());
        assert_eq!(session.score(), 0);
        assert_eq!(session.level(), 1);
        assert_eq!(session.lines(), 0);
        assert!(session.active().is_none());
        assert_eq!(session.preview().count(), 5);
    }

    #[test]
    fn start_spawns_at_top_center() {
        let session = started(12345);
        let piece = session.active().unwrap();
        assert_eq!(piece.x, 3);
        assert_eq!(piece.y, 0);
        assert_eq!(piece.rotation, Rotation::North);
    }

    #[test]
    fn active_piece_comes_from_the_preview_front() {
        let mut session = started(12345);
        let upcoming = session.preview().next().unwrap();
        session.apply_action(GameAction::HardDrop);
        if !session.game_over() {
            assert_eq!(session.active().unwrap().kind, upcoming);
        }
    }

    #[test]
    fn move_left_right_round_trips() {
        let mut session = started(12345);
        let x0 = session.active().unwrap().x;
        assert!(session.apply_action(GameAction::MoveRight));
        assert_eq!(session.active().unwrap().x, x0 + 1);
        assert!(session.apply_action(GameAction::MoveLeft));
        assert_eq!(session.active().unwrap().x, x0);
    }

    #[test]
    fn moving_up_is_rejected() {
        let mut session = started(12345);
        assert!(!session.try_move(0, -1));
    }

    #[test]
    fn wall_stops_horizontal_movement() {
        let mut session = started(12345);
        let mut moved = 0;
        for _ in 0..20 {
            if session.try_move(-1, 0) {
                moved += 1;
            }
        }
        assert!(moved < 20);
        assert!(session.active().unwrap().fits(session.board()));
    }

    #[test]
    fn rotation_round_trips_in_open_space() {
        let mut session = started(12345);
        let before = session.active().unwrap().rotation;
        assert!(session.try_rotate(true));
        assert_eq!(session.active().unwrap().rotation, before.cw());
        assert!(session.try_rotate(false));
        assert_eq!(session.active().unwrap().rotation, before);
    }

    #[test]
    fn soft_drop_scores_one_per_cell() {
        let mut session = started(12345);
        let score = session.score();
        assert!(session.apply_action(GameAction::SoftDrop));
        assert_eq!(session.score(), score + 1);
        assert_eq!(session.active().unwrap().y, 1);
    }

    #[test]
    fn hard_drop_scores_travel_and_locks() {
        let mut session = started(12345);
        let expected_travel = session.ghost_row().unwrap() - session.active().unwrap().y;
        let score = session.score();

        assert!(session.apply_action(GameAction::HardDrop));
        assert_eq!(session.score(), score + 2 * expected_travel as u32);
        // The dropped piece is locked; a new one is active.
        assert!(session.active().is_some());
        assert!(session
            .board()
            .cells()
            .iter()
            .filter(|c| c.is_some())
            .count()
            >= 4);
    }

    #[test]
    fn ghost_rests_on_the_floor_of_an_empty_board() {
        let session = started(12345);
        let cells = session.ghost_cells().unwrap();
        let bottom = cells.iter().map(|&(_, y)| y).max().unwrap();
        assert_eq!(bottom, session.board().height() as i8 - 1);
    }

    #[test]
    fn ghost_rests_on_stack_contents() {
        let mut session = started(12345);
        // A full floor row one above the bottom.
        for x in 0..10 {
            session.board_mut().set(x, 19, Some(PieceKind::J));
        }
        let cells = session.ghost_cells().unwrap();
        let bottom = cells.iter().map(|&(_, y)| y).max().unwrap();
        assert_eq!(bottom, 18);
        assert!(cells
            .iter()
            .all(|&(x, y)| !session.board().is_occupied(x, y)));
    }

    #[test]
    fn line_clear_updates_score_lines_level() {
        let mut session = started(12345);
        // Pre-fill the bottom row; the next lock sweeps it.
        for x in 0..10 {
            session.board_mut().set(x, 19, Some(PieceKind::L));
        }
        let travel = session.ghost_row().unwrap() - session.active().unwrap().y;
        session.apply_action(GameAction::HardDrop);

        assert_eq!(session.lines(), 1);
        assert_eq!(session.level(), 1);
        assert_eq!(session.score(), 100 + 2 * travel as u32);
    }

    #[test]
    fn level_steps_every_ten_lines() {
        let mut session = started(12345);
        for total in [9, 10, 25] {
            session.lines = total;
            session.level = scoring::level_for_lines(total, 10);
        }
        assert_eq!(session.level(), 3);
    }

    #[test]
    fn hold_once_per_lifetime() {
        let mut session = started(12345);
        let first = session.active().unwrap().kind;
        let upcoming = session.preview().next().unwrap();

        assert!(session.apply_action(GameAction::Hold));
        assert_eq!(session.held(), Some(first));
        assert_eq!(session.active().unwrap().kind, upcoming);
        assert!(!session.can_hold());

        // Second hold in the same lifetime is a no-op.
        let active = session.active();
        assert!(!session.apply_action(GameAction::Hold));
        assert_eq!(session.active(), active);
        assert_eq!(session.held(), Some(first));
    }

    #[test]
    fn lock_re_permits_hold() {
        let mut session = started(12345);
        session.apply_action(GameAction::Hold);
        assert!(!session.can_hold());
        session.apply_action(GameAction::HardDrop);
        if !session.game_over() {
            assert!(session.can_hold());
        }
    }

    #[test]
    fn occupied_hold_swaps_kinds() {
        let mut session = started(12345);
        let first = session.active().unwrap().kind;
        session.apply_action(GameAction::Hold);
        session.apply_action(GameAction::HardDrop);
        if session.game_over() {
            return;
        }

        let second = session.active().unwrap().kind;
        assert!(session.apply_action(GameAction::Hold));
        assert_eq!(session.active().unwrap().kind, first);
        assert_eq!(session.held(), Some(second));
    }

    #[test]
    fn gravity_tick_moves_piece_down() {
        let mut session = started(12345);
        let y0 = session.active().unwrap().y;
        let interval = session.gravity_interval_ms();
        assert!(session.tick(interval));
        assert_eq!(session.active().unwrap().y, y0 + 1);
    }

    #[test]
    fn short_tick_accumulates() {
        let mut session = started(12345);
        let y0 = session.active().unwrap().y;
        assert!(!session.tick(16));
        assert_eq!(session.active().unwrap().y, y0);
    }

    #[test]
    fn grounded_gravity_step_locks() {
        let mut session = started(12345);
        while session.try_move(0, 1) {}
        let interval = session.gravity_interval_ms();
        assert!(session.tick(interval));
        // Locked and respawned (or topped out).
        assert!(session.game_over() || session.active().unwrap().y == 0);
        assert!(session.board().cells().iter().any(|c| c.is_some()));
    }

    #[test]
    fn blocked_spawn_ends_the_game() {
        let mut session = started(12345);
        for x in 2..8 {
            for y in 0..3 {
                session.board_mut().set(x, y, Some(PieceKind::Z));
            }
        }
        session.apply_action(GameAction::HardDrop);
        assert!(session.game_over());
    }

    #[test]
    fn game_over_freezes_everything() {
        let mut session = started(12345);
        for x in 2..8 {
            for y in 0..3 {
                session.board_mut().set(x, y, Some(PieceKind::Z));
            }
        }
        session.apply_action(GameAction::HardDrop);
        assert!(session.game_over());

        let board = session.board().clone();
        let score = session.score();
        let lines = session.lines();

        assert!(!session.apply_action(GameAction::MoveLeft));
        assert!(!session.apply_action(GameAction::HardDrop));
        assert!(!session.apply_action(GameAction::Hold));
        assert!(!session.tick(10_000));

        assert_eq!(session.board(), &board);
        assert_eq!(session.score(), score);
        assert_eq!(session.lines(), lines);
    }

    #[test]
    fn pause_blocks_gravity_and_moves() {
        let mut session = started(12345);
        let piece = session.active().unwrap();
        assert!(session.apply_action(GameAction::Pause));
        assert!(session.paused());
        assert!(!session.tick(10_000));
        assert!(!session.apply_action(GameAction::MoveLeft));
        assert_eq!(session.active(), Some(piece));
        assert!(session.apply_action(GameAction::Pause));
        assert!(!session.paused());
    }

    #[test]
    fn restart_resets_state() {
        let mut session = started(12345);
        session.apply_action(GameAction::SoftDrop);
        session.apply_action(GameAction::HardDrop);

        assert!(session.apply_action(GameAction::Restart));
        assert!(session.started());
        assert!(!session.game_over());
        assert_eq!(session.score(), 0);
        assert_eq!(session.lines(), 0);
        assert_eq!(session.level(), 1);
        assert!(session.active().is_some());
        assert!(session.board().cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn restart_is_accepted_after_game_over() {
        let mut session = started(12345);
        for x in 2..8 {
            for y in 0..3 {
                session.board_mut().set(x, y, Some(PieceKind::Z));
            }
        }
        session.apply_action(GameAction::HardDrop);
        assert!(session.game_over());
        assert!(session.apply_action(GameAction::Restart));
        assert!(!session.game_over());
    }

    #[test]
    fn narrow_board_config_is_respected() {
        let config = GameConfig {
            width: 6,
            height: 12,
            ..GameConfig::default()
        };
        let mut session = GameSession::new(config, 7);
        session.start();
        let piece = session.active().unwrap();
        assert_eq!(piece.x, 1);
        assert!(piece.fits(session.board()));
        let cells = session.ghost_cells().unwrap();
        assert!(cells.iter().all(|&(x, y)| x >= 0 && x < 6 && y < 12));
    }
}
