//! Piece supply: next-queue lookahead and the hold slot.
//!
//! The queue is FIFO with a fixed lookahead; every consumption pulls a
//! replacement from the bag so the preview length never changes. Hold is
//! limited to once per piece lifetime via a latch the session releases at
//! lock.

use std::collections::VecDeque;

use crate::core::bag::SevenBag;
use crate::types::PieceKind;

#[derive(Debug, Clone)]
pub struct PieceSupply {
    queue: VecDeque<PieceKind>,
    bag: SevenBag,
    hold: Option<PieceKind>,
    hold_used: bool,
}

impl PieceSupply {
    pub fn new(seed: u32, lookahead: usize) -> Self {
        let mut bag = SevenBag::new(seed);
        let queue = (0..lookahead).map(|_| bag.draw()).collect();
        Self {
            queue,
            bag,
            hold: None,
            hold_used: false,
        }
    }

    /// Non-consuming view of the upcoming pieces, front first.
    pub fn preview(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.iter().copied()
    }

    /// Pop the queue front and top the queue back up from the bag.
    ///
    /// A zero-lookahead supply degenerates to drawing straight from the bag.
    pub fn next_piece(&mut self) -> PieceKind {
        match self.queue.pop_front() {
            Some(piece) => {
                self.queue.push_back(self.bag.draw());
                piece
            }
            None => self.bag.draw(),
        }
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        !self.hold_used
    }

    /// Exchange the active kind with the hold slot.
    ///
    /// Returns the kind to play next: the previously held piece, or a fresh
    /// queue draw when the slot was empty. `None` means hold was already
    /// used this piece lifetime (a rejected action, not an error).
    pub fn hold(&mut self, current: PieceKind) -> Option<PieceKind> {
        if self.hold_used {
            return None;
        }
        self.hold_used = true;
        match self.hold.replace(current) {
            Some(previous) => Some(previous),
            None => Some(self.next_piece()),
        }
    }

    /// Re-permit hold; called by the session when a piece locks.
    pub fn reset_hold(&mut self) {
        self.hold_used = false;
    }

    /// Current RNG state (used to reseed on restart).
    pub fn rng_state(&self) -> u32 {
        self.bag.rng_state()
    }
}
