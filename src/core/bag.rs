//! 7-bag piece randomizer.
//!
//! Every bag holds one of each kind in a fair shuffled order; draws consume
//! the bag front-to-back and a fresh permutation is generated on exhaustion.
//! Seeded so piece sequences are reproducible in tests and on restart.

use crate::types::PieceKind;

/// Linear congruential generator (Numerical Recipes constants).
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // A zero state would generate a degenerate sequence.
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }

    /// Uniform-ish value in `[0, max)`.
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Bag randomizer over the seven piece kinds.
#[derive(Debug, Clone)]
pub struct SevenBag {
    pieces: [PieceKind; 7],
    next: usize,
    rng: SimpleRng,
}

impl SevenBag {
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            pieces: PieceKind::ALL,
            next: 0,
            rng: SimpleRng::new(seed),
        };
        bag.refill();
        bag
    }

    fn refill(&mut self) {
        self.pieces = PieceKind::ALL;
        self.rng.shuffle(&mut self.pieces);
        self.next = 0;
    }

    /// Remove and return the front of the bag, refilling first if empty.
    pub fn draw(&mut self) -> PieceKind {
        if self.next >= self.pieces.len() {
            self.refill();
        }
        let piece = self.pieces[self.next];
        self.next += 1;
        piece
    }

    /// Current RNG state, usable as a seed to continue the sequence.
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for SevenBag {
    fn default() -> Self {
        Self::new(1)
    }
}
