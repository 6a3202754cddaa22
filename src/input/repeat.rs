//! DAS/ARR key repeat for movement keys.
//!
//! Terminals rarely emit key-release events, so a hold is inferred from
//! repeated presses and dropped after a short timeout with no press.
//! Each repeatable action runs its own delayed-auto-shift channel: one
//! action on press, nothing during the DAS delay, then one per ARR
//! interval.

use std::time::Instant;

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::types::{GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS};

/// Upper bound on repeats emitted per update; more than this in one
/// frame means the frame stalled and the rest can be dropped.
pub const MAX_REPEATS: usize = 16;

// A single tap must not linger as a hold when no release arrives.
const RELEASE_TIMEOUT_MS: u32 = 150;

// Soft drop repeats immediately and fast.
const SOFT_DROP_DAS_MS: u32 = 0;

#[derive(Debug, Clone)]
struct Channel {
    action: GameAction,
    das_ms: u32,
    arr_ms: u32,
    held: bool,
    das_timer: u32,
    arr_acc: u32,
}

impl Channel {
    fn new(action: GameAction, das_ms: u32, arr_ms: u32) -> Self {
        Self {
            action,
            das_ms,
            arr_ms,
            held: false,
            das_timer: 0,
            arr_acc: 0,
        }
    }

    /// Returns true when this press starts a new hold.
    fn press(&mut self) -> bool {
        if self.held {
            return false;
        }
        self.held = true;
        self.das_timer = 0;
        self.arr_acc = 0;
        true
    }

    fn release(&mut self) {
        self.held = false;
        self.das_timer = 0;
        self.arr_acc = 0;
    }

    fn step(&mut self, elapsed_ms: u32, out: &mut ArrayVec<GameAction, MAX_REPEATS>) {
        if !self.held {
            return;
        }

        let before = self.das_timer;
        self.das_timer = self.das_timer.saturating_add(elapsed_ms);
        if self.das_timer < self.das_ms {
            return;
        }

        // Only time past the DAS threshold counts toward ARR.
        self.arr_acc += if before < self.das_ms {
            self.das_timer - self.das_ms
        } else {
            elapsed_ms
        };
        while self.arr_acc >= self.arr_ms {
            self.arr_acc -= self.arr_ms;
            if out.try_push(self.action).is_err() {
                self.arr_acc = 0;
                return;
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct KeyRepeat {
    left: Channel,
    right: Channel,
    down: Channel,
    last_press: Instant,
    release_timeout_ms: u32,
}

impl KeyRepeat {
    pub fn new(das_ms: u32, arr_ms: u32) -> Self {
        Self {
            left: Channel::new(GameAction::MoveLeft, das_ms, arr_ms.max(1)),
            right: Channel::new(GameAction::MoveRight, das_ms, arr_ms.max(1)),
            down: Channel::new(GameAction::SoftDrop, SOFT_DROP_DAS_MS, arr_ms.max(1)),
            last_press: Instant::now(),
            release_timeout_ms: RELEASE_TIMEOUT_MS,
        }
    }

    #[cfg(test)]
    fn with_release_timeout(mut self, timeout_ms: u32) -> Self {
        self.release_timeout_ms = timeout_ms;
        self
    }

    /// Feed a press of a repeatable action.
    ///
    /// Returns the action once on the initial press; repeats of a hold
    /// come from [`update`](Self::update). Non-repeatable actions pass
    /// through unchanged.
    pub fn press(&mut self, action: GameAction) -> Option<GameAction> {
        let channel = match action {
            GameAction::MoveLeft => {
                self.right.release();
                &mut self.left
            }
            GameAction::MoveRight => {
                self.left.release();
                &mut self.right
            }
            GameAction::SoftDrop => &mut self.down,
            other => return Some(other),
        };

        self.last_press = Instant::now();
        if channel.press() {
            Some(action)
        } else {
            None
        }
    }

    /// Feed an explicit key release, for terminals that report them.
    pub fn release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => self.left.release(),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => self.right.release(),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => self.down.release(),
            _ => {}
        }
    }

    /// Advance hold timers and collect due repeats.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, MAX_REPEATS> {
        let mut actions = ArrayVec::new();

        if self.last_press.elapsed().as_millis() as u32 > self.release_timeout_ms {
            self.reset();
            return actions;
        }

        self.left.step(elapsed_ms, &mut actions);
        self.right.step(elapsed_ms, &mut actions);
        self.down.step(elapsed_ms, &mut actions);
        actions
    }

    /// Drop all held state, e.g. on restart or focus loss.
    pub fn reset(&mut self) {
        self.left.release();
        self.right.release();
        self.down.release();
    }
}

impl Default for KeyRepeat {
    fn default() -> Self {
        Self::new(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }
}
