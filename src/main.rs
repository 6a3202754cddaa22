//! Terminal game runner.
//!
//! Fixed-rate loop: draw the frame, poll input until the next tick,
//! apply intents, then run the gravity tick. Input is applied before
//! physics so the lock decision sees the latest move.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use term_tetris::core::{GameConfig, GameSession};
use term_tetris::input::{action_for_key, should_quit, KeyRepeat};
use term_tetris::term::{GameView, TermScreen, Viewport};
use term_tetris::types::{GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS, TICK_MS};

#[derive(Debug, Parser)]
#[command(name = "term-tetris", version, about = "Falling-block puzzle for the terminal")]
struct Args {
    /// RNG seed; the current time is used when omitted.
    #[arg(long)]
    seed: Option<u32>,

    /// Board width in cells.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(4..=32))]
    width: u8,

    /// Board height in cells.
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u8).range(4..=64))]
    height: u8,

    /// Next-queue preview length.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(0..=7))]
    preview: u8,

    /// Delayed auto-shift in milliseconds.
    #[arg(long, default_value_t = DEFAULT_DAS_MS)]
    das: u32,

    /// Auto-repeat rate in milliseconds.
    #[arg(long, default_value_t = DEFAULT_ARR_MS)]
    arr: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let seed = match args.seed {
        Some(seed) => seed,
        None => std::time::UNIX_EPOCH
            .elapsed()
            .map(|d| d.as_millis() as u32)
            .unwrap_or(1),
    };
    let config = GameConfig {
        width: args.width,
        height: args.height,
        lookahead: args.preview as usize,
        ..GameConfig::default()
    };

    let mut screen = TermScreen::new();
    screen.enter()?;

    let result = run(&mut screen, config, seed, args.das, args.arr);

    // Always restore the terminal, even on error.
    let _ = screen.exit();
    result
}

fn run(screen: &mut TermScreen, config: GameConfig, seed: u32, das: u32, arr: u32) -> Result<()> {
    let mut session = GameSession::new(config, seed);
    session.start();

    let view = GameView::default();
    let mut repeat = KeyRepeat::new(das, arr);

    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut last_size = (0u16, 0u16);

    loop {
        let size = crossterm::terminal::size().unwrap_or((80, 24));
        if size != last_size {
            screen.invalidate();
            last_size = size;
        }
        let frame = view.render(&session, Viewport::new(size.0, size.1));
        screen.present(frame)?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if let Some(intent) = action_for_key(key) {
                            // Movement goes through DAS/ARR so a held key
                            // emits exactly once here.
                            if let Some(action) = repeat.press(intent) {
                                session.apply_action(action);
                                if action == GameAction::Restart {
                                    repeat.reset();
                                }
                            }
                        }
                    }
                    KeyEventKind::Release => repeat.release(key.code),
                    // Terminal auto-repeat is ignored; DAS/ARR owns repeats.
                    KeyEventKind::Repeat => {}
                }
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            for action in repeat.update(TICK_MS) {
                session.apply_action(action);
            }
            session.tick(TICK_MS);
        }
    }
}
