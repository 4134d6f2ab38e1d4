//! Terminal tile-blast runner (default binary).
//!
//! Mouse clicks and the keyboard cursor both clear groups. Settings come from
//! `BLAST_*` environment variables (see `GameConfig::from_env`); `BLAST_SEED`
//! fixes the RNG seed and `BLAST_LOG_PATH` enables the JSONL journal.

use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tile_blast::core::{BoardController, ClickOutcome, GameConfig};
use tile_blast::input::{handle_event, should_quit, InputAction};
use tile_blast::journal::Journal;
use tile_blast::term::{FrameBuffer, GameView, StatusView, TerminalRenderer, Viewport};
use tile_blast::types::Coord;

type Game = BoardController<Option<Journal<BufWriter<File>>>>;

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    let mut game = BoardController::with_observer(seed_from_env(), open_journal());
    game.new_game(config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn seed_from_env() -> u32 {
    env::var("BLAST_SEED")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u32)
                .unwrap_or(1)
        })
}

fn open_journal() -> Option<Journal<BufWriter<File>>> {
    let path = env::var("BLAST_LOG_PATH")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())?;

    match Journal::open(&path) {
        Ok(journal) => {
            eprintln!("[Journal] Writing to {}", path);
            Some(journal)
        }
        Err(e) => {
            eprintln!("[Journal] Disabled: {:#}", e);
            None
        }
    }
}

fn run(term: &mut TerminalRenderer, game: &mut Game) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut cursor = Coord::new(0, 0);
    let mut last_cleared = 0u32;
    let mut message: Option<String> = None;

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let snap = game.current_state();
        let status = StatusView {
            moves: game.moves(),
            shuffles: game.shuffles(),
            last_cleared,
            cursor: Some(cursor),
            message: message.as_deref(),
        };
        view.render_into(&snap, &status, viewport, &mut fb);
        term.draw(&fb)?;

        // Nothing changes between events, so block until the next one.
        let ev = event::read()?;
        match &ev {
            Event::Resize(..) => {
                term.invalidate();
                continue;
            }
            Event::Key(key) if key.kind == KeyEventKind::Press && should_quit(*key) => {
                return Ok(());
            }
            _ => {}
        }

        let target = match handle_event(&ev) {
            Some(InputAction::Press { x, y }) => view.hit_test(&snap, viewport, x, y),
            Some(InputAction::MoveCursor { dx, dy }) => {
                cursor = step_cursor(cursor, dx, dy, snap.width, snap.height);
                None
            }
            Some(InputAction::Select) => Some(cursor),
            Some(InputAction::Restart) => {
                match game.restart() {
                    Ok(_) => {
                        last_cleared = 0;
                        message = None;
                    }
                    Err(e) => message = Some(e.to_string()),
                }
                None
            }
            None => None,
        };

        if let Some(coord) = target {
            cursor = coord;
            match game.click(coord.column, coord.row) {
                Ok(ClickOutcome::Resolved(result)) => {
                    last_cleared = result.removed.len() as u32;
                    message = result
                        .reshuffled()
                        .then(|| "No moves left: board reshuffled".to_string());
                }
                Ok(ClickOutcome::NoOp) => {
                    message = Some("Single tiles cannot be cleared".to_string());
                }
                Err(e) => message = Some(e.to_string()),
            }
        }
    }
}

/// Move the cursor, clamped to the board.
fn step_cursor(cursor: Coord, dx: i8, dy: i8, width: u16, height: u16) -> Coord {
    let clamp = |v: u16, d: i8, len: u16| -> u16 {
        let max = len.saturating_sub(1) as i32;
        (v as i32 + d as i32).clamp(0, max) as u16
    };
    Coord::new(
        clamp(cursor.column, dx, width),
        clamp(cursor.row, dy, height),
    )
}
