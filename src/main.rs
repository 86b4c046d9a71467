//! Terminal Tetris runner (default binary).
//!
//! Reads `TETRIS_*` overrides from the environment, then drives a session at a
//! fixed timestep with crossterm input and the framebuffer renderer. Logs go to
//! stderr via `env_logger` (`RUST_LOG`, default `warn`).

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use alpha_tetris::core::{GameConfig, GameSession};
use alpha_tetris::input::{handle_key_event, should_quit};
use alpha_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use alpha_tetris::types::TICK_MS;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = GameConfig::from_env().context("reading TETRIS_* configuration")?;
    let session = GameSession::new(config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut session: GameSession) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&session.snapshot(), Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        info!(
                            "quit in state {} with score {}",
                            session.state().as_str(),
                            session.score()
                        );
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key, session.state()) {
                        session.apply(command);
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick(TICK_MS);
        }

        if !session.take_events().is_empty() {
            dirty = true;
        }
    }
}
