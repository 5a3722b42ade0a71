//! Terminal runner (default binary).
//!
//! Reads settings and flags, loads the map, then drives the controller from a
//! fixed-interval loop: render, poll input until the next tick, tick.
//! Exits with 0 on quit, 2 on game over and 1 on error.

use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use log::info;

use fieldtris::cli::Cli;
use fieldtris::core::{Controller, EngineContext, RunState, Snapshot, UniformPieces};
use fieldtris::input::handle_key_event;
use fieldtris::logging;
use fieldtris::settings::Settings;
use fieldtris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> ExitCode {
    match try_main() {
        Ok(RunState::GameOver) => ExitCode::from(2),
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("fieldtris: {:#}", err);
            ExitCode::from(1)
        }
    }
}

fn try_main() -> Result<RunState> {
    let settings = Cli::parse().settings()?;
    logging::init(&settings)?;

    let map = settings.load_map()?;
    let seed = settings.seed_or_clock();
    info!("seed {}, board {}x{}", seed, map.width, map.height);

    let ctx = EngineContext::new(UniformPieces::new(seed));
    let mut game = Controller::new(&map, settings.controller_config(), ctx)
        .context("build controller")?;
    game.start();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game, &settings);

    // Always try to restore terminal state.
    let _ = term.exit();
    let state = result?;
    info!("finished: {:?}", state);
    Ok(state)
}

fn run(term: &mut TerminalRenderer, game: &mut Controller, settings: &Settings) -> Result<RunState> {
    let view = GameView::default();
    let mut snap = Snapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_ms = settings.tick_ms.max(1);
    let tick_duration = Duration::from_millis(tick_ms as u64);
    let mut last_tick = Instant::now();
    let mut state = RunState::Running;

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if state != RunState::Running {
            if state == RunState::GameOver {
                // Leave the final board up until a key is pressed.
                wait_for_key()?;
            }
            return Ok(state);
        }

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(action) = handle_key_event(key) {
                        game.apply_action(action);
                        state = game.run_state();
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if state == RunState::Running && last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            state = game.tick(tick_ms);
        }

        game.drain_events();
    }
}

fn wait_for_key() -> Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != crossterm::event::KeyEventKind::Release {
                return Ok(());
            }
        }
    }
}
