//! Terminal runner (default binary).
//!
//! Reads `BLOCKFALL_*` configuration, shows the title screen, then drives the
//! engine at a fixed tick: key events go through the auto-shift input handler,
//! the collected intents are handed to `Engine::step`, and the returned
//! snapshot is drawn with the framebuffer renderer.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use blockfall::config::{Config, ENV_LOG};
use blockfall::core::Engine;
use blockfall::input::{handle_key_event, InputHandler};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::Intent;

fn main() -> Result<()> {
    let config = Config::from_env().context("read configuration")?;
    init_logging(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Restore the terminal even when the game loop failed.
    let restored = term.exit();
    result.and(restored)
}

fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(ENV_LOG, config.log_filter.as_str()),
    )
    .target(env_logger::Target::Pipe(Box::new(file)))
    .try_init()
    .context("install logger")
}

fn viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}

/// Block on the title screen until a key is pressed.
///
/// Any key starts the game except the quit bindings, which return false.
fn title_screen(
    term: &mut TerminalRenderer,
    view: &GameView,
    fb: &mut FrameBuffer,
) -> Result<bool> {
    loop {
        view.render_title_into(viewport(), fb);
        term.draw_swap(fb)?;

        match event::read().context("read terminal event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                return Ok(handle_key_event(key) != Some(Intent::Quit));
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}

fn run(term: &mut TerminalRenderer, config: &Config) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    if !title_screen(term, &view, &mut fb)? {
        return Ok(());
    }

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut engine = Engine::new(rng);
    let mut input = InputHandler::with_config(config.das_ms, config.arr_ms)
        .with_release_events(term.reports_key_releases());
    info!(
        "game started (seed: {:?}, das {}ms, arr {}ms, key releases: {})",
        config.seed,
        config.das_ms,
        config.arr_ms,
        input.release_events()
    );

    let tick = Duration::from_millis(config.tick_ms as u64);
    let mut pending: Vec<Intent> = Vec::with_capacity(32);
    let mut last_tick = Instant::now();
    let mut snap = engine.snapshot();

    loop {
        view.render_into(&snap, viewport(), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout).context("poll terminal events")? {
            match event::read().context("read terminal event")? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => pending.extend(input.handle_key_press(key)),
                    // DAS/ARR generates repeats; terminal auto-repeat is ignored
                    KeyEventKind::Repeat => {}
                    KeyEventKind::Release => input.handle_key_release(key.code),
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed < tick {
            continue;
        }
        last_tick = Instant::now();

        let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
        pending.extend(input.update(elapsed_ms));
        if pending.contains(&Intent::Restart) {
            input.reset();
        }

        snap = engine.step(elapsed, &pending);
        pending.clear();

        if snap.quit_requested {
            info!("quit (score {}, lines {})", snap.score, snap.lines);
            return Ok(());
        }
    }
}
