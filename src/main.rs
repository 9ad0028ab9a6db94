//! Terminal tetrino runner (default binary).
//!
//! Reads keys with crossterm, stamps them with the frame they should apply to,
//! advances the engine once per 60 Hz frame and paints the snapshot through the
//! framebuffer renderer.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};

use tetrino::core::{GameSnapshot, GameState};
use tetrino::input::InputCollector;
use tetrino::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tetrino::types::{FRAME_PERIOD_US, MAX_LEVEL, MAX_TIC_ELAPSED_US};

#[derive(Parser, Debug)]
#[command(name = "tetrino", version, about = "Falling-block puzzle game for the terminal")]
struct CliArgs {
    /// Seed for the piece randomizer.
    #[arg(long, env = "TETRINO_SEED", default_value_t = 0)]
    seed: u32,

    /// Level a new game starts at.
    #[arg(
        long,
        env = "TETRINO_LEVEL",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..=MAX_LEVEL as i64)
    )]
    level: u32,

    /// Treat every key press as a tap, even if the terminal can report releases.
    #[arg(long)]
    no_release_events: bool,
}

fn main() -> Result<()> {
    let args = CliArgs::parse();

    let mut term = TerminalRenderer::new();
    let result = term
        .enter(!args.no_release_events)
        .and_then(|release_events| run(&mut term, &args, release_events));

    // Always try to restore terminal state.
    let restored = term.exit();

    match &result {
        Ok(summary) => eprintln!(
            "[tetrino] session ended: score {} level {} lines {}",
            summary.score, summary.level, summary.lines
        ),
        Err(e) => eprintln!("[tetrino] error: {e:#}"),
    }
    restored?;
    result.map(|_| ())
}

fn run(term: &mut TerminalRenderer, args: &CliArgs, release_events: bool) -> Result<GameSnapshot> {
    let mut game = GameState::new(args.seed).with_start_level(args.level);
    let mut inputs = VecDeque::new();
    let mut collector = InputCollector::new(release_events);

    let view = GameView::default();
    let mut snapshot = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let frame_period = Duration::from_micros(FRAME_PERIOD_US as u64);
    let mut last_tic = Instant::now();
    let mut deadline = last_tic + frame_period;

    loop {
        // Collect keys until the next frame deadline.
        let mut resized = false;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    collector.collect(key, game.current_frame() + 1, &mut inputs);
                }
                Event::Resize(_, _) => resized = true,
                _ => {}
            }
        }

        let now = Instant::now();
        let elapsed = (now - last_tic).as_micros().min(MAX_TIC_ELAPSED_US as u128) as u64;
        last_tic = now;
        deadline = now + frame_period;

        let alive = game.tic(elapsed, &mut inputs);
        game.snapshot_into(&mut snapshot);
        if !alive {
            return Ok(snapshot);
        }

        if collector.take_redraw() || resized {
            term.invalidate();
        }
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;
    }
}
