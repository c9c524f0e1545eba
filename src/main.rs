mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use space_shooter::compute::{init_state, step};
use space_shooter::config::GameConfig;
use space_shooter::entities::GameState;
use space_shooter::input::{Direction, InputState};

use crate::display::Projection;

/// Terminal arcade space shooter.
#[derive(Parser, Debug)]
#[command(name = "space_shooter", version, about)]
struct Args {
    /// TOML file overriding the default game configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for enemy placement and steering; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// File that receives log output (`RUST_LOG` sets the filter).
    #[arg(long, default_value = "space_shooter.log")]
    log_file: PathBuf,

    /// Target frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,
}

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms at
/// 30 FPS) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Longest frame handed to the simulation, in seconds.  A stall (suspended
/// terminal, debugger) then replays as one quarter-second frame.
const MAX_FRAME_DT: f32 = 0.25;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn direction_keys(direction: Direction) -> [KeyCode; 3] {
    match direction {
        Direction::Up => [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
        Direction::Down => [KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')],
        Direction::Left => [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
        Direction::Right => [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopResult {
    Restart,
    Quit,
}

/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key, and each frame every key that is still
/// "fresh" counts as held.  Keyboard-enhancement terminals (kitty protocol)
/// also deliver releases, which drop the key immediately.
///
/// Mouse press or drag points the ship at the cell under the cursor;
/// releasing the button lets go.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    frame_budget: Duration,
) -> std::io::Result<LoopResult> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut pointer_cell: Option<(u16, u16)> = None;
    let mut frame: u64 = 0;
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(LoopResult::Quit);
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(LoopResult::Quit);
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') if state.is_game_over() => {
                                return Ok(LoopResult::Restart);
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind, column, row, ..
                }) => match kind {
                    MouseEventKind::Down(_) | MouseEventKind::Drag(_) => {
                        pointer_cell = Some((column, row));
                    }
                    MouseEventKind::Up(_) => pointer_cell = None,
                    _ => {}
                },
                _ => {}
            }
        }

        let dt = last_frame.elapsed().as_secs_f32().min(MAX_FRAME_DT);
        last_frame = Instant::now();

        if !state.is_game_over() {
            let mut input = InputState::none();
            for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
                let held = direction_keys(direction)
                    .iter()
                    .any(|key| is_held(&key_frame, key, frame));
                input.set(direction, held);
            }
            if let Some((col, row)) = pointer_cell {
                let (width, height) = terminal::size()?;
                let projection = Projection::for_terminal(
                    width,
                    height,
                    state.world_width(),
                    state.world_height(),
                );
                input.pointer = Some(projection.screen_to_world(col, row));
            }

            step(state, dt, &input, rng);
            if state.is_game_over() {
                tracing::info!(score = state.score, frames = state.frame, "game over");
            }
        }

        display::render(out, state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file '{}'", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config '{}'", path.display()))?,
        None => GameConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    let frame_budget = Duration::from_secs(1) / args.fps.max(1);
    tracing::info!(seed, fps = args.fps, "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let mut rng = StdRng::seed_from_u64(seed);
    let result = run(&mut out, &rx, &config, &mut rng, frame_budget);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("terminal I/O failed")
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    rng: &mut StdRng,
    frame_budget: Duration,
) -> std::io::Result<()> {
    loop {
        let mut state = init_state(config.clone());
        match game_loop(out, &mut state, rx, rng, frame_budget)? {
            LoopResult::Quit => break,
            LoopResult::Restart => tracing::info!("restarting"),
        }
    }
    Ok(())
}
