mod display;
mod input;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use invader_duel::config::Mode;
use invader_duel::interfaces::{AudioPlayer, Cue, InputSource};
use invader_duel::{scene, Flow, Game, GameError};

use display::TerminalRenderer;
use input::TerminalInput;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

const LOG_FILE: &str = "invader_duel.log";

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "invader_duel")]
#[command(about = "Two-ship Space Invaders: you on the left, the AI on the right")]
struct Args {
    /// Whether the AI may roam the whole screen or keeps to its own half
    #[arg(value_enum, default_value_t = ModeArg::Competitive)]
    mode: ModeArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Competitive,
    #[value(alias = "c")]
    Cooperative,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Competitive => Mode::Competitive,
            ModeArg::Cooperative => Mode::Cooperative,
        }
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw mode while playing, so logs go to a file — and
/// only when `RUST_LOG` asks for them.
fn init_logging() -> Result<(), GameError> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let path = std::env::temp_dir().join(LOG_FILE);
    let file = File::create(&path).map_err(|source| GameError::LogFile {
        path: path.clone(),
        source,
    })?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Audio ─────────────────────────────────────────────────────────────────────

/// No sound device in a terminal; cues are only traced.
struct LoggedAudio;

impl AudioPlayer for LoggedAudio {
    fn play(&mut self, cue: Cue) {
        debug!(%cue, "play");
    }

    fn play_looped(&mut self, cue: Cue) {
        debug!(%cue, "play looped");
    }

    fn fade_out(&mut self, cue: Cue, millis: u64) {
        debug!(%cue, millis, "fade out");
    }

    fn stop(&mut self, cue: Cue) {
        debug!(%cue, "stop");
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn game_loop<W: Write>(out: W, rx: mpsc::Receiver<Event>, mode: Mode) -> Result<()> {
    let mut renderer = TerminalRenderer::new(out);
    let mut input = TerminalInput::new(rx);
    let mut audio = LoggedAudio;
    let mut rng = thread_rng();
    let mut game = Game::new(mode);

    let start = Instant::now();
    loop {
        let frame_start = Instant::now();
        let now = start.elapsed().as_millis() as u64;

        let snapshot = input.poll();
        if game.tick(now, &snapshot, &mut rng, &mut audio) == Flow::Quit {
            return Ok(());
        }
        scene::draw(&game, now, &mut renderer).context("failed to draw frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Terminal session ──────────────────────────────────────────────────────────

/// Raw mode, alternate screen and hidden cursor for as long as it lives.
/// Dropping it puts the terminal back, on the error path too.
struct TerminalSession<W: Write> {
    out: W,
    release_events: bool,
}

impl<W: Write> TerminalSession<W> {
    fn open(mut out: W) -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        // Release events let held keys drop immediately; unsupported
        // terminals just keep sending presses.
        let release_events = out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        debug!(release_events, "terminal ready");
        Ok(Self { out, release_events })
    }
}

impl<W: Write> Drop for TerminalSession<W> {
    fn drop(&mut self) {
        if self.release_events {
            let _ = self.out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Forward terminal events to the game loop; ends once the loop hangs up.
fn spawn_event_reader() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        while let Ok(event) = event::read() {
            if tx.send(event).is_err() {
                break;
            }
        }
    });
    rx
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging().context("failed to set up logging")?;
    let mode = Mode::from(args.mode);
    info!(?mode, "starting");

    let mut session = TerminalSession::open(BufWriter::new(stdout()))?;
    let rx = spawn_event_reader();
    game_loop(&mut session.out, rx, mode)
}
