use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::util::SubscriberInitExt;
use trellis_memory_core::{AudioPlayer, GameConfig, GameEngine};
use web_time::{Instant, SystemTime, UNIX_EPOCH};

use crate::grid::SimGrid;
use crate::script::Script;

mod audio;
mod grid;
mod script;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    /// Game tunables, as TOML
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Replay key presses from a JSON script on a virtual clock
    #[arg(long)]
    script: Option<PathBuf>,

    /// Force a seed instead of one taken from the clock
    #[arg(short, long)]
    seed: Option<u64>,

    /// Polling period
    #[arg(long, default_value_t = 10)]
    tick_ms: u64,

    /// Stop after this long, defaults to the end of the script plus one celebration
    #[arg(long)]
    duration_ms: Option<u64>,

    /// Directory holding the wave files
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Draw the grid in the terminal whenever it changes
    #[arg(short, long)]
    render: bool,

    /// Blink cells in their own color
    #[arg(long)]
    reveal_colors: bool,
}

fn tracing_level(filter: log::LevelFilter) -> LevelFilter {
    match filter {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    }
}

fn setup_logging(verbose: &Verbosity<InfoLevel>) {
    tracing_subscriber::fmt()
        .with_max_level(tracing_level(verbose.log_level_filter()))
        .with_writer(io::stderr)
        .compact()
        .finish()
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(feature = "rodio")]
fn open_audio(assets: &Path) -> anyhow::Result<audio::RodioAudio> {
    audio::RodioAudio::new(assets)
}

#[cfg(not(feature = "rodio"))]
fn open_audio(assets: &Path) -> anyhow::Result<audio::LoggingAudio> {
    log::debug!("Built without rodio, not playing {}", assets.display());
    Ok(audio::LoggingAudio::new())
}

struct Run<'a> {
    script: Option<&'a Script>,
    tick: Duration,
    until: Option<Duration>,
    render: bool,
}

impl Run<'_> {
    fn play<A: AudioPlayer>(&self, engine: &mut GameEngine<SimGrid, A>) -> anyhow::Result<()> {
        let started = Instant::now();
        let mut virtual_now = Duration::ZERO;
        let mut stdout = io::stdout().lock();

        loop {
            let now = match self.script {
                Some(_) => virtual_now,
                None => started.elapsed(),
            };
            if self.until.is_some_and(|until| now >= until) {
                break;
            }

            if let Some(script) = self.script {
                let now_ms = u64::try_from(now.as_millis()).unwrap_or(u64::MAX);
                engine.driver_mut().set_pressed(script.pressed_at(now_ms));
            }
            let report = engine
                .tick(now)
                .with_context(|| format!("Tick at {:?} failed", now))?;
            if report.selection.has_update() {
                log::debug!("{:?} at {:?}", report.selection, report.pressed);
            }

            if self.render && engine.driver().is_dirty() {
                let frame = engine.driver_mut().take_frame();
                write!(stdout, "\x1b[H\x1b[2J{}", frame)?;
                stdout.flush()?;
            }

            match self.script {
                Some(_) => virtual_now += self.tick,
                None => thread::sleep(self.tick),
            }
        }

        log::info!(
            "Stopped in {:?} with {} of {} pairs found",
            engine.state(),
            engine.found_pairs(),
            engine.total_pairs()
        );
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logging(&args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.reveal_colors {
        config.reveal_colors = true;
    }
    let seed = *config.seed.get_or_insert_with(clock_seed);
    log::info!("Seed: {}", seed);

    let script = args.script.as_deref().map(Script::load).transpose()?;
    let until = args
        .duration_ms
        .or_else(|| {
            script
                .as_ref()
                .map(|script| script.end_ms() + config.celebration_ms)
        })
        .map(Duration::from_millis);

    let audio = open_audio(&args.assets)?;
    let mut engine =
        GameEngine::new(config, SimGrid::new(), audio).context("Could not start the game")?;

    let run = Run {
        script: script.as_ref(),
        tick: Duration::from_millis(args.tick_ms.max(1)),
        until,
        render: args.render,
    };
    run.play(&mut engine)
}
