//! Entry point and event pump.
//!
//! The pump is the only place with side effects: it feeds terminal and
//! gamepad input plus timer ticks into `sim::step::update` one message at a
//! time, and carries out the command each transition returns.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::terminal;
use tracing::info;

use snakegrid::config::GameConfig;
use snakegrid::sim::event::{Command, Msg};
use snakegrid::sim::step;
use snakegrid::sim::world::{GameModel, Rules};
use snakegrid::ui::gamepad::GamepadState;
use snakegrid::ui::input::InputState;
use snakegrid::ui::renderer::Renderer;

/// Poll interval when no tick is armed.
const IDLE_POLL: Duration = Duration::from_millis(50);

#[derive(Parser, Debug)]
#[command(name = "snakegrid", version, about = "A time-growing snake for the terminal")]
struct Args {
    /// Read this config file instead of searching for config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a debug log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Simulation ticks per second
    #[arg(long)]
    tps: Option<u32>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = GameConfig::load(args.config.as_deref());
    if let Some(path) = args.log_file {
        config.log_file = Some(path);
    }
    if let Some(tps) = args.tps {
        config.speed.ticks_per_second = tps.max(1);
    }

    if let Some(path) = &config.log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("Warning: could not open log file {}: {e}", path.display());
        }
    }

    let mut renderer = Renderer::new();
    let result = run(&mut renderer, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    match result {
        Ok(model) => {
            println!();
            println!("Thanks for playing Snake Grid!");
            let best = model.hi_scores.iter().copied().chain([model.score]).max().unwrap_or(0);
            println!("Best score: {best}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Log to a file; the terminal belongs to the game.
fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

/// Harness-side state: the armed tick deadline and the quit flag.
#[derive(Default)]
struct Pump {
    next_tick: Option<Instant>,
    quit: bool,
}

impl Pump {
    fn time_to_tick(&self) -> Duration {
        self.next_tick
            .map(|t| t.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_POLL)
    }

    /// Consume the armed tick if its deadline has passed.
    fn take_due_tick(&mut self) -> bool {
        match self.next_tick {
            Some(t) if Instant::now() >= t => {
                self.next_tick = None;
                true
            }
            _ => false,
        }
    }
}

fn run(renderer: &mut Renderer, config: &GameConfig) -> anyhow::Result<GameModel> {
    renderer.init().context("could not acquire the terminal")?;

    let mut kb = InputState::new();
    let mut gp = GamepadState::new();
    gp.load_button_config(&config.gamepad);
    info!(connected = gp.connected, "gamepad probed");

    let mut pump = Pump::default();
    let mut model = GameModel::new(Rules::from(config));
    let first = step::init(&model);
    apply(first, &mut pump, renderer)?;

    let (width, height) = terminal::size().context("could not read the terminal size")?;
    model = dispatch(model, Msg::Resize { width, height }, &mut pump, renderer)?;
    renderer.render(&model).context("render failed")?;

    while !pump.quit {
        let mut msgs = kb.poll(pump.time_to_tick()).context("reading terminal input")?;
        gp.update();
        msgs.extend(gp.pressed_keys().into_iter().map(Msg::Key));

        for msg in msgs {
            model = dispatch(model, msg, &mut pump, renderer)?;
            if pump.quit {
                break;
            }
        }

        if !pump.quit && pump.take_due_tick() {
            model = dispatch(model, Msg::Tick, &mut pump, renderer)?;
        }

        renderer.render(&model).context("render failed")?;
    }

    Ok(model)
}

fn dispatch(
    model: GameModel,
    msg: Msg,
    pump: &mut Pump,
    renderer: &mut Renderer,
) -> anyhow::Result<GameModel> {
    let (model, cmd) = step::update(model, msg);
    if let Some(cmd) = cmd {
        apply(cmd, pump, renderer)?;
    }
    Ok(model)
}

fn apply(cmd: Command, pump: &mut Pump, renderer: &mut Renderer) -> anyhow::Result<()> {
    match cmd {
        Command::ArmTick(delay) => pump.next_tick = Some(Instant::now() + delay),
        Command::TakeOverScreen => renderer
            .take_over_screen()
            .context("could not enter the alternate screen")?,
        Command::Quit => pump.quit = true,
    }
    Ok(())
}
