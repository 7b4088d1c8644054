//! External configuration loader.
//!
//! Reads `config.toml` from the executable's directory, the CWD, or
//! `~/.local/share/snakegrid` (or an explicit path from the command line).
//! Falls back to defaults if the file is missing or incomplete.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub speed: SpeedConfig,
    pub layout: LayoutConfig,
    pub gamepad: GamepadConfig,
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct SpeedConfig {
    pub ticks_per_second: u32,
    pub growth_interval: u32, // movement frames per +1 max length
}

#[derive(Clone, Debug)]
pub struct LayoutConfig {
    pub score_panel_width: i32,
    pub length_per_column: usize, // max length = this * game board width
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub quit: Vec<String>,
}

impl SpeedConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    layout: TomlLayout,
    #[serde(default)]
    gamepad: TomlGamepad,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_ticks_per_second")]
    ticks_per_second: u32,
    #[serde(default = "default_growth_interval")]
    growth_interval: u32,
}

#[derive(Deserialize, Debug)]
struct TomlLayout {
    #[serde(default = "default_score_panel_width")]
    score_panel_width: i32,
    #[serde(default = "default_length_per_column")]
    length_per_column: usize,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_quit_buttons")]
    quit: Vec<String>,
}

#[derive(Deserialize, Debug, Default)]
struct TomlGeneral {
    #[serde(default)]
    log_file: String,
}

// ── Defaults ──

fn default_ticks_per_second() -> u32 { 15 }
fn default_growth_interval() -> u32 { 10 }
fn default_score_panel_width() -> i32 { 25 }
fn default_length_per_column() -> usize { 2 }
fn default_quit_buttons() -> Vec<String> { vec!["Select".into()] }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed {
            ticks_per_second: default_ticks_per_second(),
            growth_interval: default_growth_interval(),
        }
    }
}

impl Default for TomlLayout {
    fn default() -> Self {
        TomlLayout {
            score_panel_width: default_score_panel_width(),
            length_per_column: default_length_per_column(),
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad { quit: default_quit_buttons() }
    }
}

impl From<TomlConfig> for GameConfig {
    fn from(toml_cfg: TomlConfig) -> Self {
        let log_file = Some(toml_cfg.general.log_file)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        GameConfig {
            speed: SpeedConfig {
                ticks_per_second: toml_cfg.speed.ticks_per_second.max(1),
                growth_interval: toml_cfg.speed.growth_interval.max(1),
            },
            layout: LayoutConfig {
                score_panel_width: toml_cfg.layout.score_panel_width.max(0),
                length_per_column: toml_cfg.layout.length_per_column.max(1),
            },
            gamepad: GamepadConfig { quit: toml_cfg.gamepad.quit },
            log_file,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        TomlConfig::default().into()
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `explicit`, or search for `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory,
    /// (3) `~/.local/share/snakegrid`.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Self {
        match explicit {
            Some(path) => load_file(path).unwrap_or_default(),
            None => load_toml(&candidate_dirs()),
        }
    }

    /// Parse config text; errors surface to the caller.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(Into::into)
    }
}

/// Candidate directories to search: exe dir + CWD + XDG data dir (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/snakegrid");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> GameConfig {
    search_dirs.iter()
        .map(|dir| dir.join("config.toml"))
        .find(|path| path.exists())
        .and_then(|path| load_file(&path))
        .unwrap_or_default()
}

fn load_file(path: &Path) -> Option<GameConfig> {
    match std::fs::read_to_string(path) {
        Ok(text) => match GameConfig::from_toml_str(&text) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                eprintln!("Warning: {} parse error: {e}", path.display());
                eprintln!("Using default settings.");
                None
            }
        },
        Err(e) => {
            eprintln!("Warning: could not read {}: {e}", path.display());
            None
        }
    }
}
