//! Startup configuration: environment first, then command-line overrides.

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use crate::types::{GameKind, TetrisPreset};

pub const USAGE: &str = "\
usage: grid-games [tetris|2048|snake] [--board classic|compact|wide] [--seed N]

environment:
  GRID_GAMES_GAME          game to start when none is given
  GRID_GAMES_TETRIS_BOARD  Tetris board preset
  GRID_GAMES_SEED          random seed (default: from the clock)
  GRID_GAMES_LOG_PATH      append logs to this file (RUST_LOG sets the level)

keys: arrows/hjkl/wasd move, space/x rotate, p pause, r restart, q quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub game: GameKind,
    pub preset: TetrisPreset,
    pub seed: u32,
    pub log_path: Option<String>,
}

impl AppConfig {
    /// Defaults with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            game: GameKind::Tetris,
            preset: TetrisPreset::Classic,
            seed,
            log_path: None,
        }
    }

    /// Read `GRID_GAMES_*` variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), clock_seed())
    }

    /// Build from any key lookup; unset or blank values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, default_seed: u32) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut config = Self::new(default_seed);
        if let Some(v) = get("GRID_GAMES_GAME") {
            config.game = parse_game(&v)?;
        }
        if let Some(v) = get("GRID_GAMES_TETRIS_BOARD") {
            config.preset = parse_preset(&v)?;
        }
        if let Some(v) = get("GRID_GAMES_SEED") {
            config.seed = parse_seed(&v)?;
        }
        config.log_path = get("GRID_GAMES_LOG_PATH");
        Ok(config)
    }

    /// Apply command-line arguments (without the program name).
    ///
    /// Returns `None` when help was requested.
    pub fn apply_args(mut self, args: &[String]) -> Result<Option<Self>> {
        let mut game_given = false;
        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => return Ok(None),
                "--board" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --board"))?;
                    self.preset = parse_preset(v)?;
                }
                "--seed" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --seed"))?;
                    self.seed = parse_seed(v)?;
                }
                other if other.starts_with('-') => {
                    return Err(anyhow!("unknown argument: {}", other));
                }
                other => {
                    if game_given {
                        return Err(anyhow!("unexpected argument: {}", other));
                    }
                    self.game = parse_game(other)?;
                    game_given = true;
                }
            }
            i += 1;
        }
        Ok(Some(self))
    }
}

fn parse_game(s: &str) -> Result<GameKind> {
    GameKind::from_str(s).ok_or_else(|| anyhow!("unknown game: {} (expected tetris, 2048 or snake)", s))
}

fn parse_preset(s: &str) -> Result<TetrisPreset> {
    TetrisPreset::from_str(s)
        .ok_or_else(|| anyhow!("unknown board preset: {} (expected classic, compact or wide)", s))
}

fn parse_seed(s: &str) -> Result<u32> {
    s.parse::<u32>()
        .map_err(|_| anyhow!("invalid seed: {}", s))
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
