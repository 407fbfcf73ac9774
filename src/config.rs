/*
 *  config.rs
 *
 *  PixelPod - small screen, steady frames
 *
 *  Layered configuration for the demo binary: defaults, then a YAML file,
 *  then CLI overrides, then validation.
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level app configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// e.g. "info" | "debug"
    pub log_level: Option<String>,
    /// logical frames per second (1..=255)
    pub frame_rate: Option<u8>,
    /// allocate a swap buffer and present double-buffered
    pub double_buffer: Option<bool>,
    /// demo run length in granted frames (None = run forever)
    pub frames: Option<u64>,
    /// display geometry
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone)]
#[command(name = "pixelpod-demo", about = "PixelPod demo renderer", disable_help_flag = false)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    #[arg(long)]
    pub frame_rate: Option<u8>,
    #[arg(long, action = ArgAction::Set)]
    pub double_buffer: Option<bool>,
    /// stop after this many granted frames
    #[arg(long)]
    pub frames: Option<u64>,
    #[arg(long)]
    pub display_width: Option<u32>,
    #[arg(long)]
    pub display_height: Option<u32>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<Config, ConfigError> {
    let cli = Cli::parse();

    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, &cli);

    // 4) Validate
    validate(&cfg)?;

    if cli.dump_config {
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        std::process::exit(0);
    }

    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/pixelpod/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/pixelpod/config.yaml");
        if p.exists() {
            return Some(p);
        }
        let p = home.join(".config/pixelpod.yaml");
        if p.exists() {
            return Some(p);
        }
    }
    // project local
    for candidate in &["pixelpod.yaml", "config.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() {
            return Some(p);
        }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some() {
        dst.log_level = src.log_level;
    }
    if src.frame_rate.is_some() {
        dst.frame_rate = src.frame_rate;
    }
    if src.double_buffer.is_some() {
        dst.double_buffer = src.double_buffer;
    }
    if src.frames.is_some() {
        dst.frames = src.frames;
    }
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.width.is_some() {
        dst.width = src.width;
    }
    if src.height.is_some() {
        dst.height = src.height;
    }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some() {
        cfg.log_level = cli.log_level.clone();
    }
    if cli.frame_rate.is_some() {
        cfg.frame_rate = cli.frame_rate;
    }
    if cli.double_buffer.is_some() {
        cfg.double_buffer = cli.double_buffer;
    }
    if cli.frames.is_some() {
        cfg.frames = cli.frames;
    }

    let any_display = cli.display_width.is_some() || cli.display_height.is_some();
    if any_display && cfg.display.is_none() {
        cfg.display = Some(DisplayConfig::default());
    }
    if let Some(display) = cfg.display.as_mut() {
        if cli.display_width.is_some() {
            display.width = cli.display_width;
        }
        if cli.display_height.is_some() {
            display.height = cli.display_height;
        }
    }
}

/// Put any invariants here (required fields, ranges, etc.)
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(rate) = cfg.frame_rate {
        if rate == 0 {
            return Err(ConfigError::Validation("frame_rate must be 1..=255".into()));
        }
    }
    if let Some(display) = cfg.display.as_ref() {
        if let Some(w) = display.width {
            if w == 0 {
                return Err(ConfigError::Validation("display width must be > 0".into()));
            }
        }
        if let Some(h) = display.height {
            if h == 0 || h % 8 != 0 {
                return Err(ConfigError::Validation(
                    "display height must be a non-zero multiple of 8".into(),
                ));
            }
        }
    }
    Ok(())
}
