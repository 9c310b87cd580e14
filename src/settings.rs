//! Environment construction configuration
//!
//! Can be built in code or loaded from a JSON file. Missing fields take
//! their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SCORE, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::{Result, TennisError};
use crate::render::Backend;
use crate::sim::Rules;

pub use crate::sim::AccelMode;

/// What happens when a step ends the episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetMode {
    /// Caller must `reset()`; stepping a finished episode panics
    #[default]
    Manual,
    /// The ending step starts the next episode and flags it `first`
    Auto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Renderer backend, resolved once at construction
    pub backend: Backend,
    /// Human-controlled paddles: 1 (vs built-in opponent) or 2
    pub num_players: u8,
    /// Score that ends an episode
    pub max_score: u32,
    /// Must stay 160x210
    pub screen_width: u32,
    pub screen_height: u32,
    /// Seed for the random source
    pub seed: u64,
    /// Courts in a batched environment
    pub num_envs: usize,
    /// `None` picks `Sampled` for one player and `Fixed` for two
    pub acceleration: Option<AccelMode>,
    pub reset_mode: ResetMode,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Vector,
            num_players: 1,
            max_score: MAX_SCORE,
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            seed: 0,
            num_envs: 1,
            acceleration: None,
            reset_mode: ResetMode::Manual,
        }
    }
}

impl EnvConfig {
    /// Effective acceleration mode
    pub fn accel_mode(&self) -> AccelMode {
        self.acceleration.unwrap_or(if self.num_players == 2 {
            AccelMode::Fixed
        } else {
            AccelMode::Sampled
        })
    }

    pub fn rules(&self) -> Rules {
        Rules {
            max_score: self.max_score,
            accel_mode: self.accel_mode(),
            p2_human: self.num_players == 2,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=2).contains(&self.num_players) {
            return Err(TennisError::InvalidConfig(format!(
                "num_players must be 1 or 2, got {}",
                self.num_players
            )));
        }
        if self.max_score == 0 {
            return Err(TennisError::InvalidConfig(
                "max_score must be at least 1".to_string(),
            ));
        }
        if (self.screen_width, self.screen_height) != (SCREEN_WIDTH, SCREEN_HEIGHT) {
            return Err(TennisError::InvalidConfig(format!(
                "screen must be {}x{}, got {}x{}",
                SCREEN_WIDTH, SCREEN_HEIGHT, self.screen_width, self.screen_height
            )));
        }
        if self.num_envs == 0 {
            return Err(TennisError::InvalidConfig(
                "num_envs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Config saved to {}", path.as_ref().display());
        Ok(())
    }
}
