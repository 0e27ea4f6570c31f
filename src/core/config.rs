//! Game settings.
//!
//! `GameSettings` is built once and handed to the session controller:
//! - `mismatch_delay`: how long a mismatched pair stays face-up
//! - `reveal_policy`: what a reveal does while a mismatch is still showing
//! - `themes`: the playable image sets, in start-screen order
//! - `reference_results`: the leaderboard the current run is ranked against
//! - `rng_state`: a saved shuffler position, to deal the same decks again
//!
//! Settings can also be read from TOML. Missing keys fall back to defaults:
//!
//! ```toml
//! mismatch_delay_ms = 500
//! reveal_policy = "auto-clear"
//! seed = 7
//!
//! [[reference_results]]
//! name = "Anya"
//! steps_count = 16
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::error::{GameError, Result};
use super::rng::GameRngState;
use crate::cards::{builtin_themes, Theme};
use crate::ranking::ResultEntry;

/// Delay before a mismatched pair is turned back over.
pub const DEFAULT_MISMATCH_DELAY: Duration = Duration::from_millis(800);

/// Name given to the current run on the results screen.
pub const DEFAULT_CURRENT_RUN_NAME: &str = "Your result";

/// What `reveal` does while a mismatched pair is still face-up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevealPolicy {
    /// Fail with `GameError::RevealPending`; the caller must clear first.
    #[default]
    Reject,
    /// Turn the pending pair back over, then reveal the new card.
    AutoClear,
}

/// Complete game settings.
#[derive(Clone, Debug)]
pub struct GameSettings {
    /// How long the shell shows a mismatched pair before clearing it.
    pub mismatch_delay: Duration,

    /// Handling of a reveal while a mismatch is pending.
    pub reveal_policy: RevealPolicy,

    /// Display name of the current run in the ranking.
    pub current_run_name: String,

    /// Fixed seed for reproducible decks. `None` draws from entropy.
    pub seed: Option<u64>,

    /// Shuffler position from `SessionController::rng_state`. Overrides `seed`.
    pub rng_state: Option<GameRngState>,

    /// Playable themes.
    pub themes: Vec<Theme>,

    /// Leaderboard entries the current run is ranked against.
    pub reference_results: Vec<ResultEntry>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            mismatch_delay: DEFAULT_MISMATCH_DELAY,
            reveal_policy: RevealPolicy::default(),
            current_run_name: DEFAULT_CURRENT_RUN_NAME.to_string(),
            seed: None,
            rng_state: None,
            themes: builtin_themes(),
            reference_results: default_reference_results(),
        }
    }
}

impl GameSettings {
    /// Create settings with the built-in themes and leaderboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mismatch display delay.
    #[must_use]
    pub fn with_mismatch_delay(mut self, delay: Duration) -> Self {
        self.mismatch_delay = delay;
        self
    }

    /// Set the pending-reveal policy.
    #[must_use]
    pub fn with_reveal_policy(mut self, policy: RevealPolicy) -> Self {
        self.reveal_policy = policy;
        self
    }

    /// Use a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Resume the deck sequence of an earlier session.
    #[must_use]
    pub fn with_rng_state(mut self, state: GameRngState) -> Self {
        self.rng_state = Some(state);
        self
    }

    /// Set the current run's display name.
    #[must_use]
    pub fn with_current_run_name(mut self, name: impl Into<String>) -> Self {
        self.current_run_name = name.into();
        self
    }

    /// Replace the theme list.
    #[must_use]
    pub fn with_themes(mut self, themes: Vec<Theme>) -> Self {
        self.themes = themes;
        self
    }

    /// Replace the reference leaderboard.
    #[must_use]
    pub fn with_reference_results(mut self, results: Vec<ResultEntry>) -> Self {
        self.reference_results = results;
        self
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let raw: TomlSettings =
            toml::from_str(text).map_err(|e| GameError::Config(e.to_string()))?;
        Ok(raw.into())
    }

    /// Read settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| GameError::Config(format!("could not read {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }
}

fn default_reference_results() -> Vec<ResultEntry> {
    vec![
        ResultEntry::new("Anya", 16),
        ResultEntry::new("Vasya", 12),
        ResultEntry::new("Petya", 19),
    ]
}

// ── TOML schema ──

#[derive(Deserialize, Debug)]
struct TomlSettings {
    #[serde(default = "default_delay_ms")]
    mismatch_delay_ms: u64,
    #[serde(default)]
    reveal_policy: RevealPolicy,
    #[serde(default = "default_run_name")]
    current_run_name: String,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    rng_state: Option<GameRngState>,
    #[serde(default = "builtin_themes")]
    themes: Vec<Theme>,
    #[serde(default = "default_reference_results")]
    reference_results: Vec<ResultEntry>,
}

fn default_delay_ms() -> u64 {
    DEFAULT_MISMATCH_DELAY.as_millis() as u64
}

fn default_run_name() -> String {
    DEFAULT_CURRENT_RUN_NAME.to_string()
}

impl From<TomlSettings> for GameSettings {
    fn from(raw: TomlSettings) -> Self {
        Self {
            mismatch_delay: Duration::from_millis(raw.mismatch_delay_ms),
            reveal_policy: raw.reveal_policy,
            current_run_name: raw.current_run_name,
            seed: raw.seed,
            rng_state: raw.rng_state,
            themes: raw.themes,
            reference_results: raw.reference_results,
        }
    }
}
