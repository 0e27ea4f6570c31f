//! Core engine types: RNG, settings, errors.
//!
//! These carry no game rules of their own. Everything else in the crate
//! is configured through `GameSettings` rather than ambient state.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{GameSettings, RevealPolicy, DEFAULT_CURRENT_RUN_NAME, DEFAULT_MISMATCH_DELAY};
pub use error::{GameError, Result};
pub use rng::{GameRng, GameRngState};
