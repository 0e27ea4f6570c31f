//! Matching rules.
//!
//! `MatchEngine` owns all game state for one deck: face-up cards, matched
//! pairs and the step counter. It knows nothing about screens or timers;
//! the session layer decides when a pending mismatch is cleared.

pub mod engine;

pub use engine::{EnginePhase, EngineSnapshot, MatchEngine, RevealOutcome};
