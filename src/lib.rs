//! # memory-match
//!
//! A memory-matching (concentration) card game engine.
//!
//! ## Design Principles
//!
//! 1. **Engine without a UI**: `MatchEngine` is a plain state machine.
//!    Shells render a `BoardView` and never mutate state directly.
//!
//! 2. **Explicit configuration**: Delays, themes and the leaderboard live
//!    in `GameSettings`, passed in at construction. Nothing is global.
//!
//! 3. **Deterministic when seeded**: Decks come from a seeded ChaCha RNG,
//!    so tests and replays see the same layout every time.
//!
//! ## Game Flow
//!
//! - Pick a theme: its N images become a shuffled deck of 2N cards.
//! - Reveal two cards. Equal images stay face-up; different images are
//!   shown until the shell clears them after `mismatch_delay`.
//! - Every two-card comparison is one step. Clear the board, then see
//!   your step count ranked against the leaderboard.
//!
//! ## Modules
//!
//! - `core`: RNG, settings, errors
//! - `cards`: Theme images, card instances, theme registry
//! - `deck`: Deck building and shuffling
//! - `rules`: The match engine
//! - `ranking`: Results leaderboard
//! - `session`: Screen routing, mismatch timer contract, view adapter

pub mod core;
pub mod cards;
pub mod deck;
pub mod rules;
pub mod ranking;
pub mod session;

// Re-export commonly used types
pub use crate::core::{GameError, GameRng, GameRngState, GameSettings, Result, RevealPolicy};

pub use crate::cards::{builtin_themes, Card, CardImage, CardInstanceId, ImageId, Theme, ThemeRegistry};

pub use crate::deck::{build_deck, Deck};

pub use crate::rules::{EnginePhase, EngineSnapshot, MatchEngine, RevealOutcome};

pub use crate::ranking::{rank, rank_entry, RankedRow, ResultEntry};

pub use crate::session::{
    BoardView, CardFace, CardView, ClearTicket, RevealResponse, Screen, SessionController,
    SessionEvent, SessionObserver,
};
