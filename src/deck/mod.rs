//! Deck building: every theme image twice, in shuffled order.
//!
//! Shuffling draws from an injected `GameRng`, so a seed fixes the deck.

pub mod builder;

pub use builder::{build_deck, Deck, COPIES_PER_IMAGE};
