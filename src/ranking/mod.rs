//! Leaderboard ranking for the results screen.

pub mod leaderboard;

pub use leaderboard::{rank, rank_entry, RankedRow, ResultEntry};
