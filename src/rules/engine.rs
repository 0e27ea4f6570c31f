//! The match engine: reveal two cards, compare, keep or hide.
//!
//! ## States
//!
//! - `Idle`: no unresolved card is face-up
//! - `OneRevealed`: one card is face-up, waiting for its partner
//! - `PendingClear`: a mismatched pair is face-up until `clear_reveal`
//!
//! Matched cards leave the state space for good. A matching pair moves to
//! `matched` the moment the second card is revealed; a mismatched pair stays
//! revealed until the caller clears it. When to clear is the shell's
//! decision (usually after a short delay), so the engine never does it on
//! its own.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardInstanceId;
use crate::core::{GameError, Result, RevealPolicy};
use crate::deck::Deck;

/// Current state of the reveal cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnginePhase {
    /// Nothing unresolved is face-up.
    Idle,
    /// One card is face-up.
    OneRevealed,
    /// A mismatched pair is face-up, awaiting `clear_reveal`.
    PendingClear,
}

/// What a call to `reveal_card` did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Nothing changed: the card is matched or already face-up.
    Ignored,
    /// The card is now the first of a new attempt.
    Revealed(CardInstanceId),
    /// Second card completed a pair; both are now matched.
    Matched {
        first: CardInstanceId,
        second: CardInstanceId,
    },
    /// Second card did not match; both stay face-up until cleared.
    Mismatched {
        first: CardInstanceId,
        second: CardInstanceId,
    },
}

impl RevealOutcome {
    /// Check whether this reveal completed a comparison (and cost a step).
    #[must_use]
    pub fn is_step(&self) -> bool {
        matches!(self, Self::Matched { .. } | Self::Mismatched { .. })
    }
}

/// Observable engine state.
///
/// `matched` is an `im::Vector`, so taking a snapshot is O(1).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Reveal-cycle state.
    pub phase: EnginePhase,
    /// Face-up, unresolved cards (at most two).
    pub revealed: SmallVec<[CardInstanceId; 2]>,
    /// Permanently matched cards, in the order they were matched.
    pub matched: Vector<CardInstanceId>,
    /// Completed comparisons.
    pub steps: u32,
}

/// Turn-based matching state machine over one deck.
///
/// ## Example
///
/// ```
/// use memory_match::cards::{Card, CardImage};
/// use memory_match::deck::Deck;
/// use memory_match::rules::{MatchEngine, RevealOutcome};
///
/// let image = CardImage::new("1", "x");
/// let (a, b) = (Card::from_image(&image, 0), Card::from_image(&image, 1));
/// let mut engine = MatchEngine::new(Deck::from_cards(vec![a.clone(), b.clone()]).unwrap());
///
/// engine.reveal_card(&a.id).unwrap();
/// let outcome = engine.reveal_card(&b.id).unwrap();
///
/// assert!(matches!(outcome, RevealOutcome::Matched { .. }));
/// assert!(engine.is_game_over());
/// assert_eq!(engine.steps_count(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct MatchEngine {
    deck: Deck,
    policy: RevealPolicy,
    revealed: SmallVec<[CardInstanceId; 2]>,
    matched: Vector<CardInstanceId>,
    matched_set: FxHashSet<CardInstanceId>,
    steps: u32,
}

impl MatchEngine {
    /// Create an engine with the default `RevealPolicy::Reject`.
    #[must_use]
    pub fn new(deck: Deck) -> Self {
        Self::with_policy(deck, RevealPolicy::default())
    }

    /// Create an engine with an explicit pending-reveal policy.
    #[must_use]
    pub fn with_policy(deck: Deck, policy: RevealPolicy) -> Self {
        Self {
            deck,
            policy,
            revealed: SmallVec::new(),
            matched: Vector::new(),
            matched_set: FxHashSet::default(),
            steps: 0,
        }
    }

    /// Reveal a card.
    ///
    /// - Matched or already face-up cards are ignored.
    /// - The first card of an attempt is simply turned over.
    /// - The second card costs one step and is compared with the first.
    /// - While a mismatch is pending the reveal is rejected or auto-cleared,
    ///   depending on the policy.
    ///
    /// Fails with `UnknownCard` for ids outside the deck, and with
    /// `RevealPending` under `RevealPolicy::Reject`.
    pub fn reveal_card(&mut self, id: &CardInstanceId) -> Result<RevealOutcome> {
        if !self.deck.contains(id) {
            tracing::warn!(card = %id, "reveal of card outside the deck");
            return Err(GameError::UnknownCard { id: id.clone() });
        }

        if self.matched_set.contains(id) || self.revealed.contains(id) {
            return Ok(RevealOutcome::Ignored);
        }

        if self.revealed.len() == 2 {
            match self.policy {
                RevealPolicy::Reject => {
                    return Err(GameError::RevealPending {
                        first: self.revealed[0].clone(),
                        second: self.revealed[1].clone(),
                    });
                }
                RevealPolicy::AutoClear => {
                    tracing::debug!("auto-clearing pending mismatch");
                    self.revealed.clear();
                }
            }
        }

        let Some(first) = self.revealed.first().cloned() else {
            self.revealed.push(id.clone());
            tracing::debug!(card = %id, "revealed first card");
            return Ok(RevealOutcome::Revealed(id.clone()));
        };

        self.revealed.push(id.clone());
        self.steps += 1;

        let is_pair = match (self.deck.get(&first), self.deck.get(id)) {
            (Some(a), Some(b)) => a.matches(b),
            _ => false,
        };

        if is_pair {
            self.revealed.clear();
            self.matched_set.insert(first.clone());
            self.matched_set.insert(id.clone());
            self.matched.push_back(first.clone());
            self.matched.push_back(id.clone());
            tracing::debug!(first = %first, second = %id, steps = self.steps, "pair matched");

            if self.is_game_over() {
                tracing::info!(steps = self.steps, "all cards matched");
            }
            Ok(RevealOutcome::Matched {
                first,
                second: id.clone(),
            })
        } else {
            tracing::debug!(first = %first, second = %id, steps = self.steps, "pair mismatched");
            Ok(RevealOutcome::Mismatched {
                first,
                second: id.clone(),
            })
        }
    }

    /// Turn a pending mismatched pair back over.
    ///
    /// Returns `true` if a pair was cleared, `false` if nothing was pending.
    pub fn clear_reveal(&mut self) -> bool {
        if self.revealed.len() < 2 {
            return false;
        }
        self.revealed.clear();
        tracing::debug!("cleared mismatched pair");
        true
    }

    /// Start over on the same deck layout.
    pub fn reset(&mut self) {
        self.revealed.clear();
        self.matched.clear();
        self.matched_set.clear();
        self.steps = 0;
    }

    /// True once every card in the deck is matched.
    ///
    /// An empty deck is over from the start.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.matched.len() == self.deck.len()
    }

    /// Completed comparisons so far.
    #[must_use]
    pub fn steps_count(&self) -> u32 {
        self.steps
    }

    /// Current reveal-cycle state.
    #[must_use]
    pub fn phase(&self) -> EnginePhase {
        match self.revealed.len() {
            0 => EnginePhase::Idle,
            1 => EnginePhase::OneRevealed,
            _ => EnginePhase::PendingClear,
        }
    }

    /// Face-up, unresolved cards.
    #[must_use]
    pub fn revealed(&self) -> &[CardInstanceId] {
        &self.revealed
    }

    /// Matched cards in match order.
    #[must_use]
    pub fn matched(&self) -> &Vector<CardInstanceId> {
        &self.matched
    }

    /// Check if a card is permanently matched.
    #[must_use]
    pub fn is_matched(&self, id: &CardInstanceId) -> bool {
        self.matched_set.contains(id)
    }

    /// Check if a card is face-up and unresolved.
    #[must_use]
    pub fn is_revealed(&self, id: &CardInstanceId) -> bool {
        self.revealed.contains(id)
    }

    /// Pairs found so far.
    #[must_use]
    pub fn pairs_found(&self) -> usize {
        self.matched.len() / 2
    }

    /// Pairs in the deck.
    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.deck.pair_count()
    }

    /// Fraction of cards matched, in `0.0..=1.0`.
    ///
    /// An empty deck counts as complete.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.deck.is_empty() {
            return 1.0;
        }
        self.matched.len() as f64 / self.deck.len() as f64
    }

    /// The deck this engine plays.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The pending-reveal policy.
    #[must_use]
    pub fn policy(&self) -> RevealPolicy {
        self.policy
    }

    /// Capture the observable state.
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            phase: self.phase(),
            revealed: self.revealed.clone(),
            matched: self.matched.clone(),
            steps: self.steps,
        }
    }
}
