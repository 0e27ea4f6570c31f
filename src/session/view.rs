//! Presentation adapter types.
//!
//! Shells never touch `MatchEngine` directly. They render a `BoardView`
//! and learn about changes through `SessionObserver`.

use serde::Serialize;

use super::controller::{Screen, SessionController};
use crate::cards::CardInstanceId;
use crate::rules::{MatchEngine, RevealOutcome};

/// How a card is currently shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CardFace {
    /// Face-down.
    Hidden,
    /// Face-up, not yet resolved.
    Revealed,
    /// Face-up for good.
    Matched,
}

impl CardFace {
    /// Check whether the image is visible.
    #[must_use]
    pub fn is_face_up(self) -> bool {
        !matches!(self, CardFace::Hidden)
    }
}

/// One board cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CardView {
    /// Card id, passed back to `SessionController::reveal`.
    pub id: CardInstanceId,
    /// Current face.
    pub face: CardFace,
    /// Image url, only while face-up.
    pub url: Option<String>,
    /// Image description, only while face-up.
    pub description: Option<String>,
}

/// Render-ready board state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BoardView {
    /// Theme being played.
    pub theme: String,
    /// Cards in board order.
    pub cards: Vec<CardView>,
    /// Completed comparisons.
    pub steps: u32,
    /// Pairs found so far.
    pub pairs_found: usize,
    /// Pairs on the board.
    pub total_pairs: usize,
    /// Matched fraction, `0.0..=1.0`.
    pub progress: f64,
    /// True once every card is matched.
    pub game_over: bool,
}

impl BoardView {
    /// Build the view of an engine's current state.
    #[must_use]
    pub fn from_engine(theme: &str, engine: &MatchEngine) -> Self {
        let cards = engine
            .deck()
            .iter()
            .map(|card| {
                let face = if engine.is_matched(&card.id) {
                    CardFace::Matched
                } else if engine.is_revealed(&card.id) {
                    CardFace::Revealed
                } else {
                    CardFace::Hidden
                };
                let visible = face.is_face_up();
                CardView {
                    id: card.id.clone(),
                    face,
                    url: visible.then(|| card.url.clone()),
                    description: visible.then(|| card.description.clone()),
                }
            })
            .collect();

        Self {
            theme: theme.to_string(),
            cards,
            steps: engine.steps_count(),
            pairs_found: engine.pairs_found(),
            total_pairs: engine.total_pairs(),
            progress: engine.progress(),
            game_over: engine.is_game_over(),
        }
    }
}

/// A change the shell may want to re-render for.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// The active screen changed.
    ScreenChanged(Screen),
    /// A card reveal was processed.
    Revealed(RevealOutcome),
    /// A mismatched pair was turned back over.
    Cleared,
    /// The last pair was matched.
    GameOver { steps: u32 },
}

/// Receives session events after each mutation.
///
/// Any `FnMut(&SessionEvent, &SessionController)` closure is an observer.
pub trait SessionObserver {
    /// Called once per event, after the state change is complete.
    fn on_event(&mut self, event: &SessionEvent, session: &SessionController);
}

impl<F> SessionObserver for F
where
    F: FnMut(&SessionEvent, &SessionController),
{
    fn on_event(&mut self, event: &SessionEvent, session: &SessionController) {
        self(event, session)
    }
}
