//! Session controller: screen routing around one match engine.
//!
//! ## Screens
//!
//! ```text
//! Start --start(theme)--> Playing --finish()--> Results --reset()--> Start
//!                           |  ^                                   ^
//!                           +--+ start(theme) restarts             |
//!                           +----------------- reset() ------------+
//! ```
//!
//! ## Mismatch timer
//!
//! A mismatched reveal hands back a `ClearTicket`. The shell waits
//! `ticket.delay` and then calls `fire_clear(ticket)`. A ticket names the
//! game generation and the step of its mismatch. Every `start`, `finish`
//! and `reset` bumps the generation, and a later comparison moves the step
//! on, so a ticket whose pair is already gone is ignored instead of
//! clearing a newer one.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::view::{BoardView, SessionEvent, SessionObserver};
use crate::cards::{CardInstanceId, Theme, ThemeRegistry};
use crate::core::{GameError, GameRng, GameRngState, GameSettings, Result};
use crate::deck::build_deck;
use crate::ranking::{rank_entry, RankedRow, ResultEntry};
use crate::rules::{MatchEngine, RevealOutcome};

/// The three screens of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    /// Theme selection.
    Start,
    /// A game is in progress.
    Playing,
    /// Ranked results of the finished game.
    Results,
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Screen::Start => "start",
            Screen::Playing => "playing",
            Screen::Results => "results",
        };
        f.write_str(name)
    }
}

/// Permission to clear one pending mismatch, tied to the game and step that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClearTicket {
    generation: u64,
    step: u32,
    /// How long to show the mismatched pair first.
    pub delay: Duration,
}

impl ClearTicket {
    /// The game generation this ticket belongs to.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Step count of the mismatch this ticket clears.
    #[must_use]
    pub fn step(&self) -> u32 {
        self.step
    }
}

/// Result of a reveal through the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealResponse {
    /// What the engine did.
    pub outcome: RevealOutcome,
    /// Present after a mismatch: schedule `fire_clear` with it.
    pub clear_ticket: Option<ClearTicket>,
}

struct ActiveGame {
    theme: String,
    engine: MatchEngine,
}

/// Routes between screens and owns the current game.
pub struct SessionController {
    settings: GameSettings,
    themes: ThemeRegistry,
    rng: GameRng,
    screen: Screen,
    game: Option<ActiveGame>,
    final_steps: Option<u32>,
    generation: u64,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("screen", &self.screen)
            .field("theme", &self.game.as_ref().map(|g| g.theme.as_str()))
            .field("final_steps", &self.final_steps)
            .field("generation", &self.generation)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl SessionController {
    /// Create a controller on the start screen.
    ///
    /// Fails if any configured theme is invalid. A saved `rng_state` takes
    /// precedence over `seed`.
    pub fn new(settings: GameSettings) -> Result<Self> {
        let themes = ThemeRegistry::from_themes(settings.themes.iter().cloned())?;
        let rng = match (&settings.rng_state, settings.seed) {
            (Some(state), _) => GameRng::from_state(state),
            (None, Some(seed)) => GameRng::new(seed).for_context("deck"),
            (None, None) => GameRng::from_entropy().for_context("deck"),
        };

        Ok(Self {
            settings,
            themes,
            rng,
            screen: Screen::Start,
            game: None,
            final_steps: None,
            generation: 0,
            observers: Vec::new(),
        })
    }

    /// Register an observer for session events.
    ///
    /// Closures need explicit argument types:
    /// `|event: &SessionEvent, session: &SessionController| { .. }`.
    pub fn subscribe(&mut self, observer: impl SessionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// The active screen.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Settings this session was created with.
    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Playable themes in start-screen order.
    pub fn themes(&self) -> impl Iterator<Item = &Theme> {
        self.themes.iter()
    }

    /// Position of the deck shuffler.
    ///
    /// Hand it back through `GameSettings::with_rng_state` to deal the same
    /// decks from here on.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Current game generation; changes whenever a game is started or discarded.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a new game with a freshly shuffled deck.
    ///
    /// Allowed from the start screen, and from the playing screen to
    /// restart. From the results screen, `reset` first.
    pub fn start(&mut self, theme: &str) -> Result<()> {
        if self.screen == Screen::Results {
            return Err(GameError::WrongScreen {
                expected: Screen::Start,
                actual: self.screen,
            });
        }

        let images = self.themes.get(theme)?.images.clone();
        let deck = build_deck(&images, &mut self.rng);
        let engine = MatchEngine::with_policy(deck, self.settings.reveal_policy);

        self.generation += 1;
        self.final_steps = None;
        self.game = Some(ActiveGame {
            theme: theme.to_string(),
            engine,
        });
        tracing::info!(theme, generation = self.generation, "game started");
        self.set_screen(Screen::Playing);
        Ok(())
    }

    /// Reveal a card of the current game.
    pub fn reveal(&mut self, id: &CardInstanceId) -> Result<RevealResponse> {
        let generation = self.generation;
        let delay = self.settings.mismatch_delay;
        let engine = self.engine_mut()?;

        let outcome = engine.reveal_card(id)?;
        let game_over = engine.is_game_over();
        let steps = engine.steps_count();

        let clear_ticket =
            matches!(outcome, RevealOutcome::Mismatched { .. }).then_some(ClearTicket {
                generation,
                step: steps,
                delay,
            });

        if outcome != RevealOutcome::Ignored {
            self.notify(SessionEvent::Revealed(outcome.clone()));
        }
        if game_over && outcome.is_step() {
            self.notify(SessionEvent::GameOver { steps });
        }

        Ok(RevealResponse {
            outcome,
            clear_ticket,
        })
    }

    /// Clear a pending mismatch now, without a ticket.
    ///
    /// Returns `true` if a pair was turned back over.
    pub fn clear_reveal(&mut self) -> Result<bool> {
        let cleared = self.engine_mut()?.clear_reveal();
        if cleared {
            self.notify(SessionEvent::Cleared);
        }
        Ok(cleared)
    }

    /// Timer callback: clear the mismatch the ticket was issued for.
    ///
    /// Tickets from a discarded game, or for a pair that was already
    /// cleared, are ignored. Returns `true` if a pair was turned back over.
    pub fn fire_clear(&mut self, ticket: ClearTicket) -> bool {
        if ticket.generation != self.generation {
            tracing::warn!(
                ticket = ticket.generation,
                current = self.generation,
                "ignoring clear ticket from a discarded game"
            );
            return false;
        }
        let Some(engine) = self.engine() else {
            return false;
        };
        if ticket.step != engine.steps_count() {
            tracing::debug!(
                ticket = ticket.step,
                current = engine.steps_count(),
                "ignoring clear ticket for an earlier attempt"
            );
            return false;
        }
        self.clear_reveal().unwrap_or(false)
    }

    /// Leave a finished game for the results screen.
    ///
    /// Returns the final step count.
    pub fn finish(&mut self) -> Result<u32> {
        let engine = self.engine_mut()?;
        if !engine.is_game_over() {
            return Err(GameError::GameNotOver {
                matched: engine.matched().len(),
                total: engine.deck().len(),
            });
        }

        let steps = engine.steps_count();
        self.game = None;
        self.generation += 1;
        self.final_steps = Some(steps);
        tracing::info!(steps, "game finished");
        self.set_screen(Screen::Results);
        Ok(steps)
    }

    /// Discard any game and return to the start screen.
    pub fn reset(&mut self) {
        if self.game.take().is_some() {
            tracing::info!(generation = self.generation, "game discarded");
        }
        self.generation += 1;
        self.final_steps = None;
        self.set_screen(Screen::Start);
    }

    /// Step count of the finished game, while on the results screen.
    #[must_use]
    pub fn final_steps(&self) -> Option<u32> {
        self.final_steps
    }

    /// Leaderboard with the finished game ranked in.
    pub fn results(&self) -> Result<Vec<RankedRow>> {
        let steps = self.final_steps.ok_or(GameError::WrongScreen {
            expected: Screen::Results,
            actual: self.screen,
        })?;
        let current = ResultEntry::new(self.settings.current_run_name.clone(), steps);
        Ok(rank_entry(&self.settings.reference_results, current))
    }

    /// The current game's engine.
    #[must_use]
    pub fn engine(&self) -> Option<&MatchEngine> {
        self.game.as_ref().map(|g| &g.engine)
    }

    /// Theme of the current game.
    #[must_use]
    pub fn theme(&self) -> Option<&str> {
        self.game.as_ref().map(|g| g.theme.as_str())
    }

    /// Check whether the current game is won.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.engine().is_some_and(MatchEngine::is_game_over)
    }

    /// Render-ready view of the current game.
    #[must_use]
    pub fn board(&self) -> Option<BoardView> {
        self.game
            .as_ref()
            .map(|g| BoardView::from_engine(&g.theme, &g.engine))
    }

    fn engine_mut(&mut self) -> Result<&mut MatchEngine> {
        self.game
            .as_mut()
            .map(|g| &mut g.engine)
            .ok_or(GameError::NoActiveGame)
    }

    fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            tracing::info!(from = %self.screen, to = %screen, "screen changed");
            self.screen = screen;
        }
        self.notify(SessionEvent::ScreenChanged(screen));
    }

    fn notify(&mut self, event: SessionEvent) {
        let mut observers = std::mem::take(&mut self.observers);
        for observer in &mut observers {
            observer.on_event(&event, self);
        }
        // Observers registered during notification are kept.
        observers.append(&mut self.observers);
        self.observers = observers;
    }
}
