//! Session controller tests.
//!
//! These tests drive the three screens through the public API the way a
//! shell would, including the mismatch timer contract.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use memory_match::cards::CardInstanceId;
use memory_match::core::{GameError, GameSettings, RevealPolicy};
use memory_match::ranking::ResultEntry;
use memory_match::rules::RevealOutcome;
use memory_match::session::{CardFace, Screen, SessionController, SessionEvent};

fn session() -> SessionController {
    SessionController::new(GameSettings::new().with_seed(7)).unwrap()
}

/// Ids of the card at `pos` and its partner.
fn partner_of(session: &SessionController, pos: usize) -> (CardInstanceId, CardInstanceId) {
    let deck = session.engine().unwrap().deck();
    let card = deck.card_at(pos).unwrap();
    let partner = deck
        .iter()
        .find(|c| c.url == card.url && c.id != card.id)
        .unwrap();
    (card.id.clone(), partner.id.clone())
}

/// Ids of two cards that do not match.
fn mismatch(session: &SessionController) -> (CardInstanceId, CardInstanceId) {
    let deck = session.engine().unwrap().deck();
    let first = deck.card_at(0).unwrap();
    let other = deck.iter().find(|c| c.url != first.url).unwrap();
    (first.id.clone(), other.id.clone())
}

fn play_perfect_game(session: &mut SessionController) {
    while !session.is_game_over() {
        let board = session.board().unwrap();
        let pos = board
            .cards
            .iter()
            .position(|c| c.face == CardFace::Hidden)
            .unwrap();
        let (a, b) = partner_of(session, pos);
        session.reveal(&a).unwrap();
        session.reveal(&b).unwrap();
    }
}

/// Test the start screen lists the built-in themes in order.
#[test]
fn test_start_screen_themes() {
    let session = session();
    assert_eq!(session.screen(), Screen::Start);

    let labels: Vec<_> = session.themes().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["Cats", "Flowers", "Cars"]);
}

/// Test a complete run from theme choice to a new game.
#[test]
fn test_complete_run() {
    let mut session = session();
    session.start("cars").unwrap();
    assert_eq!(session.screen(), Screen::Playing);

    let board = session.board().unwrap();
    assert_eq!(board.theme, "cars");
    assert_eq!(board.cards.len(), 12);
    assert_eq!(board.total_pairs, 6);
    assert!(board.cards.iter().all(|c| c.face == CardFace::Hidden && c.url.is_none()));

    // One wasted attempt, then perfect play.
    let (a, b) = mismatch(&session);
    session.reveal(&a).unwrap();
    let ticket = session.reveal(&b).unwrap().clear_ticket.unwrap();
    assert!(session.fire_clear(ticket));

    play_perfect_game(&mut session);
    assert!(session.board().unwrap().game_over);

    assert_eq!(session.finish().unwrap(), 7);
    assert_eq!(session.screen(), Screen::Results);

    let rows = session.results().unwrap();
    let order: Vec<_> = rows
        .iter()
        .map(|r| (r.entry.name.as_str(), r.entry.steps_count))
        .collect();
    assert_eq!(
        order,
        vec![("Your result", 7), ("Vasya", 12), ("Anya", 16), ("Petya", 19)]
    );

    session.reset();
    assert_eq!(session.screen(), Screen::Start);
    assert!(session.board().is_none());
}

/// Test that finish is refused until every pair is found.
#[test]
fn test_finish_requires_game_over() {
    let mut session = session();
    session.start("cats").unwrap();

    let (a, b) = partner_of(&session, 0);
    session.reveal(&a).unwrap();
    session.reveal(&b).unwrap();

    assert_eq!(
        session.finish(),
        Err(GameError::GameNotOver {
            matched: 2,
            total: 12
        })
    );
    assert_eq!(session.screen(), Screen::Playing);
}

/// Test that a timer from a discarded game cannot touch the next one.
#[test]
fn test_stale_ticket_after_reset() {
    let mut session = session();
    session.start("cats").unwrap();
    let (a, b) = mismatch(&session);
    session.reveal(&a).unwrap();
    let stale = session.reveal(&b).unwrap().clear_ticket.unwrap();

    session.reset();
    session.start("flowers").unwrap();
    let (a, b) = mismatch(&session);
    session.reveal(&a).unwrap();
    session.reveal(&b).unwrap();

    assert!(!session.fire_clear(stale));
    let revealed = session
        .board()
        .unwrap()
        .cards
        .iter()
        .filter(|c| c.face == CardFace::Revealed)
        .count();
    assert_eq!(revealed, 2);
}

/// Test that an unknown card id is rejected without side effects.
#[test]
fn test_reveal_foreign_card() {
    let mut session = session();
    session.start("cats").unwrap();
    let (a, _) = partner_of(&session, 0);

    session.reset();
    session.start("cars").unwrap();
    let foreign = CardInstanceId::new(a.base.clone(), 5);

    assert_eq!(
        session.reveal(&foreign),
        Err(GameError::UnknownCard { id: foreign.clone() })
    );
    assert_eq!(session.engine().unwrap().steps_count(), 0);
}

/// Test settings loaded from TOML drive the session.
#[test]
fn test_session_from_toml() {
    let text = r#"
        mismatch_delay_ms = 300
        reveal_policy = "auto-clear"
        current_run_name = "Me"
        seed = 1

        [[themes]]
        name = "shapes"
        label = "Shapes"
        images = [
            { id = "sq", url = "img/square.png" },
            { id = "ci", url = "img/circle.png" },
        ]

        [[reference_results]]
        name = "Ana"
        stepsCount = 2
    "#;
    let mut session = SessionController::new(GameSettings::from_toml_str(text).unwrap()).unwrap();
    assert_eq!(session.settings().reveal_policy, RevealPolicy::AutoClear);

    session.start("shapes").unwrap();
    let (a, b) = mismatch(&session);
    session.reveal(&a).unwrap();
    let ticket = session.reveal(&b).unwrap().clear_ticket.unwrap();
    assert_eq!(ticket.delay, Duration::from_millis(300));

    // AutoClear: revealing on top of the pending pair starts a new attempt.
    let (_, partner) = partner_of(&session, 0);
    let response = session.reveal(&partner).unwrap();
    assert_eq!(response.outcome, RevealOutcome::Revealed(partner.clone()));
    assert!(response.clear_ticket.is_none());

    play_perfect_game(&mut session);
    let steps = session.finish().unwrap();

    let rows = session.results().unwrap();
    assert_eq!(rows.len(), 2);
    let current = rows.iter().find(|r| r.is_current).unwrap();
    assert_eq!(current.entry, ResultEntry::new("Me", steps));
}

/// Test observers see screen changes and game over exactly once.
#[test]
fn test_observer_event_stream() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);

    let mut session = session();
    session.subscribe(move |event: &SessionEvent, session: &SessionController| {
        sink.borrow_mut().push((event.clone(), session.screen()));
    });

    session.start("cats").unwrap();
    play_perfect_game(&mut session);
    session.finish().unwrap();
    session.reset();

    let log = log.borrow();
    let screens: Vec<_> = log
        .iter()
        .filter_map(|(e, _)| match e {
            SessionEvent::ScreenChanged(s) => Some(*s),
            _ => None,
        })
        .collect();
    assert_eq!(screens, vec![Screen::Playing, Screen::Results, Screen::Start]);

    let game_overs: Vec<_> = log
        .iter()
        .filter(|(e, _)| matches!(e, SessionEvent::GameOver { .. }))
        .collect();
    assert_eq!(game_overs.len(), 1);
    assert_eq!(game_overs[0].0, SessionEvent::GameOver { steps: 6 });
    assert_eq!(game_overs[0].1, Screen::Playing);
}

/// Test that under AutoClear a timer from an earlier mismatch leaves the
/// newer mismatched pair on screen.
#[test]
fn test_earlier_ticket_cannot_clear_newer_pair() {
    let settings = GameSettings::new()
        .with_seed(3)
        .with_reveal_policy(RevealPolicy::AutoClear);
    let mut session = SessionController::new(settings).unwrap();
    session.start("cats").unwrap();

    let deck = session.engine().unwrap().deck();
    let a = deck.card_at(0).unwrap().clone();
    let b = deck.iter().find(|c| c.url != a.url).unwrap().clone();
    let c = deck
        .iter()
        .find(|c| c.url != a.url && c.url != b.url)
        .unwrap()
        .clone();

    session.reveal(&a.id).unwrap();
    let first = session.reveal(&b.id).unwrap().clear_ticket.unwrap();

    session.reveal(&c.id).unwrap();
    let second = session.reveal(&a.id).unwrap().clear_ticket.unwrap();
    assert_eq!(first.generation(), second.generation());

    assert!(!session.fire_clear(first));
    assert_eq!(session.engine().unwrap().revealed().len(), 2);

    assert!(session.fire_clear(second));
    assert!(session.engine().unwrap().revealed().is_empty());
}

/// Test that a saved shuffler position deals the same next deck.
#[test]
fn test_restored_session_deals_same_deck() {
    let mut first = session();
    first.start("flowers").unwrap();
    let saved = first.rng_state();
    first.reset();
    first.start("flowers").unwrap();

    let mut resumed = SessionController::new(GameSettings::new().with_rng_state(saved)).unwrap();
    resumed.start("flowers").unwrap();

    assert_eq!(
        resumed.engine().unwrap().deck().cards(),
        first.engine().unwrap().deck().cards()
    );
}
