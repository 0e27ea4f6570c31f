//! Deck construction and shuffling.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardImage, CardInstanceId};
use crate::core::{GameError, GameRng, Result};

/// How many cards of each image a deck holds.
pub const COPIES_PER_IMAGE: u8 = 2;

/// An ordered sequence of cards for one game.
///
/// Keeps an id index so the match engine can resolve reveals in O(1).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Deck {
    cards: Vec<Card>,
    index: FxHashMap<CardInstanceId, usize>,
}

impl Deck {
    /// Create a deck with the cards in the given order.
    ///
    /// Fails with `DuplicateCard` if two cards share an id, since such a
    /// deck could never be fully matched.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self> {
        let mut index = FxHashMap::default();
        for (pos, card) in cards.iter().enumerate() {
            if index.insert(card.id.clone(), pos).is_some() {
                return Err(GameError::DuplicateCard {
                    id: card.id.clone(),
                });
            }
        }
        Ok(Self { cards, index })
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs (distinct images).
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len() / COPIES_PER_IMAGE as usize
    }

    /// Look up a card by id.
    #[must_use]
    pub fn get(&self, id: &CardInstanceId) -> Option<&Card> {
        self.index.get(id).map(|&pos| &self.cards[pos])
    }

    /// Board position of a card.
    #[must_use]
    pub fn position(&self, id: &CardInstanceId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Check if a card belongs to this deck.
    #[must_use]
    pub fn contains(&self, id: &CardInstanceId) -> bool {
        self.index.contains_key(id)
    }

    /// Card at a board position.
    #[must_use]
    pub fn card_at(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    /// All cards in board order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Iterate over cards in board order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

impl TryFrom<Vec<Card>> for Deck {
    type Error = GameError;

    fn try_from(cards: Vec<Card>) -> Result<Self> {
        Self::from_cards(cards)
    }
}

impl From<Deck> for Vec<Card> {
    fn from(deck: Deck) -> Self {
        deck.cards
    }
}

/// Build a shuffled deck holding every image exactly twice.
///
/// The originals become copy 0 and the duplicates copy 1, so all 2N ids
/// are distinct. An empty image list yields an empty deck.
///
/// ## Example
///
/// ```
/// use memory_match::cards::CardImage;
/// use memory_match::core::GameRng;
/// use memory_match::deck::build_deck;
///
/// let images = vec![CardImage::new("1", "x"), CardImage::new("2", "y")];
/// let deck = build_deck(&images, &mut GameRng::new(42));
///
/// assert_eq!(deck.len(), 4);
/// assert_eq!(deck.iter().filter(|c| c.url == "x").count(), 2);
/// ```
#[must_use]
pub fn build_deck(images: &[CardImage], rng: &mut GameRng) -> Deck {
    let mut cards: Vec<Card> = (0..COPIES_PER_IMAGE)
        .flat_map(|copy| images.iter().map(move |image| Card::from_image(image, copy)))
        .collect();

    rng.shuffle(&mut cards);

    tracing::debug!(images = images.len(), cards = cards.len(), "built deck");
    let index = cards
        .iter()
        .enumerate()
        .map(|(pos, card)| (card.id.clone(), pos))
        .collect();
    Deck { cards, index }
}
