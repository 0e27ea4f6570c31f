//! Card instances - the cards actually laid out on the board.
//!
//! Every image appears twice in a deck. Each copy gets its own
//! `CardInstanceId` so that reveal and match tracking is unambiguous.
//!
//! ## Instance IDs
//!
//! An instance id pairs the image's base id with an explicit copy index
//! instead of appending a suffix to the base id. A base id that already
//! looks like a suffixed id (`"cat-1"`) can therefore never collide with
//! another card's id.

use serde::{Deserialize, Serialize};

use super::definition::{CardImage, ImageId};

/// Unique identifier of one card within a deck.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardInstanceId {
    /// Id of the image this card shows.
    pub base: ImageId,

    /// Which copy of the image (0 or 1 in a standard deck).
    pub copy: u8,
}

impl CardInstanceId {
    /// Create a new instance ID.
    #[must_use]
    pub fn new(base: ImageId, copy: u8) -> Self {
        Self { base, copy }
    }
}

impl std::fmt::Display for CardInstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.base, self.copy)
    }
}

/// A card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique id within the deck.
    pub id: CardInstanceId,

    /// Image reference; equal urls form a pair.
    pub url: String,

    /// Alternative text for the image.
    pub description: String,
}

impl Card {
    /// Create copy number `copy` of an image.
    #[must_use]
    pub fn from_image(image: &CardImage, copy: u8) -> Self {
        Self {
            id: CardInstanceId::new(image.id.clone(), copy),
            url: image.url.clone(),
            description: image.description.clone(),
        }
    }

    /// Check whether two cards show the same image.
    #[must_use]
    pub fn matches(&self, other: &Card) -> bool {
        self.url == other.url
    }
}
