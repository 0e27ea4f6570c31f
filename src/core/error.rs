//! Error types for the memory-match engine.
//!
//! Every error is local and recoverable: the shell either reports it or
//! prevents the illegal action up front (e.g. ignoring clicks on matched cards).

use thiserror::Error;

use crate::cards::CardInstanceId;
use crate::session::Screen;

/// Result type alias using `GameError`.
pub type Result<T> = std::result::Result<T, GameError>;

/// Errors raised by the deck builder, match engine and session controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// No image set is registered under this theme name.
    #[error("unknown theme '{theme}'")]
    ThemeNotFound { theme: String },

    /// The card id does not belong to the current deck.
    #[error("card {id} is not part of the current deck")]
    UnknownCard { id: CardInstanceId },

    /// A hand-built deck holds the same card id twice.
    #[error("card {id} appears more than once in the deck")]
    DuplicateCard { id: CardInstanceId },

    /// A mismatched pair is still face-up and must be cleared first.
    #[error("cards {first} and {second} are still revealed; clear them before revealing another card")]
    RevealPending {
        first: CardInstanceId,
        second: CardInstanceId,
    },

    /// Results were requested before every card was matched.
    #[error("game is not over: {matched} of {total} cards matched")]
    GameNotOver { matched: usize, total: usize },

    /// The operation needs a game in progress.
    #[error("no game in progress")]
    NoActiveGame,

    /// The operation is not available on the current screen.
    #[error("operation requires the {expected} screen, but the {actual} screen is active")]
    WrongScreen { expected: Screen, actual: Screen },

    /// A theme lists the same base image id twice.
    #[error("theme '{theme}' contains image id '{id}' more than once")]
    DuplicateImage { theme: String, id: String },

    /// Two images of one theme share a url, so their cards would all match each other.
    #[error("theme '{theme}' uses image url '{url}' more than once")]
    DuplicateUrl { theme: String, url: String },

    /// The settings file could not be read or parsed.
    #[error("invalid settings: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::ImageId;

    #[test]
    fn test_error_messages() {
        let err = GameError::ThemeNotFound {
            theme: "dogs".to_string(),
        };
        assert_eq!(err.to_string(), "unknown theme 'dogs'");

        let err = GameError::UnknownCard {
            id: CardInstanceId::new(ImageId::new("abc"), 1),
        };
        assert_eq!(err.to_string(), "card abc#1 is not part of the current deck");

        let err = GameError::DuplicateCard {
            id: CardInstanceId::new(ImageId::new("abc"), 0),
        };
        assert_eq!(err.to_string(), "card abc#0 appears more than once in the deck");

        let err = GameError::GameNotOver { matched: 4, total: 12 };
        assert_eq!(err.to_string(), "game is not over: 4 of 12 cards matched");

        let err = GameError::WrongScreen {
            expected: Screen::Playing,
            actual: Screen::Start,
        };
        assert_eq!(
            err.to_string(),
            "operation requires the playing screen, but the start screen is active"
        );
    }
}
