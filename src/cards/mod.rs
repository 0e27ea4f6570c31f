//! Card system: theme images, card instances, and the theme registry.
//!
//! ## Key Types
//!
//! - `ImageId`: Base identifier of a theme image
//! - `CardImage`: Static image data (id, url, description)
//! - `CardInstanceId`: Collision-proof id of one card on the board
//! - `Card`: A card in a deck
//! - `Theme` / `ThemeRegistry`: Named image sets and their lookup

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardImage, ImageId};
pub use instance::{Card, CardInstanceId};
pub use registry::{builtin_themes, Theme, ThemeRegistry};
