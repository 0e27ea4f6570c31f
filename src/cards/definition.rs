//! Card images - static theme data.
//!
//! A `CardImage` is one picture of a theme. The deck builder turns every
//! image into two card instances; the image itself never changes.

use serde::{Deserialize, Serialize};

/// Stable identifier of a theme image.
///
/// Unique within a theme. Different themes may reuse the same ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(pub String);

impl ImageId {
    /// Create a new image ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One image of a theme.
///
/// ## Example
///
/// ```
/// use memory_match::cards::CardImage;
///
/// let image = CardImage::new("YdAqiUkUoWA", "img/cats-1.jpg")
///     .with_description("Sleeping cat");
///
/// assert_eq!(image.id.as_str(), "YdAqiUkUoWA");
/// assert_eq!(image.description, "Sleeping cat");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardImage {
    /// Base id, unique within the theme.
    pub id: ImageId,

    /// Image reference. Two cards match when their urls are equal.
    pub url: String,

    /// Alternative text for the image.
    #[serde(default)]
    pub description: String,
}

impl CardImage {
    /// Create an image with an empty description.
    #[must_use]
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: ImageId::new(id),
            url: url.into(),
            description: String::new(),
        }
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
