//! Theme registry for image-set lookup.
//!
//! The `ThemeRegistry` stores every playable theme and resolves a theme
//! name to its images. Unknown names are an error, never an empty deck.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::definition::CardImage;
use crate::core::{GameError, Result};

/// A named image set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Lookup key (e.g. "cats").
    pub name: String,

    /// Text shown on the start screen.
    pub label: String,

    /// Distinct images; each becomes one pair of cards.
    #[serde(default)]
    pub images: Vec<CardImage>,
}

impl Theme {
    /// Create an empty theme.
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            images: Vec::new(),
        }
    }

    /// Add an image (builder pattern).
    #[must_use]
    pub fn with_image(mut self, image: CardImage) -> Self {
        self.images.push(image);
        self
    }

    /// Check that ids and urls are unique within the theme.
    pub fn validate(&self) -> Result<()> {
        let mut ids = FxHashSet::default();
        let mut urls = FxHashSet::default();

        for image in &self.images {
            if !ids.insert(&image.id) {
                return Err(GameError::DuplicateImage {
                    theme: self.name.clone(),
                    id: image.id.to_string(),
                });
            }
            if !urls.insert(image.url.as_str()) {
                return Err(GameError::DuplicateUrl {
                    theme: self.name.clone(),
                    url: image.url.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Registry of themes, kept in registration order.
///
/// ## Example
///
/// ```
/// use memory_match::cards::{builtin_themes, ThemeRegistry};
///
/// let registry = ThemeRegistry::from_themes(builtin_themes()).unwrap();
///
/// assert_eq!(registry.get("cats").unwrap().images.len(), 6);
/// assert!(registry.get("dogs").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ThemeRegistry {
    themes: FxHashMap<String, Theme>,
    order: Vec<String>,
}

impl ThemeRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a theme list, validating each theme.
    pub fn from_themes(themes: impl IntoIterator<Item = Theme>) -> Result<Self> {
        let mut registry = Self::new();
        for theme in themes {
            registry.register(theme)?;
        }
        Ok(registry)
    }

    /// Register a theme.
    ///
    /// A theme with an existing name replaces the old one in place.
    pub fn register(&mut self, theme: Theme) -> Result<()> {
        theme.validate()?;

        if self.themes.contains_key(&theme.name) {
            tracing::warn!(theme = %theme.name, "replacing previously registered theme");
        } else {
            self.order.push(theme.name.clone());
        }
        self.themes.insert(theme.name.clone(), theme);
        Ok(())
    }

    /// Get a theme by name.
    pub fn get(&self, name: &str) -> Result<&Theme> {
        self.themes.get(name).ok_or_else(|| GameError::ThemeNotFound {
            theme: name.to_string(),
        })
    }

    /// Check if a theme is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    /// Get the number of registered themes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Iterate over themes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Theme> {
        self.order.iter().filter_map(move |name| self.themes.get(name))
    }
}

const BUILTIN_IMAGE_IDS: [&str; 6] = [
    "YdAqiUkUoWA",
    "hX_hf2lPpUU",
    "w1JE5duY62M",
    "3tYZjGSBwbk",
    "NoXUQ54pDac",
    "OZhYgZh0bAg",
];

/// The themes shipped with the game: cats, flowers and cars, six images each.
#[must_use]
pub fn builtin_themes() -> Vec<Theme> {
    [("cats", "Cats"), ("flowers", "Flowers"), ("cars", "Cars")]
        .into_iter()
        .map(|(name, label)| {
            BUILTIN_IMAGE_IDS
                .iter()
                .enumerate()
                .fold(Theme::new(name, label), |theme, (i, id)| {
                    theme.with_image(CardImage::new(*id, format!("img/{name}-{}.jpg", i + 1)))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_themes() {
        let themes = builtin_themes();
        let names: Vec<_> = themes.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["cats", "flowers", "cars"]);

        for theme in &themes {
            assert_eq!(theme.images.len(), 6);
            assert!(theme.validate().is_ok());
        }
        assert_eq!(themes[2].images[0].url, "img/cars-1.jpg");
    }

    #[test]
    fn test_register_and_get() {
        let registry = ThemeRegistry::from_themes(builtin_themes()).unwrap();

        assert_eq!(registry.len(), 3);
        assert!(registry.contains("flowers"));
        assert_eq!(registry.get("flowers").unwrap().label, "Flowers");
    }

    #[test]
    fn test_unknown_theme() {
        let registry = ThemeRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(
            registry.get("dogs"),
            Err(GameError::ThemeNotFound {
                theme: "dogs".to_string()
            })
        );
    }

    #[test]
    fn test_iteration_order() {
        let registry = ThemeRegistry::from_themes(vec![
            Theme::new("b", "B"),
            Theme::new("a", "A"),
            Theme::new("c", "C"),
        ])
        .unwrap();

        let names: Vec<_> = registry.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_reregister_replaces_in_place() {
        let mut registry =
            ThemeRegistry::from_themes(vec![Theme::new("a", "A"), Theme::new("b", "B")]).unwrap();
        registry.register(Theme::new("a", "Again")).unwrap();

        let labels: Vec<_> = registry.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["Again", "B"]);
    }

    #[test]
    fn test_duplicate_image_id_rejected() {
        let theme = Theme::new("t", "T")
            .with_image(CardImage::new("x", "img/1.jpg"))
            .with_image(CardImage::new("x", "img/2.jpg"));

        assert!(matches!(
            ThemeRegistry::from_themes(vec![theme]),
            Err(GameError::DuplicateImage { .. })
        ));
    }

    #[test]
    fn test_duplicate_url_rejected() {
        let theme = Theme::new("t", "T")
            .with_image(CardImage::new("x", "img/1.jpg"))
            .with_image(CardImage::new("y", "img/1.jpg"));

        assert!(matches!(
            theme.validate(),
            Err(GameError::DuplicateUrl { url, .. }) if url == "img/1.jpg"
        ));
    }
}
