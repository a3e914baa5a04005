//! Selection catalog domain models.
//!
//! The catalog is read-only configuration supplied at startup: the intro
//! slides shown before upload and the styling options offered per category.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::{Result, StudioError};

/// The four selection slots, in the order the wizard asks for them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Category {
    Clothing,
    Background,
    /// Lighting and photographic style. Older catalogs call this `photoshoot`.
    #[serde(alias = "photoshoot")]
    #[strum(to_string = "lighting", serialize = "photoshoot")]
    Lighting,
    Expression,
}

impl Category {
    /// Human label used in headers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Clothing => "Wardrobe",
            Self::Background => "Environment",
            Self::Lighting => "Vision",
            Self::Expression => "Mood",
        }
    }

    /// Short prompt shown under the header.
    pub fn subtitle(self) -> &'static str {
        match self {
            Self::Clothing => "Choose your AI attire",
            Self::Background => "Select the location",
            Self::Lighting => "Define the cinematic lighting",
            Self::Expression => "How should the AI adapt your face?",
        }
    }

    /// All categories in wizard order.
    pub fn all() -> impl Iterator<Item = Category> {
        Self::iter()
    }
}

/// One pickable styling option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionCatalogEntry {
    /// Stable identifier, unique within its category (e.g. `c1`).
    pub id: String,
    /// Name shown to the user.
    pub display_name: String,
    /// Reference to a preview image (URL or asset path).
    pub preview_asset_ref: String,
    /// Natural-language phrase injected into the synthesis instruction.
    pub instruction_fragment: String,
    /// Optional marketing badge ("Trending", "New", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

impl SelectionCatalogEntry {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        preview_asset_ref: impl Into<String>,
        instruction_fragment: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            preview_asset_ref: preview_asset_ref.into(),
            instruction_fragment: instruction_fragment.into(),
            badge: None,
        }
    }

    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }
}

/// A slide of the introduction sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntroSlide {
    pub title: String,
    pub description: String,
    pub image_ref: String,
}

/// The complete, immutable catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub intro_slides: Vec<IntroSlide>,
    #[serde(default)]
    pub clothing: Vec<SelectionCatalogEntry>,
    #[serde(default)]
    pub background: Vec<SelectionCatalogEntry>,
    #[serde(default, alias = "photoshoot")]
    pub lighting: Vec<SelectionCatalogEntry>,
    #[serde(default)]
    pub expression: Vec<SelectionCatalogEntry>,
}

impl Catalog {
    /// Returns the options offered for a category.
    pub fn options(&self, category: Category) -> &[SelectionCatalogEntry] {
        match category {
            Category::Clothing => &self.clothing,
            Category::Background => &self.background,
            Category::Lighting => &self.lighting,
            Category::Expression => &self.expression,
        }
    }

    /// Finds an option by id within a category.
    pub fn find(&self, category: Category, id: &str) -> Option<&SelectionCatalogEntry> {
        self.options(category).iter().find(|entry| entry.id == id)
    }

    /// Number of intro slides (`k` in `Intro(0..k)`).
    pub fn intro_len(&self) -> usize {
        self.intro_slides.len()
    }

    /// Checks that every category is non-empty, ids are unique within their
    /// category, and no entry has a blank id or instruction fragment.
    pub fn validate(&self) -> Result<()> {
        for category in Category::all() {
            let options = self.options(category);
            if options.is_empty() {
                return Err(StudioError::config(format!(
                    "catalog category '{category}' has no options"
                )));
            }

            let mut seen = std::collections::HashSet::new();
            for entry in options {
                if entry.id.trim().is_empty() {
                    return Err(StudioError::config(format!(
                        "catalog category '{category}' contains an entry with an empty id"
                    )));
                }
                if entry.instruction_fragment.trim().is_empty() {
                    return Err(StudioError::config(format!(
                        "catalog entry '{category}/{}' has an empty instruction fragment",
                        entry.id
                    )));
                }
                if !seen.insert(entry.id.as_str()) {
                    return Err(StudioError::config(format!(
                        "catalog category '{category}' lists id '{}' more than once",
                        entry.id
                    )));
                }
            }
        }
        Ok(())
    }
}
