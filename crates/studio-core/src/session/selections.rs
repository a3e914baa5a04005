//! The four selection slots.

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, SelectionCatalogEntry};

/// One entry (or nothing) per category.
///
/// Picking replaces the slot; nothing ever accumulates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSelections {
    pub clothing: Option<SelectionCatalogEntry>,
    pub background: Option<SelectionCatalogEntry>,
    pub lighting: Option<SelectionCatalogEntry>,
    pub expression: Option<SelectionCatalogEntry>,
}

impl UserSelections {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, category: Category) -> &Option<SelectionCatalogEntry> {
        match category {
            Category::Clothing => &self.clothing,
            Category::Background => &self.background,
            Category::Lighting => &self.lighting,
            Category::Expression => &self.expression,
        }
    }

    fn slot_mut(&mut self, category: Category) -> &mut Option<SelectionCatalogEntry> {
        match category {
            Category::Clothing => &mut self.clothing,
            Category::Background => &mut self.background,
            Category::Lighting => &mut self.lighting,
            Category::Expression => &mut self.expression,
        }
    }

    /// Returns the entry held for a category.
    pub fn get(&self, category: Category) -> Option<&SelectionCatalogEntry> {
        self.slot(category).as_ref()
    }

    /// Stores an entry, returning whatever the slot held before.
    pub fn set(
        &mut self,
        category: Category,
        entry: SelectionCatalogEntry,
    ) -> Option<SelectionCatalogEntry> {
        self.slot_mut(category).replace(entry)
    }

    pub fn is_filled(&self, category: Category) -> bool {
        self.slot(category).is_some()
    }

    /// True when all four slots hold an entry.
    pub fn is_complete(&self) -> bool {
        Category::all().all(|category| self.is_filled(category))
    }

    /// Empties every slot.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
