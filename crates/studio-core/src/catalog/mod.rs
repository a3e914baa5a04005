//! Catalog domain module.
//!
//! # Module Structure
//!
//! - `model`: `Category`, `SelectionCatalogEntry`, `IntroSlide`, `Catalog`
//! - `preset`: the built-in catalog
//!
//! # Usage
//!
//! ```ignore
//! use studio_core::catalog::{Catalog, Category, get_default_catalog};
//! ```

mod model;
mod preset;

// Re-export public API
pub use model::{Catalog, Category, IntroSlide, SelectionCatalogEntry};
pub use preset::get_default_catalog;
