//! Domain core for Persona Studio.
//!
//! Holds the data model shared by the wizard controller and the
//! transformation client: the selection catalog, the session state and its
//! steps, encoded images, configuration types, and the
//! [`TransformationService`] trait.

pub mod catalog;
pub mod config;
pub mod error;
pub mod image;
pub mod secret;
pub mod session;
pub mod transformation;

// Re-export common types
pub use error::{Result, StudioError};
pub use image::EncodedImage;
pub use transformation::TransformationService;
