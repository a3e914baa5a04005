//! Infrastructure for Persona Studio: path resolution, configuration and
//! secret loading, catalog overrides, and image file I/O.

pub mod catalog_loader;
pub mod config_loader;
pub mod image_store;
pub mod paths;
pub mod secret_service;

pub use catalog_loader::load_catalog;
pub use config_loader::load_config;
pub use image_store::{load_image, save_image};
pub use paths::StudioPaths;
pub use secret_service::FileSecretService;
