//! Application layer for Persona Studio.
//!
//! - `wizard`: the `WizardController` step state machine
//! - `bootstrap`: wiring of configuration, catalog, secrets and the Gemini
//!   client into a ready controller

pub mod bootstrap;
pub mod wizard;

pub use bootstrap::StudioBootstrap;
pub use wizard::{
    FACE_NOT_VISIBLE_MESSAGE, SYNTHESIS_FAILED_NOTICE, WizardController, WizardEvent,
};
