//! Session domain module.
//!
//! # Module Structure
//!
//! - `step`: `WizardStep` and its static transition table
//! - `selections`: `UserSelections`, the four selection slots
//! - `state`: `SessionState`, the one mutable object a controller owns

mod selections;
mod state;
mod step;

// Re-export public API
pub use selections::UserSelections;
pub use state::SessionState;
pub use step::WizardStep;
