//! The single per-controller session state.

use serde::{Deserialize, Serialize};

use super::selections::UserSelections;
use super::step::WizardStep;
use crate::image::EncodedImage;

/// Everything the wizard knows about the current session.
///
/// Owned by one controller and mutated only by it. A clone doubles as the
/// read-only snapshot handed to views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub current_step: WizardStep,
    pub source_image: Option<EncodedImage>,
    /// Set only after a successful synthesis.
    pub result_image: Option<EncodedImage>,
    /// Inline message shown on the upload step.
    pub error_message: Option<String>,
    /// True while a remote call is outstanding.
    pub in_progress: bool,
    pub selections: UserSelections,
    /// On the result step: show the source instead of the result.
    pub showing_source: bool,
}

impl SessionState {
    pub fn new(intro_len: usize) -> Self {
        Self {
            current_step: WizardStep::initial(intro_len),
            source_image: None,
            result_image: None,
            error_message: None,
            in_progress: false,
            selections: UserSelections::default(),
            showing_source: false,
        }
    }

    /// The image a before/after view should show right now.
    pub fn displayed_image(&self) -> Option<&EncodedImage> {
        if self.showing_source {
            self.source_image.as_ref()
        } else {
            self.result_image.as_ref().or(self.source_image.as_ref())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = SessionState::new(4);
        assert_eq!(state.current_step, WizardStep::Intro { slide: 0 });
        assert!(state.source_image.is_none());
        assert!(state.result_image.is_none());
        assert!(state.error_message.is_none());
        assert!(!state.in_progress);
        assert!(!state.selections.is_complete());
    }

    #[test]
    fn test_displayed_image_follows_toggle() {
        let mut state = SessionState::new(0);
        state.source_image = Some(EncodedImage::new("image/jpeg", "c291cmNl"));
        state.result_image = Some(EncodedImage::png("cmVzdWx0"));

        assert_eq!(state.displayed_image().unwrap().base64_data(), "cmVzdWx0");
        state.showing_source = true;
        assert_eq!(state.displayed_image().unwrap().base64_data(), "c291cmNl");
    }
}
