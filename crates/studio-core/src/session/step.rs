//! Wizard step enumeration and its static transition table.

use serde::{Deserialize, Serialize};

use crate::catalog::Category;

/// A position in the wizard.
///
/// Steps are linearly ordered:
/// `Intro(0..k) → AwaitUpload → Scanning → PickClothing → PickBackground →
/// PickLighting → PickExpression → Synthesizing → ShowResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum WizardStep {
    /// Introduction slide `slide` of `k`.
    Intro { slide: usize },
    AwaitUpload,
    /// Face validation in flight.
    Scanning,
    PickClothing,
    PickBackground,
    PickLighting,
    PickExpression,
    /// Synthesis in flight.
    Synthesizing,
    ShowResult,
}

impl WizardStep {
    /// First step for a catalog with `intro_len` slides.
    pub fn initial(intro_len: usize) -> Self {
        if intro_len == 0 {
            Self::AwaitUpload
        } else {
            Self::Intro { slide: 0 }
        }
    }

    /// The category filled on this step, if it is a pick step.
    pub fn category(self) -> Option<Category> {
        match self {
            Self::PickClothing => Some(Category::Clothing),
            Self::PickBackground => Some(Category::Background),
            Self::PickLighting => Some(Category::Lighting),
            Self::PickExpression => Some(Category::Expression),
            _ => None,
        }
    }

    /// Whether a remote call is issued on entering this step.
    pub fn awaits_remote(self) -> bool {
        matches!(self, Self::Scanning | Self::Synthesizing)
    }

    /// The pick step following this one. `PickExpression` has none: it
    /// continues into synthesis instead.
    pub fn next_pick(self) -> Option<Self> {
        match self {
            Self::PickClothing => Some(Self::PickBackground),
            Self::PickBackground => Some(Self::PickLighting),
            Self::PickLighting => Some(Self::PickExpression),
            _ => None,
        }
    }

    /// Target of a back action, or `None` where back is a no-op.
    pub fn previous(self, intro_len: usize) -> Option<Self> {
        match self {
            Self::Intro { slide: 0 } => None,
            Self::Intro { slide } => Some(Self::Intro { slide: slide - 1 }),
            Self::AwaitUpload => intro_len
                .checked_sub(1)
                .map(|slide| Self::Intro { slide }),
            Self::Scanning => Some(Self::AwaitUpload),
            Self::PickClothing => Some(Self::AwaitUpload),
            Self::PickBackground => Some(Self::PickClothing),
            Self::PickLighting => Some(Self::PickBackground),
            Self::PickExpression => Some(Self::PickLighting),
            Self::Synthesizing => None,
            Self::ShowResult => Some(Self::PickExpression),
        }
    }

    /// Whether the step is a member of the enumeration for `intro_len` slides.
    pub fn is_valid(self, intro_len: usize) -> bool {
        match self {
            Self::Intro { slide } => slide < intro_len,
            _ => true,
        }
    }

    /// Header shown for this step.
    pub fn title(self) -> &'static str {
        match self {
            Self::PickClothing => "Step 1: Wardrobe",
            Self::PickBackground => "Step 2: Location",
            Self::PickLighting => "Step 3: Vision",
            Self::PickExpression => "Step 4: Mood",
            Self::AwaitUpload => "Initialize",
            Self::Scanning => "Analyzing Face",
            Self::Synthesizing => "Synthesizing Masterpiece",
            Self::ShowResult => "Masterpiece",
            Self::Intro { .. } => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_without_intro_is_upload() {
        assert_eq!(WizardStep::initial(0), WizardStep::AwaitUpload);
        assert_eq!(WizardStep::initial(4), WizardStep::Intro { slide: 0 });
    }

    #[test]
    fn test_back_from_upload_lands_on_last_slide() {
        assert_eq!(
            WizardStep::AwaitUpload.previous(4),
            Some(WizardStep::Intro { slide: 3 })
        );
        assert_eq!(WizardStep::AwaitUpload.previous(0), None);
    }

    #[test]
    fn test_back_is_noop_at_first_slide_and_while_synthesizing() {
        assert_eq!(WizardStep::Intro { slide: 0 }.previous(4), None);
        assert_eq!(WizardStep::Synthesizing.previous(4), None);
    }

    #[test]
    fn test_pick_steps_map_to_categories_in_order() {
        let steps = [
            WizardStep::PickClothing,
            WizardStep::PickBackground,
            WizardStep::PickLighting,
            WizardStep::PickExpression,
        ];
        for (step, category) in steps.into_iter().zip(Category::all()) {
            assert_eq!(step.category(), Some(category));
        }
        assert_eq!(WizardStep::ShowResult.category(), None);
    }

    #[test]
    fn test_pick_chain_ends_at_expression() {
        let mut step = WizardStep::PickClothing;
        let mut visited = vec![step];
        while let Some(next) = step.next_pick() {
            step = next;
            visited.push(step);
        }
        assert_eq!(visited.len(), 4);
        assert_eq!(step, WizardStep::PickExpression);
    }

    #[test]
    fn test_previous_never_leaves_enumeration() {
        let intro_len = 3;
        let steps = [
            WizardStep::Intro { slide: 0 },
            WizardStep::Intro { slide: 2 },
            WizardStep::AwaitUpload,
            WizardStep::Scanning,
            WizardStep::PickClothing,
            WizardStep::PickBackground,
            WizardStep::PickLighting,
            WizardStep::PickExpression,
            WizardStep::Synthesizing,
            WizardStep::ShowResult,
        ];
        for step in steps {
            if let Some(prev) = step.previous(intro_len) {
                assert!(prev.is_valid(intro_len), "{step:?} -> {prev:?}");
            }
        }
    }

    #[test]
    fn test_serializes_tagged() {
        let json = serde_json::to_string(&WizardStep::Intro { slide: 2 }).unwrap();
        assert_eq!(json, r#"{"type":"intro","data":{"slide":2}}"#);
        let json = serde_json::to_string(&WizardStep::PickLighting).unwrap();
        assert_eq!(json, r#"{"type":"pick_lighting"}"#);
    }
}
