//! Natural-language instructions sent to the model.

use studio_core::catalog::Category;
use studio_core::session::UserSelections;

/// Yes/no question asked of the validation model.
pub const FACE_CHECK_INSTRUCTION: &str = "Is there a single, clear, front-facing human face visible in this image? Respond with ONLY 'true' or 'false'.";

/// Token whose presence in the validation answer means "face found".
pub const AFFIRMATIVE_TOKEN: &str = "true";

/// Aspect ratio requested for every synthesized image.
pub const TARGET_ASPECT_RATIO: &str = "3:4";

/// Phrase used when a slot is unexpectedly empty.
pub fn fallback_fragment(category: Category) -> &'static str {
    match category {
        Category::Clothing => "original clothing",
        Category::Background => "original background",
        Category::Lighting => "natural lighting",
        Category::Expression => "original expression",
    }
}

fn fragment(selections: &UserSelections, category: Category) -> &str {
    selections
        .get(category)
        .map(|entry| entry.instruction_fragment.as_str())
        .unwrap_or_else(|| fallback_fragment(category))
}

/// Composes the identity-lock synthesis instruction from the four slots.
pub fn build_transform_instruction(selections: &UserSelections) -> String {
    format!(
        "IDENTITY LOCK PROTOCOL:\n\
         Source: Uploaded Photo.\n\
         Target: High-end AI transformation.\n\
         \n\
         TRANSFORMATION PARAMETERS:\n\
         - Identity: STRICTLY preserve the person's facial structure, features, eye color, and unique facial mapping.\n\
         - Clothing: {clothing}.\n\
         - Environment: {background}.\n\
         - Lighting & Style: {lighting}.\n\
         - Expression: {expression}.\n\
         \n\
         MANDATORY QUALITY RULES:\n\
         1. This is the SAME person. Do not create a new person.\n\
         2. The face must be clearly visible and in focus.\n\
         3. Ultra-realistic skin textures, no AI artifacts.\n\
         4. Masterpiece studio lighting. High definition.\n\
         5. Output ONLY the resulting transformed image.\n",
        clothing = fragment(selections, Category::Clothing),
        background = fragment(selections, Category::Background),
        lighting = fragment(selections, Category::Lighting),
        expression = fragment(selections, Category::Expression),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_core::catalog::get_default_catalog;

    #[test]
    fn test_instruction_embeds_selected_fragments_verbatim() {
        let catalog = get_default_catalog();
        let mut selections = UserSelections::new();
        for (category, id) in [
            (Category::Clothing, "c1"),
            (Category::Background, "b2"),
            (Category::Lighting, "p1"),
            (Category::Expression, "e1"),
        ] {
            selections.set(category, catalog.find(category, id).unwrap().clone());
        }

        let instruction = build_transform_instruction(&selections);
        for category in Category::all() {
            let expected = &selections.get(category).unwrap().instruction_fragment;
            assert!(instruction.contains(expected.as_str()), "missing {category}");
        }
        assert!(instruction.contains("SAME person"));
    }

    #[test]
    fn test_empty_slots_use_neutral_fallbacks() {
        let instruction = build_transform_instruction(&UserSelections::new());
        assert!(instruction.contains("- Clothing: original clothing."));
        assert!(instruction.contains("- Environment: original background."));
        assert!(instruction.contains("- Lighting & Style: natural lighting."));
        assert!(instruction.contains("- Expression: original expression."));
    }
}
