//! Built-in catalog.
//!
//! The default intro slides and styling options shipped with the studio. A
//! `catalog.toml` in the config directory replaces this wholesale.

use super::model::{Catalog, IntroSlide, SelectionCatalogEntry};

const UNSPLASH: &str = "https://images.unsplash.com";

fn preview(photo: &str, width: u32) -> String {
    format!("{UNSPLASH}/{photo}?auto=format&fit=crop&q=80&w={width}")
}

fn slide(title: &str, description: &str, photo: &str) -> IntroSlide {
    IntroSlide {
        title: title.to_string(),
        description: description.to_string(),
        image_ref: preview(photo, 1000),
    }
}

fn option(id: &str, name: &str, photo: &str, fragment: &str) -> SelectionCatalogEntry {
    SelectionCatalogEntry::new(id, name, preview(photo, 400), fragment)
}

/// Returns the catalog the studio ships with.
pub fn get_default_catalog() -> Catalog {
    Catalog {
        intro_slides: vec![
            slide(
                "Turn Your Photo Into AI Art",
                "Experience the world's most advanced AI identity-lock technology for free.",
                "photo-1618005182384-a83a8bd57fbe",
            ),
            slide(
                "Choose clothes, background, mood & style",
                "Full studio control at your fingertips. Customize every pixel of your transformation.",
                "photo-1550684848-fac1c5b4e853",
            ),
            slide(
                "AI adapts your real face, not a random person",
                "The identity lock keeps your facial structure intact across every style.",
                "photo-1633167606207-d840b5070fc2",
            ),
            slide(
                "Download ultra-HD images for free",
                "Studio-quality results, ready for the world.",
                "photo-1614728263952-84ea206f99b6",
            ),
        ],
        clothing: vec![
            option(
                "c1",
                "Black Tie Luxury",
                "photo-1594938298603-c8148c4dae35",
                "wearing a luxury tailored black tuxedo with a crisp white shirt and bow tie",
            )
            .with_badge("Trending"),
            option(
                "c2",
                "Tech Minimalist",
                "photo-1552061330-334d2a95210f",
                "wearing a high-end black turtleneck and designer minimalist eyewear",
            ),
            option(
                "c3",
                "Streetwear Icon",
                "photo-1523381210434-271e8be1f52b",
                "wearing futuristic oversized luxury streetwear and a hypebeast jacket",
            )
            .with_badge("New"),
            option(
                "c4",
                "Royal Armor",
                "photo-1585032226651-759b368d7246",
                "wearing intricate golden ceremonial plate armor with royal engravings",
            ),
            option(
                "c5",
                "Cyber Suit",
                "photo-1614728263952-84ea206f99b6",
                "wearing a high-tech glowing carbon fiber exosuit with integrated circuitry",
            )
            .with_badge("Popular"),
            option(
                "c6",
                "Silk Editorial",
                "photo-1539109136881-3be0616acf4b",
                "wearing flowing avant-garde silk fabrics in a high-fashion editorial style",
            ),
        ],
        background: vec![
            option(
                "b1",
                "Pro Studio",
                "photo-1598449334855-0112ee525bae",
                "in a professional photography studio with clean softbox lighting and neutral gray backdrop",
            ),
            option(
                "b2",
                "Neon Tokyo",
                "photo-1540959733332-e94e270b4d42",
                "on a rain-slicked street in futuristic Tokyo at night with vibrant neon reflections",
            )
            .with_badge("Top Pick"),
            option(
                "b3",
                "Alpine Villa",
                "photo-1520250497591-112f2f40a3f4",
                "in a glass-walled luxury villa overlooking the snow-capped Swiss Alps at sunset",
            ),
            option(
                "b4",
                "Zen Garden",
                "photo-1502672260266-1c1ef2d93688",
                "in a minimalist Japanese Zen garden with bamboo and raked sand",
            ),
            option(
                "b5",
                "Orbit Station",
                "photo-1446776811953-b23d57bd21aa",
                "inside a high-tech space station with a massive view of planet Earth in the background",
            )
            .with_badge("Cinematic"),
            option(
                "b6",
                "Parisian Balcony",
                "photo-1502602898657-3e91760cbb34",
                "on a classic limestone balcony in Paris with the Eiffel Tower visible in the distance",
            ),
        ],
        lighting: vec![
            option(
                "p1",
                "Rembrandt Light",
                "photo-1542038784456-1ea8e935640e",
                "using dramatic Rembrandt lighting with deep shadows and high contrast",
            )
            .with_badge("Classic"),
            option(
                "p2",
                "Golden Hour",
                "photo-1516035069371-29a1b244cc32",
                "captured during the golden hour with warm, soft, ethereal sunlight",
            ),
            option(
                "p3",
                "Magazine Gloss",
                "photo-1492633423870-43d1cd2775eb",
                "in the style of a high-gloss fashion magazine cover with sharp focus and perfect skin retouching",
            ),
            option(
                "p4",
                "Anamorphic Cinema",
                "photo-1485846234645-a62644f84728",
                "shot on 35mm anamorphic film with cinematic bokeh and slight lens flare",
            )
            .with_badge("Movie Quality"),
        ],
        expression: vec![
            option(
                "e1",
                "Confident Smile",
                "photo-1544005313-94ddf0286df2",
                "with a warm, confident, and genuine friendly smile",
            ),
            option(
                "e2",
                "Neutral Focus",
                "photo-1506794778202-cad84cf45f1d",
                "with a calm, neutral, and focused professional expression",
            ),
            option(
                "e3",
                "Stoic Intensity",
                "photo-1500648767791-00dcc994a43e",
                "with a powerful, stoic, and intense gaze",
            ),
            option(
                "e4",
                "Joyful Laugh",
                "photo-1531746020798-e6953c6e8e04",
                "with a spontaneous and joyful laugh",
            ),
        ],
    }
}
