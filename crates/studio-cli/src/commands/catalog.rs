use anyhow::Result;
use colored::Colorize;
use studio_application::StudioBootstrap;
use studio_core::catalog::{Catalog, Category};
use studio_infrastructure::StudioPaths;

pub fn run(paths: StudioPaths, category: Option<Category>) -> Result<()> {
    let bootstrap = StudioBootstrap::load(paths)?;
    let catalog = &bootstrap.catalog;

    match category {
        Some(category) => print_category(catalog, category),
        None => {
            for category in Category::all() {
                print_category(catalog, category);
                println!();
            }
        }
    }
    Ok(())
}

fn print_category(catalog: &Catalog, category: Category) {
    println!(
        "{} {}",
        category.label().bright_magenta().bold(),
        format!("({category})").bright_black()
    );
    for entry in catalog.options(category) {
        let badge = entry
            .badge
            .as_deref()
            .map(|badge| format!(" [{badge}]").yellow().to_string())
            .unwrap_or_default();
        println!(
            "  {} {}{}",
            format!("{:<4}", entry.id).cyan(),
            entry.display_name,
            badge
        );
        println!("       {}", entry.instruction_fragment.bright_black());
    }
}
