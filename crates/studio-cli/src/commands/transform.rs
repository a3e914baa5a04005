//! Non-interactive transformation: one portrait, four picks, one output file.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use colored::Colorize;
use studio_application::{StudioBootstrap, WizardController, WizardEvent};
use studio_core::EncodedImage;
use studio_core::catalog::{Catalog, Category};
use studio_core::session::WizardStep;
use studio_infrastructure::{StudioPaths, load_image, save_image};

pub struct TransformArgs {
    pub image: PathBuf,
    /// Option ids in wizard order: clothing, background, lighting, expression.
    pub picks: [String; 4],
    pub output: PathBuf,
}

/// Rejects ids that are not in their category before anything is sent out.
fn check_picks(catalog: &Catalog, picks: &[String; 4]) -> Result<()> {
    for (category, id) in Category::all().zip(picks) {
        if catalog.find(category, id).is_none() {
            let known: Vec<&str> = catalog
                .options(category)
                .iter()
                .map(|entry| entry.id.as_str())
                .collect();
            bail!(
                "Unknown {category} option '{id}' (available: {})",
                known.join(", ")
            );
        }
    }
    Ok(())
}

pub async fn run(paths: StudioPaths, args: TransformArgs) -> Result<()> {
    let bootstrap = StudioBootstrap::load(paths)?;
    check_picks(&bootstrap.catalog, &args.picks)?;

    let image = load_image(&args.image)
        .await
        .with_context(|| format!("Failed to read {}", args.image.display()))?;
    let controller = bootstrap.build_controller().await?;

    drive(&controller, image, &args.picks).await?;

    let result = controller
        .result_image()
        .ok_or_else(|| anyhow!("Wizard finished without a result image"))?;
    save_image(&args.output, &result).await?;

    println!(
        "{} {}",
        "Saved".bright_green().bold(),
        args.output.display()
    );
    Ok(())
}

/// Walks the controller from the intro to `ShowResult`.
async fn drive(
    controller: &WizardController,
    image: EncodedImage,
    picks: &[String; 4],
) -> Result<()> {
    while matches!(controller.step(), WizardStep::Intro { .. }) {
        controller.advance_intro();
    }

    println!("{}", "Analyzing face...".bright_black());
    if let WizardEvent::FaceRejected { message } = controller.submit_image(image).await {
        bail!(message);
    }

    // Each pick fills the current step; the last `proceed` starts synthesis.
    for id in picks {
        controller.select(id)?;
        if let WizardEvent::SynthesisFailed { notification } = controller.proceed().await {
            bail!(notification);
        }
    }

    if controller.step() != WizardStep::ShowResult {
        bail!("Wizard stopped at {:?}", controller.step());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_core::catalog::get_default_catalog;

    fn picks(ids: [&str; 4]) -> [String; 4] {
        ids.map(str::to_string)
    }

    #[test]
    fn test_check_picks_accepts_known_ids() {
        let catalog = get_default_catalog();
        assert!(check_picks(&catalog, &picks(["c1", "b2", "p3", "e4"])).is_ok());
    }

    #[test]
    fn test_check_picks_rejects_ids_from_another_category() {
        let catalog = get_default_catalog();
        let err = check_picks(&catalog, &picks(["c1", "c2", "p3", "e4"])).unwrap_err();
        assert!(err.to_string().contains("Unknown background option 'c2'"));
    }
}
