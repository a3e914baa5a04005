use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use studio_core::catalog::Category;
use studio_infrastructure::StudioPaths;

mod commands;
mod logging;
mod repl_helper;

#[derive(Parser)]
#[command(name = "studio")]
#[command(about = "Persona Studio - restyle a portrait while keeping the face", long_about = None)]
struct Cli {
    /// Configuration directory (defaults to PERSONA_STUDIO_CONFIG_DIR, then the platform config dir)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive wizard (default)
    Wizard,
    /// Run one transformation end to end without prompting
    Transform {
        /// Source portrait
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        clothing: String,
        #[arg(long)]
        background: String,
        #[arg(long)]
        lighting: String,
        #[arg(long)]
        expression: String,
        /// Where to write the generated PNG
        #[arg(long)]
        output: PathBuf,
    },
    /// Print the selection catalog
    Catalog {
        /// Only print one category
        #[arg(long)]
        category: Option<Category>,
    },
    /// Print resolved file locations
    Paths,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = StudioPaths::resolve(cli.config_dir.as_deref())?;
    let _log_guard = logging::init(&paths.logs_dir())?;

    match cli.command.unwrap_or(Commands::Wizard) {
        Commands::Wizard => commands::wizard::run(paths).await?,
        Commands::Transform {
            image,
            clothing,
            background,
            lighting,
            expression,
            output,
        } => {
            let request = commands::transform::TransformArgs {
                image,
                picks: [clothing, background, lighting, expression],
                output,
            };
            commands::transform::run(paths, request).await?
        }
        Commands::Catalog { category } => commands::catalog::run(paths, category)?,
        Commands::Paths => commands::paths::run(&paths),
    }

    Ok(())
}
