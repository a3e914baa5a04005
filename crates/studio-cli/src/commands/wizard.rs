//! Interactive wizard REPL.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use studio_application::{StudioBootstrap, WizardController, WizardEvent};
use studio_core::session::WizardStep;
use studio_infrastructure::{StudioPaths, load_image, save_image};

use crate::repl_helper::StudioHelper;

#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    Next,
    Back,
    Upload(PathBuf),
    Pick(String),
    Continue,
    Toggle,
    Adjust,
    New,
    Save(Option<PathBuf>),
    Status,
    Help,
    Quit,
}

impl ReplCommand {
    fn parse(line: &str) -> Result<Self, String> {
        let (word, rest) = match line.trim().split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line.trim(), ""),
        };

        let command = match word {
            "next" | "n" => Self::Next,
            "back" | "b" => Self::Back,
            "upload" | "u" if !rest.is_empty() => Self::Upload(PathBuf::from(rest)),
            "upload" | "u" => return Err("Usage: upload <path>".to_string()),
            "pick" | "p" if !rest.is_empty() => Self::Pick(rest.to_string()),
            "pick" | "p" => return Err("Usage: pick <id>".to_string()),
            "continue" | "c" => Self::Continue,
            "toggle" | "t" => Self::Toggle,
            "adjust" => Self::Adjust,
            "new" => Self::New,
            "save" if rest.is_empty() => Self::Save(None),
            "save" => Self::Save(Some(PathBuf::from(rest))),
            "status" | "s" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(format!("Unknown command '{other}'. Type 'help'.")),
        };
        Ok(command)
    }
}

fn default_save_path() -> PathBuf {
    PathBuf::from(format!(
        "persona-{}.png",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ))
}

pub async fn run(paths: StudioPaths) -> Result<()> {
    let bootstrap = StudioBootstrap::load(paths)?;
    let controller = bootstrap.build_controller().await.with_context(|| {
        format!(
            "Set GEMINI_API_KEY or add {{\"gemini\": {{\"api_key\": \"...\"}}}} to {}",
            bootstrap.paths.secret_file().display()
        )
    })?;

    let mut rl = Editor::new()?;
    rl.set_helper(Some(StudioHelper::new(&bootstrap.catalog)));

    println!("{}", "=== Persona Studio ===".bright_magenta().bold());
    println!(
        "{}",
        "Type 'help' for commands, 'quit' to exit.".bright_black()
    );
    println!();
    render(&controller);

    loop {
        let prompt = format!("{} ", prompt_label(controller.step()));
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match ReplCommand::parse(trimmed) {
                    Ok(ReplCommand::Quit) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Ok(command) => execute(&controller, command).await,
                    Err(message) => println!("{}", message.yellow()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    tracing::info!("[Wizard] Session {} closed", controller.session_id());
    Ok(())
}

async fn execute(controller: &WizardController, command: ReplCommand) {
    let event = match command {
        ReplCommand::Next => controller.advance_intro(),
        ReplCommand::Back => controller.back(),
        ReplCommand::Upload(path) => {
            let image = match load_image(&path).await {
                Ok(image) => image,
                Err(err) => {
                    println!("{}", err.to_string().red());
                    return;
                }
            };
            if controller.step() == WizardStep::AwaitUpload {
                println!("{}", "Analyzing face...".bright_black());
            }
            controller.submit_image(image).await
        }
        ReplCommand::Pick(id) => match controller.select(&id) {
            Ok(event) => event,
            Err(err) => {
                println!("{}", err.to_string().yellow());
                return;
            }
        },
        ReplCommand::Continue => {
            if controller.step() == WizardStep::PickExpression && controller.can_proceed() {
                println!("{}", "Synthesizing masterpiece...".bright_black());
            }
            controller.proceed().await
        }
        ReplCommand::Toggle => controller.toggle_comparison(),
        ReplCommand::Adjust => controller.adjust_style(),
        ReplCommand::New => controller.start_new(),
        ReplCommand::Save(path) => {
            save(controller, path.unwrap_or_else(default_save_path)).await;
            return;
        }
        ReplCommand::Status => {
            render(controller);
            return;
        }
        ReplCommand::Help => {
            print_help();
            return;
        }
        ReplCommand::Quit => return,
    };
    report(controller, event);
}

async fn save(controller: &WizardController, path: PathBuf) {
    let Some(image) = controller.result_image() else {
        println!("{}", "No result to save yet.".yellow());
        return;
    };
    match save_image(&path, &image).await {
        Ok(()) => println!("{} {}", "Saved".bright_green(), path.display()),
        Err(err) => println!("{}", err.to_string().red()),
    }
}

fn report(controller: &WizardController, event: WizardEvent) {
    match event {
        WizardEvent::NoOp => {
            println!("{}", "Nothing to do on this step.".bright_black());
        }
        WizardEvent::Busy => {
            println!("{}", "Still working on the previous request.".yellow());
        }
        WizardEvent::Selected { category, id } => {
            println!("{}", format!("{category}: {id} selected").green());
        }
        WizardEvent::ComparisonToggled { showing_source } => {
            let label = if showing_source { "source" } else { "result" };
            println!("{}", format!("Now showing the {label} image.").bright_blue());
            render(controller);
        }
        WizardEvent::FaceRejected { message } => {
            println!("{}", message.red());
        }
        WizardEvent::SynthesisFailed { notification } => {
            println!("{}", notification.red().bold());
        }
        WizardEvent::OutcomeDiscarded => {
            println!("{}", "A late response was ignored.".bright_black());
        }
        WizardEvent::StepChanged { .. } => render(controller),
    }
}

fn prompt_label(step: WizardStep) -> String {
    let label = match step {
        WizardStep::Intro { .. } => "intro".to_string(),
        WizardStep::AwaitUpload => "upload".to_string(),
        WizardStep::Scanning | WizardStep::Synthesizing => "working".to_string(),
        WizardStep::ShowResult => "result".to_string(),
        step => step
            .category()
            .map(|category| category.to_string())
            .unwrap_or_default(),
    };
    format!("{label}>").bright_magenta().to_string()
}

fn render(controller: &WizardController) {
    let step = controller.step();
    match step {
        WizardStep::Intro { slide } => {
            if let Some(current) = controller.current_slide() {
                let total = controller.catalog().intro_len();
                println!(
                    "{} {}",
                    format!("[{}/{}]", slide + 1, total).bright_black(),
                    current.title.bold()
                );
                println!("  {}", current.description);
                println!("  {}", current.image_ref.bright_black());
            }
            println!("{}", "next to continue".bright_black());
        }
        WizardStep::AwaitUpload => {
            println!("{}", step.title().bold());
            println!("  Upload a clear, front-facing portrait: upload <path>");
            if let Some(message) = controller.error_message() {
                println!("  {}", message.red());
            }
        }
        WizardStep::Scanning | WizardStep::Synthesizing => {
            println!("{}", step.title().bold());
        }
        WizardStep::ShowResult => {
            println!("{}", step.title().bold());
            let showing_source = controller.snapshot().showing_source;
            if let Some(image) = controller.displayed_image() {
                let which = if showing_source { "source" } else { "result" };
                println!(
                    "  Showing {which}: {} (~{} KB)",
                    image.mime_type(),
                    image.approx_byte_len() / 1024
                );
            }
            println!(
                "{}",
                "toggle | save [path] | adjust | new".bright_black()
            );
        }
        step => {
            let Some(category) = step.category() else {
                return;
            };
            println!(
                "{} {}",
                step.title().bold(),
                format!("- {}", category.subtitle()).bright_black()
            );
            let selected = controller.selection(category).map(|entry| entry.id);
            for entry in controller.current_options() {
                let marker = if selected.as_deref() == Some(entry.id.as_str()) {
                    "●".green()
                } else {
                    "○".bright_black()
                };
                let badge = entry
                    .badge
                    .as_deref()
                    .map(|badge| format!(" [{badge}]").yellow().to_string())
                    .unwrap_or_default();
                println!(
                    "  {marker} {} {}{badge}",
                    format!("{:<4}", entry.id).cyan(),
                    entry.display_name
                );
            }
            if controller.can_proceed() {
                println!("{}", "continue when ready".bright_black());
            }
        }
    }
}

fn print_help() {
    let rows = [
        ("next", "next intro slide"),
        ("back", "previous step"),
        ("upload <path>", "submit a portrait"),
        ("pick <id>", "choose an option on the current step"),
        ("continue", "go on (starts synthesis on the last step)"),
        ("toggle", "switch between result and source"),
        ("adjust", "change the style, keeping selections"),
        ("new", "start over with a new photo"),
        ("save [path]", "write the result image"),
        ("status", "show the current step"),
        ("quit", "exit"),
    ];
    for (command, description) in rows {
        println!("  {} {}", format!("{command:<14}").cyan(), description);
    }
}
