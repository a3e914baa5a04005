use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use studio_core::catalog::{Catalog, Category};

pub const COMMANDS: &[&str] = &[
    "next", "back", "upload", "pick", "continue", "toggle", "adjust", "new", "save", "status",
    "help", "quit",
];

/// rustyline helper: completes command words and `pick` ids, hints the rest
/// of a command, and highlights known commands.
#[derive(Clone)]
pub struct StudioHelper {
    option_ids: Vec<String>,
}

impl StudioHelper {
    pub fn new(catalog: &Catalog) -> Self {
        let option_ids = Category::all()
            .flat_map(|category| catalog.options(category))
            .map(|entry| entry.id.clone())
            .collect();
        Self { option_ids }
    }

    /// Completion start offset and candidates for `line`.
    fn candidates(&self, line: &str) -> (usize, Vec<String>) {
        if let Some(prefix) = line.strip_prefix("pick ") {
            let ids = self
                .option_ids
                .iter()
                .filter(|id| id.starts_with(prefix.trim_start()))
                .cloned()
                .collect();
            return (line.len() - prefix.trim_start().len(), ids);
        }
        if line.contains(' ') {
            return (0, Vec::new());
        }
        let commands = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| cmd.to_string())
            .collect();
        (0, commands)
    }
}

impl Helper for StudioHelper {}

impl Completer for StudioHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, candidates) = self.candidates(&line[..pos]);
        let pairs = candidates
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Highlighter for StudioHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let word = line.split_whitespace().next().unwrap_or_default();
        if COMMANDS.contains(&word) {
            Owned(line.replacen(word, &word.bright_cyan().to_string(), 1))
        } else {
            Borrowed(line)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for StudioHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() || line.contains(' ') {
            return None;
        }
        COMMANDS
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for StudioHelper {}
