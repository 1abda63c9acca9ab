//! Terminal implementation of [`UserInterface`].
//!
//! Plain prompts go through rustyline (history, completion of menu words);
//! secrets are read key by key in crossterm raw mode so they never echo.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::io::{self, BufRead, IsTerminal, Write};
use std::thread;
use std::time::Duration;

use adviport_core::ui::UserInterface;
use colored::Colorize;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing::warn;

/// Completes and hints the words that select menu entries.
#[derive(Clone)]
pub struct CliHelper {
    words: Vec<String>,
}

impl CliHelper {
    pub fn new(mut words: Vec<String>) -> Self {
        words.extend(["exit".to_string(), "quit".to_string()]);
        words.sort();
        words.dedup();
        Self { words }
    }

    fn matching<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a String> + 'a {
        let prefix = prefix.to_lowercase();
        self.words
            .iter()
            .filter(move |word| !prefix.is_empty() && word.starts_with(&prefix))
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if line.contains(char::is_whitespace) {
            return Ok((0, vec![]));
        }
        let candidates = self
            .matching(line)
            .map(|word| Pair {
                display: word.clone(),
                replacement: word.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let known = line.trim().parse::<usize>().is_ok()
            || self.words.iter().any(|word| word.eq_ignore_ascii_case(line.trim()));
        if known {
            Owned(line.bright_cyan().to_string())
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

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.contains(char::is_whitespace) {
            return None;
        }
        self.matching(line)
            .find(|word| word.len() > line.len())
            .map(|word| word[line.len()..].to_string())
    }
}

impl Validator for CliHelper {}

pub struct TerminalInterface {
    editor: Editor<CliHelper, DefaultHistory>,
}

impl TerminalInterface {
    pub fn new(helper: CliHelper) -> rustyline::Result<Self> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(helper));
        Ok(Self { editor })
    }
}

impl UserInterface for TerminalInterface {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim().to_string();
                if !line.is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Some(line)
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => None,
            Err(e) => {
                warn!("Failed to read input: {}", e);
                None
            }
        }
    }

    fn read_secret(&mut self, prompt: &str) -> Option<String> {
        match read_hidden(prompt) {
            Ok(secret) => secret,
            Err(e) => {
                warn!("Failed to read hidden input: {}", e);
                None
            }
        }
    }

    fn info(&mut self, message: &str) {
        println!("{message}");
    }

    fn error(&mut self, message: &str) {
        eprintln!("{}", message.red());
    }

    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Reads a line without echo. Falls back to a plain read when stdin is not a terminal.
fn read_hidden(prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;

    if !io::stdin().is_terminal() {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        return Ok((read > 0).then(|| line.trim().to_string()));
    }

    terminal::enable_raw_mode()?;
    let secret = read_keys();
    terminal::disable_raw_mode()?;
    println!();
    secret
}

fn read_keys() -> io::Result<Option<String>> {
    let mut secret = String::new();
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Enter => return Ok(Some(secret.trim().to_string())),
            KeyCode::Esc => return Ok(None),
            KeyCode::Char('c' | 'd') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(None);
            }
            KeyCode::Backspace => {
                secret.pop();
            }
            KeyCode::Char(c) => secret.push(c),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helper_adds_exit_words() {
        let helper = CliHelper::new(vec!["login".to_string(), "about".to_string()]);
        assert_eq!(helper.words, vec!["about", "exit", "login", "quit"]);
    }

    #[test]
    fn test_matching_is_prefix_and_case_insensitive() {
        let helper = CliHelper::new(vec!["print".to_string(), "register".to_string()]);
        let found: Vec<&String> = helper.matching("PR").collect();
        assert_eq!(found, vec!["print"]);
        assert_eq!(helper.matching("").count(), 0);
    }
}
