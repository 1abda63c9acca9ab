//! Resolution of raw menu input to a single plugin.
//!
//! Resolution is a pure function of the input and the candidate list. When
//! a name prefix is ambiguous the narrowed candidates come back inside
//! [`Resolution::Ambiguous`], and the caller passes them to the next
//! [`resolve`] call of the same menu cycle.

use super::registry::AvailablePlugin;

/// Outcome of resolving one line of menu input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Blank input; nothing selected.
    Empty,
    /// `exit` or `quit`, regardless of the candidates.
    Exit,
    /// Exactly one plugin matched.
    Selected(AvailablePlugin),
    /// A number outside `1..=count`.
    OutOfRange { count: usize },
    /// No candidate's first word matched.
    NoMatch,
    /// Several candidates share the typed first word.
    Ambiguous(Vec<AvailablePlugin>),
}

impl Resolution {
    /// Message to show the user for outcomes that select nothing.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::OutOfRange { count } => Some(format!(
                "Please make sure only numbers in the correct range (1 - {count}) are entered."
            )),
            Self::NoMatch => Some(
                "No corresponding plugin has been found. \
                 Please type the order number or the entire first word of the plugin."
                    .to_string(),
            ),
            Self::Ambiguous(narrowed) => Some(format!(
                "{} matching plugins have been found. \
                 Please specify the exact number of the plugin.",
                narrowed.len()
            )),
            Self::Empty | Self::Exit | Self::Selected(_) => None,
        }
    }
}

/// Resolves `input` against `candidates`.
///
/// 1. Input is trimmed and lower-cased; blank input is [`Resolution::Empty`].
/// 2. `exit` / `quit` always resolve to [`Resolution::Exit`].
/// 3. An integer is a 1-based index into `candidates`.
/// 4. Anything else is compared with the lower-cased first word of each
///    candidate name.
pub fn resolve(input: &str, candidates: &[AvailablePlugin]) -> Resolution {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return Resolution::Empty;
    }
    if input == "exit" || input == "quit" {
        return Resolution::Exit;
    }

    if let Ok(number) = input.parse::<i64>() {
        let count = candidates.len();
        return match usize::try_from(number) {
            Ok(n) if (1..=count).contains(&n) => Resolution::Selected(candidates[n - 1].clone()),
            _ => Resolution::OutOfRange { count },
        };
    }

    let mut matching: Vec<AvailablePlugin> = candidates
        .iter()
        .filter(|candidate| candidate.descriptor.selection_key() == input)
        .cloned()
        .collect();

    match matching.len() {
        0 => Resolution::NoMatch,
        1 => Resolution::Selected(matching.remove(0)),
        _ => Resolution::Ambiguous(matching),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::model::PluginDescriptor;

    fn candidate(token: &str, name: &str) -> AvailablePlugin {
        AvailablePlugin {
            token: token.to_string(),
            descriptor: PluginDescriptor::new(name, "", &[]),
        }
    }

    fn menu() -> Vec<AvailablePlugin> {
        vec![
            candidate("about", "About Application"),
            candidate("print_schedule", "Print the flights schedule"),
            candidate("airport_info", "Print basic information"),
            candidate("exit", "Exit Application"),
        ]
    }

    #[test]
    fn test_blank_input_is_empty() {
        assert_eq!(resolve("   ", &menu()), Resolution::Empty);
    }

    #[test]
    fn test_exit_and_quit_bypass_candidates() {
        assert_eq!(resolve("EXIT", &[]), Resolution::Exit);
        assert_eq!(resolve(" quit ", &menu()), Resolution::Exit);
    }

    #[test]
    fn test_numeric_selection() {
        let menu = menu();
        assert_eq!(resolve("2", &menu), Resolution::Selected(menu[1].clone()));
        assert_eq!(resolve("5", &menu), Resolution::OutOfRange { count: 4 });
        assert_eq!(resolve("0", &menu), Resolution::OutOfRange { count: 4 });
        assert_eq!(resolve("-1", &menu), Resolution::OutOfRange { count: 4 });
    }

    #[test]
    fn test_first_word_matching() {
        let menu = menu();
        assert_eq!(resolve("a", &menu), Resolution::NoMatch);
        assert_eq!(resolve("About", &menu), Resolution::Selected(menu[0].clone()));
    }

    #[test]
    fn test_single_letter_is_not_a_prefix() {
        let menu = vec![
            candidate("add_favourite", "Add a favourite airport"),
            candidate("about", "About Application"),
        ];
        assert_eq!(resolve("a", &menu), Resolution::NoMatch);
        assert_eq!(resolve("about", &menu), Resolution::Selected(menu[1].clone()));
        assert_eq!(resolve("ADD", &menu), Resolution::Selected(menu[0].clone()));
    }

    #[test]
    fn test_shared_first_word_narrows() {
        let menu = menu();
        let narrowed = match resolve("print", &menu) {
            Resolution::Ambiguous(narrowed) => narrowed,
            other => panic!("expected ambiguity, got {other:?}"),
        };
        assert_eq!(narrowed, vec![menu[1].clone(), menu[2].clone()]);

        // Indices now refer to the narrowed list.
        assert_eq!(resolve("2", &narrowed), Resolution::Selected(menu[2].clone()));
        assert_eq!(resolve("3", &narrowed), Resolution::OutOfRange { count: 2 });
        assert_eq!(resolve("about", &narrowed), Resolution::NoMatch);
    }

    #[test]
    fn test_messages() {
        assert!(Resolution::OutOfRange { count: 4 }.message().unwrap().contains("(1 - 4)"));
        assert!(Resolution::NoMatch.message().is_some());
        assert!(Resolution::Ambiguous(menu()).message().unwrap().starts_with("4 matching"));
        assert!(Resolution::Empty.message().is_none());
    }
}
