use std::fmt::{Debug, Display};

use owo_colors::OwoColorize;

use crate::Dfa;

impl<S: Debug> Dfa<S> {
    /// Returns a string representation of the transition table. Every row starts with the
    /// state, decorated by `state_decorator` which receives the index, the name and whether the
    /// state is accepting. Missing transitions are shown as `-`.
    fn build_transition_table<SD>(&self, state_decorator: SD) -> String
    where
        SD: Fn(usize, String, bool) -> String,
    {
        let mut builder = tabled::builder::Builder::default();
        let symbols = self.alphabet_size();
        builder.push_record(
            std::iter::once("State".to_string()).chain(
                self.alphabet()
                    .into_iter()
                    .flat_map(|alphabet| alphabet.symbols())
                    .map(|symbol| format!("{symbol:?}")),
            ),
        );
        for q in 0..self.size() {
            let mut row = vec![state_decorator(q, self.name_of(q), self.accepting[q])];
            if !self.transitions.is_empty() {
                row.extend(
                    self.transitions[q * symbols..(q + 1) * symbols]
                        .iter()
                        .map(|&target| target.map_or("-".to_string(), |p| self.name_of(p))),
                );
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }

    fn marked_name(&self, q: usize, name: String, accepting: bool) -> String {
        let start = if self.start == Some(q) { "→ " } else { "" };
        let accept = if accepting { " *" } else { "" };
        format!("{start}{name}{accept}")
    }

    /// Same as the [`Display`] representation, but accepting states are highlighted in color
    /// for output on a terminal.
    pub fn colored_table(&self) -> String {
        self.build_transition_table(|q, name, accepting| {
            let marked = self.marked_name(q, name, accepting);
            if accepting {
                marked.green().bold().to_string()
            } else {
                marked
            }
        })
    }
}

/// Renders the transition table, the start state is marked with `→` and accepting states
/// with `*`.
impl<S: Debug> Display for Dfa<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.build_transition_table(|q, name, accepting| self.marked_name(q, name, accepting))
        )
    }
}
