pub(crate) mod partition_refinement;

#[cfg(test)]
mod table_filling;

use itertools::Itertools;
use tracing::debug;

use crate::{
    automaton::Table,
    math::Map,
    Dfa, DfaError, Result,
};

impl<S> Dfa<S> {
    /// Computes the Myhill-Nerode equivalence classes of the states using Hopcroft's partition
    /// refinement algorithm. The `i`-th entry of the returned vector is the class of state `i`,
    /// classes are numbered `0..k` in order of their smallest state. Two states share a class
    /// if and only if no word leads one of them to an accepting and the other one to a
    /// rejecting state.
    ///
    /// Requires `self` to be complete, unreachable states are taken into account as well.
    pub fn equivalence_classes(&self) -> Result<Vec<usize>> {
        let table = self.complete_table()?;
        Ok(partition_refinement::hopcroft(&table, &self.accepting))
    }

    /// Returns the unique minimal automaton that accepts the same language as `self`. This
    /// first removes all unreachable states and then merges the states of every equivalence
    /// class into one. Unless `suppress_names` is set, a merged state is named by joining the
    /// names of all its members with `", "`.
    ///
    /// Requires `self` to be complete and to have a start state.
    ///
    /// # Example
    /// ```
    /// use mindfa::prelude::*;
    ///
    /// // counts the number of 'a' modulo 4, but only cares whether it is even
    /// let mut dfa = Dfa::with_alphabet(Alphabet::char_range('a', 2).unwrap());
    /// dfa.set_size(4).unwrap();
    /// for i in 0..4 {
    ///     let (q, p) = (dfa.state(i).unwrap(), dfa.state((i + 1) % 4).unwrap());
    ///     dfa.set_transition(q, &'a', p).unwrap();
    ///     dfa.set_transition(q, &'b', q).unwrap();
    /// }
    /// dfa.set_start_state(dfa.state(0).unwrap()).unwrap();
    /// dfa.set_accepting_exactly([0, 2]).unwrap();
    ///
    /// let min = dfa.minimize(false).unwrap();
    /// assert_eq!(min.size(), 2);
    /// assert_eq!(min.state_name(min.start().unwrap()).unwrap(), "q_0, q_2");
    /// assert!(min.accepts("abba".chars()).unwrap());
    /// ```
    pub fn minimize(&self, suppress_names: bool) -> Result<Dfa<S>> {
        let trimmed = self.eliminate_unreachable_states(suppress_names)?;
        let table = trimmed.complete_table()?;
        let start = trimmed.start.ok_or(DfaError::MissingStartState)?;
        let classes = partition_refinement::hopcroft(&table, &trimmed.accepting);

        // classes are numbered by their smallest member, which is therefore the representative
        let mut representatives = Vec::new();
        for (q, &class) in classes.iter().enumerate() {
            if class == representatives.len() {
                representatives.push(q);
            }
        }
        debug!(
            "minimized automaton with {} states to {} states",
            self.size(),
            representatives.len()
        );

        let targets = representatives
            .iter()
            .flat_map(|&q| table.row(q).iter().map(|&p| classes[p]))
            .collect();
        let accepting = representatives
            .iter()
            .map(|&q| trimmed.accepting[q])
            .collect();
        let names: Map<_, _> = if suppress_names {
            Map::default()
        } else {
            (0..trimmed.size())
                .into_group_map_by(|&q| classes[q])
                .into_iter()
                .map(|(class, members)| {
                    let joined = members
                        .into_iter()
                        .map(|q| trimmed.name_of(q))
                        .join(", ");
                    (class, joined)
                })
                .collect()
        };

        Ok(Dfa::from_complete_parts(
            trimmed.check_alphabet()?.clone(),
            Table::new(table.symbols(), targets),
            accepting,
            classes[start],
            names,
        ))
    }
}
