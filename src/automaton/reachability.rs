use tracing::debug;

use crate::{
    math::{self, Map},
    Dfa, DfaError, Result,
};

use super::Table;

impl<S> Dfa<S> {
    /// Builds a new automaton that only contains the states which are reachable from the start
    /// state. The remaining states keep their relative order, as well as their acceptance and
    /// their names. Unnamed states are named after their index in `self`, unless
    /// `suppress_names` is set in which case the result carries no names at all.
    ///
    /// Requires `self` to be complete and to have a start state. The result is complete and
    /// has at least one state.
    ///
    /// # Example
    /// ```
    /// use mindfa::prelude::*;
    ///
    /// let mut dfa = Dfa::with_alphabet(Alphabet::char_range('a', 1).unwrap());
    /// dfa.set_size(3).unwrap();
    /// let q = |i| dfa.state(i).unwrap();
    /// let (q0, q1, q2) = (q(0), q(1), q(2));
    /// dfa.set_transition(q0, &'a', q2).unwrap();
    /// dfa.set_transition(q1, &'a', q0).unwrap();
    /// dfa.set_transition(q2, &'a', q0).unwrap();
    /// dfa.set_start_state(q2).unwrap();
    ///
    /// let trimmed = dfa.eliminate_unreachable_states(false).unwrap();
    /// assert_eq!(trimmed.size(), 2);
    /// assert_eq!(trimmed.start().unwrap().index(), Some(1));
    /// assert_eq!(trimmed.state_name(trimmed.state(1).unwrap()).unwrap(), "q_2");
    /// ```
    pub fn eliminate_unreachable_states(&self, suppress_names: bool) -> Result<Dfa<S>> {
        let table = self.complete_table()?;
        let start = self.start.ok_or(DfaError::MissingStartState)?;
        let alphabet = self.check_alphabet()?.clone();

        let reachable = table.reachable_from(start);
        let (renumbered, kept) =
            math::exclusive_prefix_count((0..self.size).map(|q| reachable.contains(q)));
        debug!(
            "keeping {kept} of {} states reachable from q_{start}",
            self.size
        );

        let targets = reachable
            .iter()
            .flat_map(|q| table.row(q).iter().map(|&p| renumbered[p]))
            .collect();
        let accepting = reachable.iter().map(|q| self.accepting[q]).collect();
        let names: Map<_, _> = if suppress_names {
            Map::default()
        } else {
            reachable
                .iter()
                .map(|q| (renumbered[q], self.name_of(q)))
                .collect()
        };

        Ok(Dfa::from_complete_parts(
            alphabet,
            Table::new(table.symbols(), targets),
            accepting,
            renumbered[start],
            names,
        ))
    }
}
