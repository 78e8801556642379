use std::fmt::Debug;

use tracing::{trace, warn};

use crate::{math::Map, Alphabet, DfaError, Result};

mod state;
pub use state::{AutomatonId, State};

mod table;
pub(crate) use table::{Predecessors, Table};

mod transitions;

mod reachability;

mod display;

/// A deterministic finite automaton over an alphabet with symbols of type `S`.
///
/// The automaton is built up incrementally. It starts out empty, is sized exactly once with
/// [`Dfa::set_size`] and receives an [`Alphabet`] either on construction or through
/// [`Dfa::set_alphabet`]. As soon as both are known, a transition table with `size * |alphabet|`
/// entries is allocated in which every transition is missing. The automaton keeps track of the
/// number of missing transitions and is *complete* once there are none left.
///
/// States are addressed through [`State`] handles, which remember the automaton they were
/// obtained from. Handing a state of one automaton to another one is reported as
/// [`DfaError::ForeignStateReference`].
///
/// # Example
/// ```
/// use mindfa::prelude::*;
///
/// let mut dfa = Dfa::with_alphabet(Alphabet::char_range('a', 2).unwrap());
/// dfa.set_size(2).unwrap();
/// let (q0, q1) = (dfa.state(0).unwrap(), dfa.state(1).unwrap());
/// dfa.set_transition(q0, &'a', q1).unwrap();
/// dfa.set_transition(q0, &'b', q0).unwrap();
/// assert!(!dfa.is_complete());
/// dfa.set_transition(q1, &'a', q1).unwrap();
/// dfa.set_transition(q1, &'b', q0).unwrap();
/// assert!(dfa.is_complete());
///
/// dfa.set_start_state(q0).unwrap();
/// dfa.flip_acceptance(q1).unwrap();
/// assert!(dfa.accepts("ba".chars()).unwrap());
/// assert!(!dfa.accepts("ab".chars()).unwrap());
/// ```
pub struct Dfa<S = char> {
    id: AutomatonId,
    size: usize,
    alphabet: Option<Alphabet<S>>,
    names: Map<usize, String>,
    transitions: Vec<Option<usize>>,
    empty_edges: usize,
    pub(crate) start: Option<usize>,
    pub(crate) accepting: Vec<bool>,
}

impl<S> Default for Dfa<S> {
    fn default() -> Self {
        Self {
            id: AutomatonId::fresh(),
            size: 0,
            alphabet: None,
            names: Map::default(),
            transitions: Vec::new(),
            empty_edges: 0,
            start: None,
            accepting: Vec::new(),
        }
    }
}

/// A clone is a new automaton instance, states of the original do not belong to it.
impl<S> Clone for Dfa<S> {
    fn clone(&self) -> Self {
        Self {
            id: AutomatonId::fresh(),
            size: self.size,
            alphabet: self.alphabet.clone(),
            names: self.names.clone(),
            transitions: self.transitions.clone(),
            empty_edges: self.empty_edges,
            start: self.start,
            accepting: self.accepting.clone(),
        }
    }
}

impl<S> Debug for Dfa<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dfa")
            .field("size", &self.size)
            .field("alphabet_size", &self.alphabet_size())
            .field("start", &self.start)
            .field("accepting", &self.accepting)
            .field("transitions", &self.transitions)
            .finish()
    }
}

impl<S> Dfa<S> {
    /// Creates an empty automaton without states and without an alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty automaton over the given alphabet.
    pub fn with_alphabet(alphabet: Alphabet<S>) -> Self {
        Self {
            alphabet: Some(alphabet),
            ..Default::default()
        }
    }

    /// Assembles a complete automaton from a dense table. Used by the derived constructions,
    /// which produce complete automata by design.
    pub(crate) fn from_complete_parts(
        alphabet: Alphabet<S>,
        table: Table,
        accepting: Vec<bool>,
        start: usize,
        names: Map<usize, String>,
    ) -> Self {
        debug_assert_eq!(table.states(), accepting.len());
        debug_assert_eq!(table.symbols(), alphabet.size());
        Self {
            size: accepting.len(),
            alphabet: Some(alphabet),
            names,
            transitions: table.into_targets().into_iter().map(Some).collect(),
            empty_edges: 0,
            start: Some(start),
            accepting,
            ..Default::default()
        }
    }

    /// Returns the identity of this automaton instance.
    pub fn id(&self) -> AutomatonId {
        self.id
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the automaton has not been sized yet.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` if the transition table is allocated and no transition is missing.
    pub fn is_complete(&self) -> bool {
        !self.transitions.is_empty() && self.empty_edges == 0
    }

    /// Returns the number of missing transitions in the allocated table.
    pub fn empty_edge_count(&self) -> usize {
        self.empty_edges
    }

    /// Gives a reference to the alphabet, if one is set.
    pub fn alphabet(&self) -> Option<&Alphabet<S>> {
        self.alphabet.as_ref()
    }

    /// Returns the size of the alphabet, or zero if no alphabet is set.
    pub fn alphabet_size(&self) -> usize {
        self.alphabet.as_ref().map_or(0, Alphabet::size)
    }

    /// Resets the automaton to the state it had right after [`Dfa::new`].
    pub fn clear(&mut self) {
        *self = Self {
            id: self.id,
            ..Default::default()
        }
    }

    /// Gives the automaton `size` states. This can only be done once and `size` must be positive.
    /// If the alphabet is already known, the transition table is allocated with all transitions
    /// missing.
    pub fn set_size(&mut self, size: usize) -> Result<()> {
        if self.size != 0 {
            return Err(DfaError::AlreadySized(self.size));
        }
        if size == 0 {
            return Err(DfaError::InvalidSize(size));
        }
        self.size = size;
        self.accepting = vec![false; size];
        self.names.clear();
        self.init_transitions();
        Ok(())
    }

    /// Sets the alphabet, which is only possible if none is set yet. If the automaton already
    /// has states, the transition table is allocated with all transitions missing.
    pub fn set_alphabet(&mut self, alphabet: Alphabet<S>) -> Result<()> {
        if let Some(current) = &self.alphabet {
            return Err(DfaError::AlphabetAlreadySet(current.size()));
        }
        self.alphabet = Some(alphabet);
        self.init_transitions();
        Ok(())
    }

    /// Replaces the alphabet by one of the same size, which keeps the transition table intact
    /// but changes the symbols it is addressed with. If the sizes differ, a warning is emitted
    /// and nothing happens.
    pub fn reset_alphabet(&mut self, alphabet: Alphabet<S>) {
        if self.alphabet_size() == alphabet.size() {
            self.alphabet = Some(alphabet);
            return;
        }
        warn!(
            "the new alphabet's size ({}) does not match the old one ({}), keeping the old alphabet",
            alphabet.size(),
            self.alphabet_size()
        );
    }

    fn init_transitions(&mut self) {
        let symbols = self.alphabet_size();
        if self.size == 0 || symbols == 0 {
            return;
        }
        trace!(
            "allocating transition table for {} states and {symbols} symbols",
            self.size
        );
        self.transitions = vec![None; self.size * symbols];
        self.empty_edges = self.transitions.len();
    }

    fn check_sized(&self) -> Result<()> {
        if self.size == 0 {
            Err(DfaError::Unsized)
        } else {
            Ok(())
        }
    }

    pub(crate) fn check_alphabet(&self) -> Result<&Alphabet<S>> {
        self.alphabet.as_ref().ok_or(DfaError::MissingAlphabet)
    }

    fn check_index(&self, index: usize) -> Result<usize> {
        if index < self.size {
            Ok(index)
        } else {
            Err(DfaError::IndexOutOfRange {
                index,
                size: self.size,
            })
        }
    }

    /// Verifies that `state` belongs to `self` and lies in range, returning its index or `None`
    /// for the invalid state.
    fn resolve(&self, state: State) -> Result<Option<usize>> {
        self.check_sized()?;
        if !state.belongs_to(self) {
            return Err(DfaError::ForeignStateReference);
        }
        state.index().map(|index| self.check_index(index)).transpose()
    }

    fn resolve_valid(&self, state: State) -> Result<usize> {
        self.resolve(state)?.ok_or(DfaError::InvalidState)
    }

    /// Returns a handle to the state with the given `index`.
    pub fn state(&self, index: usize) -> Result<State> {
        self.check_sized()?;
        Ok(State::new(self.id, self.check_index(index)?))
    }

    /// Returns the invalid state of this automaton, which is absorbing and rejecting.
    pub fn invalid(&self) -> Result<State> {
        self.check_sized()?;
        Ok(self.trap())
    }

    pub(crate) fn trap(&self) -> State {
        State::invalid(self.id)
    }

    /// Iterates over handles to all states in index order.
    pub fn states(&self) -> impl Iterator<Item = State> + '_ {
        (0..self.size).map(|index| State::new(self.id, index))
    }

    /// Designates `state` as the start state, replacing a previous one.
    pub fn set_start_state(&mut self, state: State) -> Result<()> {
        self.start = Some(self.resolve_valid(state)?);
        Ok(())
    }

    /// Returns the start state, or the invalid state if none is set.
    pub fn start(&self) -> Result<State> {
        self.check_sized()?;
        Ok(match self.start {
            Some(index) => State::new(self.id, index),
            None => self.trap(),
        })
    }

    /// Assigns a name to `state`. An empty name restores the default name.
    pub fn set_state_name<N: Into<String>>(&mut self, state: State, name: N) -> Result<()> {
        let index = self.resolve_valid(state)?;
        let name = name.into();
        if name.is_empty() {
            self.names.remove(&index);
        } else {
            self.names.insert(index, name);
        }
        Ok(())
    }

    /// Returns the name of `state`. Unnamed states are called `q_i` where `i` is their
    /// index, the invalid state is called `invalid`.
    pub fn state_name(&self, state: State) -> Result<String> {
        Ok(match self.resolve(state)? {
            Some(index) => self.name_of(index),
            None => "invalid".to_string(),
        })
    }

    pub(crate) fn name_of(&self, index: usize) -> String {
        self.names
            .get(&index)
            .cloned()
            .unwrap_or_else(|| default_name(index))
    }

    /// Toggles whether `state` is accepting.
    pub fn flip_acceptance(&mut self, state: State) -> Result<()> {
        let index = self.resolve_valid(state)?;
        self.accepting[index] = !self.accepting[index];
        Ok(())
    }

    /// Sets whether `state` is accepting.
    pub fn set_accepting(&mut self, state: State, accepting: bool) -> Result<()> {
        let index = self.resolve_valid(state)?;
        self.accepting[index] = accepting;
        Ok(())
    }

    /// Sets every acceptance label to `value`.
    pub fn clear_accepting(&mut self, value: bool) {
        self.accepting.fill(value);
    }

    /// Sets the acceptance labels positionally, `mask[i]` determines whether state `i` accepts.
    pub fn set_accepting_mask(&mut self, mask: &[bool]) -> Result<()> {
        self.check_sized()?;
        if mask.len() != self.size {
            return Err(DfaError::LengthMismatch {
                expected: self.size,
                found: mask.len(),
            });
        }
        self.accepting.copy_from_slice(mask);
        Ok(())
    }

    /// Makes exactly the states with the given indices accepting. This is not an incremental
    /// update: every state that is not listed becomes rejecting, including states that were
    /// accepting before. If an index is out of range, the labels remain untouched.
    pub fn set_accepting_exactly<I: IntoIterator<Item = usize>>(&mut self, indices: I) -> Result<()> {
        self.check_sized()?;
        let indices = indices
            .into_iter()
            .map(|index| self.check_index(index))
            .collect::<Result<Vec<_>>>()?;
        self.clear_accepting(false);
        for index in indices {
            self.accepting[index] = true;
        }
        Ok(())
    }

    /// Returns whether `state` is accepting. The invalid state never is.
    pub fn is_accepting(&self, state: State) -> Result<bool> {
        Ok(self
            .resolve(state)?
            .is_some_and(|index| self.accepting[index]))
    }

    /// Iterates over the indices of all accepting states.
    pub fn accepting_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.accepting
            .iter()
            .enumerate()
            .filter_map(|(index, &accepting)| accepting.then_some(index))
    }

    /// Returns the dense transition table if the automaton is complete.
    pub(crate) fn complete_table(&self) -> Result<Table> {
        self.check_sized()?;
        let symbols = self.check_alphabet()?.size();
        let targets = self
            .transitions
            .iter()
            .copied()
            .collect::<Option<Vec<_>>>()
            .ok_or(DfaError::NotComplete(self.empty_edges))?;
        Ok(Table::new(symbols, targets))
    }
}

fn default_name(index: usize) -> String {
    format!("q_{index}")
}

#[cfg(test)]
mod tests {
    use crate::{
        prelude::*,
        tests::{binary, captured_warnings},
    };

    #[test]
    fn sizing_is_one_shot() {
        let mut dfa = Dfa::with_alphabet(binary());
        assert!(dfa.is_empty());
        assert_eq!(dfa.set_size(0), Err(DfaError::InvalidSize(0)));
        dfa.set_size(3).unwrap();
        assert_eq!(dfa.set_size(4), Err(DfaError::AlreadySized(3)));
        assert_eq!(dfa.size(), 3);
        assert_eq!(dfa.empty_edge_count(), 6);
        assert!(!dfa.is_complete());
    }

    #[test]
    fn table_is_allocated_once_both_parts_are_known() {
        let mut dfa: Dfa = Dfa::new();
        dfa.set_size(2).unwrap();
        assert_eq!(dfa.empty_edge_count(), 0);
        assert!(!dfa.is_complete());
        assert_eq!(
            dfa.set_transition(dfa.state(0).unwrap(), &'0', dfa.state(1).unwrap()),
            Err(DfaError::MissingAlphabet)
        );

        dfa.set_alphabet(binary()).unwrap();
        assert_eq!(dfa.empty_edge_count(), 4);
        assert_eq!(
            dfa.set_alphabet(binary()),
            Err(DfaError::AlphabetAlreadySet(2))
        );
    }

    #[test]
    fn resetting_the_alphabet() {
        let mut dfa = Dfa::with_alphabet(binary());
        dfa.set_size(1).unwrap();
        let q = dfa.state(0).unwrap();
        dfa.set_transition(q, &'1', q).unwrap();

        // same size, the table is now addressed by the new symbols
        let logged =
            captured_warnings(|| dfa.reset_alphabet(Alphabet::char_range('a', 2).unwrap()));
        assert!(logged.is_empty(), "{logged}");
        assert_eq!(dfa.transition(q, &'b'), Ok(q));
        assert!(dfa.transition(q, &'1').is_err());

        // different size only warns
        let logged =
            captured_warnings(|| dfa.reset_alphabet(Alphabet::char_range('x', 3).unwrap()));
        assert!(logged.contains("WARN"), "{logged}");
        assert!(logged.contains("does not match"), "{logged}");
        assert_eq!(dfa.alphabet_size(), 2);
        assert_eq!(dfa.transition(q, &'b'), Ok(q));
    }

    #[test]
    fn state_handles_are_checked() {
        let mut dfa = Dfa::with_alphabet(binary());
        assert_eq!(dfa.state(0), Err(DfaError::Unsized));
        assert_eq!(dfa.invalid(), Err(DfaError::Unsized));
        dfa.set_size(2).unwrap();
        assert_eq!(
            dfa.state(2),
            Err(DfaError::IndexOutOfRange { index: 2, size: 2 })
        );

        let mut other = Dfa::with_alphabet(binary());
        other.set_size(2).unwrap();
        let foreign = other.state(0).unwrap();
        assert!(foreign.belongs_to(&other));
        assert!(!foreign.belongs_to(&dfa));
        assert_eq!(
            dfa.set_start_state(foreign),
            Err(DfaError::ForeignStateReference)
        );
        assert_eq!(
            dfa.is_accepting(foreign),
            Err(DfaError::ForeignStateReference)
        );

        let copy = dfa.clone();
        let q = dfa.state(1).unwrap();
        assert_eq!(copy.state_name(q), Err(DfaError::ForeignStateReference));
        assert_eq!(dfa.states().collect::<Vec<_>>(), vec![dfa.state(0).unwrap(), q]);
    }

    #[test]
    fn start_state() {
        let mut dfa = Dfa::with_alphabet(binary());
        dfa.set_size(2).unwrap();
        let start = dfa.start().unwrap();
        assert!(!start.is_valid());

        let q1 = dfa.state(1).unwrap();
        dfa.set_start_state(q1).unwrap();
        assert_eq!(dfa.start(), Ok(q1));
        dfa.set_start_state(dfa.state(0).unwrap()).unwrap();
        assert_eq!(dfa.start().unwrap().index(), Some(0));
        assert_eq!(
            dfa.set_start_state(dfa.invalid().unwrap()),
            Err(DfaError::InvalidState)
        );
    }

    #[test]
    fn names() {
        let mut dfa = Dfa::with_alphabet(binary());
        dfa.set_size(2).unwrap();
        let (q0, q1) = (dfa.state(0).unwrap(), dfa.state(1).unwrap());
        dfa.set_state_name(q1, "sink").unwrap();
        assert_eq!(dfa.state_name(q0).unwrap(), "q_0");
        assert_eq!(dfa.state_name(q1).unwrap(), "sink");
        assert_eq!(dfa.state_name(dfa.invalid().unwrap()).unwrap(), "invalid");

        dfa.set_state_name(q1, "").unwrap();
        assert_eq!(dfa.state_name(q1).unwrap(), "q_1");
    }

    #[test]
    fn acceptance_labels() {
        let mut dfa = Dfa::with_alphabet(binary());
        dfa.set_size(4).unwrap();
        let q = |i| dfa.state(i).unwrap();
        let (q0, q2) = (q(0), q(2));

        dfa.flip_acceptance(q2).unwrap();
        assert!(dfa.is_accepting(q2).unwrap());
        dfa.flip_acceptance(q2).unwrap();
        assert!(!dfa.is_accepting(q2).unwrap());

        dfa.set_accepting_mask(&[true, false, true, false]).unwrap();
        assert_eq!(dfa.accepting_indices().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(
            dfa.set_accepting_mask(&[true]),
            Err(DfaError::LengthMismatch {
                expected: 4,
                found: 1
            })
        );

        // previously accepting states that are not listed become rejecting
        dfa.set_accepting_exactly([1, 3]).unwrap();
        assert_eq!(dfa.accepting_indices().collect::<Vec<_>>(), vec![1, 3]);
        assert!(!dfa.is_accepting(q0).unwrap());

        assert_eq!(
            dfa.set_accepting_exactly([0, 7]),
            Err(DfaError::IndexOutOfRange { index: 7, size: 4 })
        );
        assert_eq!(dfa.accepting_indices().collect::<Vec<_>>(), vec![1, 3]);

        dfa.clear_accepting(true);
        assert_eq!(dfa.accepting_indices().count(), 4);
        dfa.set_accepting(q0, false).unwrap();
        assert_eq!(dfa.accepting_indices().count(), 3);
        assert!(!dfa.is_accepting(dfa.invalid().unwrap()).unwrap());
    }

    #[test]
    fn clearing_resets_everything() {
        let mut dfa = Dfa::with_alphabet(binary());
        dfa.set_size(2).unwrap();
        dfa.set_start_state(dfa.state(0).unwrap()).unwrap();
        let old = dfa.state(1).unwrap();
        let id = dfa.id();
        dfa.clear();
        assert_eq!(dfa.id(), id);
        assert!(dfa.is_empty());
        assert!(dfa.alphabet().is_none());
        assert_eq!(dfa.start(), Err(DfaError::Unsized));
        assert_eq!(dfa.is_accepting(old), Err(DfaError::Unsized));

        // handles from before are not foreign, they are checked against the new size
        dfa.set_size(1).unwrap();
        assert!(old.belongs_to(&dfa));
        assert_eq!(
            dfa.is_accepting(old),
            Err(DfaError::IndexOutOfRange { index: 1, size: 1 })
        );
        dfa.clear();
        dfa.set_size(5).unwrap();
        assert_eq!(dfa.empty_edge_count(), 0);
        assert_eq!(dfa.is_accepting(old), Ok(false));
    }
}
