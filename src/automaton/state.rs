use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one automaton instance. Every [`crate::Dfa`] draws a fresh token when it
/// is created or cloned, so that [`State`] handles can be checked for their origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AutomatonId(u64);

impl AutomatonId {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A handle to a state of a [`crate::Dfa`]. It is a plain value carrying the identity of the
/// automaton it was obtained from together with the index of the state, it does not borrow
/// the automaton.
///
/// A handle without an index is *invalid* and stands for the trap state: transitions from it
/// lead back to it and it is never accepting. This is what a run produces once it hits a
/// missing transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct State {
    owner: AutomatonId,
    index: Option<usize>,
}

impl State {
    pub(crate) fn new(owner: AutomatonId, index: usize) -> Self {
        Self {
            owner,
            index: Some(index),
        }
    }

    pub(crate) fn invalid(owner: AutomatonId) -> Self {
        Self { owner, index: None }
    }

    /// Returns `true` unless `self` is the invalid (trap) state.
    pub fn is_valid(&self) -> bool {
        self.index.is_some()
    }

    /// Returns the index of the state or `None` for the invalid state.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Returns the identity of the automaton this handle was created by.
    pub fn owner(&self) -> AutomatonId {
        self.owner
    }

    /// Checks whether `self` was created by the given automaton instance.
    pub fn belongs_to<S>(&self, dfa: &crate::Dfa<S>) -> bool {
        self.owner == dfa.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_are_distinct() {
        let a = AutomatonId::fresh();
        let b = AutomatonId::fresh();
        assert_ne!(a, b);

        let q = State::new(a, 3);
        assert!(q.is_valid());
        assert_eq!(q.index(), Some(3));
        assert_eq!(q.owner(), a);

        let trap = State::invalid(b);
        assert!(!trap.is_valid());
        assert_eq!(trap.index(), None);
        assert_ne!(State::invalid(a), trap);
    }
}
