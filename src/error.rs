use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T, E = DfaError> = std::result::Result<T, E>;

/// Describes a misuse of the API. Every variant names the violated precondition together
/// with the offending value(s). None of these indicate a runtime condition of the automaton
/// itself, missing transitions for example are represented by the invalid state instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DfaError {
    /// A size of zero was given to an alphabet or an automaton.
    #[error("provided size ({0}) is not a positive integer")]
    InvalidSize(usize),
    /// [`crate::Dfa::set_size`] was called on an automaton that already has states.
    #[error("automaton is already sized with {0} states")]
    AlreadySized(usize),
    /// An alphabet was set on an automaton that already has one.
    #[error("alphabet of size {0} is already set")]
    AlphabetAlreadySet(usize),
    /// The operation requires an alphabet, but none has been set.
    #[error("automaton has no alphabet")]
    MissingAlphabet,
    /// The operation requires states, but the automaton has not been sized yet.
    #[error("automaton has no states")]
    Unsized,
    /// A state handle that was created by a different automaton has been passed.
    #[error("state does not belong to this automaton")]
    ForeignStateReference,
    /// A state index lies outside of `[0, size)`.
    #[error("state index {index} violates the range [0, {size})")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of states of the automaton.
        size: usize,
    },
    /// A symbol id lies outside of `[0, size)`.
    #[error("symbol id {id} violates the range [0, {size})")]
    SymbolIdOutOfRange {
        /// The offending id.
        id: usize,
        /// Size of the alphabet.
        size: usize,
    },
    /// The symbol is not recognized by the alphabet.
    #[error("symbol {0} is not in the alphabet")]
    SymbolNotInAlphabet(String),
    /// The operation needs a valid state but was given the invalid (trap) state.
    #[error("state is invalid")]
    InvalidState,
    /// A positional sequence does not have one entry per state.
    #[error("expected {expected} entries but got {found}")]
    LengthMismatch {
        /// Number of states of the automaton.
        expected: usize,
        /// Length of the provided sequence.
        found: usize,
    },
    /// The operation requires a start state, but none is set.
    #[error("start state is unset")]
    MissingStartState,
    /// The operation requires a complete automaton, but some transitions are missing.
    #[error("automaton is incomplete, {0} transitions are missing")]
    NotComplete(usize),
}
