//! Library for representing deterministic finite automata (DFAs) over arbitrary finite
//! alphabets and for computing their minimal equivalent form.
//!
//! An automaton ([`Dfa`]) is given by an explicit transition table. Symbols enter the
//! automaton through an [`Alphabet`], which is a bijection between the symbols (of any type)
//! and the dense ids `0..size` that are used to index the table. States are addressed with
//! [`State`] handles. Missing transitions are not an error: a run that hits one ends in the
//! invalid state, which is absorbing and never accepting.
//!
//! The main operations are
//! - [`Dfa::eliminate_unreachable_states`] which drops everything that can not be reached
//!   from the start state,
//! - [`Dfa::equivalence_classes`] which computes the Myhill-Nerode classes of the states with
//!   Hopcroft's partition refinement algorithm in `O(m n log n)` time, and
//! - [`Dfa::minimize`] which combines the two and merges every class into a single state.
//!
//! None of these modify the automaton they are called on, they produce a new one instead.
//! Misuse of the API, such as handing a state of one automaton to another one or minimizing
//! an automaton that is not complete, is reported through [`DfaError`].
//!
//! # Example
//! ```
//! use mindfa::prelude::*;
//!
//! // words over {a, b} that end in 'b', with a redundant state
//! let mut dfa = Dfa::with_alphabet(Alphabet::char_range('a', 2).unwrap());
//! dfa.set_size(3).unwrap();
//! let q: Vec<_> = dfa.states().collect();
//! for (from, symbol, to) in [(0, 'a', 0), (0, 'b', 1), (1, 'a', 2), (1, 'b', 1), (2, 'a', 2), (2, 'b', 1)] {
//!     dfa.set_transition(q[from], &symbol, q[to]).unwrap();
//! }
//! dfa.set_start_state(q[0]).unwrap();
//! dfa.set_accepting_exactly([1]).unwrap();
//!
//! let min = dfa.minimize(false).unwrap();
//! assert_eq!(min.size(), 2);
//! assert!(min.accepts("aab".chars()).unwrap());
//! assert!(!min.accepts("aba".chars()).unwrap());
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use mindfa::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        automaton::{AutomatonId, State},
        Alphabet, Dfa, DfaError,
    };
}

/// Type aliases for the collections used throughout the crate and a few helpers.
pub mod math;

mod error;
pub use error::{DfaError, Result};

/// Module that contains the definition of alphabets.
pub mod alphabet;
pub use alphabet::Alphabet;

/// Defines the automaton itself together with state handles and unreachable state removal.
pub mod automaton;
pub use automaton::{Dfa, State};

/// Contains the partition refinement algorithm and the quotient construction. This is feature
/// gated behind the `minimize` feature.
#[cfg(feature = "minimize")]
pub mod minimization;

/// Implements the generation of random automata.
#[cfg(feature = "random")]
pub mod random;
