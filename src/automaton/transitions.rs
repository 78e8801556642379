use std::{borrow::Borrow, fmt::Debug};

use crate::{Dfa, Result, State};

impl<S: Debug> Dfa<S> {
    /// Sets the transition from `from` on `symbol` to `to`. Passing the invalid state as `to`
    /// removes the transition instead. The number of missing transitions is updated
    /// accordingly, which in turn determines whether the automaton is complete.
    pub fn set_transition(&mut self, from: State, symbol: &S, to: State) -> Result<()> {
        self.check_sized()?;
        let alphabet = self.check_alphabet()?;
        let symbols = alphabet.size();
        let symbol = alphabet.id(symbol)?;
        let from = self.resolve_valid(from)?;
        let to = self.resolve(to)?;

        let previous = std::mem::replace(&mut self.transitions[from * symbols + symbol], to);
        match (previous, to) {
            (Some(_), None) => self.empty_edges += 1,
            (None, Some(_)) => self.empty_edges -= 1,
            _ => {}
        }
        Ok(())
    }

    /// Returns the state that is reached from `state` on `symbol`. If the transition is
    /// missing or `state` is invalid, the invalid state is returned.
    pub fn transition(&self, state: State, symbol: &S) -> Result<State> {
        self.transition_word(state, std::iter::once(symbol))
    }

    /// Runs `word` starting in `state`. All symbols are resolved up front, so a symbol that is
    /// not in the alphabet is reported even if the run would end in the invalid state. As soon
    /// as a transition is missing, the run ends in the invalid state.
    ///
    /// ```
    /// use mindfa::prelude::*;
    ///
    /// let mut dfa = Dfa::with_alphabet(Alphabet::char_range('a', 2).unwrap());
    /// dfa.set_size(2).unwrap();
    /// let (q0, q1) = (dfa.state(0).unwrap(), dfa.state(1).unwrap());
    /// dfa.set_transition(q0, &'a', q1).unwrap();
    /// dfa.set_transition(q1, &'a', q0).unwrap();
    ///
    /// assert_eq!(dfa.transition_word(q0, "aaa".chars()), Ok(q1));
    /// assert!(!dfa.transition_word(q0, "ab".chars()).unwrap().is_valid());
    /// assert!(dfa.transition_word(q0, "ac".chars()).is_err());
    /// ```
    pub fn transition_word<W, B>(&self, state: State, word: W) -> Result<State>
    where
        W: IntoIterator<Item = B>,
        B: Borrow<S>,
    {
        self.check_sized()?;
        let alphabet = self.check_alphabet()?;
        let symbols = alphabet.size();
        let word = word
            .into_iter()
            .map(|symbol| alphabet.id(symbol.borrow()))
            .collect::<Result<Vec<_>>>()?;

        let Some(mut current) = self.resolve(state)? else {
            return Ok(self.trap());
        };
        for symbol in word {
            match self.transitions[current * symbols + symbol] {
                Some(next) => current = next,
                None => return Ok(self.trap()),
            }
        }
        Ok(State::new(self.id, current))
    }

    /// Runs `word` from the start state and reports whether an accepting state is reached.
    /// Without a start state, or if the run hits a missing transition, the word is rejected.
    pub fn accepts<W, B>(&self, word: W) -> Result<bool>
    where
        W: IntoIterator<Item = B>,
        B: Borrow<S>,
    {
        let reached = self.transition_word(self.start()?, word)?;
        self.is_accepting(reached)
    }
}
