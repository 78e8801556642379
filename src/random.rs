use tracing::trace;

use crate::{Alphabet, Dfa, Result};

/// Generates a random complete [`Dfa`] with `size` states over the alphabet of the first
/// `symbols` lowercase letters, using the given random number generator. The algorithm is
/// as follows:
/// 1. Start with `size` states and no transitions.
/// 2. For each state and each symbol, draw a target state uniformly and add the transition.
/// 3. Draw for every state whether it is accepting.
///
/// State `0` is the start state. Note that depending on the drawn transitions, there may be
/// unreachable states. Fails if `symbols` or `size` is zero.
pub fn generate_random_dfa_with(rng: &mut fastrand::Rng, symbols: usize, size: usize) -> Result<Dfa> {
    let alphabet = Alphabet::char_range('a', symbols)?;
    let mut dfa = Dfa::with_alphabet(alphabet.clone());
    dfa.set_size(size)?;

    let states = dfa.states().collect::<Vec<_>>();
    for &q in &states {
        for symbol in alphabet.symbols() {
            let target = states[rng.usize(..size)];
            dfa.set_transition(q, &symbol, target)?;
        }
        dfa.set_accepting(q, rng.bool())?;
    }
    dfa.set_start_state(states[0])?;

    trace!("generated random automaton\n{dfa}");
    Ok(dfa)
}

/// Works as [`generate_random_dfa_with`], but uses a randomly seeded generator.
pub fn generate_random_dfa(symbols: usize, size: usize) -> Result<Dfa> {
    generate_random_dfa_with(&mut fastrand::Rng::new(), symbols, size)
}

/// Generate a random word over the symbols of the `alphabet`. The length of the word is drawn
/// uniformly from the range between `min_len` and `max_len`, both inclusive and in either order.
pub fn generate_random_word<S: Clone>(alphabet: &Alphabet<S>, min_len: usize, max_len: usize) -> Vec<S> {
    let symbols = alphabet.symbols().collect::<Vec<_>>();
    let length = fastrand::usize(min_len.min(max_len)..=min_len.max(max_len));
    (0..length)
        .map(|_| symbols[fastrand::usize(..symbols.len())].clone())
        .collect()
}
