use std::{fmt::Debug, sync::Arc};

use crate::{math::Bijection, DfaError, Result};

type IdToSymbol<S> = dyn Fn(usize) -> S + Send + Sync;
type SymbolToId<S> = dyn Fn(&S) -> Option<usize> + Send + Sync;

/// An alphabet is a bijection between a domain of symbols of type `S` and the dense ids
/// `0..size`. Automata only ever store symbol ids, the alphabet is consulted whenever a
/// symbol enters or leaves the automaton.
///
/// The two mappings are provided by the caller and are assumed to be mutual inverses
/// on `0..size`. A symbol is considered to be *in* the alphabet if and only if its
/// inverse image exists and lies in `0..size`.
///
/// # Example
/// ```
/// use mindfa::prelude::*;
///
/// let digits = Alphabet::new(10, |id| char::from(b'0' + id as u8), |c: &char| {
///     c.to_digit(10).map(|d| d as usize)
/// })
/// .unwrap();
/// assert_eq!(digits.size(), 10);
/// assert_eq!(digits.id(&'7'), Ok(7));
/// assert_eq!(digits.symbol(3), Ok('3'));
/// assert!(digits.id(&'x').is_err());
/// ```
pub struct Alphabet<S = char> {
    size: usize,
    to_symbol: Arc<IdToSymbol<S>>,
    to_id: Arc<SymbolToId<S>>,
}

impl<S> Clone for Alphabet<S> {
    fn clone(&self) -> Self {
        Self {
            size: self.size,
            to_symbol: Arc::clone(&self.to_symbol),
            to_id: Arc::clone(&self.to_id),
        }
    }
}

impl<S> Alphabet<S> {
    /// Creates a new alphabet with `size` symbols from the forward mapping `to_symbol` (id to
    /// symbol) and the inverse mapping `to_id` (symbol to id). Fails if `size` is zero.
    pub fn new<F, G>(size: usize, to_symbol: F, to_id: G) -> Result<Self>
    where
        F: Fn(usize) -> S + Send + Sync + 'static,
        G: Fn(&S) -> Option<usize> + Send + Sync + 'static,
    {
        if size == 0 {
            return Err(DfaError::InvalidSize(size));
        }
        Ok(Self {
            size,
            to_symbol: Arc::new(to_symbol),
            to_id: Arc::new(to_id),
        })
    }

    /// Returns the number of symbols in the alphabet.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns an iterator over all symbol ids, which is simply `0..size`.
    pub fn ids(&self) -> std::ops::Range<usize> {
        0..self.size
    }

    /// Returns the symbol with the given `id`.
    pub fn symbol(&self, id: usize) -> Result<S> {
        if id >= self.size {
            return Err(DfaError::SymbolIdOutOfRange {
                id,
                size: self.size,
            });
        }
        Ok((self.to_symbol)(id))
    }

    /// Iterates over all symbols in the order of their ids.
    pub fn symbols(&self) -> impl Iterator<Item = S> + '_ {
        self.ids().map(|id| (self.to_symbol)(id))
    }

    /// Checks whether `symbol` is recognized by the alphabet.
    pub fn contains(&self, symbol: &S) -> bool {
        matches!((self.to_id)(symbol), Some(id) if id < self.size)
    }
}

impl<S: Debug> Alphabet<S> {
    /// Resolves `symbol` to its id. Fails if the symbol is not in the alphabet.
    pub fn id(&self, symbol: &S) -> Result<usize> {
        match (self.to_id)(symbol) {
            Some(id) if id < self.size => Ok(id),
            _ => Err(DfaError::SymbolNotInAlphabet(format!("{symbol:?}"))),
        }
    }
}

impl<S> Alphabet<S>
where
    S: Ord + Clone + Send + Sync + 'static,
{
    /// Builds an alphabet from an explicit list of symbols. Duplicates are ignored, ids are
    /// assigned in order of first occurrence. Fails if no symbol is given.
    ///
    /// ```
    /// use mindfa::prelude::*;
    ///
    /// let alphabet = Alphabet::from_symbols(["if", "then", "else", "then"]).unwrap();
    /// assert_eq!(alphabet.size(), 3);
    /// assert_eq!(alphabet.id(&"else"), Ok(2));
    /// ```
    pub fn from_symbols<I: IntoIterator<Item = S>>(symbols: I) -> Result<Self> {
        let mut bijection = Bijection::new();
        for symbol in symbols {
            if !bijection.contains_right(&symbol) {
                bijection.insert(bijection.len(), symbol);
            }
        }
        // iteration is ordered by id
        let forward: Vec<S> = bijection.iter().map(|(_, s)| s.clone()).collect();
        let inverse = Arc::new(bijection);
        Self::new(
            forward.len(),
            move |id| forward[id].clone(),
            move |symbol| inverse.get_by_right(symbol).copied(),
        )
    }
}

impl Alphabet<char> {
    /// Creates the alphabet of `size` consecutive characters starting at `first`, skipping
    /// code points that are not valid characters. Fails with [`DfaError::InvalidSize`] if `size`
    /// is zero or fewer than `size` characters follow `first`.
    ///
    /// ```
    /// use mindfa::prelude::*;
    ///
    /// let ab = Alphabet::char_range('a', 2).unwrap();
    /// assert_eq!(ab.symbols().collect::<String>(), "ab");
    /// ```
    pub fn char_range(first: char, size: usize) -> Result<Self> {
        let symbols = (first..=char::MAX).take(size).collect::<Vec<_>>();
        if symbols.len() < size {
            return Err(DfaError::InvalidSize(size));
        }
        Self::from_symbols(symbols)
    }
}

impl<S: Debug> Debug for Alphabet<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.symbols()).finish()
    }
}
