use std::collections::VecDeque;

use bit_set::BitSet;

/// Dense transition table of a complete automaton, stored row by row. The successor of
/// state `q` on the symbol with id `a` is found at position `q * symbols + a`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Table {
    symbols: usize,
    targets: Vec<usize>,
}

impl Table {
    pub(crate) fn new(symbols: usize, targets: Vec<usize>) -> Self {
        debug_assert!(symbols > 0);
        debug_assert_eq!(targets.len() % symbols, 0);
        Self { symbols, targets }
    }

    pub(crate) fn states(&self) -> usize {
        self.targets.len() / self.symbols
    }

    pub(crate) fn symbols(&self) -> usize {
        self.symbols
    }

    pub(crate) fn successor(&self, state: usize, symbol: usize) -> usize {
        self.targets[state * self.symbols + symbol]
    }

    /// The successors of `state`, ordered by symbol id.
    pub(crate) fn row(&self, state: usize) -> &[usize] {
        &self.targets[state * self.symbols..(state + 1) * self.symbols]
    }

    pub(crate) fn into_targets(self) -> Vec<usize> {
        self.targets
    }

    /// Collects the states that can be reached from `origin` in a breadth-first manner.
    pub(crate) fn reachable_from(&self, origin: usize) -> BitSet {
        let mut seen = BitSet::with_capacity(self.states());
        let mut queue = VecDeque::from([origin]);
        seen.insert(origin);
        while let Some(q) = queue.pop_front() {
            for &p in self.row(q) {
                if seen.insert(p) {
                    queue.push_back(p);
                }
            }
        }
        seen
    }
}

/// Inverse of a [`Table`]: for every state `p` and symbol `a` the states `q` with
/// `δ(q, a) = p`. The lists are stored back to back in one buffer, `offsets` delimits them.
#[derive(Debug, Clone)]
pub(crate) struct Predecessors {
    symbols: usize,
    offsets: Vec<usize>,
    sources: Vec<usize>,
}

impl Predecessors {
    pub(crate) fn new(table: &Table) -> Self {
        let symbols = table.symbols();
        let slots = table.targets.len();

        let mut offsets = vec![0; slots + 1];
        for (position, &target) in table.targets.iter().enumerate() {
            offsets[target * symbols + position % symbols + 1] += 1;
        }
        for slot in 0..slots {
            offsets[slot + 1] += offsets[slot];
        }

        let mut fill = offsets.clone();
        let mut sources = vec![0; slots];
        for (position, &target) in table.targets.iter().enumerate() {
            let slot = target * symbols + position % symbols;
            sources[fill[slot]] = position / symbols;
            fill[slot] += 1;
        }

        Self {
            symbols,
            offsets,
            sources,
        }
    }

    /// The states which reach `target` on `symbol`, in increasing order.
    pub(crate) fn of(&self, target: usize, symbol: usize) -> &[usize] {
        let slot = target * self.symbols + symbol;
        &self.sources[self.offsets[slot]..self.offsets[slot + 1]]
    }
}
