//! Hopcroft's partition refinement algorithm for computing the coarsest congruence of a
//! complete automaton that respects acceptance. Runs in `O(m n log n)` for `n` states and
//! `m` symbols.

use tracing::trace;

use crate::automaton::{Predecessors, Table};

/// A partition of `0..n` that supports splitting a class in time linear in the size of the
/// split-off part. All elements live in one array in which every class occupies a contiguous
/// block, `position` allows locating an element so it can be swapped to the front of its block.
#[derive(Debug, Clone)]
struct RefinablePartition {
    elements: Vec<usize>,
    position: Vec<usize>,
    class: Vec<usize>,
    begin: Vec<usize>,
    len: Vec<usize>,
}

impl RefinablePartition {
    /// The partition with a single class containing everything.
    fn new(n: usize) -> Self {
        Self {
            elements: (0..n).collect(),
            position: (0..n).collect(),
            class: vec![0; n],
            begin: vec![0],
            len: vec![n],
        }
    }

    fn class_of(&self, element: usize) -> usize {
        self.class[element]
    }

    fn size(&self, class: usize) -> usize {
        self.len[class]
    }

    fn elements(&self, class: usize) -> &[usize] {
        &self.elements[self.begin[class]..self.begin[class] + self.len[class]]
    }

    /// Moves the given `members` of `class` into a new class and returns its id, `class` keeps
    /// the rest. `members` must be distinct elements of `class`.
    fn split(&mut self, class: usize, members: &[usize]) -> usize {
        let new = self.begin.len();
        let mut slot = self.begin[class];
        for &element in members {
            debug_assert_eq!(self.class[element], class);
            let from = self.position[element];
            let displaced = self.elements[slot];
            self.elements.swap(slot, from);
            self.position[element] = slot;
            self.position[displaced] = from;
            self.class[element] = new;
            slot += 1;
        }
        self.begin.push(self.begin[class]);
        self.len.push(members.len());
        self.begin[class] = slot;
        self.len[class] -= members.len();
        new
    }

    fn classes(&self) -> usize {
        self.begin.len()
    }

    /// Returns the class of every element, classes are renumbered in order of their first
    /// element.
    fn into_class_ids(self) -> Vec<usize> {
        let mut renamed = vec![None; self.classes()];
        let mut next = 0;
        self.class
            .iter()
            .map(|&class| {
                *renamed[class].get_or_insert_with(|| {
                    next += 1;
                    next - 1
                })
            })
            .collect()
    }
}

/// Pending splitters, i.e. pairs of a class and a symbol. A pair is on the stack at most once.
#[derive(Debug, Clone)]
struct Splitters {
    symbols: usize,
    stack: Vec<(usize, usize)>,
    pending: Vec<bool>,
    pushed: usize,
    #[cfg(test)]
    history: Vec<(usize, usize)>,
}

impl Splitters {
    fn new(states: usize, symbols: usize) -> Self {
        Self {
            symbols,
            stack: Vec::with_capacity(states * symbols),
            pending: vec![false; states * symbols],
            pushed: 0,
            #[cfg(test)]
            history: Vec::new(),
        }
    }

    fn is_pending(&self, class: usize, symbol: usize) -> bool {
        self.pending[class * self.symbols + symbol]
    }

    fn push(&mut self, class: usize, symbol: usize) {
        debug_assert!(!self.is_pending(class, symbol));
        self.pending[class * self.symbols + symbol] = true;
        self.stack.push((class, symbol));
        self.pushed += 1;
        #[cfg(test)]
        self.history.push((class, symbol));
    }

    fn pop(&mut self) -> Option<(usize, usize)> {
        let (class, symbol) = self.stack.pop()?;
        self.pending[class * self.symbols + symbol] = false;
        Some((class, symbol))
    }
}

/// Computes the Myhill-Nerode classes of a complete automaton given by its transition `table`
/// and acceptance labels. Two states end up in the same class if and only if they agree on
/// acceptance and their successors on every symbol are in the same class. Classes are
/// numbered `0..k` in order of their smallest state.
pub(crate) fn hopcroft(table: &Table, accepting: &[bool]) -> Vec<usize> {
    refine(table, accepting).0.into_class_ids()
}

/// Runs the refinement and hands back the final partition together with the worklist, which
/// remembers how many splitters were processed.
fn refine(table: &Table, accepting: &[bool]) -> (RefinablePartition, Splitters) {
    let n = table.states();
    let m = table.symbols();
    debug_assert_eq!(n, accepting.len());

    let mut splitters = Splitters::new(n, m);
    if accepting.iter().all(|&a| a) || accepting.iter().all(|&a| !a) {
        return (RefinablePartition::new(n), splitters);
    }

    let predecessors = Predecessors::new(table);
    let mut partition = RefinablePartition::new(n);
    let accepting_states = (0..n).filter(|&q| accepting[q]).collect::<Vec<_>>();
    partition.split(0, &accepting_states);

    let smaller = if partition.size(0) < partition.size(1) {
        0
    } else {
        1
    };
    for symbol in 0..m {
        splitters.push(smaller, symbol);
    }

    // classes hit by the current splitter, and which of their elements are hit
    let mut touched = Vec::new();
    let mut hits: Vec<Vec<usize>> = vec![Vec::new(); n];

    while let Some((splitter, symbol)) = splitters.pop() {
        for &target in partition.elements(splitter) {
            for &source in predecessors.of(target, symbol) {
                let class = partition.class_of(source);
                if hits[class].is_empty() {
                    touched.push(class);
                }
                hits[class].push(source);
            }
        }

        for class in touched.drain(..) {
            if hits[class].len() < partition.size(class) {
                let new = partition.split(class, &hits[class]);
                trace!(
                    "splitting {} states off class {class} into {new} on symbol {symbol}",
                    partition.size(new)
                );
                for a in 0..m {
                    let next = if splitters.is_pending(class, a)
                        || partition.size(new) <= partition.size(class)
                    {
                        new
                    } else {
                        class
                    };
                    splitters.push(next, a);
                }
            }
            hits[class].clear();
        }
    }

    trace!(
        "partition refinement found {} classes using {} splitters",
        partition.classes(),
        splitters.pushed
    );
    (partition, splitters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splitting_keeps_blocks_contiguous() {
        let mut partition = RefinablePartition::new(6);
        let new = partition.split(0, &[4, 1]);
        assert_eq!(new, 1);
        assert_eq!(partition.elements(1), &[4, 1]);
        assert_eq!(partition.size(0), 4);
        let mut rest = partition.elements(0).to_vec();
        rest.sort();
        assert_eq!(rest, vec![0, 2, 3, 5]);

        let newer = partition.split(0, &[5]);
        assert_eq!(partition.elements(newer), &[5]);
        assert_eq!(partition.class_of(5), newer);
        assert_eq!(partition.class_of(1), new);
        for element in 0..6 {
            let class = partition.class_of(element);
            assert!(partition.elements(class).contains(&element));
        }
        assert_eq!(partition.into_class_ids(), vec![0, 1, 0, 0, 1, 2]);
    }

    #[test]
    fn splitters_are_unique_while_pending() {
        let mut splitters = Splitters::new(2, 2);
        splitters.push(1, 0);
        splitters.push(0, 1);
        assert!(splitters.is_pending(1, 0));
        assert_eq!(splitters.pop(), Some((0, 1)));
        assert!(!splitters.is_pending(0, 1));
        assert_eq!(splitters.pop(), Some((1, 0)));
        assert_eq!(splitters.pop(), None);
    }

    #[test]
    fn uniform_acceptance_gives_one_class() {
        let table = Table::new(1, vec![1, 2, 0]);
        assert_eq!(hopcroft(&table, &[true; 3]), vec![0, 0, 0]);
        assert_eq!(hopcroft(&table, &[false; 3]), vec![0, 0, 0]);
    }

    #[test]
    fn smaller_initial_class_seeds_every_symbol() {
        // only the accepting singleton is used as a splitter, for both symbols
        let table = Table::new(2, vec![0, 0, 1, 1, 2, 2]);
        let (partition, splitters) = refine(&table, &[true, false, false]);
        assert_eq!(splitters.history, vec![(1, 0), (1, 1)]);
        assert_eq!(splitters.pushed, 2);
        assert_eq!(partition.into_class_ids(), vec![0, 1, 1]);

        // on a tie the accepting class is the splitter
        let table = Table::new(1, vec![0, 1]);
        let (_, splitters) = refine(&table, &[false, true]);
        assert_eq!(splitters.history, vec![(1, 0)]);
    }

    #[test]
    fn smaller_piece_of_a_split_is_pushed() {
        // 0 -> 1 -> 2 -> 3 -> 3, every split cuts off a single state
        let table = Table::new(1, vec![1, 2, 3, 3]);
        let (partition, splitters) = refine(&table, &[false, false, false, true]);
        // the second split leaves two singletons, the new one wins the tie
        assert_eq!(splitters.history, vec![(1, 0), (2, 0), (3, 0)]);
        assert_eq!(partition.into_class_ids(), vec![0, 1, 2, 3]);

        // the hit part {0, 1, 2} is larger than the remainder {3}, so the remainder is pushed
        let table = Table::new(1, vec![4, 4, 4, 3, 4]);
        let (partition, splitters) = refine(&table, &[false, false, false, false, true]);
        assert_eq!(splitters.history, vec![(1, 0), (0, 0)]);
        assert_eq!(partition.into_class_ids(), vec![0, 0, 0, 1, 2]);
    }

    #[test]
    fn pending_class_pushes_the_new_piece() {
        // {0, 1, 2} accepting is split on 'b' into {0, 1} and {2} while ({0, 1, 2}, 'a') is
        // still waiting, so the larger new piece is pushed for 'a' and the smaller rest for 'b'
        let table = Table::new(2, vec![0, 0, 1, 1, 2, 3, 3, 3, 4, 3, 5, 3, 6, 3]);
        let accepting = [true, true, true, false, false, false, false];
        let (partition, splitters) = refine(&table, &accepting);
        assert_eq!(splitters.history, vec![(1, 0), (1, 1), (2, 0), (1, 1)]);
        assert_eq!(partition.into_class_ids(), vec![0, 0, 1, 2, 2, 2, 2]);
    }

    #[test]
    fn counting_modulo() {
        // a cycle of length 6 accepting every third position is a cycle of length 3
        let table = Table::new(1, vec![1, 2, 3, 4, 5, 0]);
        let accepting = [true, false, false, true, false, false];
        assert_eq!(hopcroft(&table, &accepting), vec![0, 1, 2, 0, 1, 2]);
    }
}
