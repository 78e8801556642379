//! The quadratic table-filling algorithm. It marks pairs of states as distinguishable,
//! starting from pairs that disagree on acceptance and propagating backwards through the
//! inverse transitions. Only used to cross-check [`super::partition_refinement::hopcroft`].

use std::collections::VecDeque;

use crate::automaton::{Predecessors, Table};

/// Computes the same class numbering as [`super::partition_refinement::hopcroft`] in
/// `O(m n^2)` time and `O(n^2)` space.
pub(crate) fn table_filling(table: &Table, accepting: &[bool]) -> Vec<usize> {
    let n = table.states();
    let m = table.symbols();
    let predecessors = Predecessors::new(table);

    // only pairs (p, q) with p > q are used
    let mut distinguishable = vec![vec![false; n]; n];
    let mut queue = VecDeque::new();
    for p in 0..n {
        for q in 0..p {
            if accepting[p] != accepting[q] {
                distinguishable[p][q] = true;
                queue.push_back((p, q));
            }
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        for symbol in 0..m {
            for &u in predecessors.of(x, symbol) {
                for &v in predecessors.of(y, symbol) {
                    let (p, q) = if u > v { (u, v) } else { (v, u) };
                    if p != q && !distinguishable[p][q] {
                        distinguishable[p][q] = true;
                        queue.push_back((p, q));
                    }
                }
            }
        }
    }

    let mut classes: Vec<Option<usize>> = vec![None; n];
    let mut next = 0;
    for q in 0..n {
        if classes[q].is_some() {
            continue;
        }
        classes[q] = Some(next);
        for p in q + 1..n {
            if !distinguishable[p][q] {
                classes[p] = Some(next);
            }
        }
        next += 1;
    }
    classes.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinguishes_by_suffix() {
        // 0 -> 1 -> 2 -> 2, only 2 accepts: all three states are distinct
        let table = Table::new(1, vec![1, 2, 2]);
        assert_eq!(table_filling(&table, &[false, false, true]), vec![0, 1, 2]);

        // 0 and 1 both move to the accepting sink
        let table = Table::new(1, vec![2, 2, 2]);
        assert_eq!(table_filling(&table, &[false, false, true]), vec![0, 0, 1]);
    }
}
