/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;

/// Computes the exclusive prefix sum of a sequence of flags. The `i`-th entry of the
/// result is the number of set flags strictly before position `i`, the second component
/// is the total number of set flags.
///
/// This is used to densely renumber a subset of states while keeping their relative order.
pub fn exclusive_prefix_count<I: IntoIterator<Item = bool>>(flags: I) -> (Vec<usize>, usize) {
    let mut total = 0;
    let offsets = flags
        .into_iter()
        .map(|flag| {
            let current = total;
            total += flag as usize;
            current
        })
        .collect();
    (offsets, total)
}
