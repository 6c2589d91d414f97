//! Helpers for the sorted, duplicate-free vectors that back neighbour lists
//! and the label value set.

/// Position of `value` in an ascending slice.
pub fn sorted_find<T: Ord>(items: &[T], value: &T) -> Option<usize> {
    items.binary_search(value).ok()
}

/// Index at which `value` sits, or would be inserted, in an ascending slice.
pub fn insertion_point<T: Ord>(items: &[T], value: &T) -> usize {
    match items.binary_search(value) {
        Ok(idx) | Err(idx) => idx,
    }
}

/// Inserts `value` keeping `items` ascending and unique.
///
/// Returns `Ok(index)` on insertion, or `Err(index)` of the existing element
/// when `value` is already present.
pub fn sorted_insert<T: Ord>(items: &mut Vec<T>, value: T) -> Result<usize, usize> {
    match items.binary_search(&value) {
        Ok(idx) => Err(idx),
        Err(idx) => {
            items.insert(idx, value);
            Ok(idx)
        }
    }
}

/// True when `items` is strictly ascending.
pub fn is_strictly_sorted<T: Ord>(items: &[T]) -> bool {
    items.windows(2).all(|pair| pair[0] < pair[1])
}
