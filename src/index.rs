//! Index arithmetic shared by every ring operation.
//!
//! A ring is addressed two ways: by *absolute* slot in the backing storage,
//! and by *logical offset* from the most recently written element (the head).
//! Offset `0` is the newest element, `size - 1` (or `-1`) the oldest, and any
//! other integer folds modulo `size`.
//!
//! ```text
//! storage slots   0 1 2 3 4 5 6 7 8 9
//! offsets         x 4 3 2 1 0 x x x x    head = 5, size = 5
//! ```

/// Moves the absolute index `from` by `step` slots, wrapping inside
/// `[0, capacity)`. Negative steps walk backwards.
///
/// # Panics
///
/// Panics if `capacity` is zero.
pub fn advance(step: isize, from: usize, capacity: usize) -> usize {
    let capacity = capacity as isize;
    (from as isize + step).rem_euclid(capacity) as usize
}

/// Maps a logical `offset` to the absolute slot that holds it.
///
/// Offsets wrap modulo `size`, not modulo `capacity`: `resolve(size, ..)` is
/// the head again and `resolve(-1, ..)` is the oldest element. Returns `None`
/// for an empty ring.
pub fn resolve(offset: isize, head: usize, size: usize, capacity: usize) -> Option<usize> {
    if size == 0 {
        return None;
    }
    // fold into [0, size) so that -1 means size - 1
    let back = offset.rem_euclid(size as isize);
    Some(advance(-back, head, capacity))
}

/// Absolute slot of the oldest live element.
pub(crate) fn tail(head: usize, size: usize, capacity: usize) -> Option<usize> {
    resolve(-1, head, size, capacity)
}
