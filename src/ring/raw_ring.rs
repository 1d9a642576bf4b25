use crate::error::{Error, TryAddError};
use crate::index::{advance, resolve, tail};
use core::cmp;

/// Unsynchronized ring state. Every method assumes the caller holds the
/// appropriate side of the ring's lock.
pub(crate) struct RawRing<T> {
    buf: Box<[Option<T>]>,
    /// Absolute slot of the newest element, `None` while the ring is empty.
    head: Option<usize>,
    size: usize,
}

impl<T> RawRing<T> {
    pub(crate) fn with_capacity(cap: usize) -> Self {
        Self {
            buf: empty_slots(cap),
            head: None,
            size: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.size
    }

    pub(crate) fn head(&self) -> Option<usize> {
        self.head
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub(crate) fn is_full(&self) -> bool {
        self.size >= self.capacity()
    }

    /// Slot right after the head. The first write into an empty ring lands
    /// on slot 0.
    fn next_idx(&self) -> usize {
        match self.head {
            Some(head) => advance(1, head, self.capacity()),
            None => 0,
        }
    }

    pub(crate) fn add(&mut self, val: T) -> Result<(), TryAddError<T>> {
        if self.is_full() {
            return Err(TryAddError {
                err: Error::Full,
                val,
            });
        }

        let next = self.next_idx();
        self.buf[next] = Some(val);
        self.head = Some(next);
        self.size += 1;
        Ok(())
    }

    pub(crate) fn add_all<I>(&mut self, values: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator<Item = T>,
    {
        let mut values = values.into_iter();
        if self.size + values.len() > self.capacity() {
            return Err(Error::Full);
        }

        // Fill from the slot after the head up to the end of the storage,
        // then wrap around to the front. The room check above guarantees we
        // never run into the tail, so at most two spans are written.
        while values.len() > 0 {
            let next = self.next_idx();
            let mut n = 0;
            for (slot, val) in self.buf[next..].iter_mut().zip(values.by_ref()) {
                *slot = Some(val);
                n += 1;
            }

            assert!(n > 0, "ring exhausted while adding values that fit");

            self.head = Some(advance(n as isize - 1, next, self.capacity()));
            self.size += n;
        }
        Ok(())
    }

    pub(crate) fn remove(&mut self, count: isize) {
        if count <= 0 {
            return;
        }

        let count = cmp::min(count as usize, self.size);
        for offset in self.size - count..self.size {
            if let Some(idx) = self.resolve(offset as isize) {
                self.buf[idx] = None;
            }
        }

        self.size -= count;
        if self.size == 0 {
            self.head = None;
        }
    }

    /// Writes into the slot after the head without growing the ring. Once
    /// the ring is full this overwrites the oldest element.
    ///
    /// Before the ring is full the window simply slides forward: the value is
    /// counted in place of the current oldest element, whose slot is left
    /// behind outside the window.
    pub(crate) fn push(&mut self, val: T) {
        let head = match self.head {
            Some(head) if self.size > 0 && !self.buf.is_empty() => head,
            _ => return,
        };

        let next = advance(1, head, self.capacity());
        self.buf[next] = Some(val);
        self.head = Some(next);
    }

    pub(crate) fn push_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        if self.is_empty() || self.buf.is_empty() {
            return;
        }

        for val in values {
            self.push(val);
        }
    }

    /// Moves the live window into a fresh storage of `cap` slots, oldest
    /// element first, so the head lands on `size - 1`. The capacity never
    /// drops below the current size.
    pub(crate) fn set_capacity(&mut self, cap: usize) {
        let cap = cmp::max(cap, self.size);
        if cap == self.capacity() {
            return;
        }

        let mut nbuf = Vec::with_capacity(cap);
        if let (Some(head), Some(tail)) = (self.head, self.tail()) {
            if tail <= head {
                nbuf.extend(self.buf[tail..=head].iter_mut().map(Option::take));
            } else {
                nbuf.extend(self.buf[tail..].iter_mut().map(Option::take));
                nbuf.extend(self.buf[..=head].iter_mut().map(Option::take));
            }
        }
        nbuf.resize_with(cap, || None);

        self.buf = nbuf.into_boxed_slice();
        self.head = self.size.checked_sub(1);
    }

    pub(crate) fn get(&self, offset: isize) -> Option<&T> {
        self.resolve(offset)
            .and_then(|idx| self.buf[idx].as_ref())
    }

    /// Live elements, newest first.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.size).filter_map(move |offset| self.get(offset as isize))
    }

    fn resolve(&self, offset: isize) -> Option<usize> {
        let head = self.head?;
        resolve(offset, head, self.size, self.capacity())
    }

    fn tail(&self) -> Option<usize> {
        let head = self.head?;
        tail(head, self.size, self.capacity())
    }
}

fn empty_slots<T>(cap: usize) -> Box<[Option<T>]> {
    (0..cap).map(|_| None).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An empty ring whose next write lands right after `head`.
    fn offset_ring(cap: usize, head: usize) -> RawRing<i32> {
        let mut ring = RawRing::with_capacity(cap);
        ring.head = Some(head);
        ring
    }

    fn contents(ring: &RawRing<i32>) -> Vec<i32> {
        ring.iter().copied().collect()
    }

    #[test]
    fn add_all_in_two_spans() {
        let mut ring = RawRing::with_capacity(10);
        ring.add_all(vec![0, 1, 2, 3]).unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.get(0), Some(&3));

        // write slots 9, 0, 1, 2
        let mut ring = offset_ring(10, 8);
        ring.add_all(vec![0, 1, 2, 3]).unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.head(), Some(2));
        assert_eq!(contents(&ring), vec![3, 2, 1, 0]);
        assert_eq!(ring.buf[9], Some(0));
    }

    #[test]
    fn add_all_fills_exactly() {
        let mut ring = RawRing::with_capacity(4);
        ring.add_all(vec![0, 1, 2, 3]).unwrap();
        assert_eq!(ring.len(), 4);
        assert!(ring.is_full());
    }

    #[test]
    fn add_all_matches_sequential_add_across_the_edge() {
        let mut bulk = offset_ring(6, 3);
        let mut seq = offset_ring(6, 3);
        bulk.add_all(1..6).unwrap();
        for i in 1..6 {
            seq.add(i).unwrap();
        }
        assert_eq!(bulk.head(), seq.head());
        assert_eq!(contents(&bulk), contents(&seq));
    }

    #[test]
    fn set_capacity_linearizes_every_layout() {
        // contiguous from slot 0, contiguous from slot 1, stuck to the end,
        // and wrapped over the end of the storage
        let layouts = [None, Some(0), Some(1), Some(3)];
        for head in layouts {
            let mut ring = match head {
                Some(head) => offset_ring(6, head),
                None => RawRing::with_capacity(5),
            };
            ring.add_all(vec![1, 2, 3, 4]).unwrap();
            ring.set_capacity(10);

            assert_eq!(ring.capacity(), 10);
            assert_eq!(ring.head(), Some(3));
            assert_eq!(&ring.buf[..4], &[Some(1), Some(2), Some(3), Some(4)]);
            assert_eq!(contents(&ring), vec![4, 3, 2, 1]);
        }
    }

    #[test]
    fn set_capacity_single_element() {
        let mut ring = offset_ring(4, 2);
        ring.add(7).unwrap();
        ring.set_capacity(1);
        assert_eq!(ring.capacity(), 1);
        assert_eq!(ring.head(), Some(0));
        assert_eq!(ring.get(0), Some(&7));
    }

    #[test]
    fn set_capacity_on_empty_ring() {
        let mut ring = RawRing::<i32>::with_capacity(4);
        ring.set_capacity(8);
        assert_eq!(ring.capacity(), 8);
        assert_eq!(ring.head(), None);
        assert!(ring.is_empty());

        ring.set_capacity(0);
        assert_eq!(ring.capacity(), 0);
        assert!(ring.is_full());
    }

    #[test]
    fn set_capacity_never_truncates() {
        let mut ring = RawRing::with_capacity(8);
        ring.add_all(vec![1, 2, 3]).unwrap();
        ring.set_capacity(1);
        assert_eq!(ring.capacity(), 3);
        assert_eq!(contents(&ring), vec![3, 2, 1]);
    }

    #[test]
    fn remove_drops_oldest_values() {
        let mut ring = RawRing::with_capacity(5);
        ring.add_all(vec![1, 2, 3]).unwrap();
        ring.remove(2);
        assert_eq!(ring.len(), 1);
        assert_eq!(ring.buf[..2], [None, None]);
        assert_eq!(ring.get(-1), Some(&3));

        ring.remove(10);
        assert!(ring.is_empty());
        assert_eq!(ring.head(), None);
    }

    #[test]
    fn push_before_full_slides_the_window() {
        let mut ring = RawRing::with_capacity(5);
        ring.add_all(vec![1, 2, 3]).unwrap();
        ring.push(4);

        assert_eq!(ring.len(), 3);
        assert_eq!(contents(&ring), vec![4, 3, 2]);
        // the old oldest is still stored but no longer addressable
        assert_eq!(ring.buf[0], Some(1));
    }
}
