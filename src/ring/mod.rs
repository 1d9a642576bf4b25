mod raw_ring;

use self::inner::Lock;
use self::raw_ring::RawRing;
use crate::error::{Error, TryAddError};
use crate::loom::{RwLockReadGuard, RwLockWriteGuard};
use std::fmt;
use std::sync::PoisonError;

#[cfg(feature = "cache-padded")]
mod inner {
    use crate::loom::RwLock;
    use cache_padded::CachePadded;
    use core::ops::Deref;

    pub(crate) struct Lock<T> {
        inner: CachePadded<RwLock<T>>,
    }

    impl<T> Lock<T> {
        pub(crate) fn new(t: T) -> Self {
            Self {
                inner: CachePadded::new(RwLock::new(t)),
            }
        }
    }

    impl<T> Deref for Lock<T> {
        type Target = RwLock<T>;

        fn deref(&self) -> &Self::Target {
            &self.inner
        }
    }
}

#[cfg(not(feature = "cache-padded"))]
mod inner {
    use crate::loom::RwLock;
    use core::ops::Deref;

    pub(crate) struct Lock<T> {
        inner: RwLock<T>,
    }

    impl<T> Lock<T> {
        pub(crate) fn new(t: T) -> Self {
            Self {
                inner: RwLock::new(t),
            }
        }
    }

    impl<T> Deref for Lock<T> {
        type Target = RwLock<T>;

        fn deref(&self) -> &Self::Target {
            &self.inner
        }
    }
}

/// A fixed-capacity circular buffer.
///
/// Elements are addressed by their offset from the newest one: `get(0)` is
/// the latest value added, `get(1)` the one before it, and `get(-1)` the
/// oldest. Offsets wrap modulo the current size.
///
/// Every mutation takes the ring's write lock for its whole duration, reads
/// share the read lock, so a `Ring` can be shared between threads behind an
/// [`Arc`](std::sync::Arc).
///
/// ```
/// use ring_rs::Ring;
///
/// let ring = Ring::with_capacity(5);
/// ring.add_all(vec![1, 2, 3]).unwrap();
/// ring.push(4);
///
/// assert_eq!(ring.len(), 3);
/// assert_eq!(ring.get(0), Ok(4));
/// assert_eq!(ring.get(-1), Ok(2));
/// ```
pub struct Ring<T> {
    lock: Lock<RawRing<T>>,
}

impl<T> Ring<T> {
    /// Creates an empty ring holding at most `cap` elements. A capacity of
    /// zero is allowed: such a ring is both empty and full.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            lock: Lock::new(RawRing::with_capacity(cap)),
        }
    }

    /// Adds `val` as the newest element.
    ///
    /// Fails when the ring is full; nothing is evicted and the value is
    /// handed back inside the error.
    pub fn add(&self, val: T) -> Result<(), TryAddError<T>> {
        let mut ring = self.write();
        ring.add(val).map_err(|err| {
            tracing::debug!(capacity = ring.capacity(), "ring full, rejecting value");
            err
        })
    }

    /// Adds every value in order, as if calling [`add`](Ring::add) for each.
    ///
    /// Either all values fit and are added, or the call fails with
    /// [`Error::Full`] and the ring is left untouched.
    pub fn add_all<I>(&self, values: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator<Item = T>,
    {
        let mut ring = self.write();
        ring.add_all(values).map_err(|err| {
            tracing::debug!(
                capacity = ring.capacity(),
                size = ring.len(),
                "not enough room for bulk add"
            );
            err
        })
    }

    /// Evicts up to `count` of the oldest elements. Non-positive counts do
    /// nothing; counts at or above the size empty the ring.
    pub fn remove(&self, count: isize) {
        let mut ring = self.write();
        ring.remove(count);
        if count > 0 && ring.is_empty() {
            tracing::trace!("ring emptied");
        }
    }

    /// Writes `val` after the newest element without changing the size,
    /// discarding the oldest element.
    ///
    /// This is meant for a ring that has already reached its capacity. On an
    /// empty ring (or one with no capacity) it does nothing. On a ring that is
    /// not yet full the size still does not grow: the window slides forward
    /// and the oldest element falls out of it.
    pub fn push(&self, val: T) {
        self.write().push(val);
    }

    /// Pushes every value in order under a single lock, with the same rules
    /// as [`push`](Ring::push).
    pub fn push_all<I>(&self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.write().push_all(values);
    }

    /// Changes the capacity, keeping every element and their order.
    ///
    /// The capacity is never set below the current size. After a change the
    /// elements are laid out from the start of the new storage.
    pub fn set_capacity(&self, cap: usize) {
        let mut ring = self.write();
        let from = ring.capacity();
        ring.set_capacity(cap);
        if ring.capacity() != from {
            tracing::trace!(from, to = ring.capacity(), size = ring.len(), "ring resized");
        }
    }

    pub fn capacity(&self) -> usize {
        self.read().capacity()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.read().is_full()
    }

    /// Calls `f` with the element at `offset` while holding the read lock.
    pub fn with<F, R>(&self, offset: isize, f: F) -> Result<R, Error>
    where
        F: FnOnce(&T) -> R,
    {
        self.read().get(offset).map(f).ok_or(Error::Empty)
    }

    fn read(&self) -> RwLockReadGuard<'_, RawRing<T>> {
        self.lock.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RawRing<T>> {
        self.lock.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> Ring<T> {
    /// Returns a copy of the element at `offset`.
    ///
    /// `get(0)` is the newest element, `get(len - 1)` and `get(-1)` the
    /// oldest. Fails with [`Error::Empty`] when there is nothing to read.
    pub fn get(&self, offset: isize) -> Result<T, Error> {
        self.with(offset, T::clone)
    }

    /// Copies the live elements out, newest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.read().iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for Ring<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ring = self.read();
        f.debug_struct("Ring")
            .field("capacity", &ring.capacity())
            .field("size", &ring.len())
            .field("head", &ring.head())
            .field("values", &ring.iter().collect::<Vec<_>>())
            .finish()
    }
}
