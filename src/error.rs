use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    Full,
    Empty,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            Error::Full => write!(f, "full ring buffer"),
            Error::Empty => write!(f, "empty ring buffer"),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn is_full(&self) -> bool {
        matches!(&self, Error::Full)
    }

    pub fn is_empty(&self) -> bool {
        matches!(&self, Error::Empty)
    }
}

/// Returned by [`Ring::add`](crate::Ring::add) when there is no room left.
/// The rejected value can be taken back with [`TryAddError::into_inner`].
#[derive(Clone, PartialEq, Eq)]
pub struct TryAddError<T> {
    pub(crate) err: Error,
    pub(crate) val: T,
}

impl<T> fmt::Debug for TryAddError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryAddError")
            .field("kind", &self.err)
            .finish()
    }
}

impl<T> fmt::Display for TryAddError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.err.fmt(f)
    }
}

impl<T> std::error::Error for TryAddError<T> {}

impl<T> From<TryAddError<T>> for Error {
    fn from(err: TryAddError<T>) -> Self {
        err.err
    }
}

impl<T> TryAddError<T> {
    pub fn is_full(&self) -> bool {
        self.err.is_full()
    }

    pub fn into_inner(self) -> T {
        self.val
    }

    pub fn into_error(self) -> Error {
        self.err
    }
}
