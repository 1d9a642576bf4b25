use crate::error::Error;
use crate::Ring;
use futures_sink::Sink;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// Feeds a shared [`Ring`] through the [`Sink`] interface.
///
/// The sink never waits for room: `poll_ready` on a full ring resolves to
/// [`Error::Full`] right away. Once closed, every further item is rejected.
pub struct RingSink<T> {
    inner: Option<Arc<Ring<T>>>,
}

impl<T> RingSink<T> {
    pub fn new(ring: Arc<Ring<T>>) -> Self {
        Self { inner: Some(ring) }
    }

    /// The ring this sink writes into, unless the sink was closed.
    pub fn get_ref(&self) -> Option<&Arc<Ring<T>>> {
        self.inner.as_ref()
    }
}

impl<T> Sink<T> for RingSink<T> {
    type Error = Error;

    fn poll_ready(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        match &self.inner {
            Some(ring) if !ring.is_full() => Poll::Ready(Ok(())),
            _ => Poll::Ready(Err(Error::Full)),
        }
    }

    fn start_send(self: Pin<&mut Self>, item: T) -> Result<(), Self::Error> {
        self.inner
            .as_ref()
            .map(|ring| ring.add(item).map_err(Error::from))
            .unwrap_or(Err(Error::Full))
    }

    fn poll_flush(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn poll_close(mut self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner = None;
        Poll::Ready(Ok(()))
    }
}
