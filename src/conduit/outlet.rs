use std::any::Any;
use std::pin::Pin;
use std::sync::{Arc, OnceLock};
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;

use crate::error::PatternError;

/// Shared record of the first fault raised by the worker(s) writing an outlet
///
/// Workers record into the slot before releasing their senders, so a consumer
/// that has observed end-of-stream also observes the fault.
#[derive(Clone, Default)]
pub(crate) struct FaultSlot(Arc<OnceLock<PatternError>>);

impl FaultSlot {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record a fault; later faults are ignored
    pub(crate) fn record(&self, error: PatternError) {
        let _ = self.0.set(error);
    }

    pub(crate) fn get(&self) -> Option<&PatternError> {
        self.0.get()
    }

    /// Slot of `input` when it is an [`Outlet`] written by another combinator
    ///
    /// Any other stream carries no fault record and yields `None`.
    pub(crate) fn upstream_of<S, T>(input: &S) -> Option<FaultSlot>
    where
        S: 'static,
        T: 'static,
    {
        (input as &dyn Any)
            .downcast_ref::<Outlet<T>>()
            .map(|outlet| outlet.fault.clone())
    }
}

/// Read-only, self-closing output stream produced by a combinator
///
/// The combinator that created the outlet is its only writer and the only
/// party that closes it. Once the outlet reports end-of-stream it keeps doing
/// so on every further read.
///
/// # Example
/// ```rust,ignore
/// let mut evens = patterns::filter(patterns::from_iter(0..10), |x| x % 2 == 0);
/// while let Some(x) = evens.recv().await {
///     println!("{x}");
/// }
/// ```
pub struct Outlet<T> {
    rx: mpsc::Receiver<T>,
    fault: FaultSlot,
}

impl<T> Outlet<T> {
    pub(crate) fn new(rx: mpsc::Receiver<T>, fault: FaultSlot) -> Self {
        Self { rx, fault }
    }

    /// Receive the next element, or `None` once the outlet is closed and drained
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Fault recorded by the writing worker or carried forward from its input
    ///
    /// Only meaningful after end-of-stream: a worker that faults records the
    /// fault first and closes the outlet second.
    pub fn fault(&self) -> Option<&PatternError> {
        self.fault.get()
    }

    /// Check whether every writer has released the outlet
    ///
    /// Buffered elements may still be waiting to be received.
    pub fn is_closed(&self) -> bool {
        self.rx.is_closed()
    }

    /// Drain the outlet to end-of-stream and collect every element
    ///
    /// Returns the recorded fault instead of the elements if the writing
    /// worker faulted.
    pub async fn collect_all(mut self) -> Result<Vec<T>, PatternError> {
        let mut items = Vec::new();
        while let Some(item) = self.rx.recv().await {
            items.push(item);
        }

        match self.fault.get() {
            Some(error) => Err(error.clone()),
            None => Ok(items),
        }
    }
}

impl<T> Stream for Outlet<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl<T> std::fmt::Debug for Outlet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Outlet")
            .field("closed", &self.rx.is_closed())
            .field("fault", &self.fault.get())
            .finish()
    }
}

/// Create the sending half and outlet of one combinator output
pub(crate) fn bounded<T>(capacity: usize, fault: FaultSlot) -> (mpsc::Sender<T>, Outlet<T>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (tx, Outlet::new(rx, fault))
}
