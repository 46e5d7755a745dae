use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::config::Combinators;
use super::stage::{Stage, carry_forward, guarded};
use crate::conduit::{FaultSlot, Outlet, bounded};
use crate::error::PatternError;

impl Combinators {
    /// Distribute one input stream round-robin across `n` outputs (fan-out)
    ///
    /// Element `i` of the input goes to output `i % n`, so every output sees
    /// every `n`-th element in original order. A single distributing task does
    /// the forwarding; a slow consumer on one output stalls all of them. All
    /// outputs close once the input has drained.
    ///
    /// An output that is dropped early simply stops receiving: elements
    /// addressed to it are discarded and the others keep their exact share.
    /// A fault recorded on an input [`Outlet`] is carried forward to every
    /// output.
    ///
    /// # Errors
    /// Returns [`PatternError::NoDestinations`] when `n` is zero.
    ///
    /// # Example
    /// ```rust,ignore
    /// let lanes = Combinators::new().split(patterns::from_iter(0..6), 2)?;
    /// // lanes[0] yields 0, 2, 4 and lanes[1] yields 1, 3, 5
    /// ```
    pub fn split<S, T>(&self, input: S, n: usize) -> Result<Vec<Outlet<T>>, PatternError>
    where
        S: Stream<Item = T> + Send + 'static,
        T: Send + 'static,
    {
        if n == 0 {
            return Err(PatternError::NoDestinations);
        }

        let fault = FaultSlot::new();
        let (senders, outlets): (Vec<_>, Vec<_>) = (0..n)
            .map(|_| bounded(self.capacity(), fault.clone()))
            .unzip();
        let upstream = FaultSlot::upstream_of::<S, T>(&input);

        self.spawn(Stage::Split, async move {
            let mut input = Box::pin(input);
            let mut destinations: Vec<Option<mpsc::Sender<T>>> =
                senders.into_iter().map(Some).collect();

            guarded(Stage::Split, &fault, async {
                let mut live = n;
                let mut idx = 0usize;
                let mut read = 0usize;

                while let Some(value) = input.next().await {
                    read += 1;

                    let detached = match &destinations[idx] {
                        Some(tx) => tx.send(value).await.is_err(),
                        None => false,
                    };

                    if detached {
                        destinations[idx] = None;
                        live -= 1;
                        debug!(destination = idx, "Split destination detached");
                        if live == 0 {
                            debug!(read, "Every split destination detached, abandoning input");
                            return;
                        }
                    } else {
                        trace!(destination = idx, "Split forwarded element");
                    }

                    idx = (idx + 1) % n;
                }

                debug!(read, destinations = n, "Split input drained");
            })
            .await;

            carry_forward(Stage::Split, upstream.as_ref(), &fault);
            drop(destinations);
        });

        Ok(outlets)
    }
}

/// Split an input stream on the ambient runtime with default configuration
///
/// See [`Combinators::split`].
pub fn split<S, T>(input: S, n: usize) -> Result<Vec<Outlet<T>>, PatternError>
where
    S: Stream<Item = T> + Send + 'static,
    T: Send + 'static,
{
    Combinators::default().split(input, n)
}
