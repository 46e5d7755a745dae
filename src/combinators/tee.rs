use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::config::Combinators;
use super::stage::{Stage, carry_forward, guarded};
use crate::conduit::{FaultSlot, Outlet, bounded};

impl Combinators {
    /// Broadcast every element of one input stream to `n` outputs
    ///
    /// Each element is handed to all `n` outputs before the next one is read,
    /// so throughput follows the slowest consumer. Every output receives the
    /// full sequence in original order and closes once the input has drained.
    ///
    /// The last live output receives the original element and every other
    /// output a clone. With `n == 0` no outputs exist and the input is drained
    /// and discarded. A dropped output stops receiving copies; once every
    /// output is dropped the input is abandoned. A fault recorded on an input
    /// [`Outlet`] is carried forward to every output.
    ///
    /// # Example
    /// ```rust,ignore
    /// let copies = Combinators::new().tee(patterns::from_iter(vec!["a", "b"]), 3);
    /// for copy in copies {
    ///     assert_eq!(copy.collect_all().await?, vec!["a", "b"]);
    /// }
    /// ```
    pub fn tee<S, T>(&self, input: S, n: usize) -> Vec<Outlet<T>>
    where
        S: Stream<Item = T> + Send + 'static,
        T: Clone + Send + 'static,
    {
        let fault = FaultSlot::new();
        let (senders, outlets): (Vec<_>, Vec<_>) = (0..n)
            .map(|_| bounded(self.capacity(), fault.clone()))
            .unzip();
        let upstream = FaultSlot::upstream_of::<S, T>(&input);

        self.spawn(Stage::Tee, async move {
            let mut input = Box::pin(input);
            let mut destinations: Vec<Option<mpsc::Sender<T>>> =
                senders.into_iter().map(Some).collect();

            guarded(Stage::Tee, &fault, async {
                let mut live = n;
                let mut read = 0usize;

                while let Some(value) = input.next().await {
                    read += 1;

                    let Some(last) = destinations.iter().rposition(Option::is_some) else {
                        continue;
                    };

                    let mut value = Some(value);
                    for (destination, slot) in destinations.iter_mut().enumerate().take(last + 1) {
                        let Some(tx) = slot.as_ref() else {
                            continue;
                        };

                        let copy = if destination == last {
                            value.take()
                        } else {
                            value.clone()
                        };
                        let detached = match copy {
                            Some(copy) => tx.send(copy).await.is_err(),
                            None => false,
                        };

                        if detached {
                            *slot = None;
                            live -= 1;
                            debug!(destination, "Tee destination detached");
                        }
                    }

                    if n > 0 && live == 0 {
                        debug!(read, "Every tee destination detached, abandoning input");
                        return;
                    }
                    trace!(read, live, "Tee broadcast element");
                }

                debug!(read, destinations = n, "Tee input drained");
            })
            .await;

            carry_forward(Stage::Tee, upstream.as_ref(), &fault);
            drop(destinations);
        });

        outlets
    }
}

/// Broadcast an input stream on the ambient runtime with default configuration
///
/// See [`Combinators::tee`].
pub fn tee<S, T>(input: S, n: usize) -> Vec<Outlet<T>>
where
    S: Stream<Item = T> + Send + 'static,
    T: Clone + Send + 'static,
{
    Combinators::default().tee(input, n)
}
