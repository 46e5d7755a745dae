use futures::future::join_all;
use futures::{Stream, StreamExt};
use tracing::{debug, trace, warn};

use super::config::Combinators;
use super::stage::{Stage, carry_forward, guarded};
use crate::conduit::{FaultSlot, Outlet, bounded};

impl Combinators {
    /// Merge any number of input streams into one output (fan-in)
    ///
    /// Each input gets its own worker task forwarding into the shared output.
    /// Interleaving across inputs is unspecified; order within one input is
    /// kept. A coordinating task joins every worker before the output closes,
    /// so the output ends only after every input has ended. With no inputs the
    /// returned outlet is already closed.
    ///
    /// A fault in one input ends only that input's worker; the other inputs
    /// still drain. Faults recorded on input [`Outlet`]s are carried forward,
    /// so the merged outlet reports the first fault seen on any input.
    ///
    /// # Example
    /// ```rust,ignore
    /// let merged = Combinators::new().merge(vec![
    ///     patterns::from_iter(vec![1, 2, 3]),
    ///     patterns::from_iter(vec![4, 5, 6]),
    /// ]);
    /// let mut all = merged.collect_all().await?;
    /// all.sort();
    /// assert_eq!(all, vec![1, 2, 3, 4, 5, 6]);
    /// ```
    pub fn merge<I, S, T>(&self, inputs: I) -> Outlet<T>
    where
        I: IntoIterator<Item = S>,
        S: Stream<Item = T> + Send + 'static,
        T: Send + 'static,
    {
        let fault = FaultSlot::new();
        let (tx, outlet) = bounded(self.capacity(), fault.clone());

        let workers: Vec<_> = inputs
            .into_iter()
            .enumerate()
            .map(|(source, input)| {
                let tx = tx.clone();
                let fault = fault.clone();
                let upstream = FaultSlot::upstream_of::<S, T>(&input);

                self.spawn(Stage::Merge, async move {
                    let mut input = Box::pin(input);
                    let mut forwarded = 0usize;

                    guarded(Stage::Merge, &fault, async {
                        while let Some(value) = input.next().await {
                            if tx.send(value).await.is_err() {
                                debug!(source, forwarded, "Merge output detached, dropping source");
                                return;
                            }
                            forwarded += 1;
                            trace!(source, forwarded, "Merge forwarded element");
                        }
                        debug!(source, forwarded, "Merge source drained");
                    })
                    .await;

                    carry_forward(Stage::Merge, upstream.as_ref(), &fault);
                    drop(tx);
                })
            })
            .collect();

        let sources = workers.len();
        if sources == 0 {
            debug!("Merge called with no sources, output closed");
            return outlet;
        }

        self.spawn(Stage::Merge, async move {
            for (source, result) in join_all(workers).await.into_iter().enumerate() {
                if let Err(e) = result {
                    warn!(source, error = %e, "Merge worker did not run to completion");
                }
            }

            debug!(sources, "All merge sources finished, closing output");
            drop(tx);
        });

        outlet
    }
}

/// Merge input streams on the ambient runtime with default configuration
///
/// See [`Combinators::merge`].
pub fn merge<I, S, T>(inputs: I) -> Outlet<T>
where
    I: IntoIterator<Item = S>,
    S: Stream<Item = T> + Send + 'static,
    T: Send + 'static,
{
    Combinators::default().merge(inputs)
}
