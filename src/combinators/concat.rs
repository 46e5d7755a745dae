use futures::{Stream, StreamExt};
use tracing::{debug, trace};

use super::config::Combinators;
use super::stage::{Stage, carry_forward, guarded};
use crate::conduit::{FaultSlot, Outlet, bounded};

impl Combinators {
    /// Chain input streams one after another into a single output
    ///
    /// The counterpart of [`Combinators::merge`] for sources whose relative
    /// order matters: every element of the first input, then every element of
    /// the second, and so on. A single worker drains the inputs in turn.
    ///
    /// An input [`Outlet`] that ends with a recorded fault passes the fault on
    /// to the returned outlet, and the remaining inputs are abandoned.
    pub fn concat<I, S, T>(&self, inputs: I) -> Outlet<T>
    where
        I: IntoIterator<Item = S>,
        S: Stream<Item = T> + Send + 'static,
        T: Send + 'static,
    {
        let fault = FaultSlot::new();
        let (tx, outlet) = bounded(self.capacity(), fault.clone());

        let inputs: Vec<_> = inputs
            .into_iter()
            .map(|input| (FaultSlot::upstream_of::<S, T>(&input), Box::pin(input)))
            .collect();
        if inputs.is_empty() {
            debug!("Concat called with no sources, output closed");
            return outlet;
        }

        self.spawn(Stage::Concat, async move {
            let sources = inputs.len();
            let mut forwarded = 0usize;

            guarded(Stage::Concat, &fault, async {
                for (source, (upstream, mut input)) in inputs.into_iter().enumerate() {
                    while let Some(value) = input.next().await {
                        if tx.send(value).await.is_err() {
                            debug!(source, forwarded, "Concat output detached, abandoning sources");
                            return;
                        }
                        forwarded += 1;
                    }
                    trace!(source, "Concat source drained");

                    carry_forward(Stage::Concat, upstream.as_ref(), &fault);
                    if fault.get().is_some() {
                        debug!(source, forwarded, "Concat source faulted, abandoning the rest");
                        return;
                    }
                }
                debug!(sources, forwarded, "All concat sources drained");
            })
            .await;

            drop(tx);
        });

        outlet
    }
}

/// Chain input streams on the ambient runtime with default configuration
///
/// See [`Combinators::concat`].
pub fn concat<I, S, T>(inputs: I) -> Outlet<T>
where
    I: IntoIterator<Item = S>,
    S: Stream<Item = T> + Send + 'static,
    T: Send + 'static,
{
    Combinators::default().concat(inputs)
}
