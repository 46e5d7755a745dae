use futures::{Stream, StreamExt};
use tracing::{debug, trace};

use super::config::Combinators;
use super::stage::{Stage, carry_forward, guarded};
use crate::conduit::{FaultSlot, Outlet, bounded};

impl Combinators {
    /// Apply `action` to every element of the input, in order
    ///
    /// `action` runs exactly once per element on the worker task, before the
    /// mapped element is written. If it panics the worker records a
    /// [`crate::PatternError::StageFault`] on the outlet, closes it and stops
    /// reading the input. A fault recorded on an input [`Outlet`] is carried
    /// forward to the returned outlet.
    ///
    /// # Example
    /// ```rust,ignore
    /// let doubled = Combinators::new().transform(patterns::from_iter(1..=3), |x| x * 2);
    /// assert_eq!(doubled.collect_all().await?, vec![2, 4, 6]);
    /// ```
    pub fn transform<S, T, F>(&self, input: S, mut action: F) -> Outlet<T>
    where
        S: Stream<Item = T> + Send + 'static,
        T: Send + 'static,
        F: FnMut(T) -> T + Send + 'static,
    {
        let fault = FaultSlot::new();
        let (tx, outlet) = bounded(self.capacity(), fault.clone());
        let upstream = FaultSlot::upstream_of::<S, T>(&input);

        self.spawn(Stage::Transform, async move {
            let mut input = Box::pin(input);
            let mut mapped = 0usize;

            guarded(Stage::Transform, &fault, async {
                while let Some(value) = input.next().await {
                    if tx.send(action(value)).await.is_err() {
                        debug!(mapped, "Transform output detached, abandoning input");
                        return;
                    }
                    mapped += 1;
                    trace!(mapped, "Transform forwarded element");
                }
                debug!(mapped, "Transform input drained");
            })
            .await;

            carry_forward(Stage::Transform, upstream.as_ref(), &fault);
            drop(tx);
        });

        outlet
    }
}

/// Map an input stream on the ambient runtime with default configuration
///
/// See [`Combinators::transform`].
pub fn transform<S, T, F>(input: S, action: F) -> Outlet<T>
where
    S: Stream<Item = T> + Send + 'static,
    T: Send + 'static,
    F: FnMut(T) -> T + Send + 'static,
{
    Combinators::default().transform(input, action)
}
