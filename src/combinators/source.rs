use tracing::debug;

use super::config::Combinators;
use super::stage::{Stage, guarded};
use crate::conduit::{FaultSlot, Outlet, bounded};

impl Combinators {
    /// Feed the items of an iterator into a new outlet from a producer task
    ///
    /// The outlet closes once the iterator is exhausted. Useful as the head
    /// of a pipeline.
    pub fn source<I>(&self, items: I) -> Outlet<I::Item>
    where
        I: IntoIterator,
        I::IntoIter: Send + 'static,
        I::Item: Send + 'static,
    {
        let fault = FaultSlot::new();
        let (tx, outlet) = bounded(self.capacity(), fault.clone());
        let items = items.into_iter();

        self.spawn(Stage::Source, async move {
            let mut produced = 0usize;

            guarded(Stage::Source, &fault, async {
                for item in items {
                    if tx.send(item).await.is_err() {
                        debug!(produced, "Source outlet detached, stopping");
                        return;
                    }
                    produced += 1;
                }
                debug!(produced, "Source exhausted");
            })
            .await;

            drop(tx);
        });

        outlet
    }
}

/// Feed an iterator into a new outlet on the ambient runtime
///
/// See [`Combinators::source`].
pub fn from_iter<I>(items: I) -> Outlet<I::Item>
where
    I: IntoIterator,
    I::IntoIter: Send + 'static,
    I::Item: Send + 'static,
{
    Combinators::default().source(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn yields_items_then_closes() {
        let outlet = from_iter(vec![5, 6, 7]);
        assert_eq!(outlet.collect_all().await, Ok(vec![5, 6, 7]));
    }

    #[tokio::test]
    async fn infinite_source_stops_when_outlet_dropped() {
        let mut outlet = from_iter(0u64..);
        assert_eq!(outlet.recv().await, Some(0));
        assert_eq!(outlet.recv().await, Some(1));
        drop(outlet);
        tokio::task::yield_now().await;
    }

    #[tokio::test]
    async fn honours_configured_capacity() {
        let combinators = Combinators::new().with_capacity(3);
        let outlet = combinators.source(vec!['a', 'b', 'c', 'd']);
        assert_eq!(outlet.collect_all().await, Ok(vec!['a', 'b', 'c', 'd']));
    }
}
