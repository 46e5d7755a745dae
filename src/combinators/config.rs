use std::future::Future;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug_span};

use super::stage::Stage;

const DEFAULT_LABEL: &str = "patterns";

/// Configuration shared by every combinator a pipeline builds
///
/// The free functions ([`crate::merge`], [`crate::split`], ...) use
/// `Combinators::default()`. Build one explicitly to change channel capacity,
/// spawn on a specific runtime, or tag worker spans.
///
/// # Example
/// ```rust,ignore
/// let combinators = Combinators::new()
///     .with_capacity(16)
///     .with_label("ingest");
///
/// let merged = combinators.merge(vec![left, right]);
/// let lanes = combinators.split(merged, 4)?;
/// ```
#[derive(Debug, Clone)]
pub struct Combinators {
    capacity: usize,
    handle: Option<Handle>,
    label: String,
}

impl Combinators {
    /// Create a configuration with capacity 1, the ambient runtime and the
    /// default label
    pub fn new() -> Self {
        Self {
            capacity: 1,
            handle: None,
            label: DEFAULT_LABEL.to_string(),
        }
    }

    /// Set the channel capacity of every output (defaults to 1)
    ///
    /// Values below 1 are clamped to 1, the smallest buffer the transport
    /// supports. A write blocks once this many elements are waiting unread.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Spawn workers on the given runtime instead of the ambient one
    ///
    /// Lets pipelines be built from threads that are not inside a runtime.
    pub fn with_handle(mut self, handle: Handle) -> Self {
        self.handle = Some(handle);
        self
    }

    /// Set the label recorded on every worker's tracing span
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Spawn a worker inside a span naming its stage and label
    ///
    /// # Panics
    /// Panics when no handle was configured and the caller is not inside a
    /// Tokio runtime.
    pub(crate) fn spawn<F>(&self, stage: Stage, worker: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let span = debug_span!("stage", %stage, label = %self.label);
        let worker = worker.instrument(span);

        match &self.handle {
            Some(handle) => handle.spawn(worker),
            None => tokio::spawn(worker),
        }
    }
}

impl Default for Combinators {
    fn default() -> Self {
        Self::new()
    }
}
