use tokio::sync::mpsc;

use super::outlet::{FaultSlot, Outlet, bounded};
use crate::error::PatternError;

/// Producer handle for a hand-driven input stream
///
/// Closing the inlet (or dropping every clone of it) ends the paired outlet's
/// stream.
#[derive(Debug)]
pub struct Inlet<T> {
    tx: mpsc::Sender<T>,
}

// Derived Clone would require T: Clone
impl<T> Clone for Inlet<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> Inlet<T> {
    /// Send a value, waiting while the outlet has no room for it
    pub async fn send(&self, value: T) -> Result<(), PatternError> {
        self.tx
            .send(value)
            .await
            .map_err(|_| PatternError::Disconnected)
    }

    /// Close this handle; the stream ends once every clone is closed
    pub fn close(self) {
        drop(self);
    }

    /// Check whether the paired outlet has been dropped
    pub fn is_disconnected(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Create a hand-driven stream with the given channel capacity (minimum 1)
///
/// # Example
/// ```rust,ignore
/// let (inlet, outlet) = patterns::channel(1);
/// tokio::spawn(async move {
///     inlet.send(1).await?;
///     inlet.close();
///     Ok::<_, PatternError>(())
/// });
/// let doubled = patterns::transform(outlet, |x| x * 2);
/// ```
pub fn channel<T>(capacity: usize) -> (Inlet<T>, Outlet<T>) {
    let (tx, outlet) = bounded(capacity, FaultSlot::new());
    (Inlet { tx }, outlet)
}
