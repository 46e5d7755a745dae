pub mod inlet;
pub mod outlet;

// Re-export commonly used types
pub use inlet::{Inlet, channel};
pub use outlet::Outlet;
pub(crate) use outlet::{FaultSlot, bounded};
