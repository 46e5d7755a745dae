//! Stream combinators over concurrent, closable channels
//!
//! Every combinator spawns its own worker task(s) on a Tokio runtime and
//! returns self-closing [`Outlet`]s that can be fed straight into the next
//! combinator:
//!
//! - [`merge()`]: N inputs into one output, interleaved (fan-in)
//! - [`concat()`]: N inputs into one output, one input after another
//! - [`split()`]: one input round-robin across N outputs
//! - [`tee()`]: one input copied to N outputs
//! - [`transform()`]: map every element
//! - [`filter()`]: keep the elements matching a predicate
//!
//! Writes block while the consumer is not ready, which is the only
//! backpressure there is. Nothing can be cancelled: a consumer that never
//! reads stalls everything upstream of it.
//!
//! The free functions run on the ambient runtime with default settings; use
//! [`Combinators`] to choose channel capacity, runtime handle or span label.

pub mod combinators;
pub mod conduit;
pub mod error;
pub mod prelude;

pub use combinators::{
    Combinators, Stage, concat, filter, from_iter, merge, split, tee, transform,
};
pub use conduit::{Inlet, Outlet, channel};
pub use error::PatternError;
