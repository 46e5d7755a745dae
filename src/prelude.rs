//! Prelude module for convenient imports
//!
//! Import everything you need with: `use patterns::prelude::*;`

// Combinators
pub use crate::combinators::{
    Combinators, Stage, concat, filter, from_iter, merge, split, tee, transform,
};

// Conduit types
pub use crate::conduit::{Inlet, Outlet, channel};

// Errors
pub use crate::error::PatternError;
