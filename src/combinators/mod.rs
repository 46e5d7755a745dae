pub mod concat;
pub mod config;
pub mod filter;
pub mod merge;
pub mod source;
pub mod split;
pub mod stage;
pub mod tee;
pub mod transform;

// Re-export commonly used types
pub use concat::concat;
pub use config::Combinators;
pub use filter::filter;
pub use merge::merge;
pub use source::from_iter;
pub use split::split;
pub use stage::Stage;
pub use tee::tee;
pub use transform::transform;
