pub mod entities;
pub mod query;

// Re-export tracing for use in this crate
pub use tracing;
