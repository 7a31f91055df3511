pub mod error;
pub mod filter;
pub mod summary;

pub use error::{ComputeError, Result};
pub use filter::{active_facets, apply_filters, AmountRange, DateRange, Facet, FilterState};
pub use summary::{month_window, summarize, SummaryComputer, MAX_YEAR, MIN_YEAR};
