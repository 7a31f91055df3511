//! Transport-layer types shared across the workspace.
//! These structs mirror the JSON payloads the HTTP handlers emit so the
//! compute crate can build responses without depending on the server crate.

mod converters;
mod filter;
mod summary;

pub use converters::parse_amount;
pub use filter::FacetActivity;
pub use summary::{
    FixedBuckets, KindTotals, LabelBucket, MonthlySummary, PersonBucket, SummaryPeriod, Totals,
};
