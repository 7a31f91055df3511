use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which filter facets are currently constraining the entry list.
///
/// Mirrors the column-header highlight state in the web client. The
/// `recorded_by` flag is always false outside scope `casa`, regardless of
/// the filter values supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct FacetActivity {
    pub kind: bool,
    pub labels: bool,
    pub date: bool,
    pub currency: bool,
    pub amount: bool,
    pub fixed: bool,
    pub frequency: bool,
    pub due: bool,
    pub recorded_by: bool,
    pub note: bool,
}

impl FacetActivity {
    /// True when no facet constrains the list.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
