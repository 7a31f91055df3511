use chrono::NaiveDate;
use common::{
    FacetActivity, FixedBuckets, KindTotals, LabelBucket, MonthlySummary, PersonBucket,
    SummaryPeriod, Totals,
};
use model::entities::entry::{Currency, Frequency, Kind, Scope};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};
use validator::Validate;

use crate::handlers::entries::{
    CreateEntryRequest, DeleteEntryResponse, EntriesListResponse, EntryResponse,
};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
}

/// Query parameters for the monthly summary endpoint
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
pub struct SummaryQuery {
    /// Ledger scope (casa or registro)
    pub scope: Scope,
    /// Calendar year
    #[validate(range(min = 1970, max = 3000))]
    pub year: i32,
    /// Calendar month (1-12)
    #[validate(range(min = 1, max = 12))]
    pub month: u32,
}

/// Query parameters for listing entries with optional filter facets
///
/// Multi-select facets arrive as comma-separated values
/// (`kind=gasto,ingreso&labels=luz,agua`). An empty value deactivates
/// the facet, matching an untouched form control.
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct EntriesQuery {
    /// Ledger scope (casa or registro)
    pub scope: Scope,
    /// Comma-separated entry kinds (gasto, ingreso)
    pub kind: Option<String>,
    /// Comma-separated label names
    pub labels: Option<String>,
    /// Comma-separated currencies (pesos, dolares)
    pub currency: Option<String>,
    /// Comma-separated fixed flags (true, false)
    pub fixed: Option<String>,
    /// Comma-separated frequencies (ninguna, mensual, semanal, diario)
    pub frequency: Option<String>,
    /// Comma-separated collaborator names, only honored for scope=casa
    pub recorded_by: Option<String>,
    /// Earliest entry date (YYYY-MM-DD)
    pub date_from: Option<NaiveDate>,
    /// Latest entry date (YYYY-MM-DD)
    pub date_to: Option<NaiveDate>,
    /// Earliest due date (YYYY-MM-DD)
    pub due_from: Option<NaiveDate>,
    /// Latest due date (YYYY-MM-DD)
    pub due_to: Option<NaiveDate>,
    /// Minimum amount in es-AR notation (e.g. "1.234,56")
    pub amount_min: Option<String>,
    /// Maximum amount in es-AR notation
    pub amount_max: Option<String>,
    /// Case-insensitive note substring
    pub note: Option<String>,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::labels::list_labels,
        crate::handlers::entries::list_entries,
        crate::handlers::entries::create_entry,
        crate::handlers::entries::delete_entry,
        crate::handlers::summary::get_monthly_summary,
    ),
    components(
        schemas(
            ApiResponse<EntriesListResponse>,
            ApiResponse<EntryResponse>,
            ApiResponse<DeleteEntryResponse>,
            ApiResponse<MonthlySummary>,
            ApiResponse<Vec<String>>,
            ErrorResponse,
            HealthResponse,
            SummaryQuery,
            EntriesQuery,
            CreateEntryRequest,
            EntryResponse,
            EntriesListResponse,
            DeleteEntryResponse,
            MonthlySummary,
            SummaryPeriod,
            Totals,
            KindTotals,
            LabelBucket,
            PersonBucket,
            FixedBuckets,
            FacetActivity,
            Scope,
            Kind,
            Currency,
            Frequency,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "labels", description = "Label catalog endpoints"),
        (name = "entries", description = "Expense and income entry endpoints"),
        (name = "summary", description = "Monthly summary endpoints"),
    ),
    info(
        title = "Gastor API",
        description = "Household expense tracker - shared (casa) and personal (registro) ledgers with monthly summaries and faceted filtering",
        version = "0.1.0",
        contact(
            name = "Gastor Team",
            email = "contact@gastor.dev"
        ),
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
