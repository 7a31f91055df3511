use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use common::MonthlySummary;
use compute::{ComputeError, SummaryComputer};
use tracing::{debug, error, info, instrument, trace, warn};

use crate::schemas::{ApiResponse, AppState, ErrorResponse, SummaryQuery};

/// Compute the monthly summary for a scope
#[utoipa::path(
    get,
    path = "/api/v1/summary",
    tag = "summary",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Summary computed successfully", body = ApiResponse<MonthlySummary>),
        (status = 400, description = "Invalid period", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_monthly_summary(
    Valid(Query(query)): Valid<Query<SummaryQuery>>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MonthlySummary>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_monthly_summary function");
    debug!(
        "Summary requested for {} {}-{:02}",
        query.scope, query.year, query.month
    );

    let computer = SummaryComputer::new();
    match computer
        .compute_monthly_summary(&state.db, query.scope, query.year, query.month)
        .await
    {
        Ok(summary) => {
            info!(
                "Computed summary for {} {}-{:02}",
                summary.scope, query.year, query.month
            );
            Ok(Json(ApiResponse {
                data: summary,
                message: "Summary computed successfully".to_string(),
                success: true,
            }))
        }
        Err(err @ (ComputeError::InvalidYear(_) | ComputeError::InvalidMonth(_))) => {
            warn!("Rejecting summary period: {}", err);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: err.to_string(),
                    code: "INVALID_PERIOD".to_string(),
                    success: false,
                }),
            ))
        }
        Err(ComputeError::Database(db_error)) => {
            error!("Failed to compute summary: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to compute summary".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}
