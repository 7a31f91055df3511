use axum::{extract::State, http::StatusCode, response::Json};
use model::query;
use tracing::{error, info, instrument, trace};

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// List the label catalog
///
/// Labels come back alphabetically with the catch-all `otros` sorted last,
/// ready for a picker widget.
#[utoipa::path(
    get,
    path = "/api/v1/labels",
    tag = "labels",
    responses(
        (status = 200, description = "Labels retrieved successfully", body = ApiResponse<Vec<String>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn list_labels(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<String>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering list_labels function");

    match query::list_labels(&state.db).await {
        Ok(labels) => {
            info!("Successfully retrieved {} labels", labels.len());
            Ok(Json(ApiResponse {
                data: labels,
                message: "Labels retrieved successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to list labels: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to list labels".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}
