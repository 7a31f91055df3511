use crate::handlers::{
    entries::{create_entry, delete_entry, list_entries},
    health::health_check,
    labels::list_labels,
    summary::get_monthly_summary,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[cfg(not(test))]
use axum_prometheus::PrometheusMetricLayer;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        // Health check
        .route("/health", get(health_check))
        // Label catalog
        .route("/api/v1/labels", get(list_labels))
        // Entry routes
        .route("/api/v1/entries", get(list_entries))
        .route("/api/v1/entries", post(create_entry))
        .route("/api/v1/entries/:entry_id", delete(delete_entry))
        // Monthly summary
        .route("/api/v1/summary", get(get_monthly_summary));

    // The prometheus recorder is process-global and clashes under cargo test,
    // so the metrics route only exists in non-test builds.
    #[cfg(not(test))]
    let router = {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router
            .route("/metrics", get(|| async move { metric_handle.render() }))
            .layer(prometheus_layer)
    };

    router
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
