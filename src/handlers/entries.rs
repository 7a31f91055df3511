use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use common::{parse_amount, FacetActivity};
use compute::{active_facets, apply_filters, AmountRange, DateRange, FilterState};
use model::entities::entry::{self, Currency, Frequency, Kind, Scope};
use model::query;
use rust_decimal::Decimal;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

use crate::schemas::{ApiResponse, AppState, EntriesQuery, ErrorResponse};

/// Request body for creating an entry
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateEntryRequest {
    /// Ledger scope the entry belongs to
    pub scope: Scope,
    /// Entry kind, defaults to gasto when omitted
    pub kind: Option<Kind>,
    /// Whether this is a fixed (recurring) item
    #[serde(default)]
    pub is_fixed: bool,
    /// Recurrence frequency, only meaningful for fixed entries
    pub frequency: Option<Frequency>,
    /// Label name (required, trimmed)
    pub label: String,
    /// Entry amount, must be non-negative
    pub amount: Decimal,
    /// Currency, defaults to pesos when omitted
    pub currency: Option<Currency>,
    /// Free-form note
    pub note: Option<String>,
    /// Collaborator recording the entry, required for scope=casa
    pub recorded_by: Option<String>,
    /// Entry date
    pub date: NaiveDate,
    /// Optional due date
    pub due_date: Option<NaiveDate>,
}

/// Entry as returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EntryResponse {
    /// Entry ID
    pub id: i32,
    /// Ledger scope
    pub scope: Scope,
    /// Entry kind
    pub kind: Kind,
    /// Whether this is a fixed (recurring) item
    pub is_fixed: bool,
    /// Recurrence frequency
    pub frequency: Frequency,
    /// Label name
    pub label: String,
    /// Entry amount
    pub amount: Decimal,
    /// Currency
    pub currency: Currency,
    /// Free-form note
    pub note: Option<String>,
    /// Collaborator who recorded the entry (casa only)
    pub recorded_by: Option<String>,
    /// Entry date
    pub date: NaiveDate,
    /// Due date, if any
    pub due_date: Option<NaiveDate>,
}

impl From<entry::Model> for EntryResponse {
    fn from(model: entry::Model) -> Self {
        Self {
            id: model.id,
            scope: model.scope,
            kind: model.kind,
            is_fixed: model.is_fixed,
            frequency: model.frequency,
            label: model.label,
            amount: model.amount,
            currency: model.currency,
            note: model.note,
            recorded_by: model.recorded_by,
            date: model.date,
            due_date: model.due_date,
        }
    }
}

/// Entries visible under the requested filter, plus facet activity flags
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EntriesListResponse {
    /// Entries that passed every active facet, newest first
    pub entries: Vec<EntryResponse>,
    /// Which facets actually constrained the list
    pub filters: FacetActivity,
}

/// Deletion result
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteEntryResponse {
    /// Whether a row was actually removed
    pub deleted: bool,
}

/// Split a comma-separated query value into trimmed, non-empty tokens
fn split_csv(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn invalid_filter(param: &str, value: &str) -> (StatusCode, Json<ErrorResponse>) {
    warn!("Rejecting {} filter value: {}", param, value);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: format!("Invalid {} value: {}", param, value),
            code: "INVALID_FILTER".to_string(),
            success: false,
        }),
    )
}

fn validation_error(message: &str, code: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
            code: code.to_string(),
            success: false,
        }),
    )
}

/// Parse an es-AR amount bound, treating a blank value as no bound
fn parse_bound(
    param: &str,
    raw: Option<&str>,
) -> Result<Option<Decimal>, (StatusCode, Json<ErrorResponse>)> {
    match raw {
        None => Ok(None),
        Some(text) if text.trim().is_empty() => Ok(None),
        Some(text) => match parse_amount(text) {
            Some(value) => Ok(Some(value)),
            None => Err(invalid_filter(param, text)),
        },
    }
}

/// Build the typed filter state from the raw query parameters
fn build_filter_state(
    params: &EntriesQuery,
) -> Result<FilterState, (StatusCode, Json<ErrorResponse>)> {
    let mut kinds = Vec::new();
    for token in split_csv(params.kind.as_deref()) {
        match token.as_str() {
            "gasto" => kinds.push(Kind::Gasto),
            "ingreso" => kinds.push(Kind::Ingreso),
            other => return Err(invalid_filter("kind", other)),
        }
    }

    let mut currencies = Vec::new();
    for token in split_csv(params.currency.as_deref()) {
        match token.as_str() {
            "pesos" => currencies.push(Currency::Pesos),
            "dolares" => currencies.push(Currency::Dolares),
            other => return Err(invalid_filter("currency", other)),
        }
    }

    let mut fixed = Vec::new();
    for token in split_csv(params.fixed.as_deref()) {
        match token.as_str() {
            "true" => fixed.push(true),
            "false" => fixed.push(false),
            other => return Err(invalid_filter("fixed", other)),
        }
    }

    let mut frequencies = Vec::new();
    for token in split_csv(params.frequency.as_deref()) {
        match token.as_str() {
            "ninguna" => frequencies.push(Frequency::Ninguna),
            "mensual" => frequencies.push(Frequency::Mensual),
            "semanal" => frequencies.push(Frequency::Semanal),
            "diario" => frequencies.push(Frequency::Diario),
            other => return Err(invalid_filter("frequency", other)),
        }
    }

    Ok(FilterState {
        kinds,
        labels: split_csv(params.labels.as_deref()),
        currencies,
        fixed,
        frequencies,
        recorded_by: split_csv(params.recorded_by.as_deref()),
        date: DateRange {
            from: params.date_from,
            to: params.date_to,
        },
        due: DateRange {
            from: params.due_from,
            to: params.due_to,
        },
        amount: AmountRange {
            min: parse_bound("amount_min", params.amount_min.as_deref())?,
            max: parse_bound("amount_max", params.amount_max.as_deref())?,
        },
        note: params.note.clone().unwrap_or_default(),
    })
}

/// List entries for a scope, applying any active filter facets
#[utoipa::path(
    get,
    path = "/api/v1/entries",
    tag = "entries",
    params(EntriesQuery),
    responses(
        (status = 200, description = "Entries retrieved successfully", body = ApiResponse<EntriesListResponse>),
        (status = 400, description = "Invalid filter parameter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn list_entries(
    Query(params): Query<EntriesQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<EntriesListResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering list_entries function");

    let filter = build_filter_state(&params)?;
    let activity = active_facets(&filter, params.scope);
    debug!("Listing {} entries with filter: {:?}", params.scope, filter);

    match query::list_entries_by_scope(&state.db, params.scope).await {
        Ok(entries) => {
            let visible = apply_filters(&entries, &filter, params.scope);
            info!(
                "Retrieved {} entries for scope {} ({} visible after filtering)",
                entries.len(),
                params.scope,
                visible.len()
            );
            Ok(Json(ApiResponse {
                data: EntriesListResponse {
                    entries: visible.into_iter().map(EntryResponse::from).collect(),
                    filters: activity,
                },
                message: "Entries retrieved successfully".to_string(),
                success: true,
            }))
        }
        Err(db_error) => {
            error!("Failed to list entries: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to list entries".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Create a new entry
#[utoipa::path(
    post,
    path = "/api/v1/entries",
    tag = "entries",
    request_body = CreateEntryRequest,
    responses(
        (status = 201, description = "Entry created successfully", body = ApiResponse<EntryResponse>),
        (status = 400, description = "Invalid entry data", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_entry(
    State(state): State<AppState>,
    Json(request): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EntryResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_entry function");
    debug!("Creating entry: {:?}", request);

    let label = request.label.trim().to_string();
    if label.is_empty() {
        warn!("Rejecting entry with blank label");
        return Err(validation_error("Label must not be empty", "INVALID_LABEL"));
    }

    if request.amount < Decimal::ZERO {
        warn!("Rejecting entry with negative amount: {}", request.amount);
        return Err(validation_error(
            "Amount must not be negative",
            "INVALID_AMOUNT",
        ));
    }

    let recorded_by = match request.scope {
        Scope::Casa => match request.recorded_by.as_deref().map(str::trim) {
            Some(person) if !person.is_empty() => Some(person.to_string()),
            _ => {
                warn!("Rejecting casa entry without recorded_by");
                return Err(validation_error(
                    "recorded_by is required for scope casa",
                    "MISSING_RECORDED_BY",
                ));
            }
        },
        // Personal ledger entries carry no recorder, whatever the client sent.
        Scope::Registro => None,
    };

    // Non-fixed entries always store frequency ninguna.
    let frequency = if request.is_fixed {
        request.frequency.unwrap_or(Frequency::Ninguna)
    } else {
        Frequency::Ninguna
    };

    let note = request
        .note
        .as_deref()
        .map(str::trim)
        .filter(|note| !note.is_empty())
        .map(str::to_string);

    let new_entry = entry::ActiveModel {
        scope: Set(request.scope),
        kind: Set(request.kind.unwrap_or(Kind::Gasto)),
        is_fixed: Set(request.is_fixed),
        frequency: Set(frequency),
        label: Set(label),
        amount: Set(request.amount),
        currency: Set(request.currency.unwrap_or(Currency::Pesos)),
        note: Set(note),
        recorded_by: Set(recorded_by),
        date: Set(request.date),
        due_date: Set(request.due_date),
        ..Default::default()
    };

    match query::insert_entry(&state.db, new_entry).await {
        Ok(entry_model) => {
            info!("Successfully created entry with id: {}", entry_model.id);
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse {
                    data: EntryResponse::from(entry_model),
                    message: "Entry created successfully".to_string(),
                    success: true,
                }),
            ))
        }
        Err(db_error) => {
            error!("Failed to create entry: {}", db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create entry".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Delete an entry by ID
#[utoipa::path(
    delete,
    path = "/api/v1/entries/{entry_id}",
    tag = "entries",
    params(
        ("entry_id" = i32, Path, description = "Entry ID")
    ),
    responses(
        (status = 200, description = "Entry deleted successfully", body = ApiResponse<DeleteEntryResponse>),
        (status = 400, description = "Invalid entry ID", body = ErrorResponse),
        (status = 404, description = "Entry not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<i32>,
) -> Result<Json<ApiResponse<DeleteEntryResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering delete_entry function");
    debug!("Deleting entry with id: {}", entry_id);

    if entry_id <= 0 {
        warn!("Rejecting non-positive entry id: {}", entry_id);
        return Err(validation_error("Entry ID must be positive", "INVALID_ID"));
    }

    match query::delete_entry(&state.db, entry_id).await {
        Ok(true) => {
            info!("Successfully deleted entry with id: {}", entry_id);
            Ok(Json(ApiResponse {
                data: DeleteEntryResponse { deleted: true },
                message: "Entry deleted successfully".to_string(),
                success: true,
            }))
        }
        Ok(false) => {
            warn!("Entry with id {} not found", entry_id);
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Entry with id {} not found", entry_id),
                    code: "NOT_FOUND".to_string(),
                    success: false,
                }),
            ))
        }
        Err(db_error) => {
            error!("Failed to delete entry {}: {}", entry_id, db_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to delete entry".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}
