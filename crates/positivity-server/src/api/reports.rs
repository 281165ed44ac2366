use axum::{
    extract::{Path, State},
    Extension, Json,
};
use positivity_reporter::{ChannelSource, ReportStore, ReporterError, StoredReport};

use super::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

type ReportResult = Result<Json<ApiResponse<StoredReport>>, ApiError>;

/// `GET /api/v1/reports/{username}`: the newest unexpired report, generated
/// on demand when none is stored.
pub(super) async fn get_report<S, R>(
    State(state): State<AppState<S, R>>,
    Extension(req_id): Extension<RequestId>,
    Path(username): Path<String>,
) -> ReportResult
where
    S: ChannelSource + 'static,
    R: ReportStore + 'static,
{
    let result =
        positivity_reporter::load_or_generate(state.source.as_ref(), state.store.as_ref(), &username)
            .await;
    respond(req_id, result)
}

/// `POST /api/v1/reports/{username}`: always fetch, transform, and store anew.
pub(super) async fn regenerate_report<S, R>(
    State(state): State<AppState<S, R>>,
    Extension(req_id): Extension<RequestId>,
    Path(username): Path<String>,
) -> ReportResult
where
    S: ChannelSource + 'static,
    R: ReportStore + 'static,
{
    let result = positivity_reporter::generate_and_save(
        state.source.as_ref(),
        state.store.as_ref(),
        &username,
    )
    .await;
    respond(req_id, result)
}

fn respond(req_id: RequestId, result: Result<StoredReport, ReporterError>) -> ReportResult {
    match result {
        Ok(stored) => Ok(Json(ApiResponse {
            data: stored,
            meta: ResponseMeta::new(req_id.0),
        })),
        Err(e) => Err(map_reporter_error(req_id.0, &e)),
    }
}

pub(super) fn map_reporter_error(request_id: String, error: &ReporterError) -> ApiError {
    match error {
        ReporterError::NotFound(login) => ApiError::new(
            request_id,
            "not_found",
            format!("twitch channel '{login}' not found"),
        ),
        ReporterError::InvalidUsername(_) => ApiError::new(
            request_id,
            "bad_request",
            "username must be 1-25 letters, digits, or underscores",
        ),
        ReporterError::Source(e) => {
            tracing::error!(error = %e, "twitch request failed");
            ApiError::new(request_id, "upstream_error", "twitch request failed")
        }
        ReporterError::Store(e) => {
            tracing::error!(error = %e, "report store failed");
            ApiError::new(request_id, "internal_error", "database query failed")
        }
        ReporterError::Serialize(e) => {
            tracing::error!(error = %e, "stored report could not be decoded");
            ApiError::new(request_id, "internal_error", "report could not be decoded")
        }
    }
}
