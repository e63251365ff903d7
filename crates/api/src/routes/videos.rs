use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use video_desk_core::{
    format_display_date, GatewayError, NewVideo, RemoveOutcome, StaticConfirm, VideoPatch,
    VideoRecord, ViewState,
};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Video list routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/videos", get(list_videos).post(create_video))
        .route("/v1/videos/reload", post(reload_videos))
        .route("/v1/videos/{id}", patch(update_video).delete(delete_video))
}

/// A record plus its display-ready dates.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoRow {
    #[serde(flatten)]
    record: VideoRecord,
    uploaded_display: String,
    created_display: String,
    updated_display: String,
}

impl From<VideoRecord> for VideoRow {
    fn from(record: VideoRecord) -> Self {
        Self {
            uploaded_display: format_display_date(record.uploaded_date.as_ref()),
            created_display: format_display_date(record.created_at),
            updated_display: format_display_date(record.updated_at),
            record,
        }
    }
}

#[derive(Debug, Serialize)]
struct ListResponse {
    records: Vec<VideoRow>,
    loading: bool,
    error: Option<String>,
}

impl From<ViewState> for ListResponse {
    fn from(view: ViewState) -> Self {
        Self {
            records: view.records.into_iter().map(VideoRow::from).collect(),
            loading: view.loading,
            error: view.error,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct DeleteParams {
    #[serde(default)]
    confirm: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateResponse {
    id: String,
    updated_at: DateTime<Utc>,
}

async fn list_videos(State(state): State<AppState>) -> Json<ListResponse> {
    Json(state.controller().state().into())
}

async fn reload_videos(State(state): State<AppState>) -> (StatusCode, Json<ListResponse>) {
    state.controller().reload().await;
    (StatusCode::ACCEPTED, Json(state.controller().state().into()))
}

async fn create_video(
    State(state): State<AppState>,
    Json(video): Json<NewVideo>,
) -> ApiResult<(StatusCode, Json<VideoRow>)> {
    let record = state.controller().gateway().create(video).await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

async fn update_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<VideoPatch>,
) -> ApiResult<Json<UpdateResponse>> {
    let updated_at = state.controller().gateway().update(&id, patch).await?;
    Ok(Json(UpdateResponse { id, updated_at }))
}

/// Removal only proceeds with `?confirm=true`, standing in for the dialog.
async fn delete_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> ApiResult<Json<Value>> {
    let controller = state.controller();
    let record = controller
        .state()
        .records
        .into_iter()
        .find(|record| record.id.as_deref() == Some(id.as_str()))
        .ok_or_else(|| ApiError::NotFound(format!("record {id} is not in the current list")))?;

    match controller.remove(&record, &StaticConfirm(params.confirm)).await {
        RemoveOutcome::Failed => Err(GatewayError::Delete.into()),
        RemoveOutcome::MissingId => Err(ApiError::BadRequest("record id is required".into())),
        outcome => Ok(Json(json!({ "id": id, "outcome": outcome }))),
    }
}
