//! サービス管理API
//!
//! 一覧・登録・削除とエンドポイント単位のping

use super::error::AppError;
use crate::common::error::MonitorError;
use crate::common::protocol::{AddUrlRequest, CreateServiceRequest, ErrorResponse};
use crate::common::types::{Endpoint, Service};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

/// パスのサービスIDを解釈（UUIDでなければ該当なし）
fn parse_service_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError(MonitorError::NotFound("Service not found".to_string())))
}

/// パスのエンドポイントIDを解釈（UUIDでなければ該当なし）
fn parse_endpoint_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError(MonitorError::NotFound("URL not found".to_string())))
}

/// 不正なJSONボディは400で返す
fn bad_json(rejection: JsonRejection) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: rejection.body_text(),
        }),
    )
        .into_response()
}

/// GET /api/services - サービス一覧（登録順）
pub async fn list_services(State(state): State<AppState>) -> Result<Json<Vec<Service>>, AppError> {
    let services = state.registry.list_services().await?;
    Ok(Json(services))
}

/// POST /api/services - サービス登録
pub async fn create_service(
    State(state): State<AppState>,
    payload: Result<Json<CreateServiceRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_json(rejection),
    };

    let (Some(name), Some(urls)) = (req.name, req.urls) else {
        return AppError(MonitorError::validation("Name and URLs array are required"))
            .into_response();
    };

    match state.registry.create_service(&name, &urls).await {
        Ok(service) => (StatusCode::CREATED, Json(service)).into_response(),
        Err(e) => AppError(e).into_response(),
    }
}

/// DELETE /api/services/:id - サービス削除
pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let service_id = parse_service_id(&id)?;
    state.registry.delete_service(service_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/services/:id/urls/:url_id/ping - エンドポイントの死活確認
///
/// 200で親サービス全体を返す。監視対象が落ちていてもエラーにはならない。
pub async fn ping_endpoint(
    State(state): State<AppState>,
    Path((id, url_id)): Path<(String, String)>,
) -> Result<Json<Service>, AppError> {
    let service_id = parse_service_id(&id)?;
    let endpoint_id = parse_endpoint_id(&url_id)?;
    let service = state
        .registry
        .ping_endpoint(service_id, endpoint_id)
        .await?;
    Ok(Json(service))
}

/// POST /api/services/:id/urls - 既存サービスへのURL追加
pub async fn add_url(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AddUrlRequest>, JsonRejection>,
) -> Response {
    let service_id = match parse_service_id(&id) {
        Ok(service_id) => service_id,
        Err(e) => return e.into_response(),
    };
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_json(rejection),
    };
    let Some(url) = req.url else {
        return AppError(MonitorError::validation("URL is required")).into_response();
    };

    let result: Result<Endpoint, _> = state.registry.add_endpoint(service_id, &url).await;
    match result {
        Ok(endpoint) => (StatusCode::OK, Json(endpoint)).into_response(),
        Err(e) => AppError(e).into_response(),
    }
}

/// DELETE /api/services/:id/urls/:url_id - URL削除
pub async fn remove_url(
    State(state): State<AppState>,
    Path((id, url_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let service_id = parse_service_id(&id)?;
    let endpoint_id = parse_endpoint_id(&url_id)?;
    state
        .registry
        .remove_endpoint(service_id, endpoint_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
