//! REST APIハンドラー
//!
//! サービス管理とping API

/// APIエラーレスポンス
pub mod error;
/// サービス管理ハンドラー
pub mod services;

use crate::AppState;
use axum::{
    http::{header, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

/// APIルーターを作成
///
/// `static_dir` が設定されていれば、API以外のパスをそのディレクトリから配信する。
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let mut router = Router::new()
        .route(
            "/api/services",
            get(services::list_services).post(services::create_service),
        )
        .route("/api/services/:id", delete(services::delete_service))
        .route("/api/services/:id/urls", post(services::add_url))
        .route(
            "/api/services/:id/urls/:url_id",
            delete(services::remove_url),
        )
        .route(
            "/api/services/:id/urls/:url_id/ping",
            post(services::ping_endpoint),
        );

    if let Some(dir) = state.static_dir.as_ref() {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
