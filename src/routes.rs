// region:    --- Imports
use crate::handlers;
use crate::store::DashboardStore;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

// endregion: --- Imports

/// 핸들러 공유 상태
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DashboardStore>,
    pub admin_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(store: Arc<dyn DashboardStore>, admin_token: Option<String>) -> Self {
        Self {
            store,
            admin_token: admin_token.map(Arc::from),
        }
    }
}

/// `/api/*` 라우터 구성
pub fn router(state: AppState) -> Router {
    // 대시보드 페이지를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/dashboard", get(handlers::handle_dashboard))
        .route("/api/forward-auctions", get(handlers::handle_forward_auctions))
        .route("/api/reverse-auctions", get(handlers::handle_reverse_auctions))
        .route("/api/buy-now", get(handlers::handle_buy_now))
        .route("/api/auctions", post(handlers::handle_create_auction))
        .route("/api/auctions/:id", get(handlers::handle_get_auction))
        .route(
            "/api/auctions/:id/approve",
            post(handlers::handle_approve_auction),
        )
        .route("/api/bids", get(handlers::handle_get_bids))
        .route("/api/all-winners", get(handlers::handle_all_winners))
        .route("/api/bidders", get(handlers::handle_bidders))
        .route("/api/sellers", get(handlers::handle_sellers))
        .route("/api/calendar", get(handlers::handle_calendar))
        .route(
            "/api/category",
            get(handlers::handle_get_categories).post(handlers::handle_create_category),
        )
        .route(
            "/api/category/:id",
            put(handlers::handle_update_category).delete(handlers::handle_delete_category),
        )
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 1024)) // taxonomy 트리 포함 1MB
        .with_state(state)
}
