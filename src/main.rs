// region:    --- Imports
use auction_admin::config::Config;
use auction_admin::database::DatabaseManager;
use auction_admin::routes::{self, AppState};
use auction_admin::store::PostgresDashboardStore;
use auction_admin::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 로드 (없어도 무시)
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    // logging 초기화
    telemetry::init(&config.log_level);

    // DatabaseManager 생성
    let db_manager = match DatabaseManager::new(&config).await {
        Ok(db_manager) => Arc::new(db_manager),
        Err(e) => {
            error!("{:<12} --> 데이터베이스 연결 실패: {:?}", "Main", e);
            return Err(e.into());
        }
    };

    // 스키마 초기화 (INIT_SCHEMA=true 인 경우)
    if config.init_schema {
        if let Err(e) = db_manager.initialize_database().await {
            error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
            return Err(e.into());
        }
        info!("{:<12} --> 데이터베이스 초기화 성공", "Main");
    }

    if config.admin_token.is_none() {
        warn!(
            "{:<12} --> ADMIN_TOKEN 미설정: 쓰기 API 는 모두 401 로 응답합니다",
            "Main"
        );
    }

    let store = Arc::new(PostgresDashboardStore::new(db_manager));
    let state = AppState::new(store, config.admin_token.clone());
    let routes_all = routes::router(state);

    // 리스너 생성
    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
