use tracing_subscriber::EnvFilter;

/// 로깅 초기화 (RUST_LOG 가 없으면 설정의 기본 레벨 사용)
pub fn init(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .with_target(false)
        .init();
}
