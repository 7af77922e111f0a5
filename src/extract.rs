//! `/api/*` 요청 추출기
//! axum 기본 추출기의 거부 응답(text/plain)을 `AdminError` 로 바꿔
//! 모든 실패가 `{success: false, error}` 형식으로 나가도록 한다.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AdminError;

/// JSON 본문
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AdminError))]
pub struct ApiJson<T>(pub T);

/// 쿼리 스트링
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AdminError))]
pub struct ApiQuery<T>(pub T);

/// 경로 파라미터
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AdminError))]
pub struct ApiPath<T>(pub T);
