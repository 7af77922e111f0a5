// region:    --- Imports
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error as ThisError;
use tracing::error;

use crate::response::ApiResponse;

// endregion: --- Imports

// region:    --- Admin Error
/// 관리자 API 공통 에러
#[derive(Debug, ThisError)]
pub enum AdminError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AdminError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdminError::NotFound(_) => StatusCode::NOT_FOUND,
            AdminError::Validation(_) => StatusCode::BAD_REQUEST,
            AdminError::Unauthorized => StatusCode::UNAUTHORIZED,
            AdminError::Database(_) | AdminError::Io(_) | AdminError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // 내부 에러 내용은 로그에만 남기고 응답에는 노출하지 않는다
        let message = match &self {
            AdminError::Database(_) | AdminError::Io(_) | AdminError::Config(_) => {
                error!("{:<12} --> 내부 오류: {}", "Error", self);
                "An internal server error occurred.".to_string()
            }
            _ => self.to_string(),
        };
        (status, Json(ApiResponse::<()>::failure(message))).into_response()
    }
}

// 추출기 거부는 모두 잘못된 요청으로 취급
impl From<JsonRejection> for AdminError {
    fn from(rejection: JsonRejection) -> Self {
        AdminError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AdminError {
    fn from(rejection: QueryRejection) -> Self {
        AdminError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AdminError {
    fn from(rejection: PathRejection) -> Self {
        AdminError::Validation(rejection.body_text())
    }
}

// endregion: --- Admin Error

/// 문자열 컬럼을 열거형으로 변환할 때 발생하는 에러
#[derive(Debug, ThisError)]
#[error("unknown {kind} value: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status_codes() {
        assert_eq!(
            AdminError::NotFound("auction 1".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AdminError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AdminError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AdminError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn json_rejection_becomes_bad_request() {
        let err = AdminError::from(JsonRejection::from(
            axum::extract::rejection::MissingJsonContentType::default(),
        ));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().starts_with("Invalid request: "));
    }

    #[test]
    fn not_found_message_names_the_resource() {
        assert_eq!(
            AdminError::NotFound("category 7".into()).to_string(),
            "category 7 not found"
        );
    }
}
