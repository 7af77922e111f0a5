use serde::{Deserialize, Serialize};

/// `/api/*` 공통 응답 형식
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// 페이지 요청 값
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
}

pub const DEFAULT_PER_PAGE: usize = 20;
pub const MAX_PER_PAGE: usize = 100;

impl PageRequest {
    /// 쿼리 파라미터로부터 페이지 요청 생성 (0 이하 값은 기본값으로 보정)
    pub fn new(page: Option<usize>, per_page: Option<usize>) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let per_page = per_page
            .filter(|p| *p > 0)
            .unwrap_or(DEFAULT_PER_PAGE)
            .min(MAX_PER_PAGE);
        Self { page, per_page }
    }

    pub fn apply<T>(&self, items: Vec<T>) -> Page<T> {
        let total = items.len();
        let items = items
            .into_iter()
            .skip((self.page - 1) * self.per_page)
            .take(self.per_page)
            .collect();
        Page {
            items,
            total,
            page: self.page,
            per_page: self.per_page,
            total_pages: total.div_ceil(self.per_page),
        }
    }
}

/// 페이지 단위 목록
#[derive(Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}
