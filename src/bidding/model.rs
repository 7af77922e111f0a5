use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 입찰 모델 (`bids` 테이블)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bid {
    pub id: i64,
    pub auction_id: i64,
    pub user_id: Uuid,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
    pub location: Option<String>,
}
