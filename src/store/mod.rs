// region:    --- Imports
use crate::auction::{Auction, NewAuction, SaleType};
use crate::bidding::Bid;
use crate::category::{Category, CategoryInput};
use crate::database::DatabaseManager;
use crate::error::AdminError;
use crate::profile::{Profile, Role};
use crate::query;
use async_trait::async_trait;
use std::sync::Arc;

pub mod memory;

pub use memory::InMemoryStore;

// endregion: --- Imports

// region:    --- Dashboard Store Trait
/// 대시보드 데이터 저장소 트레이트
#[async_trait]
pub trait DashboardStore: Send + Sync {
    /// 모든 경매 (생성일 최신순)
    async fn auctions(&self) -> Result<Vec<Auction>, AdminError>;
    async fn auction(&self, auction_id: i64) -> Result<Option<Auction>, AdminError>;
    async fn create_auction(
        &self,
        input: NewAuction,
        sale_type: SaleType,
    ) -> Result<Auction, AdminError>;
    async fn approve_auction(&self, auction_id: i64) -> Result<Option<Auction>, AdminError>;

    /// 입찰 (최신순). auction_id 가 있으면 해당 경매만
    async fn bids(&self, auction_id: Option<i64>) -> Result<Vec<Bid>, AdminError>;

    async fn profiles(&self, role: Option<Role>) -> Result<Vec<Profile>, AdminError>;

    async fn categories(&self) -> Result<Vec<Category>, AdminError>;
    async fn create_category(&self, input: CategoryInput) -> Result<Category, AdminError>;
    async fn update_category(
        &self,
        category_id: i64,
        input: CategoryInput,
    ) -> Result<Option<Category>, AdminError>;
    async fn delete_category(&self, category_id: i64) -> Result<bool, AdminError>;
}

// endregion: --- Dashboard Store Trait

// region:    --- Postgres Store
/// Postgres 저장소 구현체
pub struct PostgresDashboardStore {
    db_manager: Arc<DatabaseManager>,
}

impl PostgresDashboardStore {
    pub fn new(db_manager: Arc<DatabaseManager>) -> Self {
        Self { db_manager }
    }
}

#[async_trait]
impl DashboardStore for PostgresDashboardStore {
    async fn auctions(&self) -> Result<Vec<Auction>, AdminError> {
        Ok(query::handlers::get_all_auctions(&self.db_manager).await?)
    }

    async fn auction(&self, auction_id: i64) -> Result<Option<Auction>, AdminError> {
        Ok(query::handlers::get_auction(&self.db_manager, auction_id).await?)
    }

    async fn create_auction(
        &self,
        input: NewAuction,
        sale_type: SaleType,
    ) -> Result<Auction, AdminError> {
        Ok(query::handlers::insert_auction(&self.db_manager, input, sale_type).await?)
    }

    async fn approve_auction(&self, auction_id: i64) -> Result<Option<Auction>, AdminError> {
        Ok(query::handlers::approve_auction(&self.db_manager, auction_id).await?)
    }

    async fn bids(&self, auction_id: Option<i64>) -> Result<Vec<Bid>, AdminError> {
        Ok(query::handlers::get_bids(&self.db_manager, auction_id).await?)
    }

    async fn profiles(&self, role: Option<Role>) -> Result<Vec<Profile>, AdminError> {
        Ok(query::handlers::get_profiles(&self.db_manager, role).await?)
    }

    async fn categories(&self) -> Result<Vec<Category>, AdminError> {
        Ok(query::handlers::get_all_categories(&self.db_manager).await?)
    }

    async fn create_category(&self, input: CategoryInput) -> Result<Category, AdminError> {
        Ok(query::handlers::insert_category(&self.db_manager, input).await?)
    }

    async fn update_category(
        &self,
        category_id: i64,
        input: CategoryInput,
    ) -> Result<Option<Category>, AdminError> {
        Ok(query::handlers::update_category(&self.db_manager, category_id, input).await?)
    }

    async fn delete_category(&self, category_id: i64) -> Result<bool, AdminError> {
        Ok(query::handlers::delete_category(&self.db_manager, category_id).await?)
    }
}

// endregion: --- Postgres Store
