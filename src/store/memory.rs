//! 메모리 저장소
//! Postgres 저장소와 동일한 정렬/동작을 가지며 HTTP 테스트와 로컬 확인용으로 쓴다.

// region:    --- Imports
use super::DashboardStore;
use crate::auction::{Auction, NewAuction, SaleType};
use crate::bidding::Bid;
use crate::category::{Category, CategoryInput};
use crate::error::AdminError;
use crate::profile::{Profile, Role};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

// endregion: --- Imports

#[derive(Default)]
struct MemoryData {
    auctions: Vec<Auction>,
    bids: Vec<Bid>,
    profiles: Vec<Profile>,
    categories: Vec<Category>,
}

#[derive(Default)]
pub struct InMemoryStore {
    data: RwLock<MemoryData>,
}

impl InMemoryStore {
    pub fn new(
        auctions: Vec<Auction>,
        bids: Vec<Bid>,
        profiles: Vec<Profile>,
        categories: Vec<Category>,
    ) -> Self {
        Self {
            data: RwLock::new(MemoryData {
                auctions,
                bids,
                profiles,
                categories,
            }),
        }
    }
}

fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

#[async_trait]
impl DashboardStore for InMemoryStore {
    async fn auctions(&self) -> Result<Vec<Auction>, AdminError> {
        let mut auctions = self.data.read().await.auctions.clone();
        auctions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(auctions)
    }

    async fn auction(&self, auction_id: i64) -> Result<Option<Auction>, AdminError> {
        let data = self.data.read().await;
        Ok(data.auctions.iter().find(|a| a.id == auction_id).cloned())
    }

    async fn create_auction(
        &self,
        input: NewAuction,
        sale_type: SaleType,
    ) -> Result<Auction, AdminError> {
        let mut data = self.data.write().await;
        let auction = Auction {
            id: next_id(data.auctions.iter().map(|a| a.id)),
            productname: input.productname.trim().to_string(),
            auctiontype: input.auctiontype,
            auctionsubtype: input.auctionsubtype.map(|s| s.to_ascii_lowercase()),
            scheduledstart: input.scheduledstart,
            auctionduration: input.auctionduration,
            approved: false,
            categoryid: input.categoryid,
            createdby: input.createdby,
            currency: input.currency.map(|c| c.trim().to_ascii_uppercase()),
            startprice: input.startprice,
            reserveprice: input.reserveprice,
            sale_type,
            purchaser: None,
            buy_now_price: input.buy_now_price,
            created_at: Utc::now(),
        };
        data.auctions.push(auction.clone());
        Ok(auction)
    }

    async fn approve_auction(&self, auction_id: i64) -> Result<Option<Auction>, AdminError> {
        let mut data = self.data.write().await;
        Ok(data
            .auctions
            .iter_mut()
            .find(|a| a.id == auction_id)
            .map(|auction| {
                auction.approved = true;
                auction.clone()
            }))
    }

    async fn bids(&self, auction_id: Option<i64>) -> Result<Vec<Bid>, AdminError> {
        let data = self.data.read().await;
        let mut bids: Vec<Bid> = data
            .bids
            .iter()
            .filter(|b| auction_id.map_or(true, |id| b.auction_id == id))
            .cloned()
            .collect();
        bids.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(bids)
    }

    async fn profiles(&self, role: Option<Role>) -> Result<Vec<Profile>, AdminError> {
        let data = self.data.read().await;
        let mut profiles: Vec<Profile> = data
            .profiles
            .iter()
            .filter(|p| role.map_or(true, |r| p.role == r))
            .cloned()
            .collect();
        profiles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(profiles)
    }

    async fn categories(&self) -> Result<Vec<Category>, AdminError> {
        let mut categories = self.data.read().await.categories.clone();
        categories.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(categories)
    }

    async fn create_category(&self, input: CategoryInput) -> Result<Category, AdminError> {
        let mut data = self.data.write().await;
        let category = Category {
            id: next_id(data.categories.iter().map(|c| c.id)),
            title: input.title,
            taxonomy: input.taxonomy,
        };
        data.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        category_id: i64,
        input: CategoryInput,
    ) -> Result<Option<Category>, AdminError> {
        let mut data = self.data.write().await;
        Ok(data
            .categories
            .iter_mut()
            .find(|c| c.id == category_id)
            .map(|category| {
                category.title = input.title;
                category.taxonomy = input.taxonomy;
                category.clone()
            }))
    }

    async fn delete_category(&self, category_id: i64) -> Result<bool, AdminError> {
        let mut data = self.data.write().await;
        let before = data.categories.len();
        data.categories.retain(|c| c.id != category_id);
        // 삭제된 카테고리를 참조하던 경매는 카테고리 없음으로 (ON DELETE SET NULL)
        let removed = data.categories.len() < before;
        if removed {
            for auction in data.auctions.iter_mut() {
                if auction.categoryid == Some(category_id) {
                    auction.categoryid = None;
                }
            }
        }
        Ok(removed)
    }
}
