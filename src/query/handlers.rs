// region:    --- Imports
use super::queries;
use crate::auction::{Auction, NewAuction, SaleType};
use crate::bidding::Bid;
use crate::category::{Category, CategoryInput};
use crate::database::DatabaseManager;
use crate::profile::{Profile, Role};
use sqlx::types::Json;
use sqlx::Error as SqlxError;
use tracing::info;

// endregion: --- Imports

// region:    --- Auction Queries

/// 모든 경매 조회
pub async fn get_all_auctions(db_manager: &DatabaseManager) -> Result<Vec<Auction>, SqlxError> {
    info!("{:<12} --> 모든 경매 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Auction>(queries::GET_ALL_AUCTIONS)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 경매 조회
pub async fn get_auction(
    db_manager: &DatabaseManager,
    auction_id: i64,
) -> Result<Option<Auction>, SqlxError> {
    info!("{:<12} --> 경매 조회 id: {}", "Query", auction_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Auction>(queries::GET_AUCTION)
                    .bind(auction_id)
                    .fetch_optional(&mut **tx)
                    .await
            })
        })
        .await
}

/// 경매 생성 (승인 대기 상태로 저장)
pub async fn insert_auction(
    db_manager: &DatabaseManager,
    input: NewAuction,
    sale_type: SaleType,
) -> Result<Auction, SqlxError> {
    info!("{:<12} --> 경매 생성: {}", "Query", input.productname);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Auction>(queries::INSERT_AUCTION)
                    .bind(input.productname.trim())
                    .bind(input.auctiontype.as_str())
                    .bind(input.auctionsubtype.map(|s| s.to_ascii_lowercase()))
                    .bind(input.scheduledstart)
                    .bind(Json(input.auctionduration))
                    .bind(input.categoryid)
                    .bind(input.createdby)
                    .bind(input.currency.map(|c| c.trim().to_ascii_uppercase()))
                    .bind(input.startprice)
                    .bind(input.reserveprice)
                    .bind(sale_type.code())
                    .bind(input.buy_now_price)
                    .fetch_one(&mut **tx)
                    .await
            })
        })
        .await
}

/// 경매 승인
pub async fn approve_auction(
    db_manager: &DatabaseManager,
    auction_id: i64,
) -> Result<Option<Auction>, SqlxError> {
    info!("{:<12} --> 경매 승인 id: {}", "Query", auction_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Auction>(queries::APPROVE_AUCTION)
                    .bind(auction_id)
                    .fetch_optional(&mut **tx)
                    .await
            })
        })
        .await
}

// endregion: --- Auction Queries

// region:    --- Bid Queries

/// 입찰 조회 (auction_id 가 없으면 전체)
pub async fn get_bids(
    db_manager: &DatabaseManager,
    auction_id: Option<i64>,
) -> Result<Vec<Bid>, SqlxError> {
    info!("{:<12} --> 입찰 조회 auction_id: {:?}", "Query", auction_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                match auction_id {
                    Some(id) => {
                        sqlx::query_as::<_, Bid>(queries::GET_AUCTION_BIDS)
                            .bind(id)
                            .fetch_all(&mut **tx)
                            .await
                    }
                    None => {
                        sqlx::query_as::<_, Bid>(queries::GET_ALL_BIDS)
                            .fetch_all(&mut **tx)
                            .await
                    }
                }
            })
        })
        .await
}

// endregion: --- Bid Queries

// region:    --- Profile Queries

/// 프로필 조회 (role 이 없으면 전체)
pub async fn get_profiles(
    db_manager: &DatabaseManager,
    role: Option<Role>,
) -> Result<Vec<Profile>, SqlxError> {
    info!("{:<12} --> 프로필 조회 role: {:?}", "Query", role);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                match role {
                    Some(role) => {
                        sqlx::query_as::<_, Profile>(queries::GET_PROFILES_BY_ROLE)
                            .bind(role.as_str())
                            .fetch_all(&mut **tx)
                            .await
                    }
                    None => {
                        sqlx::query_as::<_, Profile>(queries::GET_ALL_PROFILES)
                            .fetch_all(&mut **tx)
                            .await
                    }
                }
            })
        })
        .await
}

// endregion: --- Profile Queries

// region:    --- Category Queries

/// 모든 카테고리 조회
pub async fn get_all_categories(db_manager: &DatabaseManager) -> Result<Vec<Category>, SqlxError> {
    info!("{:<12} --> 모든 카테고리 조회", "Query");
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Category>(queries::GET_ALL_CATEGORIES)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 카테고리 생성
pub async fn insert_category(
    db_manager: &DatabaseManager,
    input: CategoryInput,
) -> Result<Category, SqlxError> {
    info!("{:<12} --> 카테고리 생성: {}", "Query", input.title);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Category>(queries::INSERT_CATEGORY)
                    .bind(&input.title)
                    .bind(Json(&input.taxonomy))
                    .fetch_one(&mut **tx)
                    .await
            })
        })
        .await
}

/// 카테고리 수정
pub async fn update_category(
    db_manager: &DatabaseManager,
    category_id: i64,
    input: CategoryInput,
) -> Result<Option<Category>, SqlxError> {
    info!("{:<12} --> 카테고리 수정 id: {}", "Query", category_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Category>(queries::UPDATE_CATEGORY)
                    .bind(category_id)
                    .bind(&input.title)
                    .bind(Json(&input.taxonomy))
                    .fetch_optional(&mut **tx)
                    .await
            })
        })
        .await
}

/// 카테고리 삭제
pub async fn delete_category(
    db_manager: &DatabaseManager,
    category_id: i64,
) -> Result<bool, SqlxError> {
    info!("{:<12} --> 카테고리 삭제 id: {}", "Query", category_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                let result = sqlx::query(queries::DELETE_CATEGORY)
                    .bind(category_id)
                    .execute(&mut **tx)
                    .await?;
                Ok(result.rows_affected() > 0)
            })
        })
        .await
}

// endregion: --- Category Queries
