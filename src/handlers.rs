// region:    --- Imports
use crate::auction::{AuctionStatus, AuctionType, NewAuction, SaleType};
use crate::bidding::Bid;
use crate::category::{Category, CategoryInput};
use crate::error::AdminError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::profile::Role;
use crate::response::{ApiResponse, Page, PageRequest};
use crate::routes::AppState;
use crate::stats::reports::{self, BidderStats, BuyNowOverview, CalendarEntry, SellerStats, WinnersReport};
use crate::stats::{self, AuctionFilter, AuctionView, DashboardSummary};
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;
use subtle::ConstantTimeEq;
use tracing::{info, warn};
use uuid::Uuid;

// endregion: --- Imports

type ApiResult<T> = Result<Json<ApiResponse<T>>, AdminError>;

// region:    --- Params
/// 빈 쿼리 값(`?category=`)은 지정하지 않은 것으로 본다
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// 목록 조회 파라미터
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub seller: Option<Uuid>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<usize>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub per_page: Option<usize>,
}

impl ListParams {
    fn filter(&self) -> Result<AuctionFilter, AdminError> {
        let status = self
            .status
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::parse::<AuctionStatus>)
            .transpose()
            .map_err(AdminError::Validation)?;
        Ok(AuctionFilter {
            status,
            category: self.category,
            seller: self.seller,
            search: self.search.clone(),
            ..Default::default()
        })
    }

    fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.per_page)
    }

    fn matches_person(&self, name: &str, email: Option<&str>) -> bool {
        let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            return true;
        };
        let search = search.to_lowercase();
        name.to_lowercase().contains(&search)
            || email.is_some_and(|e| e.to_lowercase().contains(&search))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BidParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub auction_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CalendarParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub to: Option<NaiveDate>,
}

// endregion: --- Params

// region:    --- Responses
#[derive(Debug, Serialize)]
pub struct AuctionList {
    pub summary: DashboardSummary,
    pub auctions: Page<AuctionView>,
}

#[derive(Debug, Serialize)]
pub struct BuyNowList {
    pub overview: BuyNowOverview,
    pub listings: Page<AuctionView>,
}

#[derive(Debug, Serialize)]
pub struct AuctionDetail {
    pub auction: AuctionView,
    pub bids: Vec<Bid>,
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: i64,
}

// endregion: --- Responses

// region:    --- Helpers
/// 경매와 입찰을 동시에 읽어 뷰 생성
async fn load_views(state: &AppState) -> Result<(Vec<AuctionView>, Vec<Bid>), AdminError> {
    let (auctions, bids) = tokio::try_join!(state.store.auctions(), state.store.bids(None))?;
    let views = stats::build_views(auctions, &bids, Utc::now());
    Ok((views, bids))
}

/// 쓰기 API Bearer 토큰 검증
fn authorize(headers: &HeaderMap, state: &AppState) -> Result<(), AdminError> {
    let Some(expected) = state.admin_token.as_deref() else {
        warn!("{:<12} --> ADMIN_TOKEN 미설정, 쓰기 요청 거부", "Auth");
        return Err(AdminError::Unauthorized);
    };
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .and_then(|v| v.strip_prefix("Bearer ").or_else(|| v.strip_prefix("bearer ")))
        .ok_or(AdminError::Unauthorized)?;

    if bool::from(token.trim().as_bytes().ct_eq(expected.as_bytes())) {
        Ok(())
    } else {
        warn!("{:<12} --> 잘못된 토큰", "Auth");
        Err(AdminError::Unauthorized)
    }
}

async fn auction_list(
    state: &AppState,
    params: &ListParams,
    mut filter: AuctionFilter,
) -> Result<AuctionList, AdminError> {
    let requested = params.filter()?;
    filter.status = requested.status;
    filter.category = requested.category;
    filter.seller = requested.seller;
    filter.search = requested.search;

    let (views, _) = load_views(state).await?;
    let views = filter.apply(views);
    Ok(AuctionList {
        summary: stats::summarize(&views),
        auctions: params.page_request().apply(views),
    })
}

// endregion: --- Helpers

// region:    --- Auction Handlers

/// 전체 대시보드 요약
pub async fn handle_dashboard(State(state): State<AppState>) -> ApiResult<DashboardSummary> {
    info!("{:<12} --> 대시보드 요약 조회", "Handler");
    let (views, _) = load_views(&state).await?;
    Ok(Json(ApiResponse::ok(stats::summarize(&views))))
}

/// 정방향 경매 목록 (즉시 구매 제외)
pub async fn handle_forward_auctions(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<AuctionList> {
    info!("{:<12} --> 정방향 경매 조회: {:?}", "Handler", params);
    let filter = AuctionFilter {
        auction_type: Some(AuctionType::Forward),
        exclude_buy_now: true,
        ..Default::default()
    };
    Ok(Json(ApiResponse::ok(auction_list(&state, &params, filter).await?)))
}

/// 역경매 목록
pub async fn handle_reverse_auctions(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<AuctionList> {
    info!("{:<12} --> 역경매 조회: {:?}", "Handler", params);
    let filter = AuctionFilter {
        auction_type: Some(AuctionType::Reverse),
        ..Default::default()
    };
    Ok(Json(ApiResponse::ok(auction_list(&state, &params, filter).await?)))
}

/// 즉시 구매 목록
pub async fn handle_buy_now(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<BuyNowList> {
    info!("{:<12} --> 즉시 구매 조회: {:?}", "Handler", params);
    let mut filter = params.filter()?;
    filter.sale_type = Some(SaleType::BuyNow);

    let (views, _) = load_views(&state).await?;
    let views = filter.apply(views);
    Ok(Json(ApiResponse::ok(BuyNowList {
        overview: reports::buy_now_overview(&views),
        listings: params.page_request().apply(views),
    })))
}

/// 경매 상세 조회
pub async fn handle_get_auction(
    State(state): State<AppState>,
    ApiPath(auction_id): ApiPath<i64>,
) -> ApiResult<AuctionDetail> {
    info!("{:<12} --> 경매 상세 조회 id: {}", "Handler", auction_id);
    let (auction, bids) = tokio::try_join!(
        state.store.auction(auction_id),
        state.store.bids(Some(auction_id))
    )?;
    let auction =
        auction.ok_or_else(|| AdminError::NotFound(format!("auction {}", auction_id)))?;

    let mut summaries = crate::bidding::aggregate(&bids);
    let summary = summaries.remove(&auction_id).unwrap_or_default();
    Ok(Json(ApiResponse::ok(AuctionDetail {
        auction: AuctionView::new(auction, summary, Utc::now()),
        bids,
    })))
}

/// 경매 생성 (승인 대기 상태)
pub async fn handle_create_auction(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(input): ApiJson<NewAuction>,
) -> Result<(StatusCode, Json<ApiResponse<AuctionView>>), AdminError> {
    authorize(&headers, &state)?;
    info!("{:<12} --> 경매 생성 요청: {}", "Handler", input.productname);
    let sale_type = input.validate()?;
    let auction = state.store.create_auction(input, sale_type).await?;
    let view = AuctionView::new(auction, Default::default(), Utc::now());
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(view))))
}

/// 경매 승인
pub async fn handle_approve_auction(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(auction_id): ApiPath<i64>,
) -> ApiResult<AuctionView> {
    authorize(&headers, &state)?;
    info!("{:<12} --> 경매 승인 id: {}", "Handler", auction_id);
    let auction = state
        .store
        .approve_auction(auction_id)
        .await?
        .ok_or_else(|| AdminError::NotFound(format!("auction {}", auction_id)))?;
    let bids = state.store.bids(Some(auction_id)).await?;
    let summary = crate::bidding::aggregate(&bids)
        .remove(&auction_id)
        .unwrap_or_default();
    Ok(Json(ApiResponse::ok(AuctionView::new(auction, summary, Utc::now()))))
}

// endregion: --- Auction Handlers

// region:    --- Bid / People Handlers

/// 입찰 목록
pub async fn handle_get_bids(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<BidParams>,
) -> ApiResult<Vec<Bid>> {
    info!("{:<12} --> 입찰 조회: {:?}", "Handler", params);
    Ok(Json(ApiResponse::ok(state.store.bids(params.auction_id).await?)))
}

/// 낙찰자 목록
pub async fn handle_all_winners(State(state): State<AppState>) -> ApiResult<WinnersReport> {
    info!("{:<12} --> 낙찰자 조회", "Handler");
    let ((views, _), profiles) = tokio::try_join!(load_views(&state), state.store.profiles(None))?;
    Ok(Json(ApiResponse::ok(reports::winners(&views, &profiles))))
}

/// 입찰자 통계
pub async fn handle_bidders(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Page<BidderStats>> {
    info!("{:<12} --> 입찰자 조회: {:?}", "Handler", params);
    let ((views, bids), profiles) = tokio::try_join!(
        load_views(&state),
        state.store.profiles(Some(Role::Bidder))
    )?;
    let stats: Vec<BidderStats> = reports::bidder_stats(&profiles, &bids, &views)
        .into_iter()
        .filter(|s| params.matches_person(&s.name, s.profile.email.as_deref()))
        .collect();
    Ok(Json(ApiResponse::ok(params.page_request().apply(stats))))
}

/// 판매자 통계
pub async fn handle_sellers(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Page<SellerStats>> {
    info!("{:<12} --> 판매자 조회: {:?}", "Handler", params);
    let ((views, _), profiles) = tokio::try_join!(
        load_views(&state),
        state.store.profiles(Some(Role::Seller))
    )?;
    let stats: Vec<SellerStats> = reports::seller_stats(&profiles, &views)
        .into_iter()
        .filter(|s| params.matches_person(&s.name, s.profile.email.as_deref()))
        .collect();
    Ok(Json(ApiResponse::ok(params.page_request().apply(stats))))
}

/// 경매 달력
pub async fn handle_calendar(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<CalendarParams>,
) -> ApiResult<BTreeMap<NaiveDate, Vec<CalendarEntry>>> {
    info!("{:<12} --> 달력 조회: {:?}", "Handler", params);
    if let (Some(from), Some(to)) = (params.from, params.to) {
        if from > to {
            return Err(AdminError::Validation(format!(
                "from ({}) must not be after to ({})",
                from, to
            )));
        }
    }
    let (views, _) = load_views(&state).await?;
    Ok(Json(ApiResponse::ok(reports::calendar(
        &views,
        params.from,
        params.to,
    ))))
}

// endregion: --- Bid / People Handlers

// region:    --- Category Handlers

/// 카테고리 목록
pub async fn handle_get_categories(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    info!("{:<12} --> 카테고리 조회", "Handler");
    Ok(Json(ApiResponse::ok(state.store.categories().await?)))
}

/// 카테고리 생성
pub async fn handle_create_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(input): ApiJson<CategoryInput>,
) -> Result<(StatusCode, Json<ApiResponse<Category>>), AdminError> {
    authorize(&headers, &state)?;
    info!("{:<12} --> 카테고리 생성: {}", "Handler", input.title);
    let category = state.store.create_category(input.validated()?).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(category))))
}

/// 카테고리 수정
pub async fn handle_update_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(category_id): ApiPath<i64>,
    ApiJson(input): ApiJson<CategoryInput>,
) -> ApiResult<Category> {
    authorize(&headers, &state)?;
    info!("{:<12} --> 카테고리 수정 id: {}", "Handler", category_id);
    let category = state
        .store
        .update_category(category_id, input.validated()?)
        .await?
        .ok_or_else(|| AdminError::NotFound(format!("category {}", category_id)))?;
    Ok(Json(ApiResponse::ok(category)))
}

/// 카테고리 삭제
pub async fn handle_delete_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiPath(category_id): ApiPath<i64>,
) -> ApiResult<Deleted> {
    authorize(&headers, &state)?;
    info!("{:<12} --> 카테고리 삭제 id: {}", "Handler", category_id);
    if !state.store.delete_category(category_id).await? {
        return Err(AdminError::NotFound(format!("category {}", category_id)));
    }
    Ok(Json(ApiResponse::ok(Deleted { id: category_id })))
}

// endregion: --- Category Handlers
