//! 경매 현황 / 매출 집계
//! 상태 판정과 입찰 집계 결과를 합쳐 경매별 뷰를 만들고,
//! 상태별 건수, GMV, 수수료, 낙찰/유찰 결과를 요약한다.

// region:    --- Imports
use crate::auction::{classify, Auction, AuctionStatus, AuctionType, SaleType};
use crate::bidding::{aggregate, bids_per_hour, Bid, BidSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

pub mod reports;

// endregion: --- Imports

/// 플랫폼 수수료율 (5%)
pub const COMMISSION_RATE: f64 = 0.05;

// region:    --- Auction View
/// 경매 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Successful,
    Unsold,
}

/// 상태와 입찰 요약이 붙은 경매
#[derive(Debug, Clone, Serialize)]
pub struct AuctionView {
    #[serde(flatten)]
    pub auction: Auction,
    pub status: AuctionStatus,
    pub end_time: Option<DateTime<Utc>>,
    pub bids: BidSummary,
    pub current_amount: f64,
    pub bids_per_hour: f64,
    pub outcome: Option<Outcome>,
    pub realized_amount: f64,
    pub winner: Option<Uuid>,
}

impl AuctionView {
    pub fn new(auction: Auction, bids: BidSummary, now: DateTime<Utc>) -> Self {
        let status = classify(&auction, now);
        let outcome = outcome(&auction, status, &bids);
        let kind = auction.auctiontype;

        let current_amount = if auction.is_buy_now() {
            auction.buy_now_price.or(auction.startprice).unwrap_or(0.0)
        } else if bids.has_bids() {
            bids.best(kind)
        } else {
            auction.startprice.unwrap_or(0.0)
        };

        let (realized_amount, winner) = match outcome {
            Some(Outcome::Successful) if auction.is_buy_now() => {
                (auction.buy_now_price.unwrap_or(0.0), auction.purchaser)
            }
            Some(Outcome::Successful) => (bids.best(kind), bids.leader(kind)),
            _ => (0.0, None),
        };

        Self {
            end_time: auction.end_time(),
            bids_per_hour: bids_per_hour(&bids, &auction, now),
            auction,
            status,
            bids,
            current_amount,
            outcome,
            realized_amount,
            winner,
        }
    }

    pub fn is_successful(&self) -> bool {
        self.outcome == Some(Outcome::Successful)
    }
}

/// 경매 결과 판정
/// - 즉시 구매: 구매자가 있으면 성공, 구매자 없이 종료되면 유찰
/// - 경매: 종료 후 입찰이 있고 최저 낙찰가를 충족하면 성공
///   (역경매의 reserveprice 는 상한가로 본다)
fn outcome(auction: &Auction, status: AuctionStatus, bids: &BidSummary) -> Option<Outcome> {
    if auction.is_buy_now() {
        if auction.purchaser.is_some() {
            return Some(Outcome::Successful);
        }
        return (status == AuctionStatus::Closed).then_some(Outcome::Unsold);
    }

    if status != AuctionStatus::Closed {
        return None;
    }
    if !bids.has_bids() {
        return Some(Outcome::Unsold);
    }

    let best = bids.best(auction.auctiontype);
    let reserve_met = match (auction.auctiontype, auction.reserveprice) {
        (_, None) => true,
        (AuctionType::Forward, Some(reserve)) => best >= reserve,
        (AuctionType::Reverse, Some(reserve)) => best <= reserve,
    };
    Some(if reserve_met {
        Outcome::Successful
    } else {
        Outcome::Unsold
    })
}

/// 경매 목록과 입찰 목록으로 뷰 생성 (입력 순서 유지)
pub fn build_views(auctions: Vec<Auction>, bids: &[Bid], now: DateTime<Utc>) -> Vec<AuctionView> {
    let mut summaries = aggregate(bids);
    auctions
        .into_iter()
        .map(|auction| {
            let summary = summaries.remove(&auction.id).unwrap_or_default();
            AuctionView::new(auction, summary, now)
        })
        .collect()
}

// endregion: --- Auction View

// region:    --- Filter
/// 목록 필터
#[derive(Debug, Clone, Default)]
pub struct AuctionFilter {
    pub auction_type: Option<AuctionType>,
    pub sale_type: Option<SaleType>,
    pub exclude_buy_now: bool,
    pub status: Option<AuctionStatus>,
    pub category: Option<i64>,
    pub seller: Option<Uuid>,
    pub search: Option<String>,
}

impl AuctionFilter {
    pub fn matches(&self, view: &AuctionView) -> bool {
        let auction = &view.auction;
        if self.auction_type.is_some_and(|t| t != auction.auctiontype) {
            return false;
        }
        if self.sale_type.is_some_and(|t| t != auction.sale_type) {
            return false;
        }
        if self.exclude_buy_now && auction.is_buy_now() {
            return false;
        }
        if self.status.is_some_and(|s| s != view.status) {
            return false;
        }
        if self.category.is_some() && self.category != auction.categoryid {
            return false;
        }
        if self.seller.is_some() && self.seller != auction.createdby {
            return false;
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            if !auction
                .productname
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, views: Vec<AuctionView>) -> Vec<AuctionView> {
        views.into_iter().filter(|v| self.matches(v)).collect()
    }
}

// endregion: --- Filter

// region:    --- Summary
/// 상태별 건수
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub live: usize,
    pub upcoming: usize,
    pub closed: usize,
    pub unknown: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: AuctionStatus) {
        match status {
            AuctionStatus::Pending => self.pending += 1,
            AuctionStatus::Live => self.live += 1,
            AuctionStatus::Upcoming => self.upcoming += 1,
            AuctionStatus::Closed => self.closed += 1,
            AuctionStatus::Unknown => self.unknown += 1,
        }
    }
}

/// 통화별 매출
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CurrencyTotals {
    pub gmv: f64,
    pub commission: f64,
    pub sales: usize,
}

/// 매출 요약
/// `gmv` 는 통화 구분 없이 합산한 값이므로 통화가 섞여 있으면 `by_currency` 를 봐야 한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub gmv: f64,
    pub commission: f64,
    pub average_sale: f64,
    pub successful: usize,
    pub unsold: usize,
    pub by_currency: BTreeMap<String, CurrencyTotals>,
}

/// 대시보드 요약
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_auctions: usize,
    pub status: StatusCounts,
    pub total_bids: usize,
    pub financials: FinancialSummary,
}

pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

pub fn commission(gmv: f64) -> f64 {
    round_cents(gmv * COMMISSION_RATE)
}

/// 매출 집계 (성공한 거래의 realized_amount 합산)
pub fn financials<'a>(views: impl IntoIterator<Item = &'a AuctionView>) -> FinancialSummary {
    let mut summary = FinancialSummary::default();
    let mut gmv = 0.0;

    for view in views {
        match view.outcome {
            Some(Outcome::Successful) => {
                summary.successful += 1;
                gmv += view.realized_amount;
                let totals = summary
                    .by_currency
                    .entry(view.auction.currency_code())
                    .or_default();
                totals.gmv += view.realized_amount;
                totals.sales += 1;
            }
            Some(Outcome::Unsold) => summary.unsold += 1,
            None => {}
        }
    }

    for totals in summary.by_currency.values_mut() {
        totals.gmv = round_cents(totals.gmv);
        totals.commission = commission(totals.gmv);
    }
    summary.gmv = round_cents(gmv);
    summary.commission = commission(summary.gmv);
    summary.average_sale = if summary.successful == 0 {
        0.0
    } else {
        round_cents(summary.gmv / summary.successful as f64)
    };
    summary
}

/// 경매 뷰 목록 요약
pub fn summarize(views: &[AuctionView]) -> DashboardSummary {
    let mut status = StatusCounts::default();
    for view in views {
        status.record(view.status);
    }
    DashboardSummary {
        total_auctions: views.len(),
        status,
        total_bids: views.iter().map(|v| v.bids.count).sum(),
        financials: financials(views),
    }
}

// endregion: --- Summary
