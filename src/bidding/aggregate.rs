//! 입찰 집계
//! 경매별 입찰 수, 최고가/최저가, 마지막 입찰 시각을 한 번의 순회로 계산한다.
//! 동일 금액은 먼저 들어온 입찰(created_at, id 순)이 우선한다.

// region:    --- Imports
use super::model::Bid;
use crate::auction::{Auction, AuctionType};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Bid Summary
/// 경매 하나의 입찰 요약
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BidSummary {
    pub count: usize,
    pub highest: f64,
    pub lowest: f64,
    pub last_bid_at: Option<DateTime<Utc>>,
    pub highest_bidder: Option<Uuid>,
    pub lowest_bidder: Option<Uuid>,
    #[serde(skip)]
    highest_key: Option<(DateTime<Utc>, i64)>,
    #[serde(skip)]
    lowest_key: Option<(DateTime<Utc>, i64)>,
}

impl BidSummary {
    /// 입찰 하나 반영 (금액이 유한수가 아니면 무시)
    pub fn push(&mut self, bid: &Bid) {
        if !bid.amount.is_finite() {
            return;
        }
        let key = (bid.created_at, bid.id);

        if self.count == 0 {
            self.highest = bid.amount;
            self.lowest = bid.amount;
            self.highest_bidder = Some(bid.user_id);
            self.lowest_bidder = Some(bid.user_id);
            self.highest_key = Some(key);
            self.lowest_key = Some(key);
            self.last_bid_at = Some(bid.created_at);
            self.count = 1;
            return;
        }

        if bid.amount > self.highest || (bid.amount == self.highest && Some(key) < self.highest_key)
        {
            self.highest = bid.amount;
            self.highest_bidder = Some(bid.user_id);
            self.highest_key = Some(key);
        }
        if bid.amount < self.lowest || (bid.amount == self.lowest && Some(key) < self.lowest_key) {
            self.lowest = bid.amount;
            self.lowest_bidder = Some(bid.user_id);
            self.lowest_key = Some(key);
        }
        if self.last_bid_at.map_or(true, |last| bid.created_at > last) {
            self.last_bid_at = Some(bid.created_at);
        }
        self.count += 1;
    }

    /// 경매 방식에 따른 유리한 입찰가 (정방향: 최고가, 역경매: 최저가)
    pub fn best(&self, auction_type: AuctionType) -> f64 {
        match auction_type {
            AuctionType::Forward => self.highest,
            AuctionType::Reverse => self.lowest,
        }
    }

    /// 현재 선두 입찰자
    pub fn leader(&self, auction_type: AuctionType) -> Option<Uuid> {
        match auction_type {
            AuctionType::Forward => self.highest_bidder,
            AuctionType::Reverse => self.lowest_bidder,
        }
    }

    pub fn has_bids(&self) -> bool {
        self.count > 0
    }
}

// endregion: --- Bid Summary

// region:    --- Aggregation
/// 입찰 목록을 경매 id 기준으로 집계
pub fn aggregate(bids: &[Bid]) -> HashMap<i64, BidSummary> {
    let mut summaries: HashMap<i64, BidSummary> = HashMap::new();
    for bid in bids {
        summaries.entry(bid.auction_id).or_default().push(bid);
    }
    summaries
}

/// 시간당 입찰 수
/// 진행 구간(시작 ~ min(현재, 종료))을 기준으로 하며 1시간 미만은 1시간으로 본다.
pub fn bids_per_hour(summary: &BidSummary, auction: &Auction, now: DateTime<Utc>) -> f64 {
    let (Some(start), Some(end)) = (auction.scheduledstart, auction.end_time()) else {
        return 0.0;
    };
    if summary.count == 0 {
        return 0.0;
    }
    let window_end = end.min(now);
    let hours = (window_end - start).num_seconds() as f64 / 3600.0;
    summary.count as f64 / hours.max(1.0)
}

// endregion: --- Aggregation
