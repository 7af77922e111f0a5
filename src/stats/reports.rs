// region:    --- Imports
use super::{financials, round_cents, AuctionView, FinancialSummary, Outcome};
use crate::auction::{AuctionStatus, AuctionType, SaleType};
use crate::bidding::Bid;
use crate::profile::{Profile, Role};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Winners
/// 낙찰자 정보
#[derive(Debug, Clone, Serialize)]
pub struct WinnerRecord {
    pub auction_id: i64,
    pub productname: String,
    pub auctiontype: AuctionType,
    pub sale_type: SaleType,
    pub winner_id: Uuid,
    pub winner_name: Option<String>,
    pub winner_email: Option<String>,
    pub amount: f64,
    pub currency: String,
    pub closed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WinnersReport {
    pub winners: Vec<WinnerRecord>,
    pub totals: FinancialSummary,
}

/// 성공한 경매와 즉시 구매 건의 낙찰자 목록 (종료 시각 최신순)
pub fn winners(views: &[AuctionView], profiles: &[Profile]) -> WinnersReport {
    let by_id: HashMap<Uuid, &Profile> = profiles.iter().map(|p| (p.id, p)).collect();

    let mut winners: Vec<WinnerRecord> = views
        .iter()
        .filter(|v| v.is_successful())
        .filter_map(|v| {
            let winner_id = v.winner?;
            let profile = by_id.get(&winner_id);
            Some(WinnerRecord {
                auction_id: v.auction.id,
                productname: v.auction.productname.clone(),
                auctiontype: v.auction.auctiontype,
                sale_type: v.auction.sale_type,
                winner_id,
                winner_name: profile.map(|p| p.display_name()),
                winner_email: profile.and_then(|p| p.email.clone()),
                amount: v.realized_amount,
                currency: v.auction.currency_code(),
                closed_at: v.end_time,
            })
        })
        .collect();
    winners.sort_by(|a, b| b.closed_at.cmp(&a.closed_at).then(a.auction_id.cmp(&b.auction_id)));

    WinnersReport {
        winners,
        totals: financials(views.iter().filter(|v| v.is_successful())),
    }
}

// endregion: --- Winners

// region:    --- Bidders
/// 입찰자 통계
#[derive(Debug, Clone, Serialize)]
pub struct BidderStats {
    #[serde(flatten)]
    pub profile: Profile,
    pub name: String,
    pub bid_count: usize,
    pub total_bid_amount: f64,
    pub auctions_participated: usize,
    pub auctions_won: usize,
    pub last_bid_at: Option<DateTime<Utc>>,
}

/// 입찰자별 통계 (입찰 수 내림차순)
pub fn bidder_stats(profiles: &[Profile], bids: &[Bid], views: &[AuctionView]) -> Vec<BidderStats> {
    let mut stats: Vec<BidderStats> = profiles
        .iter()
        .filter(|p| p.role == Role::Bidder)
        .map(|profile| {
            let own: Vec<&Bid> = bids.iter().filter(|b| b.user_id == profile.id).collect();
            let auctions: HashSet<i64> = own.iter().map(|b| b.auction_id).collect();
            BidderStats {
                name: profile.display_name(),
                bid_count: own.len(),
                total_bid_amount: round_cents(own.iter().map(|b| b.amount).sum()),
                auctions_participated: auctions.len(),
                auctions_won: views
                    .iter()
                    .filter(|v| v.is_successful() && v.winner == Some(profile.id))
                    .count(),
                last_bid_at: own.iter().map(|b| b.created_at).max(),
                profile: profile.clone(),
            }
        })
        .collect();
    stats.sort_by(|a, b| b.bid_count.cmp(&a.bid_count).then_with(|| a.name.cmp(&b.name)));
    stats
}

// endregion: --- Bidders

// region:    --- Sellers
/// 판매자 통계
#[derive(Debug, Clone, Serialize)]
pub struct SellerStats {
    #[serde(flatten)]
    pub profile: Profile,
    pub name: String,
    pub listings: usize,
    pub live: usize,
    pub closed: usize,
    pub sold: usize,
    pub gmv: f64,
}

/// 판매자별 통계 (GMV 내림차순)
pub fn seller_stats(profiles: &[Profile], views: &[AuctionView]) -> Vec<SellerStats> {
    let mut stats: Vec<SellerStats> = profiles
        .iter()
        .filter(|p| p.role == Role::Seller)
        .map(|profile| {
            let own: Vec<&AuctionView> = views
                .iter()
                .filter(|v| v.auction.createdby == Some(profile.id))
                .collect();
            SellerStats {
                name: profile.display_name(),
                listings: own.len(),
                live: own.iter().filter(|v| v.status == AuctionStatus::Live).count(),
                closed: own.iter().filter(|v| v.status == AuctionStatus::Closed).count(),
                sold: own.iter().filter(|v| v.is_successful()).count(),
                gmv: financials(own.iter().copied()).gmv,
                profile: profile.clone(),
            }
        })
        .collect();
    stats.sort_by(|a, b| b.gmv.total_cmp(&a.gmv).then_with(|| a.name.cmp(&b.name)));
    stats
}

// endregion: --- Sellers

// region:    --- Calendar
/// 달력 항목
#[derive(Debug, Clone, Serialize)]
pub struct CalendarEntry {
    pub auction_id: i64,
    pub productname: String,
    pub auctiontype: AuctionType,
    pub status: AuctionStatus,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

/// 시작일 기준 경매 달력 (from/to 포함, 시작 시각 없는 경매 제외)
pub fn calendar(
    views: &[AuctionView],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> BTreeMap<NaiveDate, Vec<CalendarEntry>> {
    let mut days: BTreeMap<NaiveDate, Vec<CalendarEntry>> = BTreeMap::new();
    for view in views {
        let Some(start) = view.auction.scheduledstart else {
            continue;
        };
        let day = start.date_naive();
        if from.is_some_and(|f| day < f) || to.is_some_and(|t| day > t) {
            continue;
        }
        days.entry(day).or_default().push(CalendarEntry {
            auction_id: view.auction.id,
            productname: view.auction.productname.clone(),
            auctiontype: view.auction.auctiontype,
            status: view.status,
            start,
            end: view.end_time,
        });
    }
    for entries in days.values_mut() {
        entries.sort_by(|a, b| a.start.cmp(&b.start).then(a.auction_id.cmp(&b.auction_id)));
    }
    days
}

// endregion: --- Calendar

// region:    --- Buy Now
/// 즉시 구매 현황
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuyNowOverview {
    pub listings: usize,
    pub available: usize,
    pub sold: usize,
    pub unsold: usize,
    pub revenue: f64,
    pub commission: f64,
}

pub fn buy_now_overview(views: &[AuctionView]) -> BuyNowOverview {
    let listings: Vec<&AuctionView> = views.iter().filter(|v| v.auction.is_buy_now()).collect();
    let totals = financials(listings.iter().copied());
    BuyNowOverview {
        listings: listings.len(),
        available: listings.iter().filter(|v| v.outcome.is_none()).count(),
        sold: totals.successful,
        unsold: listings
            .iter()
            .filter(|v| v.outcome == Some(Outcome::Unsold))
            .count(),
        revenue: totals.gmv,
        commission: totals.commission,
    }
}

// endregion: --- Buy Now

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::build_views;
    use crate::stats::tests::{auction, bid, now};
    use chrono::Duration;

    fn profile(n: u128, role: Role, fname: &str) -> Profile {
        Profile {
            id: Uuid::from_u128(n),
            role,
            fname: Some(fname.into()),
            lname: None,
            email: Some(format!("{}@example.com", fname.to_lowercase())),
            verified: true,
            isadminapproved: true,
            created_at: now() - Duration::days(30),
        }
    }

    #[test]
    fn winners_join_profiles_and_total_sales() {
        let views = build_views(
            vec![
                auction(1, AuctionType::Forward, -10),
                auction(2, AuctionType::Forward, -5),
                auction(3, AuctionType::Forward, -1),
            ],
            &[bid(1, 1, 1, 40.0), bid(2, 2, 2, 60.0), bid(3, 3, 1, 99.0)],
            now(),
        );
        let report = winners(&views, &[profile(1, Role::Bidder, "Ann")]);

        assert_eq!(report.winners.len(), 2);
        // 최근 종료 순
        assert_eq!(report.winners[0].auction_id, 2);
        assert_eq!(report.winners[0].winner_name, None);
        assert_eq!(report.winners[1].winner_name.as_deref(), Some("Ann"));
        assert_eq!(report.totals.gmv, 100.0);
        assert_eq!(report.totals.commission, 5.0);
    }

    #[test]
    fn bidder_stats_count_bids_and_wins() {
        let views = build_views(
            vec![
                auction(1, AuctionType::Forward, -10),
                auction(2, AuctionType::Forward, -10),
            ],
            &[
                bid(1, 1, 1, 10.0),
                bid(2, 1, 2, 20.0),
                bid(3, 2, 1, 30.0),
                bid(4, 2, 1, 35.0),
            ],
            now(),
        );
        let bids = vec![
            bid(1, 1, 1, 10.0),
            bid(2, 1, 2, 20.0),
            bid(3, 2, 1, 30.0),
            bid(4, 2, 1, 35.0),
        ];
        let profiles = vec![
            profile(1, Role::Bidder, "Ann"),
            profile(2, Role::Bidder, "Bob"),
            profile(3, Role::Seller, "Sam"),
        ];
        let stats = bidder_stats(&profiles, &bids, &views);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].name, "Ann");
        assert_eq!(stats[0].bid_count, 3);
        assert_eq!(stats[0].total_bid_amount, 75.0);
        assert_eq!(stats[0].auctions_participated, 2);
        assert_eq!(stats[0].auctions_won, 1);
        assert_eq!(stats[1].auctions_won, 1);
    }

    #[test]
    fn bidder_without_bids_has_zero_stats() {
        let stats = bidder_stats(&[profile(1, Role::Bidder, "Ann")], &[], &[]);
        assert_eq!(stats[0].bid_count, 0);
        assert_eq!(stats[0].total_bid_amount, 0.0);
        assert_eq!(stats[0].last_bid_at, None);
    }

    #[test]
    fn seller_stats_roll_up_listings() {
        let mut other = auction(3, AuctionType::Forward, -10);
        other.createdby = Some(Uuid::from_u128(7));
        let views = build_views(
            vec![
                auction(1, AuctionType::Forward, -10),
                auction(2, AuctionType::Forward, -1),
                other,
            ],
            &[bid(1, 1, 1, 250.0), bid(2, 3, 1, 999.0)],
            now(),
        );
        let stats = seller_stats(&[profile(100, Role::Seller, "Sue")], &views);

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].listings, 2);
        assert_eq!(stats[0].live, 1);
        assert_eq!(stats[0].closed, 1);
        assert_eq!(stats[0].sold, 1);
        assert_eq!(stats[0].gmv, 250.0);
    }

    #[test]
    fn calendar_groups_by_start_day_within_range() {
        let mut no_start = auction(4, AuctionType::Forward, 0);
        no_start.scheduledstart = None;
        let views = build_views(
            vec![
                auction(1, AuctionType::Forward, 0),
                auction(2, AuctionType::Forward, -1),
                auction(3, AuctionType::Forward, 48),
                no_start,
            ],
            &[],
            now(),
        );
        let today = now().date_naive();

        let all = calendar(&views, None, None);
        assert_eq!(all.len(), 2);
        let ids: Vec<i64> = all[&today].iter().map(|e| e.auction_id).collect();
        assert_eq!(ids, vec![2, 1]);

        let only_today = calendar(&views, Some(today), Some(today));
        assert_eq!(only_today.len(), 1);
    }

    #[test]
    fn buy_now_overview_splits_listings() {
        let mut sold = auction(1, AuctionType::Forward, -1);
        sold.sale_type = SaleType::BuyNow;
        sold.buy_now_price = Some(120.0);
        sold.purchaser = Some(Uuid::from_u128(5));
        let mut available = auction(2, AuctionType::Forward, -1);
        available.sale_type = SaleType::BuyNow;
        available.buy_now_price = Some(60.0);
        let mut expired = auction(3, AuctionType::Forward, -10);
        expired.sale_type = SaleType::BuyNow;
        expired.buy_now_price = Some(30.0);
        let views = build_views(
            vec![sold, available, expired, auction(4, AuctionType::Forward, -10)],
            &[],
            now(),
        );

        let overview = buy_now_overview(&views);
        assert_eq!(
            overview,
            BuyNowOverview {
                listings: 3,
                available: 1,
                sold: 1,
                unsold: 1,
                revenue: 120.0,
                commission: 6.0,
            }
        );
    }
}
