// region:    --- Imports
use super::model::Auction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// endregion: --- Imports

// region:    --- Auction Status
/// 경매 진행 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AuctionStatus {
    Pending,
    Live,
    Upcoming,
    Closed,
    Unknown,
}

impl AuctionStatus {
    pub const ALL: [AuctionStatus; 5] = [
        AuctionStatus::Pending,
        AuctionStatus::Live,
        AuctionStatus::Upcoming,
        AuctionStatus::Closed,
        AuctionStatus::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuctionStatus::Pending => "Pending",
            AuctionStatus::Live => "Live",
            AuctionStatus::Upcoming => "Upcoming",
            AuctionStatus::Closed => "Closed",
            AuctionStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuctionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AuctionStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown auction status: {}", s))
    }
}

// endregion: --- Auction Status

// region:    --- Classifier
/// 경매 상태 판정
/// 1. 미승인 -> Pending
/// 2. 승인 + [시작, 종료] 구간 -> Live
/// 3. 승인 + 시작 전 -> Upcoming
/// 4. 승인 + 종료 후 -> Closed
/// 5. 그 외 (시작 시각 없음) -> Unknown
pub fn classify(auction: &Auction, now: DateTime<Utc>) -> AuctionStatus {
    if !auction.approved {
        return AuctionStatus::Pending;
    }

    let (Some(start), Some(end)) = (auction.scheduledstart, auction.end_time()) else {
        return AuctionStatus::Unknown;
    };

    if start <= now && now <= end {
        AuctionStatus::Live
    } else if start > now {
        AuctionStatus::Upcoming
    } else if end < now {
        AuctionStatus::Closed
    } else {
        AuctionStatus::Unknown
    }
}

// endregion: --- Classifier

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auction::model::{AuctionDuration, AuctionType, SaleType};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn auction(approved: bool, start: Option<DateTime<Utc>>, hours: i64) -> Auction {
        Auction {
            id: 1,
            productname: "Watch".into(),
            auctiontype: AuctionType::Forward,
            auctionsubtype: Some("english".into()),
            scheduledstart: start,
            auctionduration: AuctionDuration { days: 0, hours, minutes: 0 },
            approved,
            categoryid: None,
            createdby: None,
            currency: None,
            startprice: Some(10.0),
            reserveprice: None,
            sale_type: SaleType::Forward,
            purchaser: None,
            buy_now_price: None,
            created_at: now(),
        }
    }

    #[test]
    fn unapproved_is_always_pending() {
        for start in [None, Some(now() - Duration::days(3)), Some(now() + Duration::days(3))] {
            assert_eq!(classify(&auction(false, start, 2), now()), AuctionStatus::Pending);
        }
    }

    #[test]
    fn approved_within_window_is_live() {
        let a = auction(true, Some(now() - Duration::hours(1)), 2);
        assert_eq!(classify(&a, now()), AuctionStatus::Live);
        // 경계값 포함
        assert_eq!(classify(&a, now() - Duration::hours(1)), AuctionStatus::Live);
        assert_eq!(classify(&a, now() + Duration::hours(1)), AuctionStatus::Live);
    }

    #[test]
    fn approved_future_start_is_upcoming() {
        let a = auction(true, Some(now() + Duration::minutes(5)), 2);
        assert_eq!(classify(&a, now()), AuctionStatus::Upcoming);
    }

    #[test]
    fn approved_past_end_is_closed() {
        let a = auction(true, Some(now() - Duration::hours(3)), 2);
        assert_eq!(classify(&a, now()), AuctionStatus::Closed);
    }

    #[test]
    fn missing_start_is_unknown() {
        assert_eq!(classify(&auction(true, None, 2), now()), AuctionStatus::Unknown);
    }

    #[test]
    fn zero_duration_is_instantaneous() {
        let a = auction(true, Some(now()), 0);
        assert_eq!(classify(&a, now()), AuctionStatus::Live);
        assert_eq!(classify(&a, now() + Duration::seconds(1)), AuctionStatus::Closed);
    }

    #[test]
    fn parses_status_case_insensitively() {
        assert_eq!("live".parse::<AuctionStatus>().unwrap(), AuctionStatus::Live);
        assert_eq!(" CLOSED ".parse::<AuctionStatus>().unwrap(), AuctionStatus::Closed);
        assert!("finished".parse::<AuctionStatus>().is_err());
    }
}
