// region:    --- Imports
use crate::error::{AdminError, ParseEnumError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// endregion: --- Imports

// region:    --- Auction Types
/// 경매 방식 (정방향 / 역경매)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuctionType {
    Forward,
    Reverse,
}

impl AuctionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuctionType::Forward => "forward",
            AuctionType::Reverse => "reverse",
        }
    }
}

impl TryFrom<String> for AuctionType {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "forward" => Ok(AuctionType::Forward),
            "reverse" => Ok(AuctionType::Reverse),
            _ => Err(ParseEnumError {
                kind: "auctiontype",
                value,
            }),
        }
    }
}

/// 판매 방식 (`sale_type` 컬럼: 1=정방향 경매, 2=즉시 구매, 3=역경매)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleType {
    Forward,
    BuyNow,
    Reverse,
}

impl SaleType {
    pub fn code(&self) -> i32 {
        match self {
            SaleType::Forward => 1,
            SaleType::BuyNow => 2,
            SaleType::Reverse => 3,
        }
    }

    /// `sale_type`이 비어 있을 때 경매 방식으로 추정
    pub fn default_for(auction_type: AuctionType) -> Self {
        match auction_type {
            AuctionType::Forward => SaleType::Forward,
            AuctionType::Reverse => SaleType::Reverse,
        }
    }
}

impl TryFrom<i32> for SaleType {
    type Error = ParseEnumError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SaleType::Forward),
            2 => Ok(SaleType::BuyNow),
            3 => Ok(SaleType::Reverse),
            other => Err(ParseEnumError {
                kind: "sale_type",
                value: other.to_string(),
            }),
        }
    }
}

// endregion: --- Auction Types

// region:    --- Auction Duration
/// 경매 진행 기간 (JSONB). 누락된 필드는 0으로 취급
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionDuration {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub days: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub hours: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub minutes: i64,
}

/// JSONB 에 섞여 들어오는 값 형태 (숫자, 실수, 숫자 문자열, null)
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

/// null / 빈 문자열 / 해석할 수 없는 값은 0
fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<LenientNumber>::deserialize(deserializer)?;
    Ok(match value {
        None => 0,
        Some(LenientNumber::Int(n)) => n,
        Some(LenientNumber::Float(f)) => float_to_i64(f),
        Some(LenientNumber::Text(text)) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().map(float_to_i64))
                .unwrap_or(0)
        }
    })
}

fn float_to_i64(value: f64) -> i64 {
    if value.is_finite() {
        // `as` 변환은 범위를 벗어나면 포화된다
        value.trunc() as i64
    } else {
        0
    }
}

// chrono::Duration 이 표현할 수 있는 최대 분 단위 값
const MAX_DURATION_MINUTES: i64 = i64::MAX / 60_000;

impl AuctionDuration {
    pub fn total_minutes(&self) -> i64 {
        self.days
            .max(0)
            .saturating_mul(24 * 60)
            .saturating_add(self.hours.max(0).saturating_mul(60))
            .saturating_add(self.minutes.max(0))
            .min(MAX_DURATION_MINUTES)
    }

    pub fn as_duration(&self) -> Duration {
        Duration::minutes(self.total_minutes())
    }

    pub fn has_negative_field(&self) -> bool {
        self.days < 0 || self.hours < 0 || self.minutes < 0
    }
}

// endregion: --- Auction Duration

// region:    --- Auction Model
/// 경매 모델 (`auctions` 테이블)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Auction {
    pub id: i64,
    pub productname: String,
    #[sqlx(try_from = "String")]
    pub auctiontype: AuctionType,
    pub auctionsubtype: Option<String>,
    pub scheduledstart: Option<DateTime<Utc>>,
    #[sqlx(json)]
    pub auctionduration: AuctionDuration,
    pub approved: bool,
    pub categoryid: Option<i64>,
    pub createdby: Option<Uuid>,
    pub currency: Option<String>,
    pub startprice: Option<f64>,
    pub reserveprice: Option<f64>,
    #[sqlx(try_from = "i32")]
    pub sale_type: SaleType,
    pub purchaser: Option<Uuid>,
    pub buy_now_price: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Auction {
    /// 종료 시각 = 시작 시각 + 진행 기간. 시작 시각이 없으면 None
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        let start = self.scheduledstart?;
        Some(
            start
                .checked_add_signed(self.auctionduration.as_duration())
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        )
    }

    pub fn is_buy_now(&self) -> bool {
        self.sale_type == SaleType::BuyNow
    }

    /// 통화 코드 (누락 시 USD)
    pub fn currency_code(&self) -> String {
        self.currency
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_ascii_uppercase)
            .unwrap_or_else(|| "USD".to_string())
    }
}

// endregion: --- Auction Model

// region:    --- New Auction
/// 경매 생성 요청
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAuction {
    pub productname: String,
    pub auctiontype: AuctionType,
    #[serde(default)]
    pub auctionsubtype: Option<String>,
    #[serde(default)]
    pub scheduledstart: Option<DateTime<Utc>>,
    #[serde(default)]
    pub auctionduration: AuctionDuration,
    #[serde(default)]
    pub categoryid: Option<i64>,
    #[serde(default)]
    pub createdby: Option<Uuid>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub startprice: Option<f64>,
    #[serde(default)]
    pub reserveprice: Option<f64>,
    #[serde(default)]
    pub sale_type: Option<SaleType>,
    #[serde(default)]
    pub buy_now_price: Option<f64>,
}

const AUCTION_SUBTYPES: [&str; 5] = ["english", "silent", "sealed", "standard", "ranked"];

impl NewAuction {
    /// 요청 검증 후 확정된 판매 방식 반환
    pub fn validate(&self) -> Result<SaleType, AdminError> {
        if self.productname.trim().is_empty() {
            return Err(AdminError::Validation("productname is required".into()));
        }

        if let Some(subtype) = &self.auctionsubtype {
            if !AUCTION_SUBTYPES.contains(&subtype.to_ascii_lowercase().as_str()) {
                return Err(AdminError::Validation(format!(
                    "unknown auctionsubtype: {}",
                    subtype
                )));
            }
        }

        if self.auctionduration.has_negative_field() {
            return Err(AdminError::Validation(
                "auctionduration fields must not be negative".into(),
            ));
        }

        for (name, price) in [
            ("startprice", self.startprice),
            ("reserveprice", self.reserveprice),
            ("buy_now_price", self.buy_now_price),
        ] {
            if let Some(price) = price {
                if !price.is_finite() || price < 0.0 {
                    return Err(AdminError::Validation(format!(
                        "{} must be a non-negative number",
                        name
                    )));
                }
            }
        }

        if let Some(currency) = &self.currency {
            let currency = currency.trim();
            if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(AdminError::Validation(format!(
                    "currency must be a 3-letter code: {}",
                    currency
                )));
            }
        }

        let sale_type = self
            .sale_type
            .unwrap_or_else(|| SaleType::default_for(self.auctiontype));
        match (self.auctiontype, sale_type) {
            (AuctionType::Reverse, SaleType::Reverse) => {}
            (AuctionType::Reverse, _) | (AuctionType::Forward, SaleType::Reverse) => {
                return Err(AdminError::Validation(format!(
                    "sale_type {:?} does not match auctiontype {}",
                    sale_type,
                    self.auctiontype.as_str()
                )));
            }
            (AuctionType::Forward, SaleType::BuyNow) => {
                if !self.buy_now_price.is_some_and(|p| p > 0.0) {
                    return Err(AdminError::Validation(
                        "buy_now_price is required for buy-now listings".into(),
                    ));
                }
            }
            (AuctionType::Forward, SaleType::Forward) => {}
        }

        Ok(sale_type)
    }
}

// endregion: --- New Auction

#[cfg(test)]
mod tests {
    use super::*;

    fn new_auction(auctiontype: AuctionType) -> NewAuction {
        NewAuction {
            productname: "Vintage Camera".into(),
            auctiontype,
            auctionsubtype: None,
            scheduledstart: None,
            auctionduration: AuctionDuration::default(),
            categoryid: None,
            createdby: None,
            currency: Some("usd".into()),
            startprice: Some(100.0),
            reserveprice: None,
            sale_type: None,
            buy_now_price: None,
        }
    }

    #[test]
    fn duration_sums_fields_and_ignores_negatives() {
        let d = AuctionDuration { days: 1, hours: 2, minutes: -30 };
        assert_eq!(d.total_minutes(), 24 * 60 + 120);
        assert_eq!(AuctionDuration::default().as_duration(), Duration::zero());
    }

    #[test]
    fn duration_json_defaults_missing_fields() {
        let d: AuctionDuration = serde_json::from_str(r#"{"hours": 3}"#).unwrap();
        assert_eq!(d, AuctionDuration { days: 0, hours: 3, minutes: 0 });
    }

    #[test]
    fn duration_json_tolerates_null_strings_and_floats() {
        let d: AuctionDuration = serde_json::from_str(r#"{"days": null, "hours": 2}"#).unwrap();
        assert_eq!(d, AuctionDuration { days: 0, hours: 2, minutes: 0 });

        let d: AuctionDuration =
            serde_json::from_str(r#"{"days": "1", "hours": 1.9, "minutes": ""}"#).unwrap();
        assert_eq!(d, AuctionDuration { days: 1, hours: 1, minutes: 0 });

        let d: AuctionDuration = serde_json::from_str(r#"{"minutes": "abc"}"#).unwrap();
        assert_eq!(d.total_minutes(), 0);
    }

    #[test]
    fn huge_duration_does_not_overflow_end_time() {
        let d = AuctionDuration { days: i64::MAX, hours: 0, minutes: 0 };
        assert_eq!(d.total_minutes(), MAX_DURATION_MINUTES);
    }

    #[test]
    fn parses_enum_columns() {
        assert_eq!(
            AuctionType::try_from("Reverse".to_string()).unwrap(),
            AuctionType::Reverse
        );
        assert!(AuctionType::try_from("dutch".to_string()).is_err());
        assert_eq!(SaleType::try_from(2).unwrap(), SaleType::BuyNow);
        assert!(SaleType::try_from(9).is_err());
    }

    #[test]
    fn validate_defaults_sale_type_from_auction_type() {
        assert_eq!(
            new_auction(AuctionType::Reverse).validate().unwrap(),
            SaleType::Reverse
        );
        assert_eq!(
            new_auction(AuctionType::Forward).validate().unwrap(),
            SaleType::Forward
        );
    }

    #[test]
    fn validate_rejects_inconsistent_requests() {
        let mut blank = new_auction(AuctionType::Forward);
        blank.productname = "  ".into();
        assert!(blank.validate().is_err());

        let mut reverse_buy_now = new_auction(AuctionType::Reverse);
        reverse_buy_now.sale_type = Some(SaleType::BuyNow);
        assert!(reverse_buy_now.validate().is_err());

        let mut buy_now_without_price = new_auction(AuctionType::Forward);
        buy_now_without_price.sale_type = Some(SaleType::BuyNow);
        assert!(buy_now_without_price.validate().is_err());

        let mut negative = new_auction(AuctionType::Forward);
        negative.startprice = Some(-1.0);
        assert!(negative.validate().is_err());

        let mut bad_currency = new_auction(AuctionType::Forward);
        bad_currency.currency = Some("dollars".into());
        assert!(bad_currency.validate().is_err());
    }
}
