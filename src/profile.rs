use crate::error::ParseEnumError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// 사용자 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Bidder,
    Seller,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Bidder => "bidder",
            Role::Seller => "seller",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bidder" => Ok(Role::Bidder),
            "seller" => Ok(Role::Seller),
            "admin" => Ok(Role::Admin),
            _ => Err(ParseEnumError {
                kind: "role",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// 사용자 프로필 모델 (`profiles` 테이블)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub id: Uuid,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub fname: Option<String>,
    pub lname: Option<String>,
    pub email: Option<String>,
    pub verified: bool,
    pub isadminapproved: bool,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// 표시 이름 (이름이 없으면 이메일, 그마저 없으면 id)
    pub fn display_name(&self) -> String {
        let name = [self.fname.as_deref(), self.lname.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !name.is_empty() {
            return name;
        }
        self.email.clone().unwrap_or_else(|| self.id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(fname: Option<&str>, lname: Option<&str>, email: Option<&str>) -> Profile {
        Profile {
            id: Uuid::from_u128(42),
            role: Role::Bidder,
            fname: fname.map(Into::into),
            lname: lname.map(Into::into),
            email: email.map(Into::into),
            verified: true,
            isadminapproved: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn display_name_falls_back_in_order() {
        assert_eq!(profile(Some("Ada"), Some("Lovelace"), None).display_name(), "Ada Lovelace");
        assert_eq!(profile(Some(" "), None, Some("a@b.io")).display_name(), "a@b.io");
        assert_eq!(
            profile(None, None, None).display_name(),
            Uuid::from_u128(42).to_string()
        );
    }

    #[test]
    fn parses_roles() {
        assert_eq!("Seller".parse::<Role>().unwrap(), Role::Seller);
        assert!("guest".parse::<Role>().is_err());
    }
}
