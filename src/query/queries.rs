// auctions 조회 컬럼 (누락된 기간/판매 방식은 기본값으로 보정)
macro_rules! auction_columns {
    () => {
        r#"id, productname, auctiontype, auctionsubtype, scheduledstart,
           COALESCE(auctionduration, '{}'::jsonb) AS auctionduration,
           approved, categoryid, createdby, currency, startprice, reserveprice,
           COALESCE(sale_type, CASE WHEN auctiontype = 'reverse' THEN 3 ELSE 1 END) AS sale_type,
           purchaser, buy_now_price, created_at"#
    };
}

macro_rules! category_columns {
    () => {
        "id, title, COALESCE(taxonomy, '[]'::jsonb) AS taxonomy"
    };
}

/// 모든 경매 조회
pub const GET_ALL_AUCTIONS: &str = concat!(
    "SELECT ",
    auction_columns!(),
    " FROM auctions ORDER BY created_at DESC, id DESC"
);

/// 경매 조회
pub const GET_AUCTION: &str = concat!("SELECT ", auction_columns!(), " FROM auctions WHERE id = $1");

/// 경매 생성
pub const INSERT_AUCTION: &str = concat!(
    r#"INSERT INTO auctions (productname, auctiontype, auctionsubtype, scheduledstart, auctionduration,
        approved, categoryid, createdby, currency, startprice, reserveprice, sale_type, buy_now_price)
    VALUES ($1, $2, $3, $4, $5, FALSE, $6, $7, $8, $9, $10, $11, $12)
    RETURNING "#,
    auction_columns!()
);

/// 경매 승인
pub const APPROVE_AUCTION: &str = concat!(
    "UPDATE auctions SET approved = TRUE WHERE id = $1 RETURNING ",
    auction_columns!()
);

/// 모든 입찰 조회
pub const GET_ALL_BIDS: &str = r#"
    SELECT id, auction_id, user_id, amount, created_at, location
    FROM bids
    ORDER BY created_at DESC, id DESC
"#;

/// 경매 입찰 조회
pub const GET_AUCTION_BIDS: &str = r#"
    SELECT id, auction_id, user_id, amount, created_at, location
    FROM bids
    WHERE auction_id = $1
    ORDER BY created_at DESC, id DESC
"#;

/// 모든 프로필 조회
pub const GET_ALL_PROFILES: &str = r#"
    SELECT id, role, fname, lname, email, verified, isadminapproved, created_at
    FROM profiles
    ORDER BY created_at DESC
"#;

/// 역할별 프로필 조회
pub const GET_PROFILES_BY_ROLE: &str = r#"
    SELECT id, role, fname, lname, email, verified, isadminapproved, created_at
    FROM profiles
    WHERE LOWER(role) = $1
    ORDER BY created_at DESC
"#;

/// 모든 카테고리 조회
pub const GET_ALL_CATEGORIES: &str = concat!(
    "SELECT ",
    category_columns!(),
    " FROM categories ORDER BY title"
);

/// 카테고리 생성
pub const INSERT_CATEGORY: &str = concat!(
    "INSERT INTO categories (title, taxonomy) VALUES ($1, $2) RETURNING ",
    category_columns!()
);

/// 카테고리 수정
pub const UPDATE_CATEGORY: &str = concat!(
    "UPDATE categories SET title = $2, taxonomy = $3 WHERE id = $1 RETURNING ",
    category_columns!()
);

/// 카테고리 삭제
pub const DELETE_CATEGORY: &str = "DELETE FROM categories WHERE id = $1";
