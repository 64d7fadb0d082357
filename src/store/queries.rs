/// 경매 등록
pub const INSERT_AUCTION: &str = r#"
    INSERT INTO auctions (title, description, image, created_at, duration_seconds)
    VALUES ($1, $2, $3, $4, $5)
    RETURNING id
"#;

/// 경매 조회
pub const GET_AUCTION: &str =
    "SELECT id, title, description, image, created_at, duration_seconds FROM auctions WHERE id = $1";

/// 조회 트랜잭션을 단일 스냅샷으로 고정
pub const SNAPSHOT_READ: &str = "SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY";

/// 입찰용 경매 일정 조회 (행 잠금)
pub const LOCK_AUCTION_SCHEDULE: &str =
    "SELECT created_at, duration_seconds FROM auctions WHERE id = $1 FOR UPDATE";

/// 입찰 이력 조회 (수락 순서)
pub const GET_PLEDGES: &str = r#"
    SELECT coins::text AS coins, time_offset, originator
    FROM pledges
    WHERE auction_id = $1
    ORDER BY seq ASC
"#;

/// 입찰 추가
pub const INSERT_PLEDGE: &str = r#"
    INSERT INTO pledges (auction_id, seq, coins, time_offset, originator)
    VALUES ($1, $2, $3::text::numeric, $4, $5)
"#;

/// 경매 개요 조회 (생성 순서)
pub const GET_OVERVIEWS: &str = r#"
    SELECT id, title, description, image
    FROM auctions
    ORDER BY id ASC
    OFFSET $1
    LIMIT $2
"#;

/// 경매 수 조회
pub const COUNT_AUCTIONS: &str = "SELECT COUNT(*) FROM auctions";
