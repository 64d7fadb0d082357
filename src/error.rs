/// 엔진 에러 정의
/// 클라이언트는 메시지 문자열이 아니라 `code` 값으로 에러 종류를 구분한다.
// region:    --- Imports
use crate::bidding::model::AuctionId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// endregion: --- Imports

// region:    --- Error Code
/// 에러 분류 코드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidInput,
    NotFound,
    AuctionClosed,
    BidTooLow,
    Storage,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::AuctionClosed => "AUCTION_CLOSED",
            ErrorCode::BidTooLow => "BID_TOO_LOW",
            ErrorCode::Storage => "STORAGE",
        }
    }
}

// endregion: --- Error Code

// region:    --- Engine Error
/// 엔진 연산 실패
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("잘못된 입력입니다: {0}")]
    InvalidInput(String),

    #[error("경매를 찾을 수 없습니다: {0}")]
    NotFound(AuctionId),

    #[error("경매가 이미 종료되었습니다: {0}")]
    AuctionClosed(AuctionId),

    #[error("입찰 코인이 너무 낮습니다: {coins} (최소 {minimum})")]
    BidTooLow { coins: u64, minimum: u64 },

    #[error("저장소 오류: {0}")]
    Storage(String),
}

impl EngineError {
    pub fn code(&self) -> ErrorCode {
        match self {
            EngineError::InvalidInput(_) => ErrorCode::InvalidInput,
            EngineError::NotFound(_) => ErrorCode::NotFound,
            EngineError::AuctionClosed(_) => ErrorCode::AuctionClosed,
            EngineError::BidTooLow { .. } => ErrorCode::BidTooLow,
            EngineError::Storage(_) => ErrorCode::Storage,
        }
    }

    /// 전송용 에러 페이로드
    pub fn to_json(&self) -> serde_json::Value {
        let mut payload = serde_json::json!({
            "error": self.to_string(),
            "code": self.code(),
        });
        match self {
            EngineError::BidTooLow { coins, minimum } => {
                payload["coins"] = serde_json::json!(coins);
                payload["minimum"] = serde_json::json!(minimum);
            }
            EngineError::NotFound(id) | EngineError::AuctionClosed(id) => {
                payload["auction_id"] = serde_json::json!(id);
            }
            _ => {}
        }
        payload
    }
}

impl From<sqlx::Error> for EngineError {
    fn from(e: sqlx::Error) -> Self {
        EngineError::Storage(e.to_string())
    }
}

// endregion: --- Engine Error
