use crate::bidding::ledger::PledgeHistory;
use crate::error::EngineError;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 경매 식별자
pub type AuctionId = i64;

// 경매 물품 (생성 후 변경 불가)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionItem {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: Vec<u8>,
}

impl AuctionItem {
    pub fn new(title: impl Into<String>, description: impl Into<String>, image: Vec<u8>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image,
        }
    }
}

/// 입찰자 식별자
/// 호출자가 넘긴 값을 그대로 보관하며 엔진은 검증하지 않는다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Originator(String);

impl Originator {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Originator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Originator {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// 입찰 모델
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pledge {
    pub coins: u64,
    /// 경매 생성 후 경과 초
    pub time: u64,
    pub originator: Originator,
}

/// 수락된 입찰과 수락 시점 정보
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedPledge {
    pub pledge: Pledge,
    /// 이력 내 위치 (0부터)
    pub seq: u64,
    pub accepted_at: DateTime<Utc>,
}

/// 경매 일정
/// 마감 여부와 남은 시간은 저장하지 않고 항상 여기서 계산한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuctionSchedule {
    pub created_at: DateTime<Utc>,
    pub duration_seconds: u64,
}

impl AuctionSchedule {
    /// 마감 시각을 표현할 수 없는 기간은 거부
    pub fn new(created_at: DateTime<Utc>, duration_seconds: u64) -> Result<Self, EngineError> {
        if duration_seconds == 0 {
            return Err(EngineError::InvalidInput(
                "경매 기간은 0초보다 커야 합니다.".to_string(),
            ));
        }
        let schedule = Self {
            created_at,
            duration_seconds,
        };
        if schedule.checked_deadline().is_none() {
            return Err(EngineError::InvalidInput(format!(
                "경매 기간이 너무 깁니다: {}초",
                duration_seconds
            )));
        }
        Ok(schedule)
    }

    fn checked_deadline(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.duration_seconds).ok()?;
        let duration = TimeDelta::try_seconds(secs)?;
        self.created_at.checked_add_signed(duration)
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.checked_deadline().unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// 남은 초 (올림, 0에서 고정)
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> u64 {
        let millis = (self.deadline() - now).num_milliseconds();
        if millis <= 0 {
            return 0;
        }
        let secs = (millis as u64).div_ceil(1000);
        secs.min(self.duration_seconds)
    }

    pub fn is_closed(&self, now: DateTime<Utc>) -> bool {
        now >= self.deadline()
    }

    /// 경과 초 (내림, 0..=duration_seconds)
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> u64 {
        let secs = (now - self.created_at).num_seconds();
        if secs <= 0 {
            return 0;
        }
        (secs as u64).min(self.duration_seconds)
    }
}

// 경매 레코드
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionRecord {
    pub id: AuctionId,
    pub item: AuctionItem,
    pub schedule: AuctionSchedule,
    pub pledges: PledgeHistory,
}
