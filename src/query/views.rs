use crate::bidding::ledger::PledgeHistory;
use crate::bidding::model::{AuctionId, AuctionItem, AuctionRecord, Pledge};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 한 페이지의 최대 개요 수
pub const MAX_PAGE_SIZE: usize = 100;

/// 경매 상세 조회 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionView {
    pub id: AuctionId,
    pub item: AuctionItem,
    pub pledge_history: PledgeHistory,
    pub leading_pledge: Option<Pledge>,
    pub created_at: DateTime<Utc>,
    pub duration_seconds: u64,
    /// 남은 초 (0에서 고정)
    pub remaining_time: u64,
    pub is_closed: bool,
    /// 참고용 다음 최소 입찰 코인, 마감 후에는 없음
    pub minimum_next_coins: Option<u64>,
}

impl AuctionView {
    /// 조회 시각 기준 투영
    pub fn project(record: AuctionRecord, now: DateTime<Utc>) -> Self {
        let remaining_time = record.schedule.remaining_seconds(now);
        let is_closed = record.schedule.is_closed(now);
        let leading_pledge = record.pledges.leading().cloned();
        let minimum_next_coins = (!is_closed).then(|| record.pledges.minimum_next_coins());
        Self {
            id: record.id,
            item: record.item,
            pledge_history: record.pledges,
            leading_pledge,
            created_at: record.schedule.created_at,
            duration_seconds: record.schedule.duration_seconds,
            remaining_time,
            is_closed,
            minimum_next_coins,
        }
    }
}

/// 경매 개요 (입찰 이력 제외)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionOverview {
    pub id: AuctionId,
    pub item: AuctionItem,
}

/// 개요 페이지
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewPage {
    pub overviews: Vec<AuctionOverview>,
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
}
