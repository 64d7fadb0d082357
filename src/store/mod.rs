// region:    --- Imports
use crate::bidding::ledger::PledgeHistory;
use crate::bidding::model::{
    AcceptedPledge, AuctionId, AuctionItem, AuctionRecord, AuctionSchedule,
};
use crate::error::EngineError;
use crate::query::views::AuctionOverview;
use async_trait::async_trait;

// endregion: --- Imports

// region:    --- Modules
pub mod memory;
pub mod postgres;
pub mod queries;

pub use memory::MemoryItemStore;
pub use postgres::PostgresItemStore;

// endregion: --- Modules

// region:    --- Item Store Trait
/// 입찰 판정 함수
/// 저장소가 해당 경매를 배타적으로 잡은 상태에서 호출되며,
/// 추가할 입찰을 돌려주거나 거부 사유를 돌려준다.
pub type PledgeDecision<'a> = &'a (dyn Fn(&AuctionSchedule, &PledgeHistory) -> Result<AcceptedPledge, EngineError>
                             + Send
                             + Sync);

/// 입찰 확정 통지
/// 메모리 저장소는 경매 잠금을 쥔 채로, Postgres 저장소는 커밋 직후에 호출한다.
pub type PledgeCommitHook<'a> = &'a (dyn Fn(&AcceptedPledge) + Send + Sync);

/// 경매 저장소 트레이트
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// 새 경매 저장, 새 식별자 반환
    async fn insert(
        &self,
        item: AuctionItem,
        schedule: AuctionSchedule,
    ) -> Result<AuctionId, EngineError>;

    /// 경매 조회
    async fn get(&self, id: AuctionId) -> Result<Option<AuctionRecord>, EngineError>;

    /// 생성 순서대로 개요 조회 (`limit`이 없으면 끝까지)
    async fn overviews(
        &self,
        offset: usize,
        limit: Option<usize>,
    ) -> Result<Vec<AuctionOverview>, EngineError>;

    /// 경매 수
    async fn count(&self) -> Result<usize, EngineError>;

    /// 판정과 추가를 한 단위로 실행
    /// 같은 경매에 대한 호출은 직렬화되고 다른 경매끼리는 서로 막지 않는다.
    async fn append_pledge(
        &self,
        id: AuctionId,
        decide: PledgeDecision<'_>,
        on_commit: PledgeCommitHook<'_>,
    ) -> Result<AcceptedPledge, EngineError>;
}

// endregion: --- Item Store Trait
