// region:    --- Imports
use super::views::{AuctionOverview, AuctionView, OverviewPage, MAX_PAGE_SIZE};
use crate::bidding::model::AuctionId;
use crate::clock::Clock;
use crate::error::EngineError;
use crate::store::ItemStore;
use std::sync::Arc;
use tracing::debug;

// endregion: --- Imports

// region:    --- Query Service
/// 읽기 전용 투영 계층
/// 캐시 없이 호출 시점의 커밋된 상태와 현재 시각으로 매번 계산한다.
#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn ItemStore>,
    clock: Arc<dyn Clock>,
}

impl QueryService {
    pub fn new(store: Arc<dyn ItemStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// 경매 상세 조회
    pub async fn get_auction_detail(&self, id: AuctionId) -> Result<AuctionView, EngineError> {
        debug!("{:<12} --> 경매 상세 조회 id: {}", "Query", id);
        let record = self
            .store
            .get(id)
            .await?
            .ok_or(EngineError::NotFound(id))?;
        Ok(AuctionView::project(record, self.clock.now()))
    }

    /// 모든 경매 개요 조회 (생성 순서)
    pub async fn list_auction_overviews(&self) -> Result<Vec<AuctionOverview>, EngineError> {
        debug!("{:<12} --> 모든 경매 개요 조회", "Query");
        self.store.overviews(0, None).await
    }

    /// 경매 개요 페이지 조회
    pub async fn list_auction_overview_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<OverviewPage, EngineError> {
        debug!(
            "{:<12} --> 경매 개요 페이지 조회 offset: {}, limit: {}",
            "Query", offset, limit
        );
        if limit == 0 {
            return Err(EngineError::InvalidInput(
                "페이지 크기는 0보다 커야 합니다.".to_string(),
            ));
        }
        let limit = limit.min(MAX_PAGE_SIZE);
        let total = self.store.count().await?;
        let overviews = self.store.overviews(offset, Some(limit)).await?;
        Ok(OverviewPage {
            overviews,
            total,
            offset,
            limit,
        })
    }
}

// endregion: --- Query Service
