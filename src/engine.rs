//! 경매 엔진
//!
//! 외부 클라이언트(화면, 전송 계층)가 호출하는 경계 계약이다.
//! 상태 변경은 이 타입을 통해서만 일어나고, 조회는 [`QueryService`]에 위임한다.

// region:    --- Imports
use crate::auction::events::AuctionEvent;
use crate::bidding::commands::{
    handle_create_auction, handle_submit_pledge, CreateAuctionCommand, SubmitPledgeCommand,
};
use crate::bidding::model::{AcceptedPledge, AuctionId, AuctionItem, Originator, Pledge};
use crate::clock::{Clock, SystemClock};
use crate::config::{EngineConfig, StoreBackend};
use crate::database::DatabaseManager;
use crate::error::EngineError;
use crate::query::{AuctionOverview, AuctionView, OverviewPage, QueryService};
use crate::store::{ItemStore, MemoryItemStore, PostgresItemStore};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info};

// endregion: --- Imports

/// 이벤트 버퍼 기본 크기
pub const DEFAULT_EVENT_CAPACITY: usize = 1024;

// region:    --- Auction Engine
#[derive(Clone)]
pub struct AuctionEngine {
    store: Arc<dyn ItemStore>,
    clock: Arc<dyn Clock>,
    query: QueryService,
    events: broadcast::Sender<AuctionEvent>,
}

impl AuctionEngine {
    pub fn new(store: Arc<dyn ItemStore>, clock: Arc<dyn Clock>) -> Self {
        Self::with_event_capacity(store, clock, DEFAULT_EVENT_CAPACITY)
    }

    /// `capacity`가 0이면 1로 올린다
    pub fn with_event_capacity(
        store: Arc<dyn ItemStore>,
        clock: Arc<dyn Clock>,
        capacity: usize,
    ) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        let query = QueryService::new(Arc::clone(&store), Arc::clone(&clock));
        Self {
            store,
            clock,
            query,
            events,
        }
    }

    /// 메모리 저장소와 시스템 시계로 생성
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryItemStore::new()), Arc::new(SystemClock::new()))
    }

    /// 설정으로 생성 (Postgres면 연결 후 스키마 초기화)
    pub async fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        let store: Arc<dyn ItemStore> = match &config.store {
            StoreBackend::Memory => {
                info!("{:<12} --> 메모리 저장소 사용", "Engine");
                Arc::new(MemoryItemStore::new())
            }
            StoreBackend::Postgres {
                database_url,
                max_connections,
            } => {
                info!("{:<12} --> Postgres 저장소 사용", "Engine");
                let db_manager = DatabaseManager::connect(database_url, *max_connections).await?;
                db_manager.initialize_database().await?;
                Arc::new(PostgresItemStore::new(&db_manager))
            }
        };
        Ok(Self::with_event_capacity(
            store,
            Arc::new(SystemClock::new()),
            config.event_capacity,
        ))
    }

    /// 경매 생성
    pub async fn create_auction(
        &self,
        item: AuctionItem,
        duration_seconds: u64,
    ) -> Result<AuctionId, EngineError> {
        let title = item.title.clone();
        let cmd = CreateAuctionCommand {
            item,
            duration_seconds,
        };
        let (id, schedule) =
            handle_create_auction(cmd, self.store.as_ref(), self.clock.as_ref()).await?;
        self.publish(AuctionEvent::AuctionCreated {
            auction_id: id,
            title,
            duration_seconds,
            timestamp: schedule.created_at,
        });
        Ok(id)
    }

    /// 입찰
    /// 수락 이벤트는 저장소의 확정 통지에서 발행된다 (이력 순서는 `seq`).
    pub async fn submit_pledge(
        &self,
        id: AuctionId,
        coins: u64,
        originator: Originator,
    ) -> Result<Pledge, EngineError> {
        let cmd = SubmitPledgeCommand {
            auction_id: id,
            coins,
            originator,
        };
        let publish_accepted =
            |accepted: &AcceptedPledge| self.publish(AuctionEvent::pledge_accepted(id, accepted));
        let accepted = handle_submit_pledge(
            cmd,
            self.store.as_ref(),
            self.clock.as_ref(),
            &publish_accepted,
        )
        .await?;
        Ok(accepted.pledge)
    }

    /// 경매 상세 조회
    pub async fn get_auction_detail(&self, id: AuctionId) -> Result<AuctionView, EngineError> {
        self.query.get_auction_detail(id).await
    }

    /// 모든 경매 개요 조회
    pub async fn list_auction_overviews(&self) -> Result<Vec<AuctionOverview>, EngineError> {
        self.query.list_auction_overviews().await
    }

    /// 경매 개요 페이지 조회
    pub async fn list_auction_overview_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<OverviewPage, EngineError> {
        self.query.list_auction_overview_page(offset, limit).await
    }

    /// 읽기 전용 조회 서비스
    pub fn query(&self) -> &QueryService {
        &self.query
    }

    /// 커밋된 변경 이벤트 구독
    pub fn subscribe(&self) -> broadcast::Receiver<AuctionEvent> {
        self.events.subscribe()
    }

    fn publish(&self, event: AuctionEvent) {
        // 구독자가 없으면 버린다
        if self.events.send(event).is_err() {
            debug!("{:<12} --> 이벤트 구독자 없음", "Engine");
        }
    }
}

// endregion: --- Auction Engine
