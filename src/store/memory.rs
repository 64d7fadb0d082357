// region:    --- Imports
use super::{ItemStore, PledgeCommitHook, PledgeDecision};
use crate::bidding::ledger::PledgeHistory;
use crate::bidding::model::{
    AcceptedPledge, AuctionId, AuctionItem, AuctionRecord, AuctionSchedule,
};
use crate::error::EngineError;
use crate::query::views::AuctionOverview;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

// endregion: --- Imports

// region:    --- Memory Store
/// 저장된 경매
/// 물품과 일정은 불변이라 잠금 밖에 두고, 입찰 이력만 경매별 잠금으로 보호한다.
struct StoredAuction {
    item: AuctionItem,
    schedule: AuctionSchedule,
    pledges: RwLock<PledgeHistory>,
}

struct Registry {
    next_auction_id: AuctionId,
    auctions: BTreeMap<AuctionId, Arc<StoredAuction>>,
}

impl Registry {
    fn allocate_auction_id(&mut self) -> AuctionId {
        let id = self.next_auction_id;
        self.next_auction_id += 1;
        id
    }
}

/// 메모리 경매 저장소
pub struct MemoryItemStore {
    registry: RwLock<Registry>,
}

impl Default for MemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self {
            registry: RwLock::new(Registry {
                next_auction_id: 1,
                auctions: BTreeMap::new(),
            }),
        }
    }

    async fn lookup(&self, id: AuctionId) -> Option<Arc<StoredAuction>> {
        self.registry.read().await.auctions.get(&id).cloned()
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn insert(
        &self,
        item: AuctionItem,
        schedule: AuctionSchedule,
    ) -> Result<AuctionId, EngineError> {
        // 식별자 할당과 등록을 같은 잠금 안에서 처리
        let mut registry = self.registry.write().await;
        let id = registry.allocate_auction_id();
        registry.auctions.insert(
            id,
            Arc::new(StoredAuction {
                item,
                schedule,
                pledges: RwLock::new(PledgeHistory::new()),
            }),
        );
        debug!("{:<12} --> 경매 저장 id: {}", "Store", id);
        Ok(id)
    }

    async fn get(&self, id: AuctionId) -> Result<Option<AuctionRecord>, EngineError> {
        let Some(stored) = self.lookup(id).await else {
            return Ok(None);
        };
        let pledges = stored.pledges.read().await.clone();
        Ok(Some(AuctionRecord {
            id,
            item: stored.item.clone(),
            schedule: stored.schedule,
            pledges,
        }))
    }

    async fn overviews(
        &self,
        offset: usize,
        limit: Option<usize>,
    ) -> Result<Vec<AuctionOverview>, EngineError> {
        let registry = self.registry.read().await;
        Ok(registry
            .auctions
            .iter()
            .skip(offset)
            .take(limit.unwrap_or(usize::MAX))
            .map(|(id, stored)| AuctionOverview {
                id: *id,
                item: stored.item.clone(),
            })
            .collect())
    }

    async fn count(&self) -> Result<usize, EngineError> {
        Ok(self.registry.read().await.auctions.len())
    }

    async fn append_pledge(
        &self,
        id: AuctionId,
        decide: PledgeDecision<'_>,
        on_commit: PledgeCommitHook<'_>,
    ) -> Result<AcceptedPledge, EngineError> {
        let stored = self.lookup(id).await.ok_or(EngineError::NotFound(id))?;

        // 판정, 추가, 통지까지 쓰기 잠금 유지
        let mut pledges = stored.pledges.write().await;
        let accepted = decide(&stored.schedule, &*pledges)?;
        pledges.append(accepted.pledge.clone())?;
        debug!(
            "{:<12} --> 입찰 추가 id: {}, 이력 수: {}",
            "Store",
            id,
            pledges.len()
        );
        on_commit(&accepted);
        Ok(accepted)
    }
}

// endregion: --- Memory Store

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidding::model::{Originator, Pledge};
    use chrono::Utc;
    use std::sync::Mutex;

    fn ignore(_: &AcceptedPledge) {}

    fn item(title: &str) -> AuctionItem {
        AuctionItem::new(title, "desc", Vec::new())
    }

    fn schedule() -> AuctionSchedule {
        AuctionSchedule::new(Utc::now(), 60).unwrap()
    }

    #[tokio::test]
    async fn test_ids_start_at_one_and_increase() {
        let store = MemoryItemStore::new();
        assert_eq!(store.insert(item("a"), schedule()).await.unwrap(), 1);
        assert_eq!(store.insert(item("b"), schedule()).await.unwrap(), 2);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_overviews_page_in_creation_order() {
        let store = MemoryItemStore::new();
        for title in ["a", "b", "c", "d"] {
            store.insert(item(title), schedule()).await.unwrap();
        }
        let page = store.overviews(1, Some(2)).await.unwrap();
        let titles: Vec<_> = page.iter().map(|o| o.item.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "c"]);
        assert_eq!(store.overviews(0, None).await.unwrap().len(), 4);
        assert!(store.overviews(10, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_decision_leaves_history_untouched() {
        let store = MemoryItemStore::new();
        let id = store.insert(item("a"), schedule()).await.unwrap();

        let reject =
            |_: &AuctionSchedule, _: &PledgeHistory| -> Result<AcceptedPledge, EngineError> {
                Err(EngineError::AuctionClosed(id))
            };
        let notified = Mutex::new(0usize);
        let count = |_: &AcceptedPledge| *notified.lock().unwrap() += 1;
        let err = store.append_pledge(id, &reject, &count).await.unwrap_err();
        assert_eq!(err, EngineError::AuctionClosed(id));

        let record = store.get(id).await.unwrap().unwrap();
        assert!(record.pledges.is_empty());
        assert_eq!(*notified.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_append_to_missing_auction() {
        let store = MemoryItemStore::new();
        let err = store
            .append_pledge(
                7,
                &|_: &AuctionSchedule, _: &PledgeHistory| {
                    Ok(AcceptedPledge {
                        pledge: Pledge {
                            coins: 1,
                            time: 0,
                            originator: Originator::new("bob"),
                        },
                        seq: 0,
                        accepted_at: Utc::now(),
                    })
                },
                &ignore,
            )
            .await
            .unwrap_err();
        assert_eq!(err, EngineError::NotFound(7));
        assert!(store.get(7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_commit_hook_sees_history_position() {
        let store = MemoryItemStore::new();
        let id = store.insert(item("a"), schedule()).await.unwrap();

        let next = |_: &AuctionSchedule,
                    history: &PledgeHistory|
         -> Result<AcceptedPledge, EngineError> {
            Ok(AcceptedPledge {
                pledge: Pledge {
                    coins: history.minimum_next_coins(),
                    time: 0,
                    originator: Originator::new("bob"),
                },
                seq: history.len() as u64,
                accepted_at: Utc::now(),
            })
        };
        let seen = Mutex::new(Vec::new());
        let record_seq = |accepted: &AcceptedPledge| seen.lock().unwrap().push(accepted.seq);
        for _ in 0..3 {
            store.append_pledge(id, &next, &record_seq).await.unwrap();
        }

        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(store.get(id).await.unwrap().unwrap().pledges.len(), 3);
    }
}
