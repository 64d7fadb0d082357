// region:    --- Imports
use super::{queries, ItemStore, PledgeCommitHook, PledgeDecision};
use crate::bidding::ledger::PledgeHistory;
use crate::bidding::model::{
    AcceptedPledge, AuctionId, AuctionItem, AuctionRecord, AuctionSchedule, Originator, Pledge,
};
use crate::database::DatabaseManager;
use crate::error::EngineError;
use crate::query::views::AuctionOverview;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use std::sync::Arc;
use tracing::{debug, warn};

// endregion: --- Imports

// region:    --- Rows
#[derive(FromRow)]
struct AuctionRow {
    id: i64,
    title: String,
    description: String,
    image: Vec<u8>,
    created_at: DateTime<Utc>,
    duration_seconds: i64,
}

#[derive(FromRow)]
struct ScheduleRow {
    created_at: DateTime<Utc>,
    duration_seconds: i64,
}

#[derive(FromRow)]
struct OverviewRow {
    id: i64,
    title: String,
    description: String,
    image: Vec<u8>,
}

#[derive(FromRow)]
struct PledgeRow {
    // NUMERIC(20, 0)을 텍스트로 읽는다
    coins: String,
    time_offset: i64,
    originator: String,
}

impl ScheduleRow {
    fn into_schedule(self) -> Result<AuctionSchedule, EngineError> {
        Ok(AuctionSchedule {
            created_at: self.created_at,
            duration_seconds: from_column(self.duration_seconds, "duration_seconds")?,
        })
    }
}

impl PledgeRow {
    fn into_pledge(self) -> Result<Pledge, EngineError> {
        Ok(Pledge {
            coins: coins_from_column(&self.coins)?,
            time: from_column(self.time_offset, "time_offset")?,
            originator: Originator::new(self.originator),
        })
    }
}

fn from_column(value: i64, column: &str) -> Result<u64, EngineError> {
    u64::try_from(value)
        .map_err(|_| EngineError::Storage(format!("음수 값이 저장되어 있습니다: {}={}", column, value)))
}

fn to_column(value: u64, column: &str) -> Result<i64, EngineError> {
    i64::try_from(value)
        .map_err(|_| EngineError::InvalidInput(format!("저장할 수 없는 값입니다: {}={}", column, value)))
}

/// 코인은 u64 전 범위를 담도록 NUMERIC 열에 저장
fn coins_to_column(coins: u64) -> String {
    coins.to_string()
}

fn coins_from_column(value: &str) -> Result<u64, EngineError> {
    value
        .parse::<u64>()
        .map_err(|_| EngineError::Storage(format!("잘못된 코인 값이 저장되어 있습니다: {}", value)))
}

fn count_from_column(value: i64) -> Result<usize, EngineError> {
    usize::try_from(value)
        .map_err(|_| EngineError::Storage(format!("잘못된 경매 수입니다: {}", value)))
}

// endregion: --- Rows

// region:    --- Postgres Store
/// Postgres 경매 저장소
/// 입찰 추가는 경매 행을 `FOR UPDATE`로 잠근 트랜잭션 안에서 판정과 함께 실행된다.
/// 조회는 MVCC 스냅샷을 읽으므로 쓰기를 기다리지 않는다.
pub struct PostgresItemStore {
    pool: Arc<PgPool>,
}

impl PostgresItemStore {
    pub fn new(db_manager: &DatabaseManager) -> Self {
        Self {
            pool: db_manager.get_pool(),
        }
    }

    async fn load_pledges(
        conn: &mut PgConnection,
        id: AuctionId,
    ) -> Result<PledgeHistory, EngineError> {
        let rows = sqlx::query_as::<_, PledgeRow>(queries::GET_PLEDGES)
            .bind(id)
            .fetch_all(conn)
            .await?;
        let pledges = rows
            .into_iter()
            .map(PledgeRow::into_pledge)
            .collect::<Result<Vec<_>, _>>()?;
        PledgeHistory::from_pledges(pledges)
    }
}

#[async_trait]
impl ItemStore for PostgresItemStore {
    async fn insert(
        &self,
        item: AuctionItem,
        schedule: AuctionSchedule,
    ) -> Result<AuctionId, EngineError> {
        let duration = to_column(schedule.duration_seconds, "duration_seconds")?;
        let id = sqlx::query_scalar::<_, i64>(queries::INSERT_AUCTION)
            .bind(&item.title)
            .bind(&item.description)
            .bind(&item.image)
            .bind(schedule.created_at)
            .bind(duration)
            .fetch_one(&*self.pool)
            .await?;
        debug!("{:<12} --> 경매 저장 id: {}", "Store", id);
        Ok(id)
    }

    async fn get(&self, id: AuctionId) -> Result<Option<AuctionRecord>, EngineError> {
        // 경매와 이력을 같은 스냅샷에서 읽는다
        let mut tx = self.pool.begin().await?;
        sqlx::query(queries::SNAPSHOT_READ).execute(&mut *tx).await?;
        let Some(row) = sqlx::query_as::<_, AuctionRow>(queries::GET_AUCTION)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };
        let pledges = Self::load_pledges(&mut *tx, id).await?;
        tx.commit().await?;

        let schedule = ScheduleRow {
            created_at: row.created_at,
            duration_seconds: row.duration_seconds,
        }
        .into_schedule()?;
        Ok(Some(AuctionRecord {
            id: row.id,
            item: AuctionItem::new(row.title, row.description, row.image),
            schedule,
            pledges,
        }))
    }

    async fn overviews(
        &self,
        offset: usize,
        limit: Option<usize>,
    ) -> Result<Vec<AuctionOverview>, EngineError> {
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        let limit = limit.map(|l| i64::try_from(l).unwrap_or(i64::MAX));
        let rows = sqlx::query_as::<_, OverviewRow>(queries::GET_OVERVIEWS)
            .bind(offset)
            .bind(limit)
            .fetch_all(&*self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| AuctionOverview {
                id: row.id,
                item: AuctionItem::new(row.title, row.description, row.image),
            })
            .collect())
    }

    async fn count(&self) -> Result<usize, EngineError> {
        let count = sqlx::query_scalar::<_, i64>(queries::COUNT_AUCTIONS)
            .fetch_one(&*self.pool)
            .await?;
        count_from_column(count)
    }

    async fn append_pledge(
        &self,
        id: AuctionId,
        decide: PledgeDecision<'_>,
        on_commit: PledgeCommitHook<'_>,
    ) -> Result<AcceptedPledge, EngineError> {
        // 트랜잭션 시작
        let mut tx = self.pool.begin().await?;

        // 경매 행 잠금
        let Some(row) = sqlx::query_as::<_, ScheduleRow>(queries::LOCK_AUCTION_SCHEDULE)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.rollback().await?;
            return Err(EngineError::NotFound(id));
        };
        let schedule = row.into_schedule()?;
        let mut pledges = Self::load_pledges(&mut *tx, id).await?;

        let accepted = match decide(&schedule, &pledges).and_then(|accepted| {
            pledges.append(accepted.pledge.clone())?;
            Ok(accepted)
        }) {
            Ok(accepted) => accepted,
            Err(e) => {
                // 롤백
                tx.rollback().await?;
                return Err(e);
            }
        };

        let pledge = &accepted.pledge;
        sqlx::query(queries::INSERT_PLEDGE)
            .bind(id)
            .bind(to_column(accepted.seq, "seq")?)
            .bind(coins_to_column(pledge.coins))
            .bind(to_column(pledge.time, "time_offset")?)
            .bind(pledge.originator.as_str())
            .execute(&mut *tx)
            .await?;

        // 트랜잭션 커밋
        if let Err(e) = tx.commit().await {
            warn!("{:<12} --> 입찰 커밋 실패 id: {}: {:?}", "Store", id, e);
            return Err(e.into());
        }
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

// endregion: --- Postgres Store
