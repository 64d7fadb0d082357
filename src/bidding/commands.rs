/// 경매 관련 커맨드 처리
/// 1. 경매 생성
/// 2. 입찰
// region:    --- Imports
use crate::bidding::ledger::PledgeHistory;
use crate::bidding::model::{
    AcceptedPledge, AuctionId, AuctionItem, AuctionSchedule, Originator, Pledge,
};
use crate::clock::Clock;
use crate::error::EngineError;
use crate::store::{ItemStore, PledgeCommitHook};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- Commands
/// 경매 생성 명령
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAuctionCommand {
    pub item: AuctionItem,
    pub duration_seconds: u64,
}

/// 입찰 명령
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitPledgeCommand {
    pub auction_id: AuctionId,
    pub coins: u64,
    pub originator: Originator,
}

/// 1. 경매 생성
pub async fn handle_create_auction(
    cmd: CreateAuctionCommand,
    store: &dyn ItemStore,
    clock: &dyn Clock,
) -> Result<(AuctionId, AuctionSchedule), EngineError> {
    info!(
        "{:<12} --> 경매 생성 요청: title={}, duration={}s, image={}B",
        "Command",
        cmd.item.title,
        cmd.duration_seconds,
        cmd.item.image.len()
    );

    let schedule = match AuctionSchedule::new(clock.now(), cmd.duration_seconds) {
        Ok(schedule) => schedule,
        Err(e) => {
            warn!("{:<12} --> 경매 생성 거부: {}", "Command", e);
            return Err(e);
        }
    };

    let id = store.insert(cmd.item, schedule).await?;
    info!("{:<12} --> 경매 생성 완료 id: {}", "Command", id);
    Ok((id, schedule))
}

/// 2. 입찰
/// 마감 판정은 요청 시각이 아니라 저장소가 경매를 잡은 뒤 읽은 현재 시각으로 한다.
/// `on_commit`은 수락된 입찰마다 이력 순서대로 한 번 호출된다.
pub async fn handle_submit_pledge(
    cmd: SubmitPledgeCommand,
    store: &dyn ItemStore,
    clock: &dyn Clock,
    on_commit: PledgeCommitHook<'_>,
) -> Result<AcceptedPledge, EngineError> {
    info!(
        "{:<12} --> 입찰 요청 처리 시작: id={}, coins={}, originator={}",
        "Command", cmd.auction_id, cmd.coins, cmd.originator
    );

    let auction_id = cmd.auction_id;
    let coins = cmd.coins;
    let originator = cmd.originator;
    let decide = |schedule: &AuctionSchedule,
                  pledges: &PledgeHistory|
     -> Result<AcceptedPledge, EngineError> {
        let now = clock.now();
        if schedule.is_closed(now) {
            return Err(EngineError::AuctionClosed(auction_id));
        }
        pledges.check(coins)?;
        Ok(AcceptedPledge {
            pledge: Pledge {
                coins,
                time: schedule.elapsed_seconds(now),
                originator: originator.clone(),
            },
            seq: pledges.len() as u64,
            accepted_at: now,
        })
    };

    match store.append_pledge(auction_id, &decide, on_commit).await {
        Ok(accepted) => {
            info!(
                "{:<12} --> 입찰 성공 id: {}, coins: {}, time: {}s, seq: {}",
                "Command",
                auction_id,
                accepted.pledge.coins,
                accepted.pledge.time,
                accepted.seq
            );
            Ok(accepted)
        }
        Err(e) => {
            warn!(
                "{:<12} --> 입찰 실패 id: {}, code: {}: {}",
                "Command",
                auction_id,
                e.code().as_str(),
                e
            );
            Err(e)
        }
    }
}

// endregion: --- Commands
