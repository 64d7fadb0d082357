use crate::bidding::model::{AcceptedPledge, AuctionId, Originator};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 커밋 이후 관찰자에게 전달되는 경매 이벤트
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuctionEvent {
    // 경매 생성 이벤트
    AuctionCreated {
        auction_id: AuctionId,
        title: String,
        duration_seconds: u64,
        timestamp: DateTime<Utc>,
    },
    // 입찰 수락 이벤트 (`seq`는 이력 내 위치)
    PledgeAccepted {
        auction_id: AuctionId,
        seq: u64,
        coins: u64,
        time: u64,
        originator: Originator,
        timestamp: DateTime<Utc>,
    },
}

impl AuctionEvent {
    pub fn pledge_accepted(auction_id: AuctionId, accepted: &AcceptedPledge) -> Self {
        AuctionEvent::PledgeAccepted {
            auction_id,
            seq: accepted.seq,
            coins: accepted.pledge.coins,
            time: accepted.pledge.time,
            originator: accepted.pledge.originator.clone(),
            timestamp: accepted.accepted_at,
        }
    }

    pub fn auction_id(&self) -> AuctionId {
        match self {
            AuctionEvent::AuctionCreated { auction_id, .. }
            | AuctionEvent::PledgeAccepted { auction_id, .. } => *auction_id,
        }
    }
}
