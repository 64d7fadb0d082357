/// 입찰 원장
/// 경매별 입찰 이력을 수락 순서대로 보관한다. 추가만 가능하며
/// 코인 값은 항상 순증가한다. 선두 입찰은 마지막 항목이다.
// region:    --- Imports
use crate::bidding::model::Pledge;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

// endregion: --- Imports

// region:    --- Pledge History
/// 역직렬화도 `append`를 거친다
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Pledge>", into = "Vec<Pledge>")]
pub struct PledgeHistory(Vec<Pledge>);

impl PledgeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장소에서 읽은 이력 복원, 불변식 위반 시 거부
    pub fn from_pledges(pledges: Vec<Pledge>) -> Result<Self, EngineError> {
        let mut history = Self::new();
        for pledge in pledges {
            history.append(pledge).map_err(|e| {
                EngineError::Storage(format!("저장된 입찰 이력이 손상되었습니다: {}", e))
            })?;
        }
        Ok(history)
    }

    /// 선두 입찰
    pub fn leading(&self) -> Option<&Pledge> {
        self.0.last()
    }

    /// 다음 입찰이 넘어야 하는 최소 코인
    pub fn minimum_next_coins(&self) -> u64 {
        match self.leading() {
            Some(pledge) => pledge.coins.saturating_add(1),
            None => 1,
        }
    }

    /// 입찰 코인 검증
    pub fn check(&self, coins: u64) -> Result<(), EngineError> {
        let minimum = self.minimum_next_coins();
        let too_low = match self.leading() {
            Some(pledge) => coins <= pledge.coins,
            None => coins < 1,
        };
        if too_low {
            return Err(EngineError::BidTooLow { coins, minimum });
        }
        Ok(())
    }

    /// 유일한 변경 연산
    pub fn append(&mut self, pledge: Pledge) -> Result<(), EngineError> {
        self.check(pledge.coins)?;
        if let Some(leading) = self.leading() {
            if pledge.time < leading.time {
                return Err(EngineError::InvalidInput(format!(
                    "입찰 시각이 이전 입찰보다 앞섭니다: {} < {}",
                    pledge.time, leading.time
                )));
            }
        }
        self.0.push(pledge);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pledge> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Pledge] {
        &self.0
    }
}

impl TryFrom<Vec<Pledge>> for PledgeHistory {
    type Error = EngineError;

    fn try_from(pledges: Vec<Pledge>) -> Result<Self, Self::Error> {
        Self::from_pledges(pledges)
    }
}

impl From<PledgeHistory> for Vec<Pledge> {
    fn from(history: PledgeHistory) -> Self {
        history.0
    }
}

impl<'a> IntoIterator for &'a PledgeHistory {
    type Item = &'a Pledge;
    type IntoIter = std::slice::Iter<'a, Pledge>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// endregion: --- Pledge History
