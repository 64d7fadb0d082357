/// 시간 공급원
/// 남은 시간 계산과 마감 판정에만 사용한다.
// region:    --- Imports
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Instant;

// endregion: --- Imports

// region:    --- Clock Trait
/// 현재 시각 조회 트레이트
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

// endregion: --- Clock Trait

// region:    --- System Clock
/// 시스템 시계
/// 생성 시점의 벽시계 시각에 단조 증가하는 `Instant` 경과 시간을 더한다.
/// 프로세스 안에서는 절대 뒤로 가지 않는다.
pub struct SystemClock {
    anchor: DateTime<Utc>,
    started: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            anchor: Utc::now(),
            started: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = TimeDelta::from_std(self.started.elapsed()).unwrap_or(TimeDelta::MAX);
        self.anchor
            .checked_add_signed(elapsed)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

// endregion: --- System Clock

// region:    --- Manual Clock
/// 수동 시계 (테스트, 시뮬레이션용)
/// 앞으로만 움직인다.
pub struct ManualClock {
    base: DateTime<Utc>,
    offset_millis: AtomicI64,
}

impl ManualClock {
    pub fn new(base: DateTime<Utc>) -> Self {
        Self {
            base,
            offset_millis: AtomicI64::new(0),
        }
    }

    /// 초 단위 전진
    pub fn advance_secs(&self, secs: i64) {
        self.advance_millis(secs.saturating_mul(1000));
    }

    /// 밀리초 단위 전진, 음수는 무시
    pub fn advance_millis(&self, millis: i64) {
        if millis > 0 {
            self.offset_millis.fetch_add(millis, Ordering::SeqCst);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let offset = TimeDelta::milliseconds(self.offset_millis.load(Ordering::SeqCst));
        self.base
            .checked_add_signed(offset)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

// endregion: --- Manual Clock
