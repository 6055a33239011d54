//! 고정 간격 요청 제한.
//!
//! 직전 요청 이후 `interval`이 지날 때까지 기다립니다. 토큰 버킷이 아니므로
//! 버스트는 허용하지 않으며, 클라이언트 인스턴스마다 따로 동작합니다.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// 요청 간 최소 간격을 보장하는 스로틀.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl Throttle {
    /// 최소 간격으로 생성.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: Mutex::new(None),
        }
    }

    /// 최소 간격.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// 다음 요청이 가능할 때까지 대기하고 요청 시각을 기록합니다.
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.interval {
                sleep(self.interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}
