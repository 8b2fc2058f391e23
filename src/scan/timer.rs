//! # 扫描定时器
//!
//! 固定节拍的周期定时器。扫描控制器持有唯一实例，丢弃即取消。
//!
//! ## 依赖关系
//! - 被 `scan/controller.rs` 使用

use std::thread;
use std::time::{Duration, Instant};

/// 周期定时器
#[derive(Debug)]
pub struct Ticker {
    /// 节拍间隔
    interval: Duration,
    /// 下一次触发时刻
    next_fire: Instant,
    /// 已触发次数
    fired: u64,
}

impl Ticker {
    /// 启动定时器，首次触发在一个间隔之后
    pub fn start(interval: Duration) -> Self {
        Self {
            interval,
            next_fire: Instant::now() + interval,
            fired: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// 阻塞到下一次触发
    ///
    /// 落后于节拍时立即返回，并从当前时刻重新对齐，不补发错过的节拍。
    pub fn wait(&mut self) {
        let now = Instant::now();
        if self.next_fire > now {
            thread::sleep(self.next_fire - now);
            self.next_fire += self.interval;
        } else {
            self.next_fire = now + self.interval;
        }
        self.fired += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_waits_at_least_interval() {
        let interval = Duration::from_millis(5);
        let mut ticker = Ticker::start(interval);
        let begin = Instant::now();

        ticker.wait();
        ticker.wait();

        assert!(begin.elapsed() >= interval);
        assert_eq!(ticker.fired(), 2);
    }

    #[test]
    fn test_zero_interval_never_sleeps() {
        let mut ticker = Ticker::start(Duration::ZERO);
        for _ in 0..100 {
            ticker.wait();
        }
        assert_eq!(ticker.fired(), 100);
        assert_eq!(ticker.interval(), Duration::ZERO);
    }
}
