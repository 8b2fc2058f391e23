//! # 扫描控制器
//!
//! 驱动晶体在固定角度范围内步进的状态机。
//!
//! ## 状态转换
//! ```text
//!   Idle ──start──▶ Running ──tick (越过终止角)──▶ Complete
//!    ▲                 │                             │
//!    └──────reset──────┴────────────reset────────────┘
//! ```
//! - `start`: Running 中为空操作；否则清空序列、启动定时器
//! - `tick`: 定时器每次触发调用一次，模拟一个角度并追加样本
//! - `reset`: 取消定时器，回到 Idle，恢复起始角。幂等，控制器丢弃时自动调用
//! - `set_crystal_angle`: 仅 Idle / Complete 下有效
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `scan/timer.rs` 的 Ticker
//! - 使用 `spectrum/` 的谱模型与结果归约
//! - 使用 `models/` 的 ExperimentConfig, Sample, Series

use crate::models::{ExperimentConfig, Sample, Series};
use crate::scan::timer::Ticker;
use crate::spectrum::model::{SpectrumModel, SpectrumPoint};
use crate::spectrum::reduction::{self, Reduction};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 扫描状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScanState {
    /// 空闲
    Idle,
    /// 扫描中
    Running {
        /// 下一步要测量的晶体角（度）
        next_angle: f64,
        /// 进度（0-100）
        progress: f64,
    },
    /// 扫描完成
    Complete,
}

impl ScanState {
    pub fn is_running(&self) -> bool {
        matches!(self, ScanState::Running { .. })
    }

    /// 进度百分比
    pub fn progress(&self) -> f64 {
        match self {
            ScanState::Idle => 0.0,
            ScanState::Running { progress, .. } => *progress,
            ScanState::Complete => 100.0,
        }
    }
}

/// 单次 tick 的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// 控制器未在扫描，无事发生
    Idle,
    /// 测得一个新样本
    Sampled(Sample),
    /// 越过终止角，扫描结束
    Completed,
}

/// 扫描控制器
pub struct ScanController<R: Rng = StdRng> {
    /// 装置配置
    config: ExperimentConfig,
    /// 固定电压下的谱模型
    model: SpectrumModel,
    /// 扫描状态
    state: ScanState,
    /// 当前晶体角（度）
    crystal_angle: f64,
    /// 已测数据
    series: Series,
    /// 唯一的周期定时器，None 表示未启动或已取消
    timer: Option<Ticker>,
    /// 探测器噪声源
    rng: R,
}

impl ScanController<StdRng> {
    /// 创建使用系统熵作为噪声源的控制器
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// 创建噪声可复现的控制器
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for ScanController<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ScanController<R> {
    /// 使用指定噪声源创建控制器
    pub fn with_rng(rng: R) -> Self {
        let config = ExperimentConfig::STANDARD;
        Self {
            config,
            model: SpectrumModel::new(config.voltage()),
            state: ScanState::Idle,
            crystal_angle: config.start_angle(),
            series: Series::with_capacity(config.sample_count()),
            timer: None,
            rng,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // 只读接口
    // ─────────────────────────────────────────────────────────────

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    pub fn model(&self) -> &SpectrumModel {
        &self.model
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn progress(&self) -> f64 {
        self.state.progress()
    }

    /// 当前晶体角 θt（度）
    pub fn crystal_angle(&self) -> f64 {
        self.crystal_angle
    }

    /// 当前探测器角 θs = 2θt（度）
    pub fn sensor_angle(&self) -> f64 {
        self.crystal_angle * 2.0
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    /// 定时器是否处于启动状态
    pub fn is_timer_armed(&self) -> bool {
        self.timer.is_some()
    }

    /// 基于当前序列的归约结果
    pub fn reduction(&self) -> Option<Reduction> {
        reduction::reduce(&self.series, self.config.voltage())
    }

    // ─────────────────────────────────────────────────────────────
    // 命令
    // ─────────────────────────────────────────────────────────────

    /// 开始扫描。已在扫描时为空操作，返回是否真正启动
    pub fn start(&mut self) -> bool {
        if self.state.is_running() {
            return false;
        }

        self.series.clear();
        self.state = ScanState::Running {
            next_angle: self.config.start_angle(),
            progress: 0.0,
        };
        self.timer = Some(Ticker::start(self.config.tick_interval()));
        true
    }

    /// 推进一步
    pub fn tick(&mut self) -> TickOutcome {
        let ScanState::Running { next_angle, .. } = self.state else {
            return TickOutcome::Idle;
        };

        if next_angle > self.config.end_angle() {
            self.cancel_timer();
            self.state = ScanState::Complete;
            return TickOutcome::Completed;
        }

        self.crystal_angle = next_angle;

        let SpectrumPoint {
            wavelength,
            count_rate,
        } = self.model.simulate(next_angle, &mut self.rng);
        let sample = Sample::new(next_angle, wavelength, count_rate);
        self.series.push(sample);

        let start = self.config.start_angle();
        let end = self.config.end_angle();
        let progress = (next_angle - start) / (end - start) * 100.0;

        self.state = ScanState::Running {
            next_angle: round_to_tenth(next_angle + self.config.step()),
            progress,
        };

        TickOutcome::Sampled(sample)
    }

    /// 复位到初始状态
    pub fn reset(&mut self) {
        self.cancel_timer();
        self.state = ScanState::Idle;
        self.series.clear();
        self.crystal_angle = self.config.start_angle();
    }

    /// 手动设置晶体角，超出范围时截断。扫描中忽略，返回是否生效
    pub fn set_crystal_angle(&mut self, angle: f64) -> bool {
        if self.state.is_running() || !angle.is_finite() {
            return false;
        }
        self.crystal_angle = self.config.clamp_angle(angle);
        true
    }

    /// 在当前晶体角读取一次探测器（不写入序列）
    pub fn read_detector(&mut self) -> SpectrumPoint {
        self.model.simulate(self.crystal_angle, &mut self.rng)
    }

    // ─────────────────────────────────────────────────────────────
    // 调度
    // ─────────────────────────────────────────────────────────────

    /// 按定时器节拍运行，直到定时器被取消。每次 tick 后回调观察者
    pub fn run<F>(&mut self, mut on_tick: F)
    where
        F: FnMut(&Self, TickOutcome),
    {
        while let Some(timer) = self.timer.as_mut() {
            timer.wait();
            let outcome = self.tick();
            on_tick(&*self, outcome);
        }
    }

    /// 不等待定时器，直接跑完整个扫描
    pub fn run_headless(&mut self) {
        while self.state.is_running() {
            self.tick();
        }
    }

    /// 取消定时器，返回是否确有定时器被取消
    fn cancel_timer(&mut self) -> bool {
        self.timer.take().is_some()
    }
}

impl<R: Rng> Drop for ScanController<R> {
    fn drop(&mut self) {
        self.reset();
    }
}

/// 四舍五入到 0.1，避免累加误差
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
