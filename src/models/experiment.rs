//! # 实验装置参数
//!
//! X 射线管与测角仪的固定设置。所有值只读，与实验规程一致：
//! 30 kV 阳极电压，1 mA 灯丝电流，晶体角 1°–20°，步长 0.1°，每 20 ms 一步。
//!
//! ## 依赖关系
//! - 被 `scan/controller.rs`, `commands/` 使用

use std::time::Duration;

/// 阳极电压 (V)
pub const VOLTAGE: f64 = 30_000.0;

/// 灯丝电流 (A)。仅用于显示，不参与谱模型
pub const CURRENT: f64 = 0.001;

/// 扫描起始晶体角（度）
pub const SCAN_START_ANGLE: f64 = 1.0;

/// 扫描终止晶体角（度，含）
pub const SCAN_END_ANGLE: f64 = 20.0;

/// 扫描步长（度）
pub const SCAN_STEP: f64 = 0.1;

/// 每步间隔（毫秒）
pub const SCAN_DELAY_MS: u64 = 20;

/// 实验装置配置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperimentConfig {
    voltage: f64,
    current: f64,
    start_angle: f64,
    end_angle: f64,
    step: f64,
    tick_interval: Duration,
}

impl ExperimentConfig {
    /// 实验规程规定的标准配置
    pub const STANDARD: Self = Self {
        voltage: VOLTAGE,
        current: CURRENT,
        start_angle: SCAN_START_ANGLE,
        end_angle: SCAN_END_ANGLE,
        step: SCAN_STEP,
        tick_interval: Duration::from_millis(SCAN_DELAY_MS),
    };

    /// 阳极电压 (V)
    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    /// 灯丝电流 (A)
    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// 完整扫描产生的样本数（含两端）
    pub fn sample_count(&self) -> usize {
        ((self.end_angle - self.start_angle) / self.step).round() as usize + 1
    }

    /// 角度是否在扫描范围内
    pub fn contains(&self, angle: f64) -> bool {
        (self.start_angle..=self.end_angle).contains(&angle)
    }

    /// 将角度限制到扫描范围内
    pub fn clamp_angle(&self, angle: f64) -> f64 {
        angle.clamp(self.start_angle, self.end_angle)
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_sample_count() {
        assert_eq!(ExperimentConfig::STANDARD.sample_count(), 191);
    }

    #[test]
    fn test_clamp_angle() {
        let config = ExperimentConfig::default();
        assert_eq!(config.clamp_angle(0.2), 1.0);
        assert_eq!(config.clamp_angle(35.0), 20.0);
        assert_eq!(config.clamp_angle(7.3), 7.3);
        assert!(config.contains(20.0));
        assert!(!config.contains(20.05));
    }
}
