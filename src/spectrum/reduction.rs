//! # 结果归约
//!
//! 从扫描序列中定位截止角，反推 Planck 常数。
//!
//! ## 算法概述
//! 1. 取序列最大计数率
//! 2. 按角度顺序找第一个计数率超过 5% 最大值的样本，作为截止角估计
//!    （直接取第一个非零点会被截止附近的噪声干扰）
//! 3. λmin = 2d·sin(θmin)
//! 4. h = e·V·λmin / c
//!
//! ## 依赖关系
//! - 被 `scan/controller.rs`, `commands/` 调用
//! - 使用 `models/sample.rs` 的 Series
//! - 使用 `spectrum/model.rs` 的 Bragg 关系

use crate::constants::{ELEMENTARY_CHARGE, PLANCK_CONSTANT, PM_TO_METERS, SPEED_OF_LIGHT};
use crate::models::Series;
use crate::spectrum::model::bragg_wavelength;

/// 截止判据：相对最大计数率的比例。经验值，可调
pub const CUTOFF_THRESHOLD_FRACTION: f64 = 0.05;

/// 归约结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reduction {
    /// 截止晶体角 θmin（度）
    pub cutoff_angle: f64,
    /// 截止波长 λmin (pm)
    pub cutoff_wavelength: f64,
    /// 计算得到的 Planck 常数 (J·s)
    pub planck_calculated: f64,
    /// 相对公认值的百分比误差
    pub error_percent: f64,
}

/// 使用默认阈值归约
pub fn reduce(series: &Series, voltage: f64) -> Option<Reduction> {
    reduce_with_threshold(series, voltage, CUTOFF_THRESHOLD_FRACTION)
}

/// 使用指定阈值归约。样本不足或无样本越过阈值时返回 None
pub fn reduce_with_threshold(series: &Series, voltage: f64, fraction: f64) -> Option<Reduction> {
    if series.len() < 2 {
        return None;
    }

    let max_count = series.max_count_rate()?;
    let threshold = max_count * fraction;

    let cutoff = series.iter().find(|s| s.count_rate() > threshold)?;

    let cutoff_angle = cutoff.crystal_angle();
    let cutoff_wavelength = bragg_wavelength(cutoff_angle);
    let lambda_min_m = cutoff_wavelength * PM_TO_METERS;

    let planck_calculated = (ELEMENTARY_CHARGE * voltage * lambda_min_m) / SPEED_OF_LIGHT;
    let error_percent = ((planck_calculated - PLANCK_CONSTANT) / PLANCK_CONSTANT).abs() * 100.0;

    Some(Reduction {
        cutoff_angle,
        cutoff_wavelength,
        planck_calculated,
        error_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sample;
    use crate::spectrum::model::{bragg_angle, cutoff_wavelength};

    fn series_of(points: &[(f64, f64)]) -> Series {
        points
            .iter()
            .map(|&(angle, rate)| Sample::new(angle, bragg_wavelength(angle), rate))
            .collect()
    }

    #[test]
    fn test_empty_series_has_no_result() {
        assert!(reduce(&Series::new(), 30_000.0).is_none());
    }

    #[test]
    fn test_single_sample_has_no_result() {
        let series = series_of(&[(5.0, 300.0)]);
        assert!(reduce(&series, 30_000.0).is_none());
    }

    #[test]
    fn test_all_zero_series_has_no_result() {
        let series = series_of(&[(1.0, 0.0), (1.1, 0.0), (1.2, 0.0)]);
        assert!(reduce(&series, 30_000.0).is_none());
    }

    #[test]
    fn test_threshold_skips_noise_floor() {
        // 4.4° is non-zero but below 5% of the 4000 max
        let series = series_of(&[(4.3, 0.0), (4.4, 150.0), (4.5, 260.0), (15.8, 4000.0)]);
        let result = reduce(&series, 30_000.0).unwrap();
        assert_eq!(result.cutoff_angle, 4.5);
        assert_eq!(result.cutoff_wavelength, bragg_wavelength(4.5));
    }

    #[test]
    fn test_custom_threshold() {
        let series = series_of(&[(4.3, 0.0), (4.4, 150.0), (4.5, 260.0), (15.8, 4000.0)]);
        let result = reduce_with_threshold(&series, 30_000.0, 0.01).unwrap();
        assert_eq!(result.cutoff_angle, 4.4);
    }

    #[test]
    fn test_exact_cutoff_recovers_planck() {
        // A sample sitting exactly at the Duane–Hunt limit gives back h
        let theta = bragg_angle(cutoff_wavelength(30_000.0)).unwrap();
        let series = series_of(&[(theta * 0.5, 0.0), (theta, 1000.0)]);
        let result = reduce(&series, 30_000.0).unwrap();

        assert!((result.planck_calculated - PLANCK_CONSTANT).abs() / PLANCK_CONSTANT < 1e-9);
        assert!(result.error_percent < 1e-6);
    }
}
