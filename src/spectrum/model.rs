//! # X 射线谱模型
//!
//! 由晶体角和阳极电压合成探测器计数率。
//!
//! ## 模型概述
//! 1. Bragg 定律: λ = 2d·sinθ
//! 2. Duane–Hunt 截止波长: λmin = hc / (eV)，λ < λmin 时强度为零
//! 3. 连续谱（轫致辐射）: 经验单峰曲线 2000·(x/p)·exp(-x/p)，
//!    x = λ - λmin，p = 0.8·λmin
//! 4. 特征谱: V 超过 Cu K 壳层激发能时叠加 Kα/Kβ 两条 Gaussian 谱线
//! 5. 噪声: uniform(0,1) × 5% × 强度，强度为零时噪声也为零
//!
//! ## 依赖关系
//! - 被 `scan/controller.rs`, `commands/probe.rs` 调用
//! - 使用 `constants.rs` 的物理常数
//! - 使用 `rand` 提供噪声源

use crate::constants::{
    ELEMENTARY_CHARGE, METERS_TO_PM, NACL_LATTICE_SPACING_PM, PLANCK_CONSTANT, SPEED_OF_LIGHT,
};

use rand::Rng;

/// 连续谱幅度
pub const BREMSSTRAHLUNG_SCALE: f64 = 2000.0;

/// 连续谱峰位参数相对 λmin 的比例
pub const BREMSSTRAHLUNG_PEAK_RATIO: f64 = 0.8;

/// Cu K 壳层激发阈值（与电压同单位）
pub const K_SHELL_THRESHOLD: f64 = 8900.0;

/// 特征谱线宽度 σ (pm)
pub const LINE_WIDTH_PM: f64 = 1.5;

/// 噪声幅度（相对强度）
pub const NOISE_FRACTION: f64 = 0.05;

/// 特征发射谱线
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionLine {
    /// 谱线名称
    pub name: &'static str,
    /// 中心波长 (pm)
    pub center: f64,
    /// 峰高（counts/s）
    pub height: f64,
}

impl EmissionLine {
    /// Gaussian 线型: height · exp(-(λ-center)² / 2σ²)
    pub fn intensity_at(&self, wavelength: f64) -> f64 {
        let delta = wavelength - self.center;
        self.height * (-delta * delta / (2.0 * LINE_WIDTH_PM * LINE_WIDTH_PM)).exp()
    }
}

/// Cu 靶 K 系谱线
pub const CU_K_LINES: [EmissionLine; 2] = [
    EmissionLine {
        name: "Cu Kα",
        center: 154.0,
        height: 4000.0,
    },
    EmissionLine {
        name: "Cu Kβ",
        center: 139.0,
        height: 900.0,
    },
];

/// Bragg 波长 (pm)
pub fn bragg_wavelength(angle_deg: f64) -> f64 {
    2.0 * NACL_LATTICE_SPACING_PM * angle_deg.to_radians().sin()
}

/// Bragg 角（度），λ 超出 2d 时无解
pub fn bragg_angle(wavelength_pm: f64) -> Option<f64> {
    let sin_theta = wavelength_pm / (2.0 * NACL_LATTICE_SPACING_PM);
    if !(0.0..=1.0).contains(&sin_theta) {
        return None;
    }
    Some(sin_theta.asin().to_degrees())
}

/// 给定电压下的截止波长 (pm)
pub fn cutoff_wavelength(voltage: f64) -> f64 {
    let lambda_min_m = (PLANCK_CONSTANT * SPEED_OF_LIGHT) / (ELEMENTARY_CHARGE * voltage);
    lambda_min_m * METERS_TO_PM
}

/// 单点模拟结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumPoint {
    /// 波长 (pm)
    pub wavelength: f64,
    /// 计数率（counts/s，非负）
    pub count_rate: f64,
}

/// 固定电压下的谱模型
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumModel {
    /// 阳极电压 (V)
    voltage: f64,
    /// 截止波长 (pm)
    lambda_min: f64,
}

impl SpectrumModel {
    /// 创建新的谱模型
    pub fn new(voltage: f64) -> Self {
        Self {
            voltage,
            lambda_min: cutoff_wavelength(voltage),
        }
    }

    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    /// 截止波长 (pm)
    pub fn cutoff_wavelength(&self) -> f64 {
        self.lambda_min
    }

    /// 电压是否足以激发 K 系特征谱
    pub fn excites_k_lines(&self) -> bool {
        self.voltage > K_SHELL_THRESHOLD
    }

    /// 连续谱分量
    pub fn bremsstrahlung(&self, wavelength: f64) -> f64 {
        if wavelength < self.lambda_min {
            return 0.0;
        }

        let x = wavelength - self.lambda_min;
        let peak = self.lambda_min * BREMSSTRAHLUNG_PEAK_RATIO;
        let base = BREMSSTRAHLUNG_SCALE * (x / peak) * (-x / peak).exp();

        base.max(0.0)
    }

    /// 特征谱分量
    pub fn characteristic(&self, wavelength: f64) -> f64 {
        if wavelength < self.lambda_min || !self.excites_k_lines() {
            return 0.0;
        }

        CU_K_LINES
            .iter()
            .map(|line| line.intensity_at(wavelength))
            .sum()
    }

    /// 无噪声期望强度
    pub fn expected_intensity(&self, wavelength: f64) -> f64 {
        self.bremsstrahlung(wavelength) + self.characteristic(wavelength)
    }

    /// 模拟给定晶体角下的一次探测器读数
    pub fn simulate<R: Rng + ?Sized>(&self, angle_deg: f64, rng: &mut R) -> SpectrumPoint {
        let wavelength = bragg_wavelength(angle_deg);
        let intensity = self.expected_intensity(wavelength);

        let noise = rng.gen::<f64>() * intensity * NOISE_FRACTION;

        SpectrumPoint {
            wavelength,
            count_rate: (intensity + noise).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_bragg_wavelength_matches_law() {
        for i in 10..=200 {
            let theta = i as f64 / 10.0;
            let expected = 2.0 * 282.0 * (theta * std::f64::consts::PI / 180.0).sin();
            assert!((bragg_wavelength(theta) - expected).abs() < TOL);
        }
    }

    #[test]
    fn test_wavelength_independent_of_voltage() {
        let mut rng = StdRng::seed_from_u64(7);
        let low = SpectrumModel::new(5_000.0).simulate(12.3, &mut rng);
        let high = SpectrumModel::new(30_000.0).simulate(12.3, &mut rng);
        assert_eq!(low.wavelength, high.wavelength);
    }

    #[test]
    fn test_bragg_angle_inverts_wavelength() {
        let theta = bragg_angle(bragg_wavelength(15.8)).unwrap();
        assert!((theta - 15.8).abs() < 1e-9);
        assert!(bragg_angle(600.0).is_none());
    }

    #[test]
    fn test_cutoff_wavelength_30kv() {
        // hc/(e·30 kV) ≈ 41.33 pm
        let lambda_min = cutoff_wavelength(30_000.0);
        assert!((lambda_min - 41.328).abs() < 0.01, "λmin = {}", lambda_min);
    }

    #[test]
    fn test_zero_count_rate_below_cutoff() {
        let model = SpectrumModel::new(30_000.0);
        let mut rng = StdRng::seed_from_u64(42);

        // λ(4.2°) ≈ 41.31 pm, just short of the cutoff
        for i in 10..=42 {
            let theta = i as f64 / 10.0;
            assert!(bragg_wavelength(theta) < model.cutoff_wavelength());
            let point = model.simulate(theta, &mut rng);
            assert_eq!(point.count_rate, 0.0, "θ = {}", theta);
        }
    }

    #[test]
    fn test_count_rate_bounded_by_noise() {
        let model = SpectrumModel::new(30_000.0);
        let mut rng = StdRng::seed_from_u64(3);

        for i in 10..=200 {
            let theta = i as f64 / 10.0;
            let expected = model.expected_intensity(bragg_wavelength(theta));
            let point = model.simulate(theta, &mut rng);
            assert!(point.count_rate >= expected);
            assert!(point.count_rate <= expected * (1.0 + NOISE_FRACTION) + TOL);
        }
    }

    #[test]
    fn test_characteristic_peaks_elevate_count_rate() {
        let model = SpectrumModel::new(30_000.0);

        for line in CU_K_LINES {
            let on_peak = model.expected_intensity(line.center + 1.0);
            let background = model.bremsstrahlung(line.center + 1.0);
            assert!(
                on_peak > background + 0.5 * line.height,
                "{}: {} vs {}",
                line.name,
                on_peak,
                background
            );
        }

        // Between the two lines only the continuum remains
        let between = model.expected_intensity(147.0);
        assert!((between - model.bremsstrahlung(147.0)).abs() < 1.0);
        assert!(model.expected_intensity(154.0) > 10.0 * between);
    }

    #[test]
    fn test_no_characteristic_peaks_below_threshold() {
        let model = SpectrumModel::new(8_000.0);
        assert!(!model.excites_k_lines());
        assert_eq!(model.characteristic(154.0), 0.0);
        assert_eq!(model.expected_intensity(154.0), model.bremsstrahlung(154.0));
    }

    #[test]
    fn test_bremsstrahlung_single_lobe() {
        let model = SpectrumModel::new(30_000.0);
        let lambda_min = model.cutoff_wavelength();
        let peak = lambda_min * BREMSSTRAHLUNG_PEAK_RATIO;

        // Maximum of u·e^-u at u = 1
        let top = model.bremsstrahlung(lambda_min + peak);
        assert!((top - BREMSSTRAHLUNG_SCALE / std::f64::consts::E).abs() < 1e-6);
        assert!(model.bremsstrahlung(lambda_min + 0.5 * peak) < top);
        assert!(model.bremsstrahlung(lambda_min + 2.0 * peak) < top);
        assert_eq!(model.bremsstrahlung(lambda_min), 0.0);
    }
}
