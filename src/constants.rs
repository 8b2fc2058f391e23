//! # 物理常数
//!
//! 模拟所需的 CODATA 常数与晶体参数。
//!
//! ## 依赖关系
//! - 被 `spectrum/`, `models/experiment.rs`, `commands/info.rs` 使用
//! - 无外部模块依赖

/// Planck 常数 (J·s)，用于误差比较的公认值
pub const PLANCK_CONSTANT: f64 = 6.626_070_15e-34;

/// 真空光速 (m/s)
pub const SPEED_OF_LIGHT: f64 = 2.997_924_58e8;

/// 元电荷 (C)
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;

/// NaCl 晶面间距 d (pm)
pub const NACL_LATTICE_SPACING_PM: f64 = 282.0;

/// 米 → 皮米
pub const METERS_TO_PM: f64 = 1e12;

/// 皮米 → 米
pub const PM_TO_METERS: f64 = 1e-12;
