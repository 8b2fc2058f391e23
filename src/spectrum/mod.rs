//! # X 射线谱模块
//!
//! 提供谱模拟、Planck 常数归约与数据输出功能。
//!
//! ## 子模块
//! - `model`: 连续谱 + 特征谱模型
//! - `reduction`: 截止波长与 Planck 常数计算
//! - `plot`: 图表生成
//! - `export`: 数据导出
//!
//! ## 依赖关系
//! - 被 `scan/` 和 `commands/` 使用
//! - 使用 `models/sample.rs`

pub mod export;
pub mod model;
pub mod plot;
pub mod reduction;

pub use model::{SpectrumModel, SpectrumPoint};
pub use reduction::Reduction;
