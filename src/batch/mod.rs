//! # 批量试验模块
//!
//! 并行运行多次独立的无界面扫描，统计 Planck 常数估计的离散程度。
//!
//! ## 功能
//! - 每次试验使用独立种子的噪声源
//! - 并行处理
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被 `commands/trials.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod runner;

pub use runner::{BatchRunner, TrialResult, TrialSummary};
