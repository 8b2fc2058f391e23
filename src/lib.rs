//! # bragg-lab 核心库
//!
//! 谱模型、扫描状态机与结果归约对外暴露为库，`main.rs` 只负责命令行入口。
//!
//! ## 模块
//! - `constants`: 物理常数
//! - `models`: 装置配置、样本与序列
//! - `spectrum`: 谱模型、归约、图表、导出
//! - `scan`: 扫描状态机与定时器
//! - `batch`: 并行试验
//! - `cli` / `commands` / `utils`: 命令行层

pub mod batch;
pub mod cli;
pub mod commands;
pub mod constants;
pub mod error;
pub mod models;
pub mod scan;
pub mod spectrum;
pub mod utils;

pub use error::{BraggError, Result};
pub use models::{ExperimentConfig, Sample, Series};
pub use scan::{ScanController, ScanState, TickOutcome};
pub use spectrum::{Reduction, SpectrumModel, SpectrumPoint};
