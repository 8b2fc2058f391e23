//! # 数据模型模块
//!
//! 定义实验装置配置、测量样本与数据序列。
//!
//! ## 依赖关系
//! - 被 `spectrum/`, `scan/` 和 `commands/` 使用
//! - 子模块: experiment, sample

pub mod experiment;
pub mod sample;

pub use experiment::ExperimentConfig;
pub use sample::{Sample, Series};
