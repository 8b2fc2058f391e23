//! # 扫描模块
//!
//! 晶体角自动扫描的状态机与定时器。
//!
//! ## 子模块
//! - `controller`: 扫描状态机
//! - `timer`: 周期定时器
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `spectrum/`, `models/`

pub mod controller;
pub mod timer;

pub use controller::{ScanController, ScanState, TickOutcome};
