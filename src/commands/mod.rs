//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `scan/`, `spectrum/`, `batch/`, `utils/`
//! - 子模块: scan, probe, trials, info, report

pub mod info;
pub mod probe;
pub mod report;
pub mod scan;
pub mod trials;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Scan(args) => scan::execute(args),
        Commands::Probe(args) => probe::execute(args),
        Commands::Trials(args) => trials::execute(args),
        Commands::Info => info::execute(),
    }
}
