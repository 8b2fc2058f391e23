//! # trials 子命令 CLI 定义
//!
//! 重复扫描统计：多次独立扫描并行运行，汇总 Planck 常数估计。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/trials.rs`

use clap::Args;

/// trials 子命令参数
#[derive(Args, Debug)]
pub struct TrialsArgs {
    /// Number of independent scans
    #[arg(short = 'n', long, default_value_t = 100)]
    pub count: usize,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Base seed; trial i uses seed + i (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of individual trials to list
    #[arg(long, default_value_t = 10)]
    pub show: usize,
}
