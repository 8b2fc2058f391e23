//! # scan 子命令 CLI 定义
//!
//! 完整角度扫描：晶体从 1° 步进到 20°，记录每一步的计数率。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/scan.rs`

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 扫描数据输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ScanOutputFormat {
    /// PNG image of the spectrum
    Png,
    /// SVG vector image of the spectrum
    Svg,
    /// CSV data file (θt, θs, λ, R)
    Csv,
    /// XY data file (θs, R)
    Xy,
}

impl std::fmt::Display for ScanOutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanOutputFormat::Png => write!(f, "png"),
            ScanOutputFormat::Svg => write!(f, "svg"),
            ScanOutputFormat::Csv => write!(f, "csv"),
            ScanOutputFormat::Xy => write!(f, "xy"),
        }
    }
}

/// scan 子命令参数
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Print the full data table after the scan
    #[arg(long, default_value_t = false)]
    pub table: bool,

    /// Export the finished scan to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<ScanOutputFormat>,

    /// Title for the plot
    #[arg(long, default_value = "X-ray Spectrum (NaCl, 30 kV)")]
    pub title: String,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Seed for the detector noise (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}
