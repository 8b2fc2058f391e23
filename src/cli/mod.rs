//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `scan`: 完整角度扫描并计算 Planck 常数
//! - `probe`: 手动设置晶体角并读取探测器
//! - `trials`: 并行重复扫描，统计估计值的离散程度
//! - `info`: 显示装置参数与物理常数
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: scan, probe, trials

pub mod probe;
pub mod scan;
pub mod trials;

use clap::{Parser, Subcommand};

/// bragg-lab - 交互式 X 射线谱实验
#[derive(Parser)]
#[command(name = "bragg-lab")]
#[command(version)]
#[command(
    about = "Interactive X-ray spectroscopy lab: measure Planck's constant from the Bragg cutoff",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Run the full crystal-angle scan and calculate Planck's constant
    Scan(scan::ScanArgs),

    /// Set the crystal angle manually and read the detector
    Probe(probe::ProbeArgs),

    /// Repeat the scan many times in parallel and report the spread of h
    Trials(trials::TrialsArgs),

    /// Show the apparatus settings and physical constants
    Info,
}
