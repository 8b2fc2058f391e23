//! # probe 子命令 CLI 定义
//!
//! 手动探索：把晶体转到指定角度，读取探测器。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/probe.rs`

use crate::models::ExperimentConfig;

use clap::Args;

/// 解析晶体角，必须落在扫描范围内
pub fn parse_crystal_angle(input: &str) -> Result<f64, String> {
    let config = ExperimentConfig::STANDARD;
    let angle: f64 = input
        .trim()
        .parse()
        .map_err(|_| format!("Invalid angle '{}': expected a number in degrees", input))?;

    if !config.contains(angle) {
        return Err(format!(
            "Crystal angle {} is outside the goniometer range {}-{} degrees",
            angle,
            config.start_angle(),
            config.end_angle()
        ));
    }
    Ok(angle)
}

/// probe 子命令参数
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Crystal angle θt in degrees (1-20)
    #[arg(short, long, value_parser = parse_crystal_angle)]
    pub angle: f64,

    /// Number of detector readings to take at this angle
    #[arg(short = 'n', long, default_value_t = 5)]
    pub readings: usize,

    /// Seed for the detector noise (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}
