//! # trials 命令实现
//!
//! 并行运行多次无界面扫描，统计 Planck 常数估计。
//!
//! ## 依赖关系
//! - 使用 `cli/trials.rs` 定义的 TrialsArgs
//! - 使用 `batch/` 模块进行并行处理

use crate::batch::{BatchRunner, TrialSummary};
use crate::cli::trials::TrialsArgs;
use crate::constants::PLANCK_CONSTANT;
use crate::error::{BraggError, Result};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 执行 trials 命令
pub fn execute(args: TrialsArgs) -> Result<()> {
    output::print_header("Repeated Scans");

    if args.count == 0 {
        return Err(BraggError::InvalidArgument(
            "--count must be at least 1".to_string(),
        ));
    }

    let base_seed = args.seed.unwrap_or_else(rand::random::<u64>);
    let seeds: Vec<u64> = (0..args.count as u64)
        .map(|i| base_seed.wrapping_add(i))
        .collect();

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!(
        "Running {} scans on {} threads (base seed {})",
        args.count,
        runner.jobs(),
        base_seed
    ));

    let summary = runner.run_trials(seeds, true)?;

    print_trial_table(&summary, args.show);
    print_summary(&summary);

    Ok(())
}

/// 打印前若干次试验
fn print_trial_table(summary: &TrialSummary, count: usize) {
    #[derive(Tabled)]
    struct TrialRow {
        #[tabled(rename = "Seed")]
        seed: u64,
        #[tabled(rename = "θmin (°)")]
        cutoff_angle: String,
        #[tabled(rename = "λmin (pm)")]
        cutoff_wavelength: String,
        #[tabled(rename = "h (J·s)")]
        planck: String,
        #[tabled(rename = "Error (%)")]
        error: String,
    }

    let rows: Vec<TrialRow> = summary
        .trials
        .iter()
        .take(count)
        .map(|t| match t.reduction {
            Some(r) => TrialRow {
                seed: t.seed,
                cutoff_angle: format!("{:.1}", r.cutoff_angle),
                cutoff_wavelength: format!("{:.2}", r.cutoff_wavelength),
                planck: format!("{:.4e}", r.planck_calculated),
                error: format!("{:.2}", r.error_percent),
            },
            None => TrialRow {
                seed: t.seed,
                cutoff_angle: "-".to_string(),
                cutoff_wavelength: "-".to_string(),
                planck: "-".to_string(),
                error: "-".to_string(),
            },
        })
        .collect();

    if !rows.is_empty() {
        output::print_header(&format!("First {} Trials", rows.len()));
        println!("{}", Table::new(&rows));
    }
}

/// 打印统计摘要
fn print_summary(summary: &TrialSummary) {
    output::print_separator();

    if summary.inconclusive() > 0 {
        output::print_warning(&format!(
            "{} of {} scans did not yield a cutoff",
            summary.inconclusive(),
            summary.total()
        ));
    }

    let Some(mean) = summary.mean_planck else {
        output::print_warning("No scan produced a result.");
        return;
    };

    output::print_field("Mean h", &format!("{:.4e} J·s", mean));
    if let Some(std) = summary.std_planck {
        output::print_field("Std. deviation", &format!("{:.2e} J·s", std));
    }
    output::print_field("Accepted value", &format!("{:.4e} J·s", PLANCK_CONSTANT));
    if let Some(err) = summary.mean_error_percent {
        output::print_field("Error of the mean", &format!("{:.2}%", err));
    }

    output::print_success(&format!(
        "Trials complete: {} reduced, {} inconclusive",
        summary.reduced,
        summary.inconclusive()
    ));
}
