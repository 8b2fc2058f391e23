//! # 批量执行器
//!
//! 并行执行批量扫描试验。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代
//! - 进度条显示
//! - 结果汇总统计
//!
//! ## 依赖关系
//! - 被 `commands/trials.rs` 调用
//! - 使用 `scan/controller.rs` 运行无界面扫描
//! - 使用 `utils/progress.rs` 创建进度条

use crate::constants::PLANCK_CONSTANT;
use crate::error::{BraggError, Result};
use crate::scan::ScanController;
use crate::spectrum::Reduction;
use crate::utils::progress;

use rayon::prelude::*;

/// 单次试验结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialResult {
    /// 噪声种子
    pub seed: u64,
    /// 归约结果，数据不足时为 None
    pub reduction: Option<Reduction>,
}

/// 批量试验统计
#[derive(Debug, Default)]
pub struct TrialSummary {
    /// 按种子顺序排列的全部试验
    pub trials: Vec<TrialResult>,
    /// 得到结果的试验数
    pub reduced: usize,
    /// Planck 常数均值 (J·s)
    pub mean_planck: Option<f64>,
    /// Planck 常数样本标准差 (J·s)
    pub std_planck: Option<f64>,
    /// 均值相对公认值的百分比误差
    pub mean_error_percent: Option<f64>,
}

impl TrialSummary {
    /// 由试验结果计算统计量
    pub fn from_trials(trials: Vec<TrialResult>) -> Self {
        let values: Vec<f64> = trials
            .iter()
            .filter_map(|t| t.reduction.map(|r| r.planck_calculated))
            .collect();

        let n = values.len();
        let mean = (n > 0).then(|| values.iter().sum::<f64>() / n as f64);
        let std = mean.filter(|_| n > 1).map(|m| {
            let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (n - 1) as f64;
            var.sqrt()
        });
        let mean_error = mean.map(|m| ((m - PLANCK_CONSTANT) / PLANCK_CONSTANT).abs() * 100.0);

        Self {
            trials,
            reduced: n,
            mean_planck: mean,
            std_planck: std,
            mean_error_percent: mean_error,
        }
    }

    /// 总试验数
    pub fn total(&self) -> usize {
        self.trials.len()
    }

    /// 未得到结果的试验数
    pub fn inconclusive(&self) -> usize {
        self.total() - self.reduced
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器，0 表示使用全部 CPU
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行运行一组试验
    pub fn run_trials(&self, seeds: Vec<u64>, show_progress: bool) -> Result<TrialSummary> {
        let pb = progress::create_progress_bar(seeds.len() as u64, "Scanning");
        if !show_progress {
            pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
        }

        // 配置 rayon 线程池
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| BraggError::Other(format!("Failed to build thread pool: {}", e)))?;

        let trials: Vec<TrialResult> = pool.install(|| {
            seeds
                .par_iter()
                .map(|&seed| {
                    let result = run_trial(seed);
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        Ok(TrialSummary::from_trials(trials))
    }
}

/// 单次无界面扫描
pub fn run_trial(seed: u64) -> TrialResult {
    let mut controller = ScanController::seeded(seed);
    controller.start();
    controller.run_headless();

    TrialResult {
        seed,
        reduction: controller.reduction(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_trial_is_reproducible() {
        assert_eq!(run_trial(17), run_trial(17));
    }

    #[test]
    fn test_parallel_trials_keep_seed_order() {
        let runner = BatchRunner::new(2);
        assert_eq!(runner.jobs(), 2);

        let seeds: Vec<u64> = (100..108).collect();
        let summary = runner.run_trials(seeds.clone(), false).unwrap();

        assert_eq!(summary.total(), 8);
        assert_eq!(summary.reduced, 8);
        assert_eq!(summary.inconclusive(), 0);
        assert_eq!(
            summary.trials.iter().map(|t| t.seed).collect::<Vec<_>>(),
            seeds
        );

        let mean = summary.mean_planck.unwrap();
        assert!(mean > PLANCK_CONSTANT);
        assert!(summary.mean_error_percent.unwrap() < 15.0);
        assert!(summary.std_planck.unwrap() >= 0.0);
    }

    #[test]
    fn test_summary_statistics() {
        let reduction = |h: f64| Reduction {
            cutoff_angle: 4.6,
            cutoff_wavelength: 45.2,
            planck_calculated: h,
            error_percent: 0.0,
        };
        let trials = vec![
            TrialResult {
                seed: 0,
                reduction: Some(reduction(6.0e-34)),
            },
            TrialResult {
                seed: 1,
                reduction: None,
            },
            TrialResult {
                seed: 2,
                reduction: Some(reduction(8.0e-34)),
            },
        ];

        let summary = TrialSummary::from_trials(trials);
        assert_eq!(summary.reduced, 2);
        assert_eq!(summary.inconclusive(), 1);
        assert!((summary.mean_planck.unwrap() - 7.0e-34).abs() < 1e-45);
        // sqrt(((1e-34)^2 * 2) / 1)
        assert!((summary.std_planck.unwrap() - 2f64.sqrt() * 1.0e-34).abs() < 1e-45);
    }

    #[test]
    fn test_summary_without_results() {
        let summary = TrialSummary::from_trials(Vec::new());
        assert_eq!(summary.total(), 0);
        assert!(summary.mean_planck.is_none());
        assert!(summary.std_planck.is_none());
        assert!(summary.mean_error_percent.is_none());
    }
}
