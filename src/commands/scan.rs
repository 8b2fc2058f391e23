//! # scan 命令实现
//!
//! 按装置节拍完成一次完整扫描，实时显示进度，最后给出 Planck 常数。
//!
//! ## 功能
//! - 20 ms 节拍驱动扫描状态机
//! - 进度条显示当前晶体角与计数率
//! - 可选完整数据表
//! - 可选导出 (PNG/SVG/CSV/XY)
//!
//! ## 依赖关系
//! - 使用 `cli/scan.rs` 定义的 ScanArgs
//! - 使用 `scan/` 的 ScanController
//! - 使用 `spectrum/plot.rs`, `spectrum/export.rs` 输出文件

use crate::cli::scan::{ScanArgs, ScanOutputFormat};
use crate::commands::report;
use crate::error::{BraggError, Result};
use crate::models::Series;
use crate::scan::{ScanController, TickOutcome};
use crate::spectrum::plot::{self, PlotOptions};
use crate::spectrum::{export, Reduction};
use crate::utils::{output, progress};

use std::path::Path;

/// 执行 scan 命令
pub fn execute(args: ScanArgs) -> Result<()> {
    output::print_header("Bragg X-ray Spectrum Scan");

    // 先确定输出格式，避免扫描结束后才报错
    let export_target = match &args.output {
        Some(path) => {
            let format = match args.format {
                Some(f) => f,
                None => guess_format_from_extension(path)?,
            };
            Some((path.clone(), format))
        }
        None => None,
    };

    let mut controller = match args.seed {
        Some(seed) => ScanController::seeded(seed),
        None => ScanController::new(),
    };
    let config = *controller.config();

    output::print_info(&format!(
        "Anode voltage: {} kV, filament current: {} mA",
        config.voltage() / 1000.0,
        config.current() * 1000.0
    ));
    output::print_info(&format!(
        "Crystal angle {:.1}° → {:.1}° in {:.1}° steps every {} ms",
        config.start_angle(),
        config.end_angle(),
        config.step(),
        config.tick_interval().as_millis()
    ));

    controller.start();

    let pb = progress::create_scan_bar();
    controller.run(|c, outcome| match outcome {
        TickOutcome::Sampled(sample) => {
            pb.set_position(c.progress().round() as u64);
            pb.set_message(format!(
                "θt = {:>4.1}°  θs = {:>4.1}°  R = {:>8.2}",
                sample.crystal_angle(),
                sample.sensor_angle(),
                sample.count_rate()
            ));
        }
        TickOutcome::Completed => pb.set_position(100),
        TickOutcome::Idle => {}
    });
    pb.finish_and_clear();

    let series = controller.series();
    output::print_success(&format!("Scan complete: {} samples recorded", series.len()));

    if let Some(peak) = series.strongest() {
        output::print_info(&format!(
            "Strongest line at θs = {:.1}° (λ = {:.2} pm, R = {:.1})",
            peak.sensor_angle(),
            peak.wavelength(),
            peak.count_rate()
        ));
    }

    if args.table {
        report::print_data_table(series);
    }

    let reduction = controller.reduction();
    report::print_reduction(reduction.as_ref());

    if let Some((path, format)) = export_target {
        println!();
        export_scan(
            series,
            reduction.as_ref(),
            config.voltage(),
            &path,
            format,
            &args,
        )?;
        output::print_done(&format!("Scan saved to '{}' ({})", path.display(), format));
    }

    Ok(())
}

/// 导出扫描结果
fn export_scan(
    series: &Series,
    reduction: Option<&Reduction>,
    voltage: f64,
    path: &Path,
    format: ScanOutputFormat,
    args: &ScanArgs,
) -> Result<()> {
    match format {
        ScanOutputFormat::Png | ScanOutputFormat::Svg => {
            let options = PlotOptions {
                title: &args.title,
                width: args.width,
                height: args.height,
                use_svg: format == ScanOutputFormat::Svg,
            };
            plot::generate_spectrum_plot(series, reduction, path, &options)
        }
        ScanOutputFormat::Csv => export::to_csv(series, path),
        ScanOutputFormat::Xy => export::to_xy(series, voltage, reduction, path),
    }
}

/// 从文件扩展名推断输出格式
fn guess_format_from_extension(path: &Path) -> Result<ScanOutputFormat> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("png") => Ok(ScanOutputFormat::Png),
        Some("svg") => Ok(ScanOutputFormat::Svg),
        Some("csv") => Ok(ScanOutputFormat::Csv),
        Some("xy") | Some("dat") | Some("txt") => Ok(ScanOutputFormat::Xy),
        Some(other) => Err(BraggError::UnsupportedFormat(format!(
            ".{} (use --format png|svg|csv|xy)",
            other
        ))),
        None => Err(BraggError::UnsupportedFormat(format!(
            "'{}' has no extension (use --format png|svg|csv|xy)",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_guess_format_from_extension() {
        let cases = [
            ("spectrum.png", ScanOutputFormat::Png),
            ("spectrum.SVG", ScanOutputFormat::Svg),
            ("data/run1.csv", ScanOutputFormat::Csv),
            ("run1.xy", ScanOutputFormat::Xy),
            ("run1.dat", ScanOutputFormat::Xy),
        ];
        for (name, expected) in cases {
            assert_eq!(
                guess_format_from_extension(&PathBuf::from(name)).unwrap(),
                expected
            );
        }
    }

    #[test]
    fn test_unknown_extension_rejected() {
        assert!(matches!(
            guess_format_from_extension(&PathBuf::from("spectrum.pdf")),
            Err(BraggError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            guess_format_from_extension(&PathBuf::from("spectrum")),
            Err(BraggError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_export_scan_csv() {
        let mut controller = ScanController::seeded(31);
        controller.start();
        controller.run_headless();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.csv");
        let args = ScanArgs {
            table: false,
            output: Some(path.clone()),
            format: None,
            title: "test".to_string(),
            width: 400,
            height: 300,
            seed: Some(31),
        };

        let reduction = controller.reduction();
        export_scan(
            controller.series(),
            reduction.as_ref(),
            30_000.0,
            &path,
            ScanOutputFormat::Csv,
            &args,
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        // header + 191 samples
        assert_eq!(content.lines().count(), 192);
    }
}
