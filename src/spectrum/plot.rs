//! # 谱图生成
//!
//! 使用 `plotters` 库绘制计数率 R 随探测器角 θs 变化的谱图。
//!
//! ## 功能
//! - 连续谱曲线与填充
//! - 截止角标注（若已归约）
//! - Cu Kα / Kβ 谱线标注
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/scan.rs` 调用
//! - 使用 `models/sample.rs` 的 Series
//! - 使用 `plotters` 渲染图表

use crate::error::{BraggError, Result};
use crate::models::Series;
use crate::spectrum::model::{bragg_angle, CU_K_LINES};
use crate::spectrum::Reduction;

use plotters::prelude::*;
use std::path::Path;

/// 图表选项
#[derive(Debug, Clone)]
pub struct PlotOptions<'a> {
    pub title: &'a str,
    pub width: u32,
    pub height: u32,
    pub use_svg: bool,
}

/// 生成谱图
pub fn generate_spectrum_plot(
    series: &Series,
    reduction: Option<&Reduction>,
    output_path: &Path,
    options: &PlotOptions<'_>,
) -> Result<()> {
    if series.is_empty() {
        return Err(BraggError::EmptySeries);
    }

    let plot_err = |reason: String| BraggError::PlotError {
        path: output_path.display().to_string(),
        reason,
    };

    if options.use_svg {
        let root = SVGBackend::new(output_path, (options.width, options.height)).into_drawing_area();
        draw_spectrum_chart(&root, series, reduction, options.title).map_err(plot_err)?;
        root.present().map_err(|e| plot_err(e.to_string()))?;
    } else {
        let root =
            BitMapBackend::new(output_path, (options.width, options.height)).into_drawing_area();
        draw_spectrum_chart(&root, series, reduction, options.title).map_err(plot_err)?;
        root.present().map_err(|e| plot_err(e.to_string()))?;
    }
    Ok(())
}

/// 绘制谱图的核心逻辑
fn draw_spectrum_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    series: &Series,
    reduction: Option<&Reduction>,
    title: &str,
) -> std::result::Result<(), String>
where
    DB::ErrorType: 'static,
{
    let err = |e: DrawingAreaErrorKind<DB::ErrorType>| format!("{:?}", e);

    root.fill(&WHITE).map_err(err)?;

    let x_min = series.iter().map(|s| s.sensor_angle()).fold(f64::INFINITY, f64::min);
    let x_max = series
        .iter()
        .map(|s| s.sensor_angle())
        .fold(f64::NEG_INFINITY, f64::max);
    let (x_min, x_max) = if x_max > x_min {
        (x_min, x_max)
    } else {
        (x_min - 1.0, x_min + 1.0)
    };
    let y_max = series.max_count_rate().unwrap_or(0.0).max(1.0) * 1.15;

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(err)?;

    chart
        .configure_mesh()
        .x_desc("Sensor Angle θs (°)")
        .y_desc("Count Rate R (counts/s)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(err)?;

    let line_color = RGBColor(0, 150, 190);
    let points: Vec<(f64, f64)> = series
        .iter()
        .map(|s| (s.sensor_angle(), s.count_rate()))
        .collect();

    chart
        .draw_series(AreaSeries::new(
            points.iter().copied(),
            0.0,
            line_color.mix(0.2),
        ))
        .map_err(err)?;

    chart
        .draw_series(LineSeries::new(
            points.iter().copied(),
            line_color.stroke_width(2),
        ))
        .map_err(err)?;

    // 特征谱线
    for line in CU_K_LINES {
        let Some(theta) = bragg_angle(line.center) else {
            continue;
        };
        let two_theta = 2.0 * theta;
        if two_theta < x_min || two_theta > x_max {
            continue;
        }
        let y = points
            .iter()
            .min_by(|a, b| (a.0 - two_theta).abs().total_cmp(&(b.0 - two_theta).abs()))
            .map(|(_, y)| *y)
            .unwrap_or(0.0);

        chart
            .draw_series(std::iter::once(Text::new(
                line.name.to_string(),
                (two_theta + 0.3, y + y_max * 0.02),
                ("sans-serif", 14).into_font().color(&BLACK),
            )))
            .map_err(err)?;
    }

    // 截止角
    if let Some(r) = reduction {
        let cutoff = 2.0 * r.cutoff_angle;
        let cutoff_color = RGBColor(220, 50, 50);

        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(cutoff, 0.0), (cutoff, y_max * 0.9)],
                cutoff_color.stroke_width(1),
            )))
            .map_err(err)?;

        chart
            .draw_series(std::iter::once(Text::new(
                format!("λmin = {:.2} pm", r.cutoff_wavelength),
                (cutoff + 0.3, y_max * 0.88),
                ("sans-serif", 14).into_font().color(&cutoff_color),
            )))
            .map_err(err)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::ScanController;

    #[test]
    fn test_svg_plot_written() {
        let mut controller = ScanController::seeded(21);
        controller.start();
        controller.run_headless();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spectrum.svg");
        let options = PlotOptions {
            title: "NaCl @ 30 kV",
            width: 800,
            height: 600,
            use_svg: true,
        };

        let reduction = controller.reduction();
        generate_spectrum_plot(controller.series(), reduction.as_ref(), &path, &options).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("NaCl @ 30 kV"));
    }

    #[test]
    fn test_empty_series_not_plotted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.svg");
        let options = PlotOptions {
            title: "empty",
            width: 400,
            height: 300,
            use_svg: true,
        };
        assert!(matches!(
            generate_spectrum_plot(&Series::new(), None, &path, &options),
            Err(BraggError::EmptySeries)
        ));
    }
}
