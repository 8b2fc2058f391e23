//! # 结果展示
//!
//! 数据表与 Planck 常数计算摘要的终端渲染。
//!
//! ## 依赖关系
//! - 被 `commands/scan.rs`, `commands/probe.rs` 使用
//! - 使用 `tabled` 渲染表格

use crate::constants::PLANCK_CONSTANT;
use crate::models::Series;
use crate::spectrum::Reduction;
use crate::utils::output;

use colored::Colorize;
use tabled::{Table, Tabled};

/// 数据表行
#[derive(Tabled)]
struct SampleRow {
    #[tabled(rename = "Crystal Angle θt (°)")]
    crystal_angle: String,
    #[tabled(rename = "Sensor Angle θs (°)")]
    sensor_angle: String,
    #[tabled(rename = "Wavelength (pm)")]
    wavelength: String,
    #[tabled(rename = "Count Rate R")]
    count_rate: String,
}

/// 打印完整数据表
pub fn print_data_table(series: &Series) {
    let rows: Vec<SampleRow> = series
        .iter()
        .map(|s| SampleRow {
            crystal_angle: format!("{:.1}", s.crystal_angle()),
            sensor_angle: format!("{:.1}", s.sensor_angle()),
            wavelength: format!("{:.2}", s.wavelength()),
            count_rate: format!("{:.2}", s.count_rate()),
        })
        .collect();

    if rows.is_empty() {
        output::print_warning("No data recorded yet.");
        return;
    }

    output::print_header(&format!("Data Table ({} samples)", rows.len()));
    println!("{}", Table::new(&rows));
}

/// 打印 Planck 常数计算摘要
pub fn print_reduction(reduction: Option<&Reduction>) {
    output::print_header("Calculation of Planck's Constant (h)");

    let Some(r) = reduction else {
        println!("    {}", "Complete the scan to see calculations.".dimmed());
        return;
    };

    println!(
        "    Cutoff wavelength: electron energy fully converted to one photon, {}",
        "eV = hc / λmin".bold()
    );
    println!();
    output::print_field("1. Cutoff angle θmin", &format!("{:.2}°", r.cutoff_angle));
    output::print_field(
        "2. λmin = 2d sin(θmin)",
        &format!("{:.2} pm", r.cutoff_wavelength),
    );
    output::print_field(
        "3. h = eVλmin / c",
        &format!("{:.4e} J·s", r.planck_calculated)
            .green()
            .bold()
            .to_string(),
    );
    output::print_field("Accepted value", &format!("{:.4e} J·s", PLANCK_CONSTANT));
    output::print_field(
        "Percentage error",
        &format!("{:.2}%", r.error_percent).yellow().to_string(),
    );
}
