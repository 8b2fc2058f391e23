//! # info 命令实现
//!
//! 显示装置参数、物理常数与 Cu 特征谱线的 Bragg 角。
//!
//! ## 依赖关系
//! - 使用 `models/experiment.rs`, `constants.rs`, `spectrum/model.rs`

use crate::constants::{
    ELEMENTARY_CHARGE, NACL_LATTICE_SPACING_PM, PLANCK_CONSTANT, SPEED_OF_LIGHT,
};
use crate::error::Result;
use crate::models::ExperimentConfig;
use crate::spectrum::model::{bragg_angle, SpectrumModel, CU_K_LINES, K_SHELL_THRESHOLD};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 执行 info 命令
pub fn execute() -> Result<()> {
    let config = ExperimentConfig::STANDARD;
    let model = SpectrumModel::new(config.voltage());

    output::print_header("Apparatus");
    output::print_field("Anode voltage", &format!("{} kV", config.voltage() / 1000.0));
    output::print_field(
        "Filament current",
        &format!("{} mA (display only)", config.current() * 1000.0),
    );
    output::print_field(
        "Crystal angle range",
        &format!("{:.1}° - {:.1}°", config.start_angle(), config.end_angle()),
    );
    output::print_field("Angle step", &format!("{:.1}°", config.step()));
    output::print_field(
        "Step interval",
        &format!("{} ms", config.tick_interval().as_millis()),
    );
    output::print_field("Samples per scan", &config.sample_count().to_string());

    output::print_header("Constants");
    output::print_field("Planck constant h", &format!("{:e} J·s", PLANCK_CONSTANT));
    output::print_field("Speed of light c", &format!("{:e} m/s", SPEED_OF_LIGHT));
    output::print_field("Elementary charge e", &format!("{:e} C", ELEMENTARY_CHARGE));
    output::print_field(
        "NaCl lattice spacing d",
        &format!("{} pm", NACL_LATTICE_SPACING_PM),
    );
    output::print_field(
        "Cutoff wavelength λmin",
        &format!("{:.2} pm", model.cutoff_wavelength()),
    );
    if let Some(theta) = bragg_angle(model.cutoff_wavelength()) {
        output::print_field("Cutoff crystal angle θmin", &format!("{:.2}°", theta));
    }

    #[derive(Tabled)]
    struct LineRow {
        #[tabled(rename = "Line")]
        name: &'static str,
        #[tabled(rename = "λ (pm)")]
        wavelength: String,
        #[tabled(rename = "θt (°)")]
        crystal_angle: String,
        #[tabled(rename = "θs (°)")]
        sensor_angle: String,
    }

    let rows: Vec<LineRow> = CU_K_LINES
        .iter()
        .map(|line| {
            let theta = bragg_angle(line.center);
            LineRow {
                name: line.name,
                wavelength: format!("{:.1}", line.center),
                crystal_angle: theta.map_or("-".to_string(), |t| format!("{:.2}", t)),
                sensor_angle: theta.map_or("-".to_string(), |t| format!("{:.2}", 2.0 * t)),
            }
        })
        .collect();

    output::print_header(&format!(
        "Cu Characteristic Lines (excited above {} V)",
        K_SHELL_THRESHOLD
    ));
    println!("{}", Table::new(&rows));

    Ok(())
}
