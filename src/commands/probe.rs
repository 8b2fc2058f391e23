//! # probe 命令实现
//!
//! 手动把晶体转到指定角度并读取探测器若干次。
//!
//! ## 依赖关系
//! - 使用 `cli/probe.rs` 定义的 ProbeArgs
//! - 使用 `scan/` 的 ScanController（空闲状态下手动设角）

use crate::cli::probe::ProbeArgs;
use crate::error::{BraggError, Result};
use crate::scan::ScanController;
use crate::utils::output;

use tabled::{Table, Tabled};

/// 执行 probe 命令
pub fn execute(args: ProbeArgs) -> Result<()> {
    output::print_header("Manual Detector Reading");

    if args.readings == 0 {
        return Err(BraggError::InvalidArgument(
            "--readings must be at least 1".to_string(),
        ));
    }

    let mut controller = match args.seed {
        Some(seed) => ScanController::seeded(seed),
        None => ScanController::new(),
    };

    if !controller.set_crystal_angle(args.angle) {
        return Err(BraggError::Other(
            "Goniometer is busy: cannot set the crystal angle during a scan".to_string(),
        ));
    }

    let model = *controller.model();
    let first = controller.read_detector();
    let wavelength = first.wavelength;

    output::print_field(
        "Crystal angle θt",
        &format!("{:.2}°", controller.crystal_angle()),
    );
    output::print_field(
        "Sensor angle θs",
        &format!("{:.2}°", controller.sensor_angle()),
    );
    output::print_field("Bragg wavelength λ", &format!("{:.2} pm", wavelength));
    output::print_field(
        "Cutoff wavelength λmin",
        &format!("{:.2} pm", model.cutoff_wavelength()),
    );
    output::print_field(
        "Expected count rate",
        &format!("{:.2}", model.expected_intensity(wavelength)),
    );
    println!();

    if wavelength < model.cutoff_wavelength() {
        output::print_warning("Below the cutoff: no photon carries this much energy at 30 kV");
    }

    #[derive(Tabled)]
    struct ReadingRow {
        #[tabled(rename = "#")]
        index: usize,
        #[tabled(rename = "Count Rate R")]
        count_rate: String,
    }

    let mut rows = vec![ReadingRow {
        index: 1,
        count_rate: format!("{:.2}", first.count_rate),
    }];
    for index in 2..=args.readings {
        let reading = controller.read_detector();
        rows.push(ReadingRow {
            index,
            count_rate: format!("{:.2}", reading.count_rate),
        });
    }

    println!("{}", Table::new(&rows));
    output::print_success(&format!("{} readings taken", rows.len()));

    Ok(())
}
