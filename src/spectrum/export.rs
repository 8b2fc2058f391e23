//! # 扫描数据导出
//!
//! 导出扫描序列到 CSV 和 XY 格式。
//!
//! ## 支持格式
//! - CSV: 晶体角, 探测器角, 波长, 计数率
//! - XY: 探测器角 2θ 与计数率两列，注释头记录电压与截止结果
//!
//! ## 依赖关系
//! - 被 `commands/scan.rs` 调用
//! - 使用 `models/sample.rs` 的 Series
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{BraggError, Result};
use crate::models::Series;
use crate::spectrum::Reduction;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// 导出为 CSV 格式
pub fn to_csv(series: &Series, output_path: &Path) -> Result<()> {
    if series.is_empty() {
        return Err(BraggError::EmptySeries);
    }

    let mut wtr = csv::Writer::from_path(output_path)?;

    for sample in series {
        wtr.serialize(sample)?;
    }

    wtr.flush().map_err(|e| BraggError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出为 XY 格式
pub fn to_xy(
    series: &Series,
    voltage: f64,
    reduction: Option<&Reduction>,
    output_path: &Path,
) -> Result<()> {
    if series.is_empty() {
        return Err(BraggError::EmptySeries);
    }

    let write_err = |e: std::io::Error| BraggError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    let file = File::create(output_path).map_err(write_err)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "# Bragg X-ray spectrum (NaCl crystal, Cu anode)").map_err(write_err)?;
    writeln!(out, "# Anode voltage: {:.1} kV", voltage / 1000.0).map_err(write_err)?;
    if let Some(r) = reduction {
        writeln!(
            out,
            "# Cutoff: theta_min = {:.2} deg, lambda_min = {:.2} pm, h = {:.4e} J s",
            r.cutoff_angle, r.cutoff_wavelength, r.planck_calculated
        )
        .map_err(write_err)?;
    }
    writeln!(out, "# Columns: 2theta (degrees), Count rate (counts/s)").map_err(write_err)?;
    writeln!(out, "#").map_err(write_err)?;

    for sample in series {
        writeln!(out, "{:.4}\t{:.4}", sample.sensor_angle(), sample.count_rate())
            .map_err(write_err)?;
    }

    out.flush().map_err(write_err)?;
    Ok(())
}
