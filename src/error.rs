//! # 统一错误处理模块
//!
//! 定义 bragg-lab 的所有错误类型，使用 `thiserror` 派生。
//!
//! 核心模拟（谱模型、扫描状态机、结果归约）不会失败；
//! 这里的错误只来自命令行参数与文件输出。
//!
//! ## 依赖关系
//! - 被 `commands/`, `spectrum/export.rs`, `spectrum/plot.rs` 使用
//! - 无外部模块依赖

use thiserror::Error;

/// bragg-lab 统一错误类型
#[derive(Error, Debug)]
pub enum BraggError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 输出错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to render plot '{path}': {reason}")]
    PlotError { path: String, reason: String },

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Nothing to export: the scan produced no samples")]
    EmptySeries,

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, BraggError>;
