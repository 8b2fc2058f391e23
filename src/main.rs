//! # bragg-lab - 交互式 X 射线谱实验
//!
//! 模拟 Bragg X 射线衍射实验：晶体与探测器联动旋转，记录计数率随角度变化的谱，
//! 由短波截止反推 Planck 常数。
//!
//! ## 子命令
//! - `scan`   - 完整角度扫描并计算 h
//! - `probe`  - 手动设角读取探测器
//! - `trials` - 并行重复扫描统计
//! - `info`   - 装置参数与物理常数
//!
//! ## 依赖关系
//! ```text
//! main.rs ──▶ lib.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── scan/      (扫描状态机与定时器)
//!   │     ├── spectrum/  (谱模型、归约、图表、导出)
//!   │     ├── batch/     (并行试验)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   ├── constants.rs(物理常数)
//!   └── error.rs    (错误处理)
//! ```

use bragg_lab::cli::Cli;
use bragg_lab::{commands, utils};

use clap::Parser;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
