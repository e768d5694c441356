// apps/ef_cli/src/main.rs

//! EulerFv 命令行界面
//!
//! 读取 JSON 配置，在笛卡尔测试网格上运行可压缩 Euler 求解器。
//!
//! ```text
//! ef_cli run --config case.json --cells 200 --length 1.0
//! ef_cli validate --config case.json
//! ef_cli info
//! ```

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// EulerFv 可压缩 Euler 方程求解器命令行工具
#[derive(Parser)]
#[command(name = "ef_cli")]
#[command(author = "EulerFv Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "EulerFv compressible Euler finite-volume solver", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行模拟
    Run(commands::run::RunArgs),
    /// 显示支持的格式与边界类型
    Info(commands::info::InfoArgs),
    /// 验证配置
    Validate(commands::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // 数值核心使用 log 宏，经 tracing-log 桥接
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("初始化日志失败: {e}"))?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Info(args) => commands::info::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    }
}
