// apps/ef_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 列出支持的重构格式、限制器、黎曼求解器与边界类型，以及默认配置。

use anyhow::{Context, Result};
use clap::Args;
use ef_config::{BoundaryKind, LimiterKind, ReconstructionKind, RiemannKind, SolverConfig};
use tracing::info;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 以 JSON 输出默认配置
    #[arg(long)]
    pub defaults: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== EulerFv 信息 ===");

    if args.defaults {
        let json = SolverConfig::default()
            .to_json_string()
            .context("序列化默认配置失败")?;
        println!("{json}");
        return Ok(());
    }

    println!("EulerFv CLI 版本: {}", env!("CARGO_PKG_VERSION"));
    println!("目标平台: {} / {}", std::env::consts::ARCH, std::env::consts::OS);

    println!("\n重构格式:");
    for (id, kind) in ReconstructionKind::ALL.iter().enumerate() {
        println!("  {id}  {}", kind.name());
    }

    println!("\n限制器:");
    for (id, kind) in LimiterKind::ALL.iter().enumerate() {
        println!("  {id}  {}", kind.name());
    }

    println!("\n黎曼求解器:");
    for (id, kind) in RiemannKind::ALL.iter().enumerate() {
        println!("  {id}  {}", kind.name());
    }

    println!("\n边界类型:");
    for kind in BoundaryKind::ALL {
        let values = if kind.needs_reference_state() { "  (预计算参考状态)" } else { "" };
        println!("  {}  {}{}", kind.id(), kind.name(), values);
    }

    Ok(())
}
