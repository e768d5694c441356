// apps/ef_cli/src/commands/run.rs

//! 运行模拟命令
//!
//! 按配置维度生成笛卡尔网格，以配置中各边界的区域为边界面打标记，
//! 运行到结束条件后输出最终状态与边界积分量。

use anyhow::{bail, Context, Result};
use clap::Args;
use ef_config::SolverConfig;
use ef_physics::mesh::CartesianMeshBuilder;
use ef_physics::{EulerSolver, Var};
use glam::DVec3;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

/// 运行模拟参数
#[derive(Args)]
pub struct RunArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: PathBuf,

    /// 各方向单元数，逗号分隔，缺省方向为 1
    #[arg(long, value_delimiter = ',', default_value = "100")]
    pub cells: Vec<usize>,

    /// 各方向区域长度，逗号分隔，缺省方向为 1.0
    #[arg(long, value_delimiter = ',', default_value = "1.0")]
    pub length: Vec<f64>,

    /// 网格原点，逗号分隔
    #[arg(long, value_delimiter = ',', default_value = "0,0,0")]
    pub origin: Vec<f64>,

    /// 力矩参考点，逗号分隔
    #[arg(long, value_delimiter = ',', default_value = "0,0,0")]
    pub moment_reference: Vec<f64>,

    /// 每隔多少次迭代输出一次残差
    #[arg(long, default_value = "100")]
    pub log_every: usize,
}

fn padded<T: Copy>(values: &[T], fill: T, what: &str) -> Result<[T; 3]> {
    if values.len() > 3 {
        bail!("{what} 最多给出 3 个分量，实际 {}", values.len());
    }
    let mut out = [fill; 3];
    out[..values.len()].copy_from_slice(values);
    Ok(out)
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== EulerFv 模拟启动 ===");

    let config = SolverConfig::from_file(&args.config)
        .with_context(|| format!("无法加载配置 {}", args.config.display()))?;

    let dimension = config.physics.dimension;
    let counts = padded(&args.cells, 1, "--cells")?;
    let lengths = padded(&args.length, 1.0, "--length")?;
    let origin = DVec3::from_array(padded(&args.origin, 0.0, "--origin")?);
    let reference = DVec3::from_array(padded(&args.moment_reference, 0.0, "--moment-reference")?);

    let mut mesh = CartesianMeshBuilder::new(dimension, counts, lengths)
        .with_origin(origin)
        .build()
        .context("生成网格失败")?;
    let regions: Vec<_> = config.boundaries.iter().map(|b| b.region).collect();
    mesh.tag_boundaries(&regions);
    info!(
        "网格: {:?}, {:?} 单元, {} 边界面",
        dimension,
        counts,
        mesh.n_boundary_faces()
    );

    let mut solver = EulerSolver::new(mesh, &config)
        .context("构建求解器失败")?
        .with_moment_reference(reference);

    let start = Instant::now();
    let log_every = args.log_every.max(1);
    let status = solver.run_with(|report| {
        if report.iteration % log_every == 0 || report.iteration == 1 {
            info!(
                "iter {:>7}  t = {:.6e}  dt = {:.3e}  res[ρ] = {:.3e}  res[E] = {:.3e}",
                report.iteration,
                report.time,
                report.dt,
                report.residuals[Var::Density as usize],
                report.residuals[Var::Energy as usize]
            );
        }
        if report.repairs > 0 {
            warn!("iter {}: 修复 {} 个非物理单元", report.iteration, report.repairs);
        }
    })?;

    info!("=== 模拟完成 ===");
    info!("迭代次数: {}", status.iteration);
    info!("模拟时间: {:.6e} s", status.time);
    info!("计算耗时: {:.2} s", start.elapsed().as_secs_f64());
    if status.stopped {
        warn!("计算被中断");
    }

    println!("\n=== 边界积分量 ===");
    println!(
        "{:<4} {:<16} {:<18} {:>6} {:>14} {:>14}  力 / 力矩",
        "#", "名称", "类型", "面数", "质量流量", "能量流量"
    );
    for r in solver.boundary_reports() {
        println!(
            "{:<4} {:<16} {:<18} {:>6} {:>14.6e} {:>14.6e}  [{:.4e}, {:.4e}, {:.4e}] / [{:.4e}, {:.4e}, {:.4e}]",
            r.index,
            r.name,
            r.kind.name(),
            r.n_faces,
            r.mass_flow,
            r.energy_flow,
            r.force.x,
            r.force.y,
            r.force.z,
            r.moment.x,
            r.moment.y,
            r.moment.z
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_fills_missing_axes() {
        assert_eq!(padded(&[10], 1, "c").unwrap(), [10, 1, 1]);
        assert_eq!(padded(&[2.0, 0.5], 1.0, "l").unwrap(), [2.0, 0.5, 1.0]);
        assert!(padded(&[1, 2, 3, 4], 1, "c").is_err());
    }
}
