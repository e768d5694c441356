// apps/ef_cli/src/commands/validate.rs

//! 配置验证命令
//!
//! 解析并校验配置文件，另外给出不影响运行的提示。

use anyhow::{bail, Result};
use clap::Args;
use ef_config::{BoundaryKind, SolverConfig};
use ef_foundation::EfError;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: PathBuf,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 验证结果
#[derive(Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn is_ok(&self, strict: bool) -> bool {
        self.errors.is_empty() && (!strict || self.warnings.is_empty())
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== EulerFv 配置验证 ===");
    println!("检查配置文件: {}", args.config.display());

    let mut result = ValidationResult::default();
    let loaded = SolverConfig::from_file(&args.config).and_then(|config| config.validate().map(|_| config));
    match loaded {
        Ok(config) => {
            println!("  ✓ 配置解析与校验通过");
            collect_warnings(&config, &mut result);
        }
        Err(err) => {
            let err = EfError::from(err);
            let category = if err.is_config_error() { "配置" } else { "读取" };
            result.add_error(format!("[{category}] {err}"));
        }
    }

    print_validation_result(&result, args.strict)
}

fn collect_warnings(config: &SolverConfig, result: &mut ValidationResult) {
    let numerical = &config.numerical;
    if numerical.cfl > 1.0 {
        result.add_warning(format!("CFL 数 {} 大于 1，显式格式可能失稳", numerical.cfl));
    }
    if numerical.time_stages == 1 && numerical.reconstruction == ef_config::ReconstructionKind::Muscl {
        result.add_warning("MUSCL 重构配合单级时间推进，时间方向仅一阶");
    }
    if config.boundaries.is_empty() {
        result.add_warning("未配置任何边界，含边界面的网格将无法求解");
    }
    let has_axis = config.boundaries.iter().any(|b| b.kind == BoundaryKind::Axis);
    if has_axis && !config.physics.dimension.is_axisymmetric() {
        result.add_warning("配置了轴线边界但问题不是轴对称");
    }
}

fn print_validation_result(result: &ValidationResult, strict: bool) -> Result<()> {
    println!("\n=== 验证结果 ===");

    if !result.errors.is_empty() {
        println!("\n错误 ({}):", result.errors.len());
        for err in &result.errors {
            error!("{}", err);
            println!("  ✗ {}", err);
        }
    }

    if !result.warnings.is_empty() {
        println!("\n警告 ({}):", result.warnings.len());
        for warning in &result.warnings {
            warn!("{}", warning);
            println!("  ⚠ {}", warning);
        }
    }

    if result.is_ok(strict) {
        println!("\n✓ 验证通过");
        Ok(())
    } else {
        println!("\n✗ 验证失败");
        bail!(
            "验证失败：发现 {} 个错误，{} 个警告",
            result.errors.len(),
            result.warnings.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ef_config::{BoundaryConfig, NumericalConfig};

    #[test]
    fn test_strict_mode_rejects_warnings() {
        let mut r = ValidationResult::default();
        r.add_warning("w");
        assert!(r.is_ok(false));
        assert!(!r.is_ok(true));
        r.add_error("e");
        assert!(!r.is_ok(false));
    }

    #[test]
    fn test_collect_warnings() {
        let config = SolverConfig {
            numerical: NumericalConfig {
                cfl: 1.5,
                ..NumericalConfig::default()
            },
            boundaries: vec![BoundaryConfig::new(BoundaryKind::Axis)],
            ..SolverConfig::default()
        };
        let mut r = ValidationResult::default();
        collect_warnings(&config, &mut r);
        assert_eq!(r.warnings.len(), 2);
        assert!(r.errors.is_empty());
    }
}
