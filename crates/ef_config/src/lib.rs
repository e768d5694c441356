// crates/ef_config/src/lib.rs

//! EulerFv 配置层
//!
//! 定义求解器的全部配置模型，全部使用 f64 存储以便 JSON 序列化。
//!
//! # 模块
//!
//! - [`solver_config`]: 顶层配置 `SolverConfig`（流体、物理维度、数值格式）
//! - [`schemes`]: 数值格式选择枚举（重构、限制器、黎曼求解器）
//! - [`boundary`]: 边界配置与空间过滤区域
//! - [`initial`]: 初始条件配置
//! - [`error`]: 配置错误类型
//!
//! 所有格式、边界类型与维度既接受名称，也接受经 `from_id` 解析的
//! 旧式数值编号；未知编号在启动时报 [`ConfigError::UnknownId`]。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod boundary;
pub mod error;
pub mod initial;
pub mod schemes;
pub mod solver_config;

// 重导出常用类型
pub use boundary::{BoundaryConfig, BoundaryKind, Region};
pub use error::ConfigError;
pub use initial::{InitialBlock, InitialConfig, InitialVariables, PrimitiveState};
pub use schemes::{LimiterKind, ReconstructionKind, RiemannKind};
pub use solver_config::{Dimension, FluidConfig, NumericalConfig, PhysicsConfig, SolverConfig};
