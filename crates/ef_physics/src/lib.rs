// crates/ef_physics/src/lib.rs

//! EulerFv 物理层
//!
//! 可压缩 Euler 方程的有限体积数值核心。
//!
//! # 模块概览
//!
//! - [`state`]: 守恒状态五元组
//! - [`fluid`]: 完全气体关系
//! - [`fields`]: 单元场与面场缓冲
//! - [`mesh`]: 网格接口、几何预处理与笛卡尔构建器
//! - [`numerics`]: 限制器、最小二乘梯度、面状态重构
//! - [`schemes`]: 黎曼求解器
//! - [`boundary`]: 边界条件与边界积分报告
//! - [`sources`]: 轴对称源项
//! - [`initial`]: 初始条件
//! - [`engine`]: 通量装配、时间步、积分器、稳定性守卫与外迭代驱动
//!
//! # 数据流
//!
//! ```text
//! W ──► 梯度 ──► 重构 W_f ──► 黎曼求解器 (内部面) ──┐
//!                         └─► 边界条件 (边界面) ────┴─► F ──► R = S − ΣF ──► W'
//! ```
//!
//! # 示例
//!
//! ```
//! use ef_config::{BoundaryConfig, BoundaryKind, Dimension, SolverConfig};
//! use ef_physics::{mesh::CartesianMeshBuilder, EulerSolver};
//!
//! let mesh = CartesianMeshBuilder::new(Dimension::OneD, [16, 1, 1], [1.0, 1.0, 1.0])
//!     .with_uniform_tag(0)
//!     .build()
//!     .unwrap();
//! let mut config = SolverConfig::default();
//! config.boundaries.push(BoundaryConfig::new(BoundaryKind::Wall));
//! config.numerical.max_iterations = 3;
//!
//! let mut solver = EulerSolver::new(mesh, &config).unwrap();
//! let status = solver.run().unwrap();
//! assert_eq!(status.iteration, 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod boundary;
pub mod engine;
pub mod error;
pub mod fields;
pub mod fluid;
pub mod initial;
pub mod mesh;
pub mod numerics;
pub mod schemes;
pub mod sources;
pub mod state;

// 重导出常用类型
pub use boundary::{BoundaryCondition, BoundaryError, BoundaryManager, BoundaryReport};
pub use engine::{EulerSolver, IterationReport, Status, StopHandle};
pub use error::{SolverError, SolverResult};
pub use fields::Fields;
pub use fluid::Fluid;
pub use mesh::{Cell, Face, Mesh, MeshError};
pub use state::{ConservedState, Flux, Var, NVAR};
