// crates/ef_physics/src/engine/mod.rs

//! 求解引擎
//!
//! # 模块结构
//!
//! - `flux` - 内部面通量装配
//! - `timestep` - CFL 时间步控制
//! - `time_integrator` - 多级显式积分器
//! - `stability` - 非物理状态检测与修复
//! - `solver` - 外迭代驱动

pub mod flux;
pub mod solver;
pub mod stability;
pub mod time_integrator;
pub mod timestep;

// 重导出常用类型
pub use flux::{face_flux, InteriorFluxAssembler};
pub use solver::{EulerSolver, IterationReport, Status, StopHandle};
pub use stability::{StabilityCheck, StabilityGuard};
pub use time_integrator::MultiStageIntegrator;
pub use timestep::{TimeStep, TimeStepController};
