// crates/ef_physics/src/schemes/mod.rs

//! 数值格式模块
//!
//! - 黎曼求解器（Rusanov / HLL / HLLC）

pub mod riemann;

// 重导出常用类型
pub use riemann::{HllSolver, HllcSolver, RiemannScheme, RiemannSolver, RusanovSolver, SideState};
