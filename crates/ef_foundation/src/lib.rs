// crates/ef_foundation/src/lib.rs

//! EulerFv Foundation Layer
//!
//! 基础层，为上层 crate 提供公共抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型
//! - [`float`]: 数值常量与浮点检查工具
//!
//! # 设计原则
//!
//! 1. **最少依赖**: 仅依赖 thiserror
//! 2. **无物理语义**: 物理相关的错误与类型在 `ef_physics` 中定义
//!
//! # 示例
//!
//! ```
//! use ef_foundation::{
//!     error::{EfError, EfResult},
//!     float::floor_pressure,
//! };
//!
//! fn check(p: f64) -> EfResult<f64> {
//!     if p.is_nan() {
//!         return Err(EfError::internal("压力为 NaN"));
//!     }
//!     Ok(floor_pressure(p))
//! }
//!
//! assert_eq!(check(-1.0).unwrap(), 1e-14);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod float;

// 重导出常用类型
pub use error::{EfError, EfResult};
pub use float::{all_finite, floor_pressure, PRESSURE_FLOOR};
