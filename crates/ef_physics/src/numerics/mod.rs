// crates/ef_physics/src/numerics/mod.rs

//! 数值算法
//!
//! - [`limiter`]: 斜率限制器
//! - [`gradient`]: 最小二乘梯度
//! - [`reconstruction`]: 面状态重构（常数 / MUSCL）

pub mod gradient;
pub mod limiter;
pub mod reconstruction;

pub use gradient::LeastSquaresGradient;
pub use limiter::SlopeLimiter;
pub use reconstruction::{MusclReconstructor, Reconstructor};
