// crates/ef_physics/src/schemes/riemann/mod.rs

//! 黎曼求解器模块
//!
//! 在面局部坐标系（分量 1 为法向动量，2/3 为切向动量）中由左右状态
//! 计算五分量数值通量：
//!
//! - [`RusanovSolver`]: 单波速，最耗散，最鲁棒
//! - [`HllSolver`]: 两波近似
//! - [`HllcSolver`]: 三波近似，恢复接触间断
//!
//! # 求解器选择指南
//!
//! | 求解器 | 精度 | 稳定性 | 计算成本 |
//! |--------|-----|--------|---------|
//! | Rusanov | 低 | 高 | 低 |
//! | HLL | 中 | 高 | 低 |
//! | HLLC | 高 | 中 | 中 |
//!
//! 三者在交换左右并取反法向时数值反对称，保证内部面两侧通量守恒。
//!
//! # 使用示例
//!
//! ```
//! use ef_config::RiemannKind;
//! use ef_physics::schemes::riemann::{RiemannScheme, RiemannSolver};
//! use ef_physics::state::ConservedState;
//!
//! let solver = RiemannScheme::new(RiemannKind::Hllc, 1.4);
//! let w = ConservedState::new([1.0, 0.0, 0.0, 0.0, 2.5]);
//! let f = solver.solve(&w, &w);
//! assert!((f[1] - 1.0).abs() < 1e-12);
//! ```

mod hll;
mod hllc;
mod rusanov;
mod traits;

pub use hll::HllSolver;
pub use hllc::HllcSolver;
pub use rusanov::RusanovSolver;
pub use traits::{RiemannSolver, SideState};

use ef_config::RiemannKind;

use crate::state::{ConservedState, Flux};

/// 启动时选定的黎曼求解器
#[derive(Debug, Clone, Copy)]
pub enum RiemannScheme {
    /// Rusanov
    Rusanov(RusanovSolver),
    /// HLL
    Hll(HllSolver),
    /// HLLC
    Hllc(HllcSolver),
}

impl RiemannScheme {
    /// 按配置创建
    pub fn new(kind: RiemannKind, gamma: f64) -> Self {
        match kind {
            RiemannKind::Rusanov => Self::Rusanov(RusanovSolver::new(gamma)),
            RiemannKind::Hll => Self::Hll(HllSolver::new(gamma)),
            RiemannKind::Hllc => Self::Hllc(HllcSolver::new(gamma)),
        }
    }

    /// 对应的配置类型
    pub fn kind(&self) -> RiemannKind {
        match self {
            Self::Rusanov(_) => RiemannKind::Rusanov,
            Self::Hll(_) => RiemannKind::Hll,
            Self::Hllc(_) => RiemannKind::Hllc,
        }
    }
}

impl RiemannSolver for RiemannScheme {
    fn name(&self) -> &'static str {
        match self {
            Self::Rusanov(s) => s.name(),
            Self::Hll(s) => s.name(),
            Self::Hllc(s) => s.name(),
        }
    }

    #[inline]
    fn solve(&self, left: &ConservedState, right: &ConservedState) -> Flux {
        match self {
            Self::Rusanov(s) => s.solve(left, right),
            Self::Hll(s) => s.solve(left, right),
            Self::Hllc(s) => s.solve(left, right),
        }
    }
}
