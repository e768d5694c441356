// crates/ef_physics/src/schemes/riemann/rusanov.rs

//! Rusanov (Local Lax-Friedrichs) 黎曼求解器
//!
//! # 数学原理
//!
//! ```text
//! F* = ½(F_L + F_R) − ½ S (W_R − W_L)
//! S  = max(|u_nL| + a_L, |u_nR| + a_R)
//! ```
//!
//! 单波速估计，强耗散，适合强间断问题。

use super::traits::{RiemannSolver, SideState};
use crate::state::{ConservedState, Flux};

/// Rusanov 求解器
#[derive(Debug, Clone, Copy)]
pub struct RusanovSolver {
    gamma: f64,
}

impl RusanovSolver {
    /// 创建
    pub fn new(gamma: f64) -> Self {
        Self { gamma }
    }
}

impl RiemannSolver for RusanovSolver {
    fn name(&self) -> &'static str {
        "rusanov"
    }

    #[inline]
    fn solve(&self, left: &ConservedState, right: &ConservedState) -> Flux {
        let l = SideState::new(left, self.gamma);
        let r = SideState::new(right, self.gamma);
        let s = (l.un.abs() + l.a).max(r.un.abs() + r.a);
        Flux::new(std::array::from_fn(|v| {
            0.5 * (l.flux[v] + r.flux[v]) - 0.5 * s * (right[v] - left[v])
        }))
    }
}
