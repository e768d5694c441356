// crates/ef_physics/src/schemes/riemann/hll.rs

//! HLL 黎曼求解器
//!
//! 两波近似：
//!
//! ```text
//! SL = min(u_nL, u_nR) − max(a_L, a_R)
//! SR = max(u_nL, u_nR) + max(a_L, a_R)
//!
//!        ⎧ F_L                                          SL > 0
//! F*  =  ⎨ F_R                                          SR < 0
//!        ⎩ ((SR·F_L − SL·F_R) + SL·SR(W_R − W_L))/(SR − SL)   其他
//! ```

use super::traits::{RiemannSolver, SideState};
use crate::state::{ConservedState, Flux};

/// HLL 波速估计
#[inline]
pub(super) fn wave_speeds(l: &SideState, r: &SideState) -> (f64, f64) {
    let a = l.a.max(r.a);
    (l.un.min(r.un) - a, l.un.max(r.un) + a)
}

/// HLL 求解器
#[derive(Debug, Clone, Copy)]
pub struct HllSolver {
    gamma: f64,
}

impl HllSolver {
    /// 创建
    pub fn new(gamma: f64) -> Self {
        Self { gamma }
    }
}

impl RiemannSolver for HllSolver {
    fn name(&self) -> &'static str {
        "hll"
    }

    #[inline]
    fn solve(&self, left: &ConservedState, right: &ConservedState) -> Flux {
        let l = SideState::new(left, self.gamma);
        let r = SideState::new(right, self.gamma);
        let (sl, sr) = wave_speeds(&l, &r);

        if sl > 0.0 {
            return l.flux;
        }
        if sr < 0.0 {
            return r.flux;
        }
        let ds = sr - sl;
        Flux::new(std::array::from_fn(|v| {
            ((sr * l.flux[v] - sl * r.flux[v]) + sl * sr * (right[v] - left[v])) / ds
        }))
    }
}
