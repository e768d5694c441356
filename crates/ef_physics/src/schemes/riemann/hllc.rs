// crates/ef_physics/src/schemes/riemann/hllc.rs

//! HLLC 黎曼求解器
//!
//! 在 HLL 的基础上恢复接触波。外侧区域与 HLL 相同，波扇内部：
//!
//! ```text
//! SM = (p_R − p_L + m_L(SL − u_nL) − m_R(SR − u_nR))
//!      / (ρ_L(SL − u_nL) − ρ_R(SR − u_nR))
//! pM = ½(p_L + p_R + ρ_L(SL − u_nL)(SM − u_nL) + ρ_R(SR − u_nR)(SM − u_nR))
//! D  = (0, 1, 0, 0, SM)
//!
//! SM > 0:  F* = (SM(SL·W_L − F_L) + SL·pM·D) / (SL − SM)
//! 否则:    F* = (SM(SR·W_R − F_R) + SR·pM·D) / (SR − SM)
//! ```
//!
//! 参考 Toro, *Riemann Solvers and Numerical Methods for Fluid Dynamics*, 第 10 章。

use super::hll::wave_speeds;
use super::traits::{RiemannSolver, SideState};
use crate::state::{ConservedState, Flux};

/// HLLC 求解器
#[derive(Debug, Clone, Copy)]
pub struct HllcSolver {
    gamma: f64,
}

impl HllcSolver {
    /// 创建
    pub fn new(gamma: f64) -> Self {
        Self { gamma }
    }
}

impl RiemannSolver for HllcSolver {
    fn name(&self) -> &'static str {
        "hllc"
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

        let ql = l.rho * (sl - l.un);
        let qr = r.rho * (sr - r.un);
        let sm = (r.p - l.p + left[1] * (sl - l.un) - right[1] * (sr - r.un)) / (ql - qr);
        let pm = 0.5 * (l.p + r.p + ql * (sm - l.un) + qr * (sm - r.un));
        let d = [0.0, 1.0, 0.0, 0.0, sm];

        if sm > 0.0 {
            let den = sl - sm;
            Flux::new(std::array::from_fn(|v| {
                (sm * (sl * left[v] - l.flux[v]) + sl * pm * d[v]) / den
            }))
        } else {
            let den = sr - sm;
            Flux::new(std::array::from_fn(|v| {
                (sm * (sr * right[v] - r.flux[v]) + sr * pm * d[v]) / den
            }))
        }
    }
}
