// crates/ef_physics/src/schemes/riemann/traits.rs

//! 黎曼求解器统一接口

use ef_foundation::float::floor_pressure;

use crate::state::{ConservedState, Flux};

/// 黎曼求解器
///
/// 输入、输出都在面局部坐标系中。
pub trait RiemannSolver: Send + Sync {
    /// 名称
    fn name(&self) -> &'static str;

    /// 由左右状态计算数值通量（未乘面积）
    fn solve(&self, left: &ConservedState, right: &ConservedState) -> Flux;
}

/// 面一侧的原始量与物理通量
#[derive(Debug, Clone, Copy)]
pub struct SideState {
    /// 密度
    pub rho: f64,
    /// 法向速度
    pub un: f64,
    /// 压力（负值截断）
    pub p: f64,
    /// 声速
    pub a: f64,
    /// 物理通量 [ρun, ρun²+p, ρun·ut1, ρun·ut2, (E+p)un]
    pub flux: Flux,
}

impl SideState {
    /// 由局部坐标系守恒状态计算
    #[inline]
    pub fn new(w: &ConservedState, gamma: f64) -> Self {
        let rho = w[0];
        let un = w[1] / rho;
        let ut1 = w[2] / rho;
        let ut2 = w[3] / rho;
        let e = w[4];
        let p = floor_pressure((gamma - 1.0) * (e - 0.5 * rho * (un * un + ut1 * ut1 + ut2 * ut2)));
        let a = (gamma * p / rho).sqrt();
        let flux = Flux::new([
            rho * un,
            rho * un * un + p,
            rho * un * ut1,
            rho * un * ut2,
            (e + p) * un,
        ]);
        Self { rho, un, p, a, flux }
    }
}
