// crates/ef_physics/src/sources.rs

//! 源项
//!
//! 每次外迭代开始时清零，轴对称问题在径向动量上加几何源项 p/y_c，
//! 最后整体乘以单元体积。

use rayon::prelude::*;

use crate::fluid::Fluid;
use crate::mesh::Mesh;
use crate::state::{ConservedState, Var};

/// 源项计算
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceTerms {
    axisymmetric: bool,
}

impl SourceTerms {
    /// 创建
    pub fn new(axisymmetric: bool) -> Self {
        Self { axisymmetric }
    }

    /// 是否启用轴对称源项
    pub fn is_axisymmetric(&self) -> bool {
        self.axisymmetric
    }

    /// 重新计算全部单元源项（已乘体积）
    pub fn update(&self, mesh: &Mesh, state: &[ConservedState], fluid: &Fluid, sources: &mut [ConservedState]) {
        sources
            .par_iter_mut()
            .zip(state.par_iter())
            .zip(mesh.cells.par_iter())
            .for_each(|((s, w), cell)| {
                *s = ConservedState::ZERO;
                if self.axisymmetric {
                    s[Var::MomentumY] += fluid.pressure(w) / cell.centroid.y;
                }
                *s = *s * cell.volume;
            });
    }
}
