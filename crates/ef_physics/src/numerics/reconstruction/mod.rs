// crates/ef_physics/src/numerics/reconstruction/mod.rs

//! 面状态重构
//!
//! 两种格式，在启动时选定：
//!
//! - **常数重构**：面状态等于所属单元状态（一阶）
//! - **MUSCL**：单元状态加受限梯度外推（二阶），见 [`muscl`]
//!
//! 每条面记录只由其所属单元写入，按面并行无写冲突。

pub mod muscl;

use rayon::prelude::*;

use ef_config::{LimiterKind, ReconstructionKind};

use crate::fields::Gradient;
use crate::mesh::Mesh;
use crate::state::ConservedState;

pub use muscl::MusclReconstructor;

/// 重构格式
#[derive(Debug, Clone)]
pub enum Reconstructor {
    /// 常数重构
    Constant,
    /// MUSCL 重构
    Muscl(MusclReconstructor),
}

impl Reconstructor {
    /// 按配置创建，`n_cells` 用于预分配限制因子缓冲
    pub fn new(kind: ReconstructionKind, limiter: LimiterKind, n_cells: usize) -> Self {
        match kind {
            ReconstructionKind::Constant => Self::Constant,
            ReconstructionKind::Muscl => Self::Muscl(MusclReconstructor::new(limiter, n_cells)),
        }
    }

    /// 名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::Muscl(_) => "muscl",
        }
    }

    /// 是否需要先计算梯度
    #[inline]
    pub fn needs_gradients(&self) -> bool {
        matches!(self, Self::Muscl(_))
    }

    /// 计算全部面记录的重构状态
    pub fn reconstruct(
        &mut self,
        mesh: &Mesh,
        state: &[ConservedState],
        gradients: &[Gradient],
        face_states: &mut [ConservedState],
    ) {
        match self {
            Self::Constant => reconstruct_constant(mesh, state, face_states),
            Self::Muscl(muscl) => muscl.reconstruct(mesh, state, gradients, face_states),
        }
    }
}

fn reconstruct_constant(mesh: &Mesh, state: &[ConservedState], face_states: &mut [ConservedState]) {
    face_states
        .par_iter_mut()
        .zip(mesh.faces.par_iter())
        .for_each(|(wf, face)| *wf = state[face.owner]);
}
