// crates/ef_physics/src/numerics/gradient.rs

//! 最小二乘梯度
//!
//! 对单元 i 的每个守恒变量：
//!
//! ```text
//! b[d]    = Σ_f w[f][d] · (W_j − W_i)      仅遍历有邻居的面
//! grad[d] = Σ_e S[d][e] · b[e]             d, e < 活动维度数
//! ```
//!
//! 边界面在此阶段跳过，梯度只使用内部连接。非活动维度的分量为零。
//! 每个单元只读邻居状态、只写自己的梯度槽位，可按单元并行。

use glam::{DMat3, DVec3};
use rayon::prelude::*;

use crate::fields::Gradient;
use crate::mesh::Mesh;
use crate::state::{ConservedState, NVAR};

/// 最小二乘梯度计算器
#[derive(Debug, Clone, Copy)]
pub struct LeastSquaresGradient {
    dims: usize,
}

impl LeastSquaresGradient {
    /// 创建，`dims` 取 1..=3
    pub fn new(dims: usize) -> Self {
        Self {
            dims: dims.clamp(1, 3),
        }
    }

    /// 活动维度数
    #[inline]
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// 计算全部单元梯度
    pub fn compute(&self, mesh: &Mesh, state: &[ConservedState], gradients: &mut [Gradient]) {
        gradients
            .par_iter_mut()
            .zip(mesh.cells.par_iter())
            .enumerate()
            .for_each(|(i, (grad, cell))| {
                let wi = state[i];
                let mut b = [DVec3::ZERO; NVAR];
                for (slot, neighbor) in cell.neighbors.iter().enumerate() {
                    let Some(j) = *neighbor else {
                        continue;
                    };
                    let dw = state[j] - wi;
                    let w = cell.w[slot];
                    for v in 0..NVAR {
                        b[v] += w * dw[v];
                    }
                }
                for v in 0..NVAR {
                    grad[v] = self.apply_inverse(&cell.inv_matrix, b[v]);
                }
            });
    }

    #[inline]
    fn apply_inverse(&self, s: &DMat3, b: DVec3) -> DVec3 {
        let mut g = [0.0; 3];
        for (d, gd) in g.iter_mut().enumerate().take(self.dims) {
            for e in 0..self.dims {
                *gd += s.col(e)[d] * b[e];
            }
        }
        DVec3::from_array(g)
    }
}
