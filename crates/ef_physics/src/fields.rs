// crates/ef_physics/src/fields.rs

//! 场缓冲区
//!
//! 单元场（状态、上一迭代状态、梯度、源项、残差）与面场（重构状态、通量）
//! 在启动时按网格规模一次性分配，运行期间不再改变大小。
//!
//! 每个几何面有两条面记录（两侧各一条），每条记录拥有独立的
//! 重构状态与通量槽位，因此按面并行写入不存在冲突。

use glam::DVec3;

use crate::mesh::Mesh;
use crate::state::{ConservedState, Flux, NVAR};

/// 单元梯度：每个守恒变量一个三维向量
pub type Gradient = [DVec3; NVAR];

/// 求解器全部场缓冲区
#[derive(Debug, Clone)]
pub struct Fields {
    /// 当前守恒状态 W
    pub state: Vec<ConservedState>,
    /// 本次外迭代开始时的守恒状态
    pub previous: Vec<ConservedState>,
    /// 单元梯度
    pub gradients: Vec<Gradient>,
    /// 源项（已乘体积）
    pub sources: Vec<ConservedState>,
    /// 残差 S - ΣF
    pub residuals: Vec<ConservedState>,
    /// 面重构状态
    pub face_states: Vec<ConservedState>,
    /// 面通量（已乘面积）
    pub fluxes: Vec<Flux>,
}

impl Fields {
    /// 按单元数与面数分配
    pub fn new(n_cells: usize, n_faces: usize) -> Self {
        Self {
            state: vec![ConservedState::ZERO; n_cells],
            previous: vec![ConservedState::ZERO; n_cells],
            gradients: vec![[DVec3::ZERO; NVAR]; n_cells],
            sources: vec![ConservedState::ZERO; n_cells],
            residuals: vec![ConservedState::ZERO; n_cells],
            face_states: vec![ConservedState::ZERO; n_faces],
            fluxes: vec![ConservedState::ZERO; n_faces],
        }
    }

    /// 按网格分配
    pub fn for_mesh(mesh: &Mesh) -> Self {
        Self::new(mesh.n_cells(), mesh.n_faces())
    }

    /// 单元数
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.state.len()
    }

    /// 面数
    #[inline]
    pub fn n_faces(&self) -> usize {
        self.face_states.len()
    }

    /// 全场设为同一状态
    pub fn fill(&mut self, w: ConservedState) {
        self.state.fill(w);
        self.previous.fill(w);
    }

    /// 保存本次外迭代的起始状态
    pub fn store_previous(&mut self) {
        self.previous.copy_from_slice(&self.state);
    }

    /// 各变量残差绝对值之和
    pub fn residual_norms(&self) -> [f64; NVAR] {
        self.residuals
            .iter()
            .fold(ConservedState::ZERO, |acc, r| acc + r.abs())
            .0
    }

    /// 全场守恒量积分 Σ W·V
    pub fn integral(&self, mesh: &Mesh) -> ConservedState {
        self.state
            .iter()
            .zip(&mesh.cells)
            .fold(ConservedState::ZERO, |acc, (w, c)| acc + *w * c.volume)
    }
}
