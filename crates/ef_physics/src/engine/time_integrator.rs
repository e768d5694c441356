// crates/ef_physics/src/engine/time_integrator.rs

//! 多级显式时间积分器
//!
//! 每次外迭代开始时保存 W⁰，各级都从 W⁰ 出发：
//!
//! ```text
//! R_i   = S_i − Σ_f F_f
//! W_i^k = W_i^0 + a_k · dt / V_i · R_i(W^{k−1})
//! ```
//!
//! 单级 a = [1] 即前向欧拉。两级 [0.5, 1] 为中点格式，
//! 四级 [1/4, 1/3, 1/2, 1] 为 Jameson 格式。
//!
//! 级计数器 `stage` 属于积分器实例，每次调用 [`MultiStageIntegrator::advance`]
//! 后按级数取模递增。

use rayon::prelude::*;

use ef_foundation::float::zero_if_nan;

use crate::fields::Fields;
use crate::mesh::Mesh;
use crate::state::{ConservedState, NVAR};

/// 多级显式积分器
#[derive(Debug, Clone, PartialEq)]
pub struct MultiStageIntegrator {
    coefficients: Vec<f64>,
    stage: usize,
}

impl MultiStageIntegrator {
    /// 以各级系数创建，空系数退化为前向欧拉
    pub fn new(coefficients: Vec<f64>) -> Self {
        let coefficients = if coefficients.is_empty() {
            vec![1.0]
        } else {
            coefficients
        };
        Self {
            coefficients,
            stage: 0,
        }
    }

    /// 级数
    #[inline]
    pub fn n_stages(&self) -> usize {
        self.coefficients.len()
    }

    /// 下一次调用使用的级
    #[inline]
    pub fn stage(&self) -> usize {
        self.stage
    }

    /// 各级系数
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// 级计数器归零
    pub fn reset(&mut self) {
        self.stage = 0;
    }

    /// 计算残差并推进一级
    pub fn advance(&mut self, mesh: &Mesh, fields: &mut Fields, dt: f64) {
        let a = self.coefficients[self.stage];
        let fluxes = &fields.fluxes;

        fields
            .state
            .par_iter_mut()
            .zip(fields.residuals.par_iter_mut())
            .zip(fields.previous.par_iter())
            .zip(fields.sources.par_iter())
            .zip(mesh.cells.par_iter())
            .for_each(|((((w, r), w0), s), cell)| {
                let flux_sum = cell
                    .faces
                    .iter()
                    .fold(ConservedState::ZERO, |acc, &f| acc + fluxes[f]);
                let scale = a * dt / cell.volume;
                for v in 0..NVAR {
                    r[v] = zero_if_nan(s[v] - flux_sum[v]);
                    w[v] = w0[v] + scale * r[v];
                }
            });

        self.stage = (self.stage + 1) % self.n_stages();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ef_config::Dimension;
    use glam::DVec3;

    use crate::mesh::CartesianMeshBuilder;
    use crate::state::Flux;

    fn setup() -> (Mesh, Fields) {
        let mesh = CartesianMeshBuilder::new(Dimension::OneD, [2, 1, 1], [1.0, 1.0, 1.0])
            .build()
            .unwrap();
        let mut fields = Fields::for_mesh(&mesh);
        fields.fill(ConservedState::new([1.0, 0.0, 0.0, 0.0, 2.5]));
        (mesh, fields)
    }

    #[test]
    fn test_stage_counter_cycles() {
        let (mesh, mut fields) = setup();
        let mut rk = MultiStageIntegrator::new(vec![0.25, 0.5, 1.0]);
        assert_eq!(rk.n_stages(), 3);
        for expected in [1, 2, 0, 1] {
            rk.advance(&mesh, &mut fields, 0.1);
            assert_eq!(rk.stage(), expected);
        }
        rk.reset();
        assert_eq!(rk.stage(), 0);
    }

    #[test]
    fn test_update_uses_stage_coefficient() {
        let (mesh, mut fields) = setup();
        // 单元 0 的 +x 面流出质量 1
        let f = mesh.cells[0].faces[1];
        fields.fluxes[f] = Flux::new([1.0, 0.0, 0.0, 0.0, 0.0]);
        fields.sources[0] = ConservedState::new([0.0, 0.0, 0.25, 0.0, 0.0]);

        let mut rk = MultiStageIntegrator::new(vec![0.5, 1.0]);
        rk.advance(&mesh, &mut fields, 0.1);
        let v = mesh.cells[0].volume;
        assert_relative_eq!(fields.residuals[0][0], -1.0);
        assert_relative_eq!(fields.state[0][0], 1.0 - 0.5 * 0.1 / v);
        assert_relative_eq!(fields.state[0][2], 0.5 * 0.1 / v * 0.25);

        // 第二级仍从 W⁰ 出发
        rk.advance(&mesh, &mut fields, 0.1);
        assert_relative_eq!(fields.state[0][0], 1.0 - 0.1 / v);
    }

    #[test]
    fn test_nan_residual_is_zeroed() {
        let (mesh, mut fields) = setup();
        let f = mesh.cells[1].faces[0];
        fields.fluxes[f] = Flux::new([f64::NAN, 0.0, 0.0, 0.0, 0.0]);
        let mut rk = MultiStageIntegrator::new(vec![1.0]);
        rk.advance(&mesh, &mut fields, 0.1);
        assert_eq!(fields.residuals[1][0], 0.0);
        assert_eq!(fields.state[1][0], 1.0);
        assert!(fields.state[1].momentum() == DVec3::ZERO);
    }
}
