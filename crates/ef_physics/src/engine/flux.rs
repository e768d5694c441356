// crates/ef_physics/src/engine/flux.rs

//! 内部面通量装配
//!
//! 对每条有对侧记录的面：
//!
//! 1. 把本侧与对侧的重构状态转到本面的 (n, t1, t2) 局部坐标系
//! 2. 调用黎曼求解器
//! 3. 把通量转回全局坐标系并乘以面积，写入本面自己的通量槽位
//!
//! 共享面的两条记录各自独立计算。求解器对交换左右、取反法向反对称，
//! 两侧结果互为相反数，单元残差求和后守恒。

use rayon::prelude::*;

use crate::mesh::{Face, Mesh};
use crate::schemes::riemann::{RiemannScheme, RiemannSolver};
use crate::state::{ConservedState, Flux};

/// 单个面的数值通量（全局坐标系，未乘面积）
#[inline]
pub fn face_flux<R: RiemannSolver + ?Sized>(
    solver: &R,
    left: &ConservedState,
    right: &ConservedState,
    face: &Face,
) -> Flux {
    let (n, t1, t2) = (face.normal, face.t1, face.t2);
    let wl = left.to_local(n, t1, t2);
    let wr = right.to_local(n, t1, t2);
    solver.solve(&wl, &wr).to_global(n, t1, t2)
}

/// 内部面通量装配器
#[derive(Debug, Clone, Copy)]
pub struct InteriorFluxAssembler {
    solver: RiemannScheme,
}

impl InteriorFluxAssembler {
    /// 创建
    pub fn new(solver: RiemannScheme) -> Self {
        Self { solver }
    }

    /// 使用的求解器
    pub fn solver(&self) -> &RiemannScheme {
        &self.solver
    }

    /// 计算全部内部面通量（乘以面积），边界面槽位不写
    pub fn assemble(&self, mesh: &Mesh, face_states: &[ConservedState], fluxes: &mut [Flux]) {
        fluxes
            .par_iter_mut()
            .zip(mesh.faces.par_iter())
            .enumerate()
            .for_each(|(f, (flux, face))| {
                let Some(g) = face.opposite else {
                    return;
                };
                *flux = face_flux(&self.solver, &face_states[f], &face_states[g], face) * face.area;
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ef_config::{Dimension, RiemannKind};
    use glam::DVec3;

    use crate::fluid::Fluid;
    use crate::mesh::CartesianMeshBuilder;

    #[test]
    fn test_face_pair_fluxes_cancel() {
        let mesh = CartesianMeshBuilder::new(Dimension::TwoD, [3, 2, 1], [3.0, 2.0, 1.0])
            .build()
            .unwrap();
        let fluid = Fluid::default();
        let face_states: Vec<_> = (0..mesh.n_faces())
            .map(|f| {
                let x = f as f64;
                fluid.conserved(1.0 + 0.1 * x, DVec3::new(0.3 * x.sin(), 0.2, 0.0), 1.0 + 0.05 * x)
            })
            .collect();
        let mut fluxes = vec![Flux::ZERO; mesh.n_faces()];
        let assembler = InteriorFluxAssembler::new(RiemannScheme::new(RiemannKind::Hllc, 1.4));
        assembler.assemble(&mesh, &face_states, &mut fluxes);

        for (f, face) in mesh.faces.iter().enumerate() {
            match face.opposite {
                Some(g) => {
                    for v in 0..5 {
                        assert_relative_eq!(fluxes[f][v], -fluxes[g][v], epsilon = 1e-12);
                    }
                }
                None => assert_eq!(fluxes[f], Flux::ZERO),
            }
        }
    }

    #[test]
    fn test_uniform_state_gives_physical_flux() {
        let fluid = Fluid::default();
        let w = fluid.conserved(1.0, DVec3::new(2.0, 0.0, 0.0), 1.0);
        let face = Face {
            owner: 0,
            owner_slot: 0,
            opposite: Some(1),
            area: 1.0,
            centroid: DVec3::ZERO,
            normal: DVec3::Y,
            t1: DVec3::Z,
            t2: DVec3::X,
            tag: 0,
        };
        let f = face_flux(&RiemannScheme::new(RiemannKind::Rusanov, 1.4), &w, &w, &face);
        // 法向为 y，无穿面流动：只有压力作用在 y 动量上
        assert_relative_eq!(f[0], 0.0, epsilon = 1e-14);
        assert_relative_eq!(f[2], 1.0, epsilon = 1e-14);
        assert_relative_eq!(f[1], 0.0, epsilon = 1e-14);
    }
}
