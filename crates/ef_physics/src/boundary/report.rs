// crates/ef_physics/src/boundary/report.rs

//! 边界积分量
//!
//! 由已乘面积的边界面通量累加：
//!
//! - 质量流量 Σ F_ρ（正值为流出）
//! - 力 Σ F_m
//! - 力矩 Σ (x_f − x_ref) × F_m

use glam::DVec3;

use ef_config::BoundaryKind;

use crate::state::Flux;

/// 单个边界的积分报告
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryReport {
    /// 边界编号
    pub index: usize,
    /// 名称
    pub name: String,
    /// 类型
    pub kind: BoundaryKind,
    /// 面数
    pub n_faces: usize,
    /// 质量流量 [kg/s]
    pub mass_flow: f64,
    /// 能量流量 [W]
    pub energy_flow: f64,
    /// 力 [N]
    pub force: DVec3,
    /// 力矩 [N·m]
    pub moment: DVec3,
}

impl BoundaryReport {
    /// 空报告
    pub fn new(index: usize, name: String, kind: BoundaryKind) -> Self {
        Self {
            index,
            name,
            kind,
            n_faces: 0,
            mass_flow: 0.0,
            energy_flow: 0.0,
            force: DVec3::ZERO,
            moment: DVec3::ZERO,
        }
    }

    /// 累加一个面的通量，`arm` 为面形心相对参考点的位置
    pub fn accumulate(&mut self, flux: &Flux, arm: DVec3) {
        let force = flux.momentum();
        self.n_faces += 1;
        self.mass_flow += flux.density();
        self.energy_flow += flux.energy();
        self.force += force;
        self.moment += arm.cross(force);
    }
}
