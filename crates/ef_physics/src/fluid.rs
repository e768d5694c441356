// crates/ef_physics/src/fluid.rs

//! 完全气体模型
//!
//! 所有由守恒量反算压力的位置都经由此处，负压力截断到 1e-14。

use ef_config::FluidConfig;
use ef_foundation::float::floor_pressure;
use glam::DVec3;

use crate::state::ConservedState;

/// 完全气体常数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fluid {
    /// 气体常数 R [J/(kg·K)]
    pub gas_constant: f64,
    /// 比热比 γ
    pub gamma: f64,
}

impl Default for Fluid {
    fn default() -> Self {
        FluidConfig::default().into()
    }
}

impl From<FluidConfig> for Fluid {
    fn from(cfg: FluidConfig) -> Self {
        Self {
            gas_constant: cfg.gas_constant,
            gamma: cfg.gamma,
        }
    }
}

impl Fluid {
    /// 创建
    pub fn new(gas_constant: f64, gamma: f64) -> Self {
        Self { gas_constant, gamma }
    }

    /// γ - 1
    #[inline]
    pub fn gamma_minus_one(&self) -> f64 {
        self.gamma - 1.0
    }

    /// 压力（负值截断）
    #[inline]
    pub fn pressure(&self, w: &ConservedState) -> f64 {
        floor_pressure(self.raw_pressure(w))
    }

    /// 未截断的压力，仅供诊断
    #[inline]
    pub fn raw_pressure(&self, w: &ConservedState) -> f64 {
        self.gamma_minus_one() * (w.energy() - w.kinetic_energy())
    }

    /// 声速 a = sqrt(γp/ρ)
    #[inline]
    pub fn sound_speed(&self, rho: f64, p: f64) -> f64 {
        (self.gamma * p / rho).sqrt()
    }

    /// 温度 T = p/(ρR)
    #[inline]
    pub fn temperature(&self, rho: f64, p: f64) -> f64 {
        p / (rho * self.gas_constant)
    }

    /// 由 (ρ, u, p) 构造守恒状态
    #[inline]
    pub fn conserved(&self, rho: f64, velocity: DVec3, p: f64) -> ConservedState {
        let energy = p / self.gamma_minus_one() + 0.5 * rho * velocity.length_squared();
        ConservedState::from_parts(rho, rho * velocity, energy)
    }
}
