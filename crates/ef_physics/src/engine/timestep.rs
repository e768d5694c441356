// crates/ef_physics/src/engine/timestep.rs

//! 时间步长控制
//!
//! ## CFL 条件
//!
//! ```text
//! λ_i = max_f A_f (u_n + a) / V_i
//! dt  = CFL / max_i λ_i
//! ```
//!
//! 若 t + dt 超过最大模拟时间，缩短 dt 使 t 恰好落在最大时间上。
//!
//! 全局最大值用 `AtomicU64::fetch_max` 在 f64 位模式上归约：
//! 非负 f64 的位模式与数值同序。

use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::fluid::Fluid;
use crate::mesh::Mesh;
use crate::state::ConservedState;

/// 一次时间步计算的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeStep {
    /// 时间步长
    pub dt: f64,
    /// 推进后的物理时间
    pub time: f64,
}

/// 时间步长控制器
#[derive(Debug, Clone, Copy)]
pub struct TimeStepController {
    cfl: f64,
    max_time: f64,
}

impl TimeStepController {
    /// 创建
    pub fn new(cfl: f64, max_time: f64) -> Self {
        Self { cfl, max_time }
    }

    /// CFL 数
    pub fn cfl(&self) -> f64 {
        self.cfl
    }

    /// 最大模拟时间
    pub fn max_time(&self) -> f64 {
        self.max_time
    }

    /// 全场最大谱半径 max_i λ_i
    ///
    /// 非有限的单元值被跳过，交给稳定性守卫处理。
    pub fn max_signal_rate(&self, mesh: &Mesh, state: &[ConservedState], fluid: &Fluid) -> f64 {
        let max_rate = AtomicU64::new(0.0_f64.to_bits());

        mesh.cells.par_iter().zip(state.par_iter()).for_each(|(cell, w)| {
            let rho = w.density();
            let u = w.velocity();
            let p = fluid.raw_pressure(w);
            let a = fluid.sound_speed(rho, p);

            let l_max = cell.faces.iter().fold(0.0_f64, |acc, &f| {
                let face = &mesh.faces[f];
                acc.max(face.area * (u.dot(face.normal) + a))
            });
            let rate = l_max / cell.volume;
            if rate.is_finite() && rate > 0.0 {
                max_rate.fetch_max(rate.to_bits(), Ordering::Relaxed);
            }
        });

        f64::from_bits(max_rate.load(Ordering::Relaxed))
    }

    /// 计算时间步并推进物理时间
    pub fn next_step(&self, mesh: &Mesh, state: &[ConservedState], fluid: &Fluid, time: f64) -> TimeStep {
        let rate = self.max_signal_rate(mesh, state, fluid);
        let step = self.clip(self.cfl / rate, time);
        log::trace!("λ_max = {rate:.6e}, dt = {:.6e}, t = {:.6e}", step.dt, step.time);
        step
    }

    /// 按最大模拟时间截断
    pub fn clip(&self, dt: f64, time: f64) -> TimeStep {
        if time + dt > self.max_time {
            TimeStep {
                dt: self.max_time - time,
                time: self.max_time,
            }
        } else {
            TimeStep { dt, time: time + dt }
        }
    }
}
