// crates/ef_physics/src/engine/solver.rs

//! Euler 方程求解器
//!
//! 持有网格、场缓冲与全部数值组件，驱动外迭代：
//!
//! ```text
//! 时间步 → 源项 → { 梯度 → 重构 → 内部通量 + 边界通量 → 推进 → 稳定性守卫 } × 级数
//! ```
//!
//! 全部组件在 [`EulerSolver::new`] 中按配置一次性选定，场缓冲一次性分配。
//! 停止请求通过 [`StopHandle`] 发出，只在两次外迭代之间检查。

use glam::DVec3;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ef_config::SolverConfig;

use super::flux::InteriorFluxAssembler;
use super::stability::StabilityGuard;
use super::time_integrator::MultiStageIntegrator;
use super::timestep::TimeStepController;
use crate::boundary::{BoundaryManager, BoundaryReport};
use crate::error::{SolverError, SolverResult};
use crate::fields::Fields;
use crate::fluid::Fluid;
use crate::initial::initial_state;
use crate::mesh::Mesh;
use crate::numerics::{LeastSquaresGradient, Reconstructor};
use crate::schemes::RiemannScheme;
use crate::sources::SourceTerms;
use crate::state::{ConservedState, NVAR};

// ============================================================
// 运行状态
// ============================================================

/// 运行状态
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Status {
    /// 已完成的外迭代次数
    pub iteration: usize,
    /// 最近一次时间步长
    pub dt: f64,
    /// 物理时间
    pub time: f64,
    /// CFL 数
    pub cfl: f64,
    /// 是否因停止请求而结束
    pub stopped: bool,
}

/// 单次外迭代的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationReport {
    /// 迭代次数
    pub iteration: usize,
    /// 时间步长
    pub dt: f64,
    /// 物理时间
    pub time: f64,
    /// 各变量残差绝对值之和（最后一级）
    pub residuals: [f64; NVAR],
    /// 各级修复单元数之和
    pub repairs: usize,
}

/// 停止请求句柄
///
/// 可克隆后交给信号处理或其他线程。
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// 请求停止，当前外迭代完成后生效
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// 是否已请求停止
    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ============================================================
// 求解器
// ============================================================

/// Euler 方程有限体积求解器
#[derive(Debug)]
pub struct EulerSolver {
    mesh: Mesh,
    fluid: Fluid,
    fields: Fields,
    gradient: LeastSquaresGradient,
    reconstructor: Reconstructor,
    interior: InteriorFluxAssembler,
    boundaries: BoundaryManager,
    sources: SourceTerms,
    timestep: TimeStepController,
    integrator: MultiStageIntegrator,
    guard: StabilityGuard,
    max_iterations: usize,
    status: Status,
    stop: StopHandle,
    moment_reference: DVec3,
}

impl EulerSolver {
    /// 校验配置与网格并完成全部启动期工作
    ///
    /// 网格须已完成重构几何预处理与边界标记；轴对称度量在此处施加。
    pub fn new(mut mesh: Mesh, config: &SolverConfig) -> SolverResult<Self> {
        config.validate()?;
        mesh.validate()?;

        let dimension = config.physics.dimension;
        if dimension.is_axisymmetric() {
            mesh.apply_axisymmetric_metrics();
        }

        let fluid = Fluid::from(config.fluid);
        let numerical = &config.numerical;
        let boundaries = BoundaryManager::new(&config.boundaries, &mesh, fluid)?;
        let coefficients = numerical.resolved_stage_coefficients()?;

        let mut fields = Fields::for_mesh(&mesh);
        fields.state = initial_state(&mesh, &config.initial, &fluid);
        fields.store_previous();

        let reconstructor = Reconstructor::new(numerical.reconstruction, numerical.limiter, mesh.n_cells());
        let riemann = RiemannScheme::new(numerical.riemann, fluid.gamma);

        log::info!(
            "求解器就绪: {} 单元, {} 面记录 ({} 边界), 维度 {:?}, 重构 {}, 黎曼 {}, {} 级",
            mesh.n_cells(),
            mesh.n_faces(),
            mesh.n_boundary_faces(),
            dimension,
            reconstructor.name(),
            numerical.riemann,
            coefficients.len()
        );

        Ok(Self {
            gradient: LeastSquaresGradient::new(dimension.active_dims()),
            reconstructor,
            interior: InteriorFluxAssembler::new(riemann),
            boundaries,
            sources: SourceTerms::new(dimension.is_axisymmetric()),
            timestep: TimeStepController::new(numerical.cfl, numerical.max_time),
            integrator: MultiStageIntegrator::new(coefficients),
            guard: StabilityGuard::new(&mesh),
            max_iterations: numerical.max_iterations,
            status: Status {
                cfl: numerical.cfl,
                ..Status::default()
            },
            stop: StopHandle::default(),
            moment_reference: DVec3::ZERO,
            mesh,
            fluid,
            fields,
        })
    }

    /// 设置力矩参考点
    pub fn with_moment_reference(mut self, reference: DVec3) -> Self {
        self.moment_reference = reference;
        self
    }

    // ========== 访问器 ==========

    /// 网格（已施加轴对称度量）
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// 流体常数
    pub fn fluid(&self) -> &Fluid {
        &self.fluid
    }

    /// 场缓冲
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// 当前守恒状态
    pub fn state(&self) -> &[ConservedState] {
        &self.fields.state
    }

    /// 运行状态
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// 边界管理器
    pub fn boundaries(&self) -> &BoundaryManager {
        &self.boundaries
    }

    /// 积分器
    pub fn integrator(&self) -> &MultiStageIntegrator {
        &self.integrator
    }

    /// 停止句柄
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// 是否满足结束条件
    pub fn is_finished(&self) -> bool {
        self.status.iteration >= self.max_iterations
            || self.status.time >= self.timestep.max_time()
            || self.status.stopped
    }

    /// 按边界积分的质量流量、力与力矩
    pub fn boundary_reports(&self) -> Vec<BoundaryReport> {
        self.boundaries
            .reports(&self.mesh, &self.fields.fluxes, self.moment_reference)
    }

    // ========== 推进 ==========

    /// 执行一次外迭代
    pub fn step(&mut self) -> SolverResult<IterationReport> {
        self.status.iteration += 1;
        self.fields.store_previous();

        let step = self
            .timestep
            .next_step(&self.mesh, &self.fields.state, &self.fluid, self.status.time);
        self.status.dt = step.dt;
        self.status.time = step.time;

        self.sources
            .update(&self.mesh, &self.fields.state, &self.fluid, &mut self.fields.sources);

        let mut repairs = 0;
        for _ in 0..self.integrator.n_stages() {
            repairs += self.stage(step.dt)?;
        }

        let report = IterationReport {
            iteration: self.status.iteration,
            dt: step.dt,
            time: step.time,
            residuals: self.fields.residual_norms(),
            repairs,
        };
        log::debug!(
            "iter {} t = {:.6e} dt = {:.6e} res = {:.3e}",
            report.iteration,
            report.time,
            report.dt,
            report.residuals[0]
        );
        Ok(report)
    }

    /// 单级推进，返回修复单元数
    fn stage(&mut self, dt: f64) -> SolverResult<usize> {
        let Fields {
            state,
            gradients,
            face_states,
            fluxes,
            ..
        } = &mut self.fields;

        if self.reconstructor.needs_gradients() {
            self.gradient.compute(&self.mesh, state, gradients);
        }
        self.reconstructor
            .reconstruct(&self.mesh, state, gradients, face_states);
        self.interior.assemble(&self.mesh, face_states, fluxes);
        self.boundaries.apply(&self.mesh, face_states, fluxes);

        self.integrator.advance(&self.mesh, &mut self.fields, dt);

        let check = self
            .guard
            .check(&self.mesh, &mut self.fields.state, &self.fields.previous);
        if check.diverged() {
            return Err(SolverError::Divergence {
                iteration: self.status.iteration,
                repairs: check.repairs,
                threshold: check.threshold,
            });
        }
        Ok(check.repairs)
    }

    /// 运行到结束条件
    pub fn run(&mut self) -> SolverResult<Status> {
        self.run_with(|_| {})
    }

    /// 运行到结束条件，每次外迭代后回调
    pub fn run_with<F>(&mut self, mut on_iteration: F) -> SolverResult<Status>
    where
        F: FnMut(&IterationReport),
    {
        while !self.is_finished() {
            if self.stop.is_stop_requested() {
                self.status.stopped = true;
                break;
            }
            let report = self.step()?;
            on_iteration(&report);
        }

        if self.status.stopped {
            log::warn!("计算在第 {} 次迭代后被中断", self.status.iteration);
        } else if self.status.iteration >= self.max_iterations {
            log::info!("达到最大迭代次数 {}", self.max_iterations);
        } else {
            log::info!("达到最大模拟时间 {:.6e}", self.timestep.max_time());
        }
        Ok(self.status)
    }
}
