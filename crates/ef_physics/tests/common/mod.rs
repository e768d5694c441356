// crates/ef_physics/tests/common/mod.rs

//! 集成测试公用工具

#![allow(dead_code)]

use ef_config::{
    BoundaryConfig, BoundaryKind, Dimension, InitialBlock, InitialConfig, InitialVariables, LimiterKind,
    NumericalConfig, PrimitiveState, ReconstructionKind, Region, RiemannKind, SolverConfig,
};
use ef_physics::mesh::{CartesianMeshBuilder, Mesh};

/// 比热比
pub const GAMMA: f64 = 1.4;

/// [0, 1] 上 n 个单元的一维网格，两端标记为边界 0
pub fn line_mesh(n: usize) -> Mesh {
    CartesianMeshBuilder::new(Dimension::OneD, [n, 1, 1], [1.0, 1.0, 1.0])
        .with_uniform_tag(0)
        .build()
        .expect("line mesh")
}

/// Sod 激波管配置：x < 0.5 为 (1, 1)，其余为 (0.125, 0.1)
pub fn shock_tube_config(
    reconstruction: ReconstructionKind,
    limiter: LimiterKind,
    riemann: RiemannKind,
    stages: Vec<f64>,
    cfl: f64,
    max_time: f64,
) -> SolverConfig {
    let right = PrimitiveState {
        density: 0.125,
        pressure: 0.1,
        ..PrimitiveState::default()
    };
    let left = PrimitiveState {
        density: 1.0,
        pressure: 1.0,
        ..PrimitiveState::default()
    };
    let mut config = SolverConfig::default();
    config.physics.dimension = Dimension::OneD;
    config.fluid.gamma = GAMMA;
    config.boundaries = vec![BoundaryConfig::new(BoundaryKind::Wall)];
    config.initial = InitialConfig::uniform(InitialVariables::DensityBased, right)
        .with_block(InitialBlock::new(Region::boxed([-1.0; 3], [0.5, 2.0, 2.0]), left));
    config.numerical = NumericalConfig {
        reconstruction,
        limiter,
        riemann,
        time_stages: stages.len(),
        stage_coefficients: stages,
        cfl,
        max_time,
        max_iterations: 100_000,
    };
    config
}

// ============================================================
// 精确 Riemann 解（Toro 第 4 章）
// ============================================================

/// 一维原始变量状态
#[derive(Debug, Clone, Copy)]
pub struct Primitive1d {
    /// 密度
    pub rho: f64,
    /// 速度
    pub u: f64,
    /// 压力
    pub p: f64,
}

fn pressure_function(p: f64, s: &Primitive1d) -> (f64, f64) {
    let a = (GAMMA * s.p / s.rho).sqrt();
    if p > s.p {
        let ak = 2.0 / ((GAMMA + 1.0) * s.rho);
        let bk = (GAMMA - 1.0) / (GAMMA + 1.0) * s.p;
        let q = (ak / (p + bk)).sqrt();
        (
            (p - s.p) * q,
            q * (1.0 - 0.5 * (p - s.p) / (bk + p)),
        )
    } else {
        let pr = p / s.p;
        let e = (GAMMA - 1.0) / (2.0 * GAMMA);
        (
            2.0 * a / (GAMMA - 1.0) * (pr.powf(e) - 1.0),
            1.0 / (s.rho * a) * pr.powf(-(GAMMA + 1.0) / (2.0 * GAMMA)),
        )
    }
}

/// 星区压力与速度
pub fn star_state(l: &Primitive1d, r: &Primitive1d) -> (f64, f64) {
    let mut p = 0.5 * (l.p + r.p);
    for _ in 0..100 {
        let (fl, dfl) = pressure_function(p, l);
        let (fr, dfr) = pressure_function(p, r);
        let next = (p - (fl + fr + r.u - l.u) / (dfl + dfr)).max(1e-12);
        if (next - p).abs() < 1e-14 * p {
            p = next;
            break;
        }
        p = next;
    }
    let (fl, _) = pressure_function(p, l);
    let (fr, _) = pressure_function(p, r);
    (p, 0.5 * (l.u + r.u) + 0.5 * (fr - fl))
}

/// 在 s = x/t 处采样精确解
pub fn sample(l: &Primitive1d, r: &Primitive1d, s: f64) -> Primitive1d {
    let (ps, us) = star_state(l, r);
    let g = GAMMA;
    let gm = (g - 1.0) / (g + 1.0);
    if s <= us {
        let a = (g * l.p / l.rho).sqrt();
        if ps > l.p {
            let shock = l.u - a * ((g + 1.0) / (2.0 * g) * ps / l.p + (g - 1.0) / (2.0 * g)).sqrt();
            if s <= shock {
                *l
            } else {
                let rho = l.rho * (ps / l.p + gm) / (gm * ps / l.p + 1.0);
                Primitive1d { rho, u: us, p: ps }
            }
        } else {
            let a_star = a * (ps / l.p).powf((g - 1.0) / (2.0 * g));
            let head = l.u - a;
            let tail = us - a_star;
            if s <= head {
                *l
            } else if s >= tail {
                Primitive1d {
                    rho: l.rho * (ps / l.p).powf(1.0 / g),
                    u: us,
                    p: ps,
                }
            } else {
                let c = 2.0 / (g + 1.0) + gm / a * (l.u - s);
                Primitive1d {
                    rho: l.rho * c.powf(2.0 / (g - 1.0)),
                    u: 2.0 / (g + 1.0) * (a + 0.5 * (g - 1.0) * l.u + s),
                    p: l.p * c.powf(2.0 * g / (g - 1.0)),
                }
            }
        }
    } else {
        let a = (g * r.p / r.rho).sqrt();
        if ps > r.p {
            let shock = r.u + a * ((g + 1.0) / (2.0 * g) * ps / r.p + (g - 1.0) / (2.0 * g)).sqrt();
            if s >= shock {
                *r
            } else {
                let rho = r.rho * (ps / r.p + gm) / (gm * ps / r.p + 1.0);
                Primitive1d { rho, u: us, p: ps }
            }
        } else {
            let a_star = a * (ps / r.p).powf((g - 1.0) / (2.0 * g));
            let head = r.u + a;
            let tail = us + a_star;
            if s >= head {
                *r
            } else if s <= tail {
                Primitive1d {
                    rho: r.rho * (ps / r.p).powf(1.0 / g),
                    u: us,
                    p: ps,
                }
            } else {
                let c = 2.0 / (g + 1.0) - gm / a * (r.u - s);
                Primitive1d {
                    rho: r.rho * c.powf(2.0 / (g - 1.0)),
                    u: 2.0 / (g + 1.0) * (-a + 0.5 * (g - 1.0) * r.u + s),
                    p: r.p * c.powf(2.0 * g / (g - 1.0)),
                }
            }
        }
    }
}

/// Sod 初值的左右状态
pub fn sod_states() -> (Primitive1d, Primitive1d) {
    (
        Primitive1d {
            rho: 1.0,
            u: 0.0,
            p: 1.0,
        },
        Primitive1d {
            rho: 0.125,
            u: 0.0,
            p: 0.1,
        },
    )
}
