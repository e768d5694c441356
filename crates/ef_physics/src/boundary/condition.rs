// crates/ef_physics/src/boundary/condition.rs

//! 边界条件策略
//!
//! 每个边界在启动时由配置构造一次（Init），运行期间只读，
//! 每次迭代对每个边界面调用 [`BoundaryCondition::apply`]。
//!
//! # 通量形式
//!
//! 所有类型最终都写成
//!
//! ```text
//! F = [ρ u_n, p n + ρ u u_n, (E + p) u_n]
//! ```
//!
//! 区别只在于 (ρ, u, p, E) 取自参考状态、内部外推状态还是特征修正后的状态。
//!
//! | 类型 | 策略 |
//! |------|------|
//! | 超声速入口 | 参考状态 |
//! | 超声速出口 | 外推 |
//! | 滞止入口 | 按 u_n 相对 ±a 分四区 |
//! | 亚声速入口 | 给定 T 与速度，p 外推 |
//! | 压力出口 | 回流视为壁面，亚声速特征修正，超声速外推 |
//! | 壁面类 | 仅压力项 |
//! | 轴线 | 零通量 |

use glam::DVec3;

use ef_config::{BoundaryConfig, BoundaryKind};

use super::BoundaryError;
use crate::fluid::Fluid;
use crate::mesh::Face;
use crate::state::{ConservedState, Flux};

/// 回流判定阈值
const REVERSE_FLOW_THRESHOLD: f64 = 1e-14;

// ============================================================
// 辅助
// ============================================================

/// 来流方向单位向量，角度单位为度
///
/// α 为 xy 平面内方位角，φ 为仰角。
pub fn flow_direction(alpha_deg: f64, phi_deg: f64) -> DVec3 {
    let (sa, ca) = alpha_deg.to_radians().sin_cos();
    let (sp, cp) = phi_deg.to_radians().sin_cos();
    DVec3::new(ca * cp, sa * cp, sp)
}

/// 由原始量组装边界通量
#[inline]
fn euler_flux(rho: f64, u: DVec3, p: f64, e: f64, n: DVec3) -> Flux {
    let un = u.dot(n);
    let m = p * n + rho * u * un;
    Flux::new([rho * un, m.x, m.y, m.z, (e + p) * un])
}

/// 面上外推状态的原始量
#[derive(Debug, Clone, Copy)]
struct Interior {
    rho: f64,
    u: DVec3,
    p: f64,
    e: f64,
    un: f64,
    a: f64,
}

impl Interior {
    #[inline]
    fn new(w: &ConservedState, n: DVec3, fluid: &Fluid) -> Self {
        let rho = w.density();
        let u = w.velocity();
        let p = fluid.pressure(w);
        Self {
            rho,
            u,
            p,
            e: w.energy(),
            un: u.dot(n),
            a: fluid.sound_speed(rho, p),
        }
    }

    #[inline]
    fn flux(&self, n: DVec3) -> Flux {
        euler_flux(self.rho, self.u, self.p, self.e, n)
    }

    /// 出口特征修正：静压固定为 `pb`，保持切向速度，
    /// 法向速度按 Riemann 不变量 u_n + 2a/(γ−1) 调整
    fn characteristic_outflow(&self, pb: f64, face: &Face, fluid: &Fluid) -> Flux {
        let gamma = fluid.gamma;
        let gam1 = fluid.gamma_minus_one();
        let ut1 = self.u.dot(face.t1);
        let ut2 = self.u.dot(face.t2);

        let ab = self.a * (pb / self.p).powf(0.5 * gam1 / gamma);
        let rho = gamma * pb / (ab * ab);
        let un = self.un + 2.0 / gam1 * (self.a - ab);
        let u = face.normal * un + face.t1 * ut1 + face.t2 * ut2;
        let e = pb / gam1 + 0.5 * rho * u.length_squared();
        euler_flux(rho, u, pb, e, face.normal)
    }
}

/// 预计算的入口参考状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceState {
    /// 密度
    pub density: f64,
    /// 速度
    pub velocity: DVec3,
    /// 静压
    pub pressure: f64,
    /// 总能
    pub energy: f64,
}

impl ReferenceState {
    /// 守恒形式
    pub fn conserved(&self) -> ConservedState {
        ConservedState::from_parts(self.density, self.density * self.velocity, self.energy)
    }

    #[inline]
    fn flux(&self, n: DVec3) -> Flux {
        euler_flux(self.density, self.velocity, self.pressure, self.energy, n)
    }
}

// ============================================================
// 滞止入口
// ============================================================

/// 滞止入口参数与参考状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StagnationInlet {
    /// 总焓 [J/kg]
    pub total_enthalpy: f64,
    /// 总压 [Pa]
    pub total_pressure: f64,
    /// 超声速来流静压 [Pa]
    pub supersonic_pressure: f64,
    /// 来流方向
    pub direction: DVec3,
    /// 超声速来流参考状态
    pub reference: ReferenceState,
}

impl StagnationInlet {
    /// 由 [H_tot, P_tot, P_sup, α°, φ°] 构造
    ///
    /// 参考状态由等熵关系求马赫数：
    ///
    /// ```text
    /// M = sqrt(2/(γ−1) · ((P_tot/P_sup)^((γ−1)/γ) − 1))
    /// T = H_tot/c_p / (1 + (γ−1)/2 · M²)
    /// ```
    pub fn new(values: &[f64; 5], fluid: &Fluid) -> Self {
        let [htot, ptot, psup, alpha, phi] = *values;
        let gam1 = fluid.gamma_minus_one();
        let gam2 = 2.0 / gam1;
        let gam3 = fluid.gamma / gam1;
        let r = fluid.gas_constant;

        let mach = (gam2 * ((ptot / psup).powf(1.0 / gam3) - 1.0)).sqrt();
        let t = htot / (r * gam3) / (1.0 + 0.5 * gam1 * mach * mach);
        let rho = psup / t / r;
        let speed = mach * (fluid.gamma * psup / rho).sqrt();
        let direction = flow_direction(alpha, phi);

        Self {
            total_enthalpy: htot,
            total_pressure: ptot,
            supersonic_pressure: psup,
            direction,
            reference: ReferenceState {
                density: rho,
                velocity: speed * direction,
                pressure: psup,
                energy: psup / gam1 + 0.5 * rho * speed * speed,
            },
        }
    }

    fn apply(&self, w: &ConservedState, face: &Face, fluid: &Fluid) -> Flux {
        let n = face.normal;
        let inner = Interior::new(w, n, fluid);

        if inner.un < -inner.a {
            // 超声速入流
            self.reference.flux(n)
        } else if inner.un < 0.0 {
            // 亚声速入流：出射特征 + 总焓 + 来流方向，解速度大小
            let gam1 = fluid.gamma_minus_one();
            let gam2 = 2.0 / gam1;
            let gam3 = fluid.gamma / gam1;
            let r = fluid.gas_constant;

            let sigma = self.direction.dot(n);
            let rp = inner.un + inner.a * gam2;
            let qa = sigma * sigma + gam2;
            let qb = -2.0 * sigma * rp;
            let qc = rp * rp - 2.0 * gam2 * self.total_enthalpy;
            let v = (-qb + (qb * qb - 4.0 * qa * qc).sqrt()) / (2.0 * qa);

            let k = 0.5 * v * v;
            let t = (self.total_enthalpy - k) / (r * gam3);
            let p = self.total_pressure / (1.0 + k / (gam3 * r * t)).powf(gam3);
            let rho = p / (r * t);
            let e = p / gam1 + rho * k;
            euler_flux(rho, v * self.direction, p, e, n)
        } else if inner.un < inner.a {
            // 亚声速回流：以总压作为出口压力
            inner.characteristic_outflow(self.total_pressure, face, fluid)
        } else {
            // 超声速回流
            inner.flux(n)
        }
    }
}

// ============================================================
// 边界条件
// ============================================================

/// 边界条件
///
/// 每个变体只携带自身需要的参数，参考状态在构造时一次性算出。
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryCondition {
    /// 超声速入口
    SupersonicInlet {
        /// 参考状态
        reference: ReferenceState,
    },
    /// 超声速出口
    SupersonicOutlet,
    /// 滞止入口
    StagnationInlet(StagnationInlet),
    /// 亚声速入口
    SubsonicInlet {
        /// 温度 [K]
        temperature: f64,
        /// 速度 [m/s]
        velocity: DVec3,
    },
    /// 压力出口
    PressureOutlet {
        /// 出口静压 [Pa]
        pressure: f64,
    },
    /// 无粘壁面类（壁面、对称面、滑移壁面、运动壁面）
    Wall {
        /// 配置中的具体类型
        kind: BoundaryKind,
    },
    /// 轴对称轴线
    Axis,
}

impl BoundaryCondition {
    /// Init：由配置构造，入口类型预计算参考状态
    pub fn init(index: usize, config: &BoundaryConfig, fluid: &Fluid) -> Result<Self, BoundaryError> {
        let v = &config.values;
        let bc = match config.kind {
            BoundaryKind::SupersonicInlet => {
                let [mach, p, t, alpha, phi] = *v;
                let speed = mach * (fluid.gamma * fluid.gas_constant * t).sqrt();
                let rho = p / fluid.gas_constant / t;
                Self::SupersonicInlet {
                    reference: ReferenceState {
                        density: rho,
                        velocity: speed * flow_direction(alpha, phi),
                        pressure: p,
                        energy: p / fluid.gamma_minus_one() + 0.5 * rho * speed * speed,
                    },
                }
            }
            BoundaryKind::SupersonicOutlet => Self::SupersonicOutlet,
            BoundaryKind::StagnationInlet => Self::StagnationInlet(StagnationInlet::new(v, fluid)),
            BoundaryKind::SubsonicInlet => Self::SubsonicInlet {
                temperature: v[0],
                velocity: DVec3::new(v[1], v[2], v[3]),
            },
            BoundaryKind::PressureOutlet => Self::PressureOutlet { pressure: v[0] },
            kind if kind.is_wall_like() => Self::Wall { kind },
            _ => Self::Axis,
        };

        if let Some(reference) = bc.reference() {
            if !reference.conserved().is_admissible() {
                return Err(BoundaryError::InvalidParameters {
                    index,
                    kind: config.kind.name(),
                    reason: format!("参考状态非物理: {:?}", reference.conserved().0),
                });
            }
        }
        Ok(bc)
    }

    /// 配置类型
    pub fn kind(&self) -> BoundaryKind {
        match self {
            Self::SupersonicInlet { .. } => BoundaryKind::SupersonicInlet,
            Self::SupersonicOutlet => BoundaryKind::SupersonicOutlet,
            Self::StagnationInlet(_) => BoundaryKind::StagnationInlet,
            Self::SubsonicInlet { .. } => BoundaryKind::SubsonicInlet,
            Self::PressureOutlet { .. } => BoundaryKind::PressureOutlet,
            Self::Wall { kind } => *kind,
            Self::Axis => BoundaryKind::Axis,
        }
    }

    /// 预计算的参考状态（仅入口类型）
    pub fn reference(&self) -> Option<&ReferenceState> {
        match self {
            Self::SupersonicInlet { reference } => Some(reference),
            Self::StagnationInlet(s) => Some(&s.reference),
            _ => None,
        }
    }

    /// Apply：由面外推状态计算边界通量（未乘面积）
    pub fn apply(&self, w: &ConservedState, face: &Face, fluid: &Fluid) -> Flux {
        let n = face.normal;
        match self {
            Self::SupersonicInlet { reference } => reference.flux(n),
            Self::SupersonicOutlet => Interior::new(w, n, fluid).flux(n),
            Self::StagnationInlet(s) => s.apply(w, face, fluid),
            Self::SubsonicInlet {
                temperature,
                velocity,
            } => {
                let p = fluid.pressure(w);
                let rho = p / (fluid.gas_constant * temperature);
                let e = p / fluid.gamma_minus_one() + 0.5 * rho * velocity.length_squared();
                euler_flux(rho, *velocity, p, e, n)
            }
            Self::PressureOutlet { pressure } => {
                let inner = Interior::new(w, n, fluid);
                if inner.un < REVERSE_FLOW_THRESHOLD {
                    // 回流：法向速度置零，只剩压力项
                    let m = inner.p * n;
                    Flux::new([0.0, m.x, m.y, m.z, 0.0])
                } else if inner.un < inner.a {
                    inner.characteristic_outflow(*pressure, face, fluid)
                } else {
                    inner.flux(n)
                }
            }
            Self::Wall { .. } => {
                let m = fluid.pressure(w) * n;
                Flux::new([0.0, m.x, m.y, m.z, 0.0])
            }
            Self::Axis => Flux::ZERO,
        }
    }
}
