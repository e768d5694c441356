// crates/ef_physics/src/state.rs

//! 守恒状态
//!
//! `ConservedState` 是 (ρ, ρu, ρv, ρw, E) 五元组，用于单元状态、
//! 面重构状态、通量、源项与残差。
//!
//! # 布局设计
//!
//! 使用 `#[repr(transparent)]` 包装 `[f64; 5]`，`Vec<ConservedState>`
//! 即为一段连续缓冲区，分量通过 [`Var`] 或整数下标访问，
//! 不再手写 `cell*5+var` 步长运算。

use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, Neg, Sub};

use ef_foundation::float::all_finite;

/// 守恒变量个数
pub const NVAR: usize = 5;

/// 守恒变量编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Var {
    /// 密度 ρ
    Density = 0,
    /// x 方向动量 ρu
    MomentumX = 1,
    /// y 方向动量 ρv（轴对称时为径向）
    MomentumY = 2,
    /// z 方向动量 ρw
    MomentumZ = 3,
    /// 总能 E
    Energy = 4,
}

impl Var {
    /// 全部变量
    pub const ALL: [Var; NVAR] = [
        Self::Density,
        Self::MomentumX,
        Self::MomentumY,
        Self::MomentumZ,
        Self::Energy,
    ];
}

// ============================================================
// 守恒状态
// ============================================================

/// 守恒状态五元组
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ConservedState(pub [f64; NVAR]);

/// 数值通量与守恒状态同构
pub type Flux = ConservedState;

impl ConservedState {
    /// 零状态
    pub const ZERO: Self = Self([0.0; NVAR]);

    /// 创建
    #[inline]
    pub const fn new(values: [f64; NVAR]) -> Self {
        Self(values)
    }

    /// 由密度、动量、总能创建
    #[inline]
    pub fn from_parts(rho: f64, momentum: DVec3, energy: f64) -> Self {
        Self([rho, momentum.x, momentum.y, momentum.z, energy])
    }

    /// 密度
    #[inline]
    pub fn density(&self) -> f64 {
        self.0[0]
    }

    /// 动量向量
    #[inline]
    pub fn momentum(&self) -> DVec3 {
        DVec3::new(self.0[1], self.0[2], self.0[3])
    }

    /// 总能
    #[inline]
    pub fn energy(&self) -> f64 {
        self.0[4]
    }

    /// 速度向量
    #[inline]
    pub fn velocity(&self) -> DVec3 {
        let rho = self.density();
        DVec3::new(self.0[1] / rho, self.0[2] / rho, self.0[3] / rho)
    }

    /// 动能 ½|m|²/ρ
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.momentum().length_squared() / self.density()
    }

    /// 分量全部有限
    #[inline]
    pub fn is_finite(&self) -> bool {
        all_finite(&self.0)
    }

    /// 物理可接受：有限、密度为正、内能非负
    #[inline]
    pub fn is_admissible(&self) -> bool {
        self.is_finite() && self.density() > 0.0 && self.energy() >= self.kinetic_energy()
    }

    /// 分量绝对值
    #[inline]
    pub fn abs(&self) -> Self {
        Self(self.0.map(f64::abs))
    }

    /// 转到面局部坐标系 (n, t1, t2)
    ///
    /// 返回 [ρ, m·n, m·t1, m·t2, E]。
    #[inline]
    pub fn to_local(&self, n: DVec3, t1: DVec3, t2: DVec3) -> Self {
        let m = self.momentum();
        Self([self.0[0], m.dot(n), m.dot(t1), m.dot(t2), self.0[4]])
    }

    /// 由面局部坐标系转回全局坐标系
    #[inline]
    pub fn to_global(&self, n: DVec3, t1: DVec3, t2: DVec3) -> Self {
        let m = self.0[1] * n + self.0[2] * t1 + self.0[3] * t2;
        Self([self.0[0], m.x, m.y, m.z, self.0[4]])
    }
}

impl Index<usize> for ConservedState {
    type Output = f64;
    #[inline]
    fn index(&self, v: usize) -> &f64 {
        &self.0[v]
    }
}

impl IndexMut<usize> for ConservedState {
    #[inline]
    fn index_mut(&mut self, v: usize) -> &mut f64 {
        &mut self.0[v]
    }
}

impl Index<Var> for ConservedState {
    type Output = f64;
    #[inline]
    fn index(&self, v: Var) -> &f64 {
        &self.0[v as usize]
    }
}

impl IndexMut<Var> for ConservedState {
    #[inline]
    fn index_mut(&mut self, v: Var) -> &mut f64 {
        &mut self.0[v as usize]
    }
}

impl Add for ConservedState {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(std::array::from_fn(|v| self.0[v] + rhs.0[v]))
    }
}

impl AddAssign for ConservedState {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        for v in 0..NVAR {
            self.0[v] += rhs.0[v];
        }
    }
}

impl Sub for ConservedState {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(std::array::from_fn(|v| self.0[v] - rhs.0[v]))
    }
}

impl Mul<f64> for ConservedState {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self(self.0.map(|x| x * rhs))
    }
}

impl Neg for ConservedState {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self(self.0.map(|x| -x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let w = ConservedState::new([2.0, 4.0, -2.0, 0.0, 10.0]);
        assert_eq!(w.density(), 2.0);
        assert_eq!(w.velocity(), DVec3::new(2.0, -1.0, 0.0));
        assert_eq!(w.kinetic_energy(), 5.0);
        assert_eq!(w[Var::Energy], 10.0);
        assert_eq!(w[Var::MomentumY], -2.0);
    }

    #[test]
    fn test_admissibility() {
        assert!(ConservedState::new([1.0, 0.0, 0.0, 0.0, 2.5]).is_admissible());
        assert!(!ConservedState::new([-1.0, 0.0, 0.0, 0.0, 2.5]).is_admissible());
        assert!(!ConservedState::new([0.0, 0.0, 0.0, 0.0, 2.5]).is_admissible());
        // 内能为负
        assert!(!ConservedState::new([1.0, 3.0, 0.0, 0.0, 2.0]).is_admissible());
        assert!(!ConservedState::new([1.0, f64::NAN, 0.0, 0.0, 2.5]).is_admissible());
        assert!(!ConservedState::new([1.0, 0.0, 0.0, 0.0, f64::INFINITY]).is_admissible());
    }

    #[test]
    fn test_rotation_round_trip() {
        let n = DVec3::new(0.6, 0.8, 0.0);
        let t1 = DVec3::new(-0.8, 0.6, 0.0);
        let t2 = n.cross(t1);
        let w = ConservedState::new([1.0, 3.0, -1.0, 2.0, 20.0]);
        let local = w.to_local(n, t1, t2);
        assert!((local[1] - (3.0 * 0.6 - 0.8)).abs() < 1e-14);
        let back = local.to_global(n, t1, t2);
        for v in 0..NVAR {
            assert!((back[v] - w[v]).abs() < 1e-13);
        }
    }

    #[test]
    fn test_axis_aligned_rotation_is_exact() {
        let n = DVec3::new(-1.0, 0.0, 0.0);
        let t1 = DVec3::Y;
        let t2 = n.cross(t1);
        let w = ConservedState::new([1.1, 0.3, 0.0, 0.0, 2.7]);
        let local = w.to_local(n, t1, t2);
        assert_eq!(local[1], -0.3);
        assert_eq!(local.to_global(n, t1, t2)[1], 0.3);
    }

    #[test]
    fn test_arithmetic() {
        let a = ConservedState::new([1.0, 2.0, 3.0, 4.0, 5.0]);
        let b = ConservedState::new([0.5; NVAR]);
        assert_eq!((a - b)[0], 0.5);
        assert_eq!((a + b)[4], 5.5);
        assert_eq!((a * 2.0)[3], 8.0);
        assert_eq!((-a)[1], -2.0);
        let mut c = a;
        c += b;
        assert_eq!(c, a + b);
        assert_eq!((-a).abs(), a);
    }
}
