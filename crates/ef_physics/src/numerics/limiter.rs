// crates/ef_physics/src/numerics/limiter.rs

//! # 斜率限制器
//!
//! 将梯度比 rf（面投影增量与局部极值差之比）映射为限制因子 φ(rf)：
//!
//! | 限制器 | φ(rf) |
//! |--------|-------|
//! | Minmod | rf<1 ? 1 : 1/rf |
//! | Superbee | rf<0.5 ? 2 : max(min(2/rf,1), min(1/rf,2)) |
//! | Van Leer | 2/(rf+1) |
//! | Venkatakrishnan (K=0) | (2rf+1)/(rf(2rf+1)+1) |
//! | 修正 Venkatakrishnan | (rf(2rf+1)+1)/(rf(rf(2rf+1)+1)+1) |
//!
//! 对 rf>0，所有输出位于 [0, 2]。前三者在 rf=1 处取 1，
//! 两个 Venkatakrishnan 变体在 rf→0 处取 1。
//!
//! 限制器在启动时选定，通过 [`LimiterKind`] 的枚举分派调用，无需装箱。

use ef_config::LimiterKind;

/// 限制器接口
pub trait SlopeLimiter: Send + Sync {
    /// 名称
    fn name(&self) -> &'static str;

    /// 限制因子 φ(rf)
    fn limit(&self, rf: f64) -> f64;
}

impl SlopeLimiter for LimiterKind {
    fn name(&self) -> &'static str {
        LimiterKind::name(self)
    }

    #[inline]
    fn limit(&self, rf: f64) -> f64 {
        match self {
            LimiterKind::Minmod => minmod(rf),
            LimiterKind::Superbee => superbee(rf),
            LimiterKind::VanLeer => van_leer(rf),
            LimiterKind::Venkatakrishnan => venkatakrishnan(rf),
            LimiterKind::ModifiedVenkatakrishnan => modified_venkatakrishnan(rf),
        }
    }
}

/// Minmod
#[inline]
pub fn minmod(rf: f64) -> f64 {
    if rf < 1.0 {
        1.0
    } else {
        1.0 / rf
    }
}

/// Superbee
#[inline]
pub fn superbee(rf: f64) -> f64 {
    if rf < 0.5 {
        2.0
    } else {
        (2.0 / rf).min(1.0).max((1.0 / rf).min(2.0))
    }
}

/// Van Leer
#[inline]
pub fn van_leer(rf: f64) -> f64 {
    2.0 / (rf + 1.0)
}

/// Venkatakrishnan，K=0
#[inline]
pub fn venkatakrishnan(rf: f64) -> f64 {
    (2.0 * rf + 1.0) / (rf * (2.0 * rf + 1.0) + 1.0)
}

/// 修正 Venkatakrishnan
#[inline]
pub fn modified_venkatakrishnan(rf: f64) -> f64 {
    let q = rf * (2.0 * rf + 1.0) + 1.0;
    q / (rf * q + 1.0)
}
