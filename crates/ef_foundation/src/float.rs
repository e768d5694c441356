// crates/ef_foundation/src/float.rs

//! 数值常量与浮点检查工具
//!
//! 求解器在通量计算中遇到的非物理压力一律就地截断到 [`PRESSURE_FLOOR`]，
//! 不向上层传播错误。

// ============================================================================
// 数值常量
// ============================================================================

/// 压力下限 [Pa]
///
/// 由守恒量反算出的压力若为负，截断到该值。
pub const PRESSURE_FLOOR: f64 = 1e-14;

/// 几何判定容差（边界区域、块区域包含性测试）
pub const GEOMETRY_EPSILON: f64 = 1e-12;

/// MUSCL 重构判定局部极值的容差
pub const EXTREMUM_TOLERANCE: f64 = 1e-5;

// ============================================================================
// 工具函数
// ============================================================================

/// 将负压力截断到 [`PRESSURE_FLOOR`]
///
/// 只处理负值，零与正值原样返回。
#[inline]
pub fn floor_pressure(p: f64) -> f64 {
    if p < 0.0 {
        PRESSURE_FLOOR
    } else {
        p
    }
}

/// 切片内所有值是否有限（非 NaN、非 Inf）
#[inline]
pub fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

/// NaN 置零
#[inline]
pub fn zero_if_nan(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x
    }
}
