// crates/ef_physics/tests/boundary_continuity.rs

//! 边界通量在流态切换处的连续性
//!
//! 状态取在切换点两侧 ±ε。给定压力等于内部压力时，通量跳跃随 ε
//! 线性收缩；两者不等时跳跃保持有限，见文件末尾。

use ef_config::{BoundaryConfig, BoundaryKind};
use ef_physics::{BoundaryCondition, ConservedState, Face, Flux, Fluid};
use glam::DVec3;

const R: f64 = 287.0;
const GAMMA: f64 = 1.4;

fn fluid() -> Fluid {
    Fluid::new(R, GAMMA)
}

fn face_x() -> Face {
    Face {
        owner: 0,
        owner_slot: 1,
        opposite: None,
        area: 1.0,
        centroid: DVec3::ZERO,
        normal: DVec3::X,
        t1: DVec3::Y,
        t2: DVec3::Z,
        tag: 0,
    }
}

fn jump(a: &Flux, b: &Flux) -> f64 {
    (0..5).map(|v| (a[v] - b[v]).abs()).fold(0.0, f64::max)
}

/// 以 `un(eps)` 给出的法向速度在 ±eps 两侧取样，返回跳跃比
fn shrink_ratio(bc: &BoundaryCondition, state: impl Fn(f64) -> ConservedState) -> f64 {
    let face = face_x();
    let f = fluid();
    let at = |eps: f64| jump(&bc.apply(&state(eps), &face, &f), &bc.apply(&state(-eps), &face, &f));
    let coarse = at(1e-2);
    assert!(coarse > 0.0);
    at(1e-6) / coarse
}

fn stagnation_inlet() -> (BoundaryCondition, f64, f64) {
    let cp = GAMMA * R / (GAMMA - 1.0);
    let ptot = 1.0e5;
    let cfg = BoundaryConfig::new(BoundaryKind::StagnationInlet).with_values([cp * 300.0, ptot, 5.0e4, 180.0, 0.0]);
    let bc = BoundaryCondition::init(0, &cfg, &fluid()).unwrap();
    (bc, ptot, ptot / (R * 300.0))
}

#[test]
fn test_stagnation_inlet_continuous_at_rest() {
    let (bc, ptot, rho) = stagnation_inlet();
    let ratio = shrink_ratio(&bc, |eps| fluid().conserved(rho, DVec3::new(eps, 0.0, 0.0), ptot));
    assert!(ratio < 1e-3, "跳跃比 {ratio}");
}

#[test]
fn test_stagnation_inlet_continuous_at_sound_speed() {
    let (bc, ptot, rho) = stagnation_inlet();
    let a = fluid().sound_speed(rho, ptot);
    let ratio = shrink_ratio(&bc, |eps| fluid().conserved(rho, DVec3::new(a + eps, 0.0, 0.0), ptot));
    assert!(ratio < 1e-3, "跳跃比 {ratio}");
}

#[test]
fn test_stagnation_inlet_at_rest_gives_pressure_only() {
    let (bc, ptot, rho) = stagnation_inlet();
    let w = fluid().conserved(rho, DVec3::ZERO, ptot);
    let f = bc.apply(&w, &face_x(), &fluid());
    assert!(f[0].abs() < 1e-9);
    assert!((f[1] - ptot).abs() < 1e-6 * ptot);
    assert!(f[4].abs() < 1e-3);
}

#[test]
fn test_pressure_outlet_continuous() {
    let (rho, p) = (1.2, 1.0e5);
    let a = fluid().sound_speed(rho, p);
    let cfg = BoundaryConfig::new(BoundaryKind::PressureOutlet).with_values([p, 0.0, 0.0, 0.0, 0.0]);
    let bc = BoundaryCondition::init(0, &cfg, &fluid()).unwrap();

    let at_rest = shrink_ratio(&bc, |eps| fluid().conserved(rho, DVec3::new(eps, 3.0, 0.0), p));
    assert!(at_rest < 1e-3, "un = 0 处跳跃比 {at_rest}");

    let sonic = shrink_ratio(&bc, |eps| fluid().conserved(rho, DVec3::new(a + eps, 3.0, 0.0), p));
    assert!(sonic < 1e-3, "un = a 处跳跃比 {sonic}");
}

// ============================================================
// 给定压力与内部压力不等
// ============================================================
//
// 特征分支把静压固定为给定值，只有内部压力恰好等于给定值时才退化为
// 外推或零速状态；否则切换点两侧通量相差 O(|p_b − p|)，不随 ε 收缩。

#[test]
fn test_pressure_outlet_jumps_when_back_pressure_differs() {
    let (rho, p) = (1.2, 1.0e5);
    let pb = 0.8 * p;
    let a = fluid().sound_speed(rho, p);
    let cfg = BoundaryConfig::new(BoundaryKind::PressureOutlet).with_values([pb, 0.0, 0.0, 0.0, 0.0]);
    let bc = BoundaryCondition::init(0, &cfg, &fluid()).unwrap();
    let state = |un: f64| fluid().conserved(rho, DVec3::new(un, 3.0, 0.0), p);

    for un in [0.0, a] {
        let ratio = shrink_ratio(&bc, |eps| state(un + eps));
        assert!(ratio > 0.5, "u_n = {un} 处跳跃比 {ratio}");
    }

    // u_n → 0⁺：特征分支法向速度 2/(γ−1)·(a − a_b) > 0，回流分支质量通量为 0
    let face = face_x();
    let inflow = bc.apply(&state(-1e-6), &face, &fluid());
    let outflow = bc.apply(&state(1e-6), &face, &fluid());
    assert_eq!(inflow[0], 0.0);
    assert!(outflow[0] > 1.0, "质量通量 {}", outflow[0]);
    // 回流分支用内部压力，特征分支用出口压力
    assert!((inflow[1] - p).abs() < 1e-9 * p);
    assert!(outflow[1] < p);
}

#[test]
fn test_stagnation_inlet_jumps_at_sound_speed_when_pressures_differ() {
    let (bc, ptot, rho) = stagnation_inlet();
    let p = 0.9 * ptot;
    let a = fluid().sound_speed(rho, p);
    let ratio = shrink_ratio(&bc, |eps| fluid().conserved(rho, DVec3::new(a + eps, 0.0, 0.0), p));
    assert!(ratio > 0.5, "跳跃比 {ratio}");
}
