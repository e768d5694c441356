// crates/ef_physics/src/engine/stability.rs

//! 稳定性守卫
//!
//! 每一级推进之后检查全部单元：分量非有限、密度非正或内能为负的单元
//! 视为失效，用邻居在本次外迭代开始时 (W⁰) 的可接受状态逐分量平均替换。
//!
//! # 修复顺序
//!
//! 1. 直接邻居中可接受者的平均
//! 2. 若无，邻居的邻居（去重，不含自身）中可接受者的平均
//! 3. 若仍无，退回本单元的 W⁰（若可接受），否则保持不变
//!
//! 本级修复数超过边界面数的 10% 时判定发散。

use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::mesh::Mesh;
use crate::state::ConservedState;

/// 发散判定比例（相对边界面数）
pub const DIVERGENCE_RATIO: f64 = 0.1;

/// 一次检查的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityCheck {
    /// 修复的单元数
    pub repairs: usize,
    /// 发散阈值
    pub threshold: f64,
}

impl StabilityCheck {
    /// 是否超过阈值
    #[inline]
    pub fn diverged(&self) -> bool {
        self.repairs as f64 > self.threshold
    }
}

/// 稳定性守卫
#[derive(Debug, Clone, Copy)]
pub struct StabilityGuard {
    threshold: f64,
}

impl StabilityGuard {
    /// 按网格边界面数确定阈值
    pub fn new(mesh: &Mesh) -> Self {
        Self {
            threshold: DIVERGENCE_RATIO * mesh.n_boundary_faces() as f64,
        }
    }

    /// 发散阈值
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// 检查并修复 `state`，`previous` 为本次外迭代的起始状态
    pub fn check(&self, mesh: &Mesh, state: &mut [ConservedState], previous: &[ConservedState]) -> StabilityCheck {
        let repairs = AtomicUsize::new(0);

        state
            .par_iter_mut()
            .enumerate()
            .filter(|(_, w)| !w.is_admissible())
            .for_each(|(i, w)| {
                repairs.fetch_add(1, Ordering::Relaxed);
                if let Some(avg) = neighbor_average(mesh, previous, i) {
                    *w = avg;
                } else if previous[i].is_admissible() {
                    *w = previous[i];
                }
            });

        let repairs = repairs.into_inner();
        if repairs > 0 {
            log::debug!("稳定性守卫修复 {repairs} 个单元");
        }
        StabilityCheck {
            repairs,
            threshold: self.threshold,
        }
    }
}

/// 邻居中可接受状态的逐分量平均
fn neighbor_average(mesh: &Mesh, previous: &[ConservedState], cell: usize) -> Option<ConservedState> {
    let neighbors = || mesh.cells[cell].neighbors.iter().flatten().copied();

    let direct = mean(neighbors().map(|j| &previous[j]));
    if direct.is_some() {
        return direct;
    }

    let mut second: Vec<usize> = neighbors()
        .flat_map(|j| mesh.cells[j].neighbors.iter().flatten().copied())
        .filter(|&k| k != cell)
        .collect();
    second.sort_unstable();
    second.dedup();
    mean(second.iter().map(|&k| &previous[k]))
}

fn mean<'a>(states: impl Iterator<Item = &'a ConservedState>) -> Option<ConservedState> {
    let (sum, count) = states
        .filter(|w| w.is_admissible())
        .fold((ConservedState::ZERO, 0usize), |(sum, n), w| (sum + *w, n + 1));
    (count > 0).then(|| sum * (1.0 / count as f64))
}
