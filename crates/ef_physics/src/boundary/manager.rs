// crates/ef_physics/src/boundary/manager.rs

//! 边界条件管理器
//!
//! - 持有按编号排列的边界条件表（Init 之后只读）
//! - 解析每个边界面对应的边界编号
//! - 每次迭代计算全部边界面通量并乘以面积
//!
//! # 越界标记
//!
//! 面标记超出边界表范围时改用 0 号边界，构造时记录一次警告，
//! 不视为致命错误。

use rayon::prelude::*;

use ef_config::BoundaryConfig;

use super::condition::BoundaryCondition;
use super::report::BoundaryReport;
use super::BoundaryError;
use crate::fluid::Fluid;
use crate::mesh::Mesh;
use crate::state::{ConservedState, Flux};

/// 边界条件管理器
#[derive(Debug, Clone)]
pub struct BoundaryManager {
    conditions: Vec<BoundaryCondition>,
    names: Vec<String>,
    /// 每条面记录的边界编号，内部面为 `None`
    face_boundary: Vec<Option<usize>>,
    fluid: Fluid,
}

impl BoundaryManager {
    /// 对全部边界执行 Init 并解析面到边界的映射
    pub fn new(configs: &[BoundaryConfig], mesh: &Mesh, fluid: Fluid) -> Result<Self, BoundaryError> {
        if configs.is_empty() && mesh.n_boundary_faces() > 0 {
            return Err(BoundaryError::EmptyTable {
                n_faces: mesh.n_boundary_faces(),
            });
        }

        let conditions = configs
            .iter()
            .enumerate()
            .map(|(i, cfg)| BoundaryCondition::init(i, cfg, &fluid))
            .collect::<Result<Vec<_>, _>>()?;
        let names = configs
            .iter()
            .enumerate()
            .map(|(i, cfg)| {
                if cfg.name.is_empty() {
                    format!("boundary_{i}")
                } else {
                    cfg.name.clone()
                }
            })
            .collect();

        let mut remapped = 0usize;
        let face_boundary = mesh
            .faces
            .iter()
            .map(|face| {
                if !face.is_boundary() {
                    return None;
                }
                if face.tag < conditions.len() {
                    Some(face.tag)
                } else {
                    remapped += 1;
                    Some(0)
                }
            })
            .collect();

        if remapped > 0 {
            log::warn!(
                "{} 个边界面的标记超出边界表范围 (0..{})，已改用边界 0 ({})",
                remapped,
                conditions.len(),
                configs[0].kind
            );
        }
        for (i, bc) in conditions.iter().enumerate() {
            log::debug!("边界 {i}: {} ({})", configs[i].name, bc.kind());
        }

        Ok(Self {
            conditions,
            names,
            face_boundary,
            fluid,
        })
    }

    /// 边界条件表
    pub fn conditions(&self) -> &[BoundaryCondition] {
        &self.conditions
    }

    /// 边界名称
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// 面记录对应的边界编号
    #[inline]
    pub fn boundary_of(&self, face: usize) -> Option<usize> {
        self.face_boundary.get(face).copied().flatten()
    }

    /// 计算全部边界面通量（乘以面积），内部面槽位不写
    pub fn apply(&self, mesh: &Mesh, face_states: &[ConservedState], fluxes: &mut [Flux]) {
        fluxes
            .par_iter_mut()
            .zip(self.face_boundary.par_iter())
            .enumerate()
            .for_each(|(f, (flux, boundary))| {
                let Some(b) = *boundary else {
                    return;
                };
                let face = &mesh.faces[f];
                *flux = self.conditions[b].apply(&face_states[f], face, &self.fluid) * face.area;
            });
    }

    /// 按边界积分质量流量、力与力矩
    ///
    /// `fluxes` 须为已乘面积的面通量，力矩相对 `reference` 点。
    pub fn reports(&self, mesh: &Mesh, fluxes: &[Flux], reference: glam::DVec3) -> Vec<BoundaryReport> {
        let mut reports: Vec<BoundaryReport> = self
            .conditions
            .iter()
            .zip(&self.names)
            .enumerate()
            .map(|(i, (bc, name))| BoundaryReport::new(i, name.clone(), bc.kind()))
            .collect();

        for (f, boundary) in self.face_boundary.iter().enumerate() {
            if let Some(b) = *boundary {
                reports[b].accumulate(&fluxes[f], mesh.faces[f].centroid - reference);
            }
        }
        reports
    }
}
