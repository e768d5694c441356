// crates/ef_physics/src/mesh/mod.rs

//! 网格接口
//!
//! 数值核心只读取网格拓扑与预计算几何，不负责网格解析。
//!
//! # 面记录
//!
//! 每个几何内部面存两条面记录，各属于一侧单元，通过 `opposite` 互相链接。
//! 两侧各自计算并存储自己的通量，并行循环中无写冲突。
//!
//! 不变量：若 `faces[f].opposite == Some(g)`，则 `faces[g].opposite == Some(f)`，
//! 且 `faces[g].owner` 是 `faces[f].owner` 在该面槽位上的邻居。
//! [`Mesh::new`] 在构造时校验该不变量。
//!
//! # 子模块
//!
//! - [`geometry`]: 最小二乘权重与逆重构矩阵预处理
//! - [`cartesian`]: 笛卡尔盒网格构建器（测试与命令行使用）

pub mod cartesian;
pub mod geometry;

use glam::{DMat3, DVec3};
use thiserror::Error;

use ef_config::Region;

pub use cartesian::CartesianMeshBuilder;
pub use geometry::compute_reconstruction_geometry;

// ============================================================
// 错误
// ============================================================

/// 网格错误
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// 空网格
    #[error("网格没有单元")]
    Empty,

    /// 单元内各列表长度不一致
    #[error("单元 {cell} 的 {what} 长度为 {actual}，应为 {expected}")]
    SizeMismatch {
        /// 单元编号
        cell: usize,
        /// 列表名称
        what: &'static str,
        /// 期望长度
        expected: usize,
        /// 实际长度
        actual: usize,
    },

    /// 索引越界
    #[error("{what} 索引 {index} 超出范围 0..{len}")]
    IndexOutOfRange {
        /// 索引类别
        what: &'static str,
        /// 索引
        index: usize,
        /// 上界
        len: usize,
    },

    /// opposite 不互相指向
    #[error("面 {face} 的 opposite 为 {opposite}，但对方未指回")]
    NonMutualOpposite {
        /// 面编号
        face: usize,
        /// 对侧面编号
        opposite: usize,
    },

    /// 面的 owner 与单元面列表不一致
    #[error("面 {face} 的 owner/槽位与单元 {cell} 的面列表不一致")]
    OwnerMismatch {
        /// 面编号
        face: usize,
        /// 单元编号
        cell: usize,
    },

    /// 邻居与对侧面 owner 不一致
    #[error("单元 {cell} 槽位 {slot} 的邻居与对侧面 owner 不一致")]
    NeighborMismatch {
        /// 单元编号
        cell: usize,
        /// 槽位
        slot: usize,
    },

    /// 非正体积或面积
    #[error("{what} {index} 的度量非正: {value}")]
    NonPositiveMeasure {
        /// 类别
        what: &'static str,
        /// 编号
        index: usize,
        /// 数值
        value: f64,
    },

    /// 重构矩阵奇异
    #[error("单元 {cell} 的最小二乘重构矩阵奇异")]
    SingularGeometry {
        /// 单元编号
        cell: usize,
    },
}

// ============================================================
// 单元与面
// ============================================================

/// 单元
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// 体积（轴对称时为 y 加权体积）
    pub volume: f64,
    /// 形心
    pub centroid: DVec3,
    /// 面记录编号
    pub faces: Vec<usize>,
    /// 各面槽位的邻居单元，`None` 表示边界
    pub neighbors: Vec<Option<usize>>,
    /// 逆重构矩阵 S，梯度 g = S·b
    pub inv_matrix: DMat3,
    /// 形心到邻居形心
    pub d: Vec<DVec3>,
    /// 形心到面形心
    pub df: Vec<DVec3>,
    /// 最小二乘权重 d/|d|²
    pub w: Vec<DVec3>,
}

impl Cell {
    /// 创建仅含拓扑的单元，几何向量由 [`compute_reconstruction_geometry`] 填充
    pub fn new(volume: f64, centroid: DVec3, faces: Vec<usize>, neighbors: Vec<Option<usize>>) -> Self {
        let nf = faces.len();
        Self {
            volume,
            centroid,
            faces,
            neighbors,
            inv_matrix: DMat3::IDENTITY,
            d: vec![DVec3::ZERO; nf],
            df: vec![DVec3::ZERO; nf],
            w: vec![DVec3::ZERO; nf],
        }
    }

    /// 面数
    #[inline]
    pub fn n_faces(&self) -> usize {
        self.faces.len()
    }
}

/// 面记录
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// 所属单元
    pub owner: usize,
    /// 在所属单元面列表中的槽位
    pub owner_slot: usize,
    /// 另一侧的面记录，`None` 表示边界面
    pub opposite: Option<usize>,
    /// 面积（轴对称时为 y 加权面积）
    pub area: f64,
    /// 面形心
    pub centroid: DVec3,
    /// 外法向单位向量
    pub normal: DVec3,
    /// 第一切向单位向量
    pub t1: DVec3,
    /// 第二切向单位向量
    pub t2: DVec3,
    /// 边界编号（仅边界面有意义）
    pub tag: usize,
}

impl Face {
    /// 是否为边界面
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.opposite.is_none()
    }
}

// ============================================================
// 网格
// ============================================================

/// 已校验的网格
#[derive(Debug, Clone)]
pub struct Mesh {
    /// 单元
    pub cells: Vec<Cell>,
    /// 面记录
    pub faces: Vec<Face>,
    n_boundary_faces: usize,
}

impl Mesh {
    /// 创建并校验
    pub fn new(cells: Vec<Cell>, faces: Vec<Face>) -> Result<Self, MeshError> {
        let n_boundary_faces = faces.iter().filter(|f| f.is_boundary()).count();
        let mesh = Self {
            cells,
            faces,
            n_boundary_faces,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// 单元数
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    /// 面记录数
    #[inline]
    pub fn n_faces(&self) -> usize {
        self.faces.len()
    }

    /// 边界面数
    #[inline]
    pub fn n_boundary_faces(&self) -> usize {
        self.n_boundary_faces
    }

    /// 边界面编号迭代器
    pub fn boundary_faces(&self) -> impl Iterator<Item = usize> + '_ {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_boundary())
            .map(|(i, _)| i)
    }

    /// 校验拓扑不变量
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.cells.is_empty() {
            return Err(MeshError::Empty);
        }
        let n_cells = self.cells.len();
        let n_faces = self.faces.len();

        for (i, cell) in self.cells.iter().enumerate() {
            if !(cell.volume > 0.0) {
                return Err(MeshError::NonPositiveMeasure {
                    what: "单元",
                    index: i,
                    value: cell.volume,
                });
            }
            let nf = cell.faces.len();
            for (what, len) in [
                ("neighbors", cell.neighbors.len()),
                ("d", cell.d.len()),
                ("df", cell.df.len()),
                ("w", cell.w.len()),
            ] {
                if len != nf {
                    return Err(MeshError::SizeMismatch {
                        cell: i,
                        what,
                        expected: nf,
                        actual: len,
                    });
                }
            }
            for (slot, &f) in cell.faces.iter().enumerate() {
                let face = self.faces.get(f).ok_or(MeshError::IndexOutOfRange {
                    what: "面",
                    index: f,
                    len: n_faces,
                })?;
                if face.owner != i || face.owner_slot != slot {
                    return Err(MeshError::OwnerMismatch { face: f, cell: i });
                }
                let expected = face.opposite.map(|g| self.faces.get(g).map(|o| o.owner));
                let neighbor = cell.neighbors[slot];
                let consistent = match (expected, neighbor) {
                    (None, None) => true,
                    (Some(Some(owner)), Some(n)) => owner == n && n < n_cells,
                    _ => false,
                };
                if !consistent {
                    return Err(MeshError::NeighborMismatch { cell: i, slot });
                }
            }
        }

        for (f, face) in self.faces.iter().enumerate() {
            if face.owner >= n_cells {
                return Err(MeshError::IndexOutOfRange {
                    what: "单元",
                    index: face.owner,
                    len: n_cells,
                });
            }
            if self.cells[face.owner].faces.get(face.owner_slot) != Some(&f) {
                return Err(MeshError::OwnerMismatch {
                    face: f,
                    cell: face.owner,
                });
            }
            if face.area < 0.0 || !face.area.is_finite() {
                return Err(MeshError::NonPositiveMeasure {
                    what: "面",
                    index: f,
                    value: face.area,
                });
            }
            if let Some(g) = face.opposite {
                let back = self.faces.get(g).and_then(|o| o.opposite);
                if back != Some(f) {
                    return Err(MeshError::NonMutualOpposite { face: f, opposite: g });
                }
            }
        }
        Ok(())
    }

    /// 按区域为边界面打标记
    ///
    /// 面形心落在第 b 个区域内时标记为 b，后出现的区域优先；
    /// 不落在任何区域内的面保留原标记。
    pub fn tag_boundaries(&mut self, regions: &[Region]) {
        for face in self.faces.iter_mut().filter(|f| f.is_boundary()) {
            let c = face.centroid.to_array();
            if let Some(b) = regions.iter().rposition(|r| r.contains(c)) {
                face.tag = b;
            }
        }
    }

    /// 轴对称度量：体积乘单元形心 y，面积乘面形心 y
    ///
    /// 须在求解前调用一次，位于轴线上的面面积变为零。
    pub fn apply_axisymmetric_metrics(&mut self) {
        for cell in &mut self.cells {
            cell.volume *= cell.centroid.y;
        }
        for face in &mut self.faces {
            face.area *= face.centroid.y;
        }
    }
}
