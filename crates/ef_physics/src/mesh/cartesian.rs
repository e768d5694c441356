// crates/ef_physics/src/mesh/cartesian.rs

//! 笛卡尔盒网格构建器
//!
//! 生成一维、二维或三维均匀盒网格，几何与拓扑满足 [`Mesh`] 的全部不变量：
//! 每个内部几何面两条面记录、`opposite` 互指、重构几何已预处理。
//!
//! 只有活动方向上生成面；非活动方向单元数固定为 1，长度即单元厚度。
//! 每个单元的面槽位顺序为 -x, +x, -y, +y, -z, +z（仅活动方向）。

use glam::DVec3;

use ef_config::Dimension;

use super::{compute_reconstruction_geometry, Cell, Face, Mesh, MeshError};

/// 笛卡尔盒网格构建器
#[derive(Debug, Clone)]
pub struct CartesianMeshBuilder {
    dimension: Dimension,
    counts: [usize; 3],
    lengths: [f64; 3],
    origin: DVec3,
    side_tags: [usize; 6],
}

impl CartesianMeshBuilder {
    /// 创建构建器
    ///
    /// - `counts`: 各方向单元数，非活动方向忽略
    /// - `lengths`: 各方向总长度，非活动方向为厚度
    pub fn new(dimension: Dimension, counts: [usize; 3], lengths: [f64; 3]) -> Self {
        Self {
            dimension,
            counts,
            lengths,
            origin: DVec3::ZERO,
            side_tags: [0, 1, 2, 3, 4, 5],
        }
    }

    /// 设置原点（盒的最小角点）
    pub fn with_origin(mut self, origin: DVec3) -> Self {
        self.origin = origin;
        self
    }

    /// 设置六个侧面的边界编号，顺序 -x, +x, -y, +y, -z, +z
    pub fn with_side_tags(mut self, tags: [usize; 6]) -> Self {
        self.side_tags = tags;
        self
    }

    /// 所有边界面使用同一编号
    pub fn with_uniform_tag(self, tag: usize) -> Self {
        self.with_side_tags([tag; 6])
    }

    /// 构建网格
    pub fn build(&self) -> Result<Mesh, MeshError> {
        let dims = self.dimension.active_dims();
        let n: [usize; 3] = std::array::from_fn(|k| if k < dims { self.counts[k] } else { 1 });
        if n.iter().any(|&c| c == 0) {
            return Err(MeshError::Empty);
        }
        for (k, &len) in self.lengths.iter().enumerate() {
            if !(len > 0.0) || !len.is_finite() {
                return Err(MeshError::NonPositiveMeasure {
                    what: "方向长度",
                    index: k,
                    value: len,
                });
            }
        }
        let h: [f64; 3] = std::array::from_fn(|k| self.lengths[k] / n[k] as f64);
        let volume = h[0] * h[1] * h[2];
        let nf = 2 * dims;
        let n_cells = n[0] * n[1] * n[2];
        let cell_id = |idx: [usize; 3]| idx[0] + n[0] * (idx[1] + n[1] * idx[2]);

        let mut cells = Vec::with_capacity(n_cells);
        let mut faces = Vec::with_capacity(n_cells * nf);

        for kz in 0..n[2] {
            for jy in 0..n[1] {
                for ix in 0..n[0] {
                    let idx = [ix, jy, kz];
                    let c = cell_id(idx);
                    let centroid = self.origin
                        + DVec3::new(
                            (ix as f64 + 0.5) * h[0],
                            (jy as f64 + 0.5) * h[1],
                            (kz as f64 + 0.5) * h[2],
                        );

                    let mut cell_faces = Vec::with_capacity(nf);
                    let mut neighbors = Vec::with_capacity(nf);
                    for axis in 0..dims {
                        let area = (0..3).filter(|&k| k != axis).map(|k| h[k]).product::<f64>();
                        for side in 0..2 {
                            let slot = 2 * axis + side;
                            let f = c * nf + slot;
                            let neighbor = if side == 0 {
                                (idx[axis] > 0).then(|| {
                                    let mut m = idx;
                                    m[axis] -= 1;
                                    cell_id(m)
                                })
                            } else {
                                (idx[axis] + 1 < n[axis]).then(|| {
                                    let mut m = idx;
                                    m[axis] += 1;
                                    cell_id(m)
                                })
                            };
                            let sign = if side == 0 { -1.0 } else { 1.0 };
                            let normal = axis_unit(axis) * sign;
                            let t1 = axis_unit((axis + 1) % 3);
                            let t2 = normal.cross(t1);

                            faces.push(Face {
                                owner: c,
                                owner_slot: slot,
                                opposite: neighbor.map(|nc| nc * nf + 2 * axis + (1 - side)),
                                area,
                                centroid: centroid + normal * (0.5 * h[axis]),
                                normal,
                                t1,
                                t2,
                                tag: if neighbor.is_none() { self.side_tags[slot] } else { 0 },
                            });
                            cell_faces.push(f);
                            neighbors.push(neighbor);
                        }
                    }
                    cells.push(Cell::new(volume, centroid, cell_faces, neighbors));
                }
            }
        }

        compute_reconstruction_geometry(&mut cells, &faces, dims)?;
        Mesh::new(cells, faces)
    }
}

fn axis_unit(axis: usize) -> DVec3 {
    match axis {
        0 => DVec3::X,
        1 => DVec3::Y,
        _ => DVec3::Z,
    }
}
