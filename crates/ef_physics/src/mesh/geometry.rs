// crates/ef_physics/src/mesh/geometry.rs

//! 最小二乘重构几何预处理
//!
//! 对每个单元计算：
//!
//! - `df`: 形心到面形心
//! - `d`: 形心到邻居形心（边界槽位为零）
//! - `w = d/|d|²`: 最小二乘权重
//! - `S`: 重构矩阵 A = Σ w⊗d 在活动维度上的逆
//!
//! 非活动维度在 S 中置为单位阵。活动维度上若矩阵退化（例如单层网格
//! 的横向），改为对角逆，退化方向的梯度为零。含非有限值的矩阵
//! （重合形心）报 [`MeshError::SingularGeometry`]。

use glam::{DMat2, DMat3, DVec2, DVec3};

use super::{Cell, Face, MeshError};

/// 判定重构矩阵退化的行列式阈值（相对对角元乘积）
const SINGULAR_RELATIVE_DET: f64 = 1e-12;

/// 计算全部单元的重构几何
///
/// `dims` 为活动维度数（1、2 或 3）。
pub fn compute_reconstruction_geometry(
    cells: &mut [Cell],
    faces: &[Face],
    dims: usize,
) -> Result<(), MeshError> {
    let centroids: Vec<DVec3> = cells.iter().map(|c| c.centroid).collect();
    for (i, cell) in cells.iter_mut().enumerate() {
        let nf = cell.faces.len();
        cell.d = vec![DVec3::ZERO; nf];
        cell.df = vec![DVec3::ZERO; nf];
        cell.w = vec![DVec3::ZERO; nf];

        let mut a = [[0.0_f64; 3]; 3];
        for slot in 0..nf {
            let f = cell.faces[slot];
            let face = faces.get(f).ok_or(MeshError::IndexOutOfRange {
                what: "面",
                index: f,
                len: faces.len(),
            })?;
            cell.df[slot] = face.centroid - cell.centroid;

            let Some(j) = cell.neighbors[slot] else {
                continue;
            };
            let cj = *centroids.get(j).ok_or(MeshError::IndexOutOfRange {
                what: "单元",
                index: j,
                len: centroids.len(),
            })?;
            let d = cj - cell.centroid;
            let w = d / d.length_squared();
            cell.d[slot] = d;
            cell.w[slot] = w;
            for r in 0..3 {
                for c in 0..3 {
                    a[r][c] += w[r] * d[c];
                }
            }
        }
        cell.inv_matrix = invert_active(&a, dims).ok_or(MeshError::SingularGeometry { cell: i })?;
    }
    Ok(())
}

/// 活动维度块求逆，其余对角置 1
fn invert_active(a: &[[f64; 3]; 3], dims: usize) -> Option<DMat3> {
    // DMat3 按列存储：S[r][c] 位于 col(c)[r]
    let from_rows = |m: [[f64; 3]; 3]| {
        DMat3::from_cols(
            DVec3::new(m[0][0], m[1][0], m[2][0]),
            DVec3::new(m[0][1], m[1][1], m[2][1]),
            DVec3::new(m[0][2], m[1][2], m[2][2]),
        )
    };
    if a.iter().flatten().any(|x| !x.is_finite()) {
        return None;
    }
    let diag_product: f64 = (0..dims).map(|k| a[k][k].abs()).product();

    match dims {
        3 => {
            let m = from_rows(*a);
            let det = m.determinant();
            if det.abs() > SINGULAR_RELATIVE_DET * diag_product && det != 0.0 {
                return Some(m.inverse());
            }
        }
        2 => {
            let m = DMat2::from_cols(DVec2::new(a[0][0], a[1][0]), DVec2::new(a[0][1], a[1][1]));
            let det = m.determinant();
            if det.abs() > SINGULAR_RELATIVE_DET * diag_product && det != 0.0 {
                let inv = m.inverse();
                let mut s = [[0.0; 3]; 3];
                s[0][0] = inv.x_axis.x;
                s[1][0] = inv.x_axis.y;
                s[0][1] = inv.y_axis.x;
                s[1][1] = inv.y_axis.y;
                s[2][2] = 1.0;
                return Some(from_rows(s));
            }
        }
        _ => {}
    }

    // 对角逆：一维，或活动块退化
    let mut s = [[0.0; 3]; 3];
    for k in 0..3 {
        s[k][k] = if k >= dims {
            1.0
        } else if a[k][k] > 0.0 {
            1.0 / a[k][k]
        } else {
            0.0
        };
    }
    Some(from_rows(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_full_rank_3d_inverse() {
        let a = [[2.0, 0.5, 0.0], [0.5, 1.0, 0.2], [0.0, 0.2, 3.0]];
        let s = invert_active(&a, 3).unwrap();
        let m = DMat3::from_cols(
            DVec3::new(a[0][0], a[1][0], a[2][0]),
            DVec3::new(a[0][1], a[1][1], a[2][1]),
            DVec3::new(a[0][2], a[1][2], a[2][2]),
        );
        let id = s * m;
        for c in 0..3 {
            for r in 0..3 {
                let expected = if r == c { 1.0 } else { 0.0 };
                assert_relative_eq!(id.col(c)[r], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_2d_block_keeps_unit_z() {
        let a = [[2.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 0.0]];
        let s = invert_active(&a, 2).unwrap();
        assert_relative_eq!(s.col(0).x, 0.5);
        assert_relative_eq!(s.col(1).y, 0.25);
        assert_eq!(s.col(2).z, 1.0);
    }

    #[test]
    fn test_1d_scalar_inverse() {
        let a = [[8.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]];
        let s = invert_active(&a, 1).unwrap();
        assert_eq!(s.col(0).x, 0.125);
        assert_eq!(s.col(1).y, 1.0);
        assert_eq!(s.col(2).z, 1.0);
    }

    #[test]
    fn test_degenerate_direction_falls_back_to_diagonal() {
        // 单层网格：y 方向没有邻居
        let a = [[2.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]];
        let s = invert_active(&a, 2).unwrap();
        assert_eq!(s.col(0).x, 0.5);
        assert_eq!(s.col(1).y, 0.0);
    }

    #[test]
    fn test_isolated_cell_has_zero_gradient_operator() {
        let a = [[0.0; 3]; 3];
        let s = invert_active(&a, 2).unwrap();
        assert_eq!(s.col(0).x, 0.0);
        assert_eq!(s.col(1).y, 0.0);
        assert_eq!(s.col(2).z, 1.0);
    }

    #[test]
    fn test_non_finite_matrix_is_singular() {
        let a = [[f64::NAN, 0.0, 0.0], [0.0; 3], [0.0; 3]];
        assert!(invert_active(&a, 1).is_none());
    }
}
