// crates/ef_config/src/boundary.rs

//! 边界条件配置
//!
//! 边界表按顺序列出，列表下标即边界编号，网格面的边界标记引用该编号。
//!
//! # 参数布局
//!
//! | 类型 | `values` |
//! |------|----------|
//! | supersonic_inlet | [M, p, T, α°, φ°] |
//! | stagnation_inlet | [H_tot, P_tot, P_sup, α°, φ°] |
//! | subsonic_inlet | [T, u, v, w] |
//! | pressure_outlet | [p_b] |
//! | 其余 | 不使用 |

use serde::{Deserialize, Serialize};
use std::fmt;

use ef_foundation::float::GEOMETRY_EPSILON;

use crate::error::ConfigError;
use crate::schemes::NameOrId;

// ============================================================
// 边界类型枚举
// ============================================================

/// 边界类型
///
/// 使用 `repr(u8)`，判别值即旧式配置中的数值编号。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "NameOrId")]
#[repr(u8)]
pub enum BoundaryKind {
    /// 超声速入口：全部由参考状态给定
    SupersonicInlet = 0,
    /// 超声速出口：全部外推
    SupersonicOutlet = 1,
    /// 滞止入口：总焓、总压与来流方向
    StagnationInlet = 2,
    /// 亚声速入口：温度与速度给定
    SubsonicInlet = 3,
    /// 压力出口：静压给定
    PressureOutlet = 4,
    /// 固壁
    Wall = 5,
    /// 对称面
    Symmetry = 6,
    /// 滑移壁面
    SlipWall = 7,
    /// 运动壁面
    MovingWall = 8,
    /// 轴对称轴线
    Axis = 9,
}

impl BoundaryKind {
    /// 全部变体，按编号排列
    pub const ALL: [BoundaryKind; 10] = [
        Self::SupersonicInlet,
        Self::SupersonicOutlet,
        Self::StagnationInlet,
        Self::SubsonicInlet,
        Self::PressureOutlet,
        Self::Wall,
        Self::Symmetry,
        Self::SlipWall,
        Self::MovingWall,
        Self::Axis,
    ];

    /// 从数值编号解析
    pub fn from_id(id: i64) -> Result<Self, ConfigError> {
        usize::try_from(id)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(ConfigError::UnknownId { kind: "边界类型", id })
    }

    /// 数值编号
    #[inline]
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// 是否为无粘壁面类（壁面、对称面、滑移壁面、运动壁面）
    #[inline]
    pub fn is_wall_like(&self) -> bool {
        matches!(
            self,
            Self::Wall | Self::Symmetry | Self::SlipWall | Self::MovingWall
        )
    }

    /// 是否需要在初始化阶段预计算参考状态
    #[inline]
    pub fn needs_reference_state(&self) -> bool {
        matches!(self, Self::SupersonicInlet | Self::StagnationInlet)
    }

    /// 名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::SupersonicInlet => "supersonic_inlet",
            Self::SupersonicOutlet => "supersonic_outlet",
            Self::StagnationInlet => "stagnation_inlet",
            Self::SubsonicInlet => "subsonic_inlet",
            Self::PressureOutlet => "pressure_outlet",
            Self::Wall => "wall",
            Self::Symmetry => "symmetry",
            Self::SlipWall => "slip_wall",
            Self::MovingWall => "moving_wall",
            Self::Axis => "axis",
        }
    }
}

impl TryFrom<NameOrId> for BoundaryKind {
    type Error = ConfigError;

    fn try_from(value: NameOrId) -> Result<Self, ConfigError> {
        value.resolve("边界类型", &Self::ALL, Self::name, Self::from_id)
    }
}

impl fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================
// 空间区域
// ============================================================

/// 空间过滤区域：轴对齐盒与球的交集
///
/// 仅用于外部的边界面标记和初始化块，数值核心不读取。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// x 下界
    #[serde(default = "neg_max")]
    pub xmin: f64,
    /// x 上界
    #[serde(default = "pos_max")]
    pub xmax: f64,
    /// y 下界
    #[serde(default = "neg_max")]
    pub ymin: f64,
    /// y 上界
    #[serde(default = "pos_max")]
    pub ymax: f64,
    /// z 下界
    #[serde(default = "neg_max")]
    pub zmin: f64,
    /// z 上界
    #[serde(default = "pos_max")]
    pub zmax: f64,
    /// 球心
    #[serde(default)]
    pub center: [f64; 3],
    /// 球半径
    #[serde(default = "pos_max")]
    pub radius: f64,
}

fn neg_max() -> f64 { -f64::MAX }
fn pos_max() -> f64 { f64::MAX }

impl Default for Region {
    fn default() -> Self {
        Self {
            xmin: neg_max(),
            xmax: pos_max(),
            ymin: neg_max(),
            ymax: pos_max(),
            zmin: neg_max(),
            zmax: pos_max(),
            center: [0.0; 3],
            radius: pos_max(),
        }
    }
}

impl Region {
    /// 轴对齐盒区域
    pub fn boxed(min: [f64; 3], max: [f64; 3]) -> Self {
        Self {
            xmin: min[0],
            xmax: max[0],
            ymin: min[1],
            ymax: max[1],
            zmin: min[2],
            zmax: max[2],
            ..Self::default()
        }
    }

    /// 球形区域
    pub fn sphere(center: [f64; 3], radius: f64) -> Self {
        Self {
            center,
            radius,
            ..Self::default()
        }
    }

    /// 点是否位于区域内（含 1e-12 容差）
    pub fn contains(&self, p: [f64; 3]) -> bool {
        let eps = GEOMETRY_EPSILON;
        let inside_box = p[0] < self.xmax + eps
            && p[0] > self.xmin - eps
            && p[1] < self.ymax + eps
            && p[1] > self.ymin - eps
            && p[2] < self.zmax + eps
            && p[2] > self.zmin - eps;
        if !inside_box {
            return false;
        }
        let d2: f64 = (0..3).map(|k| (p[k] - self.center[k]).powi(2)).sum();
        d2.sqrt() < self.radius + eps
    }

    fn validate(&self, key: &str) -> Result<(), ConfigError> {
        let bounds = [
            ("x", self.xmin, self.xmax),
            ("y", self.ymin, self.ymax),
            ("z", self.zmin, self.zmax),
        ];
        for (axis, lo, hi) in bounds {
            if lo.is_nan() || hi.is_nan() || lo > hi {
                return Err(ConfigError::invalid(
                    format!("{key}.{axis}min/{axis}max"),
                    format!("[{lo}, {hi}]"),
                    "下界不能大于上界",
                ));
            }
        }
        if !(self.radius > 0.0) {
            return Err(ConfigError::invalid(
                format!("{key}.radius"),
                self.radius,
                "半径必须为正",
            ));
        }
        Ok(())
    }
}

// ============================================================
// 边界配置
// ============================================================

/// 单个边界的配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryConfig {
    /// 边界名称（仅用于日志与报告）
    #[serde(default)]
    pub name: String,
    /// 边界类型
    pub kind: BoundaryKind,
    /// 空间过滤区域
    #[serde(default)]
    pub region: Region,
    /// 原始参数
    #[serde(default)]
    pub values: [f64; 5],
}

impl BoundaryConfig {
    /// 创建无参数边界
    pub fn new(kind: BoundaryKind) -> Self {
        Self {
            name: kind.name().to_string(),
            kind,
            region: Region::default(),
            values: [0.0; 5],
        }
    }

    /// 设置参数
    pub fn with_values(mut self, values: [f64; 5]) -> Self {
        self.values = values;
        self
    }

    /// 设置区域
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// 设置名称
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// 校验参数
    pub fn validate(&self, index: usize) -> Result<(), ConfigError> {
        let key = format!("boundaries[{index}]");
        self.region.validate(&key)?;
        if let Some(v) = self.values.iter().find(|v| !v.is_finite()) {
            return Err(ConfigError::invalid(format!("{key}.values"), v, "参数必须有限"));
        }
        let v = &self.values;
        let positive = |slot: usize, label: &str| -> Result<(), ConfigError> {
            if v[slot] > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::invalid(
                    format!("{key}.values[{slot}]"),
                    v[slot],
                    format!("{label}必须为正"),
                ))
            }
        };
        match self.kind {
            BoundaryKind::SupersonicInlet => {
                positive(0, "马赫数")?;
                positive(1, "压力")?;
                positive(2, "温度")?;
            }
            BoundaryKind::StagnationInlet => {
                positive(0, "总焓")?;
                positive(1, "总压")?;
                positive(2, "静压")?;
                if v[2] > v[1] {
                    return Err(ConfigError::invalid(
                        format!("{key}.values[2]"),
                        v[2],
                        "静压不能大于总压",
                    ));
                }
            }
            BoundaryKind::SubsonicInlet => positive(0, "温度")?,
            BoundaryKind::PressureOutlet => positive(0, "出口压力")?,
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_ids_round_table() {
        for (i, kind) in BoundaryKind::ALL.iter().enumerate() {
            assert_eq!(kind.id() as usize, i);
            assert_eq!(BoundaryKind::from_id(i as i64).unwrap(), *kind);
        }
        assert!(BoundaryKind::from_id(10).is_err());
    }

    #[test]
    fn test_wall_like() {
        assert!(BoundaryKind::SlipWall.is_wall_like());
        assert!(BoundaryKind::MovingWall.is_wall_like());
        assert!(!BoundaryKind::Axis.is_wall_like());
        assert!(BoundaryKind::StagnationInlet.needs_reference_state());
        assert!(!BoundaryKind::SubsonicInlet.needs_reference_state());
    }

    #[test]
    fn test_default_region_contains_everything() {
        let r = Region::default();
        assert!(r.contains([0.0, 0.0, 0.0]));
        assert!(r.contains([1e100, -1e100, 3.0]));
    }

    #[test]
    fn test_box_and_sphere_intersection() {
        let r = Region {
            radius: 1.0,
            ..Region::boxed([0.0, -1.0, -1.0], [2.0, 1.0, 1.0])
        };
        assert!(r.contains([0.5, 0.0, 0.0]));
        // 盒内但球外
        assert!(!r.contains([1.5, 0.0, 0.0]));
        // 球内但盒外
        assert!(!r.contains([-0.5, 0.0, 0.0]));
        // 边界容差
        assert!(r.contains([0.0, 0.0, 0.0]));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bc = BoundaryConfig::new(BoundaryKind::SupersonicInlet)
            .with_values([2.0, -1.0, 300.0, 0.0, 0.0]);
        assert!(bc.validate(0).is_err());

        let bc = BoundaryConfig::new(BoundaryKind::StagnationInlet)
            .with_values([3e5, 1e5, 2e5, 0.0, 0.0]);
        assert!(bc.validate(1).is_err());

        let bc = BoundaryConfig::new(BoundaryKind::Wall);
        assert!(bc.validate(2).is_ok());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let bc: BoundaryConfig =
            serde_json::from_str(r#"{"kind": "pressure_outlet", "values": [90000, 0, 0, 0, 0]}"#)
                .unwrap();
        assert_eq!(bc.kind, BoundaryKind::PressureOutlet);
        assert_eq!(bc.region, Region::default());
        assert_eq!(bc.values[0], 90000.0);
    }
}
