// crates/ef_config/src/schemes.rs

//! 数值格式选择
//!
//! 三类格式在启动时一次性选定，运行期间不变：
//!
//! | 类别 | 变体 | 旧式编号 |
//! |------|------|----------|
//! | 重构 | constant, muscl | 0, 1 |
//! | 限制器 | minmod, superbee, van_leer, venkatakrishnan, modified_venkatakrishnan | 0..4 |
//! | 黎曼求解器 | rusanov, hll, hllc | 0, 1, 2 |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConfigError;

// ============================================================
// 名称或旧式编号
// ============================================================

/// 配置文件中的选择项：snake_case 名称或旧式数值编号
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NameOrId {
    /// 旧式编号，交给 `from_id` 解析
    Id(i64),
    /// 名称
    Name(String),
}

impl NameOrId {
    /// 解析为具体变体
    pub(crate) fn resolve<K: Copy>(
        self,
        kind: &'static str,
        all: &[K],
        name: fn(&K) -> &'static str,
        from_id: fn(i64) -> Result<K, ConfigError>,
    ) -> Result<K, ConfigError> {
        match self {
            Self::Id(id) => from_id(id),
            Self::Name(s) => all.iter().copied().find(|k| name(k) == s).ok_or_else(|| {
                let names: Vec<_> = all.iter().map(name).collect();
                ConfigError::invalid(kind, s, format!("可选: {}", names.join(", ")))
            }),
        }
    }
}

/// 重构格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", try_from = "NameOrId")]
pub enum ReconstructionKind {
    /// 一阶常数重构
    #[default]
    Constant,
    /// 带限制器的二阶 MUSCL 重构
    Muscl,
}

impl ReconstructionKind {
    /// 全部变体
    pub const ALL: [ReconstructionKind; 2] = [Self::Constant, Self::Muscl];

    /// 从旧式数值编号解析
    pub fn from_id(id: i64) -> Result<Self, ConfigError> {
        match id {
            0 => Ok(Self::Constant),
            1 => Ok(Self::Muscl),
            _ => Err(ConfigError::UnknownId { kind: "重构格式", id }),
        }
    }

    /// 名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::Muscl => "muscl",
        }
    }
}

/// 斜率限制器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", try_from = "NameOrId")]
pub enum LimiterKind {
    /// Minmod
    #[default]
    Minmod,
    /// Superbee
    Superbee,
    /// Van Leer
    VanLeer,
    /// Venkatakrishnan (K=0)
    Venkatakrishnan,
    /// 修正 Venkatakrishnan
    ModifiedVenkatakrishnan,
}

impl LimiterKind {
    /// 全部变体，按旧式编号排列
    pub const ALL: [LimiterKind; 5] = [
        Self::Minmod,
        Self::Superbee,
        Self::VanLeer,
        Self::Venkatakrishnan,
        Self::ModifiedVenkatakrishnan,
    ];

    /// 从旧式数值编号解析
    pub fn from_id(id: i64) -> Result<Self, ConfigError> {
        usize::try_from(id)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(ConfigError::UnknownId { kind: "限制器", id })
    }

    /// 名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Minmod => "minmod",
            Self::Superbee => "superbee",
            Self::VanLeer => "van_leer",
            Self::Venkatakrishnan => "venkatakrishnan",
            Self::ModifiedVenkatakrishnan => "modified_venkatakrishnan",
        }
    }
}

/// 黎曼求解器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", try_from = "NameOrId")]
pub enum RiemannKind {
    /// Rusanov（局部 Lax-Friedrichs）
    Rusanov,
    /// HLL 两波近似
    Hll,
    /// HLLC 三波近似（恢复接触间断）
    #[default]
    Hllc,
}

impl RiemannKind {
    /// 全部变体
    pub const ALL: [RiemannKind; 3] = [Self::Rusanov, Self::Hll, Self::Hllc];

    /// 从旧式数值编号解析
    pub fn from_id(id: i64) -> Result<Self, ConfigError> {
        match id {
            0 => Ok(Self::Rusanov),
            1 => Ok(Self::Hll),
            2 => Ok(Self::Hllc),
            _ => Err(ConfigError::UnknownId { kind: "黎曼求解器", id }),
        }
    }

    /// 名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rusanov => "rusanov",
            Self::Hll => "hll",
            Self::Hllc => "hllc",
        }
    }
}

impl TryFrom<NameOrId> for ReconstructionKind {
    type Error = ConfigError;

    fn try_from(value: NameOrId) -> Result<Self, ConfigError> {
        value.resolve("重构格式", &Self::ALL, Self::name, Self::from_id)
    }
}

impl fmt::Display for ReconstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<NameOrId> for LimiterKind {
    type Error = ConfigError;

    fn try_from(value: NameOrId) -> Result<Self, ConfigError> {
        value.resolve("限制器", &Self::ALL, Self::name, Self::from_id)
    }
}

impl fmt::Display for LimiterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<NameOrId> for RiemannKind {
    type Error = ConfigError;

    fn try_from(value: NameOrId) -> Result<Self, ConfigError> {
        value.resolve("黎曼求解器", &Self::ALL, Self::name, Self::from_id)
    }
}

impl fmt::Display for RiemannKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limiter_ids_are_stable() {
        assert_eq!(LimiterKind::from_id(0).unwrap(), LimiterKind::Minmod);
        assert_eq!(LimiterKind::from_id(2).unwrap(), LimiterKind::VanLeer);
        assert_eq!(
            LimiterKind::from_id(4).unwrap(),
            LimiterKind::ModifiedVenkatakrishnan
        );
    }

    #[test]
    fn test_unknown_ids_rejected() {
        assert!(matches!(
            LimiterKind::from_id(5),
            Err(ConfigError::UnknownId { id: 5, .. })
        ));
        assert!(LimiterKind::from_id(-1).is_err());
        assert!(RiemannKind::from_id(3).is_err());
        assert!(ReconstructionKind::from_id(2).is_err());
    }

    #[test]
    fn test_serde_names() {
        let kind: RiemannKind = serde_json::from_str("\"rusanov\"").unwrap();
        assert_eq!(kind, RiemannKind::Rusanov);
        let kind: LimiterKind = serde_json::from_str("\"modified_venkatakrishnan\"").unwrap();
        assert_eq!(kind, LimiterKind::ModifiedVenkatakrishnan);
        assert!(serde_json::from_str::<LimiterKind>("\"koren\"").is_err());
    }

    #[test]
    fn test_serde_accepts_legacy_ids() {
        let kind: RiemannKind = serde_json::from_str("0").unwrap();
        assert_eq!(kind, RiemannKind::Rusanov);
        let kind: ReconstructionKind = serde_json::from_str("1").unwrap();
        assert_eq!(kind, ReconstructionKind::Muscl);
        assert!(serde_json::from_str::<LimiterKind>("5").is_err());
        assert!(serde_json::from_str::<LimiterKind>("1.5").is_err());
        // 序列化仍输出名称
        assert_eq!(serde_json::to_string(&LimiterKind::VanLeer).unwrap(), "\"van_leer\"");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ReconstructionKind::default(), ReconstructionKind::Constant);
        assert_eq!(LimiterKind::default(), LimiterKind::Minmod);
        assert_eq!(RiemannKind::default(), RiemannKind::Hllc);
    }
}
