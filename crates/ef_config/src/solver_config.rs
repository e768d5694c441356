// crates/ef_config/src/solver_config.rs

//! SolverConfig - 求解器配置
//!
//! 定义求解器的全部配置参数。配置在启动时加载并校验一次，
//! 运行期间只读。

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::boundary::{BoundaryConfig, BoundaryKind};
use crate::error::ConfigError;
use crate::initial::InitialConfig;
use crate::schemes::{LimiterKind, NameOrId, ReconstructionKind, RiemannKind};

/// 求解器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SolverConfig {
    /// 流体常数
    #[serde(default)]
    pub fluid: FluidConfig,

    /// 物理模型
    #[serde(default)]
    pub physics: PhysicsConfig,

    /// 数值格式
    #[serde(default)]
    pub numerical: NumericalConfig,

    /// 边界表，下标即边界编号
    #[serde(default)]
    pub boundaries: Vec<BoundaryConfig>,

    /// 初始条件
    #[serde(default)]
    pub initial: InitialConfig,
}

impl SolverConfig {
    /// 从 JSON 字符串解析
    ///
    /// 选择项可以写名称或旧式数值编号；编号越界时返回
    /// [`ConfigError::UnknownId`]，其余格式错误返回 [`ConfigError::Parse`]。
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|err| {
            serde_json::from_str::<Value>(text)
                .ok()
                .and_then(|value| unknown_legacy_id(&value))
                .unwrap_or_else(|| err.into())
        })
    }

    /// 从 JSON 文件加载
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// 序列化为格式化 JSON
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 校验全部配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fluid.validate()?;
        self.numerical.validate()?;
        for (i, bc) in self.boundaries.iter().enumerate() {
            bc.validate(i)?;
        }
        self.initial.validate()
    }
}

/// 查找配置中越界的旧式编号
fn unknown_legacy_id(value: &Value) -> Option<ConfigError> {
    let scalars: [(&str, fn(i64) -> Result<(), ConfigError>); 4] = [
        ("/physics/dimension", |id| Dimension::from_id(id).map(drop)),
        ("/numerical/reconstruction", |id| ReconstructionKind::from_id(id).map(drop)),
        ("/numerical/limiter", |id| LimiterKind::from_id(id).map(drop)),
        ("/numerical/riemann", |id| RiemannKind::from_id(id).map(drop)),
    ];
    let boundary_ids = value
        .get("boundaries")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|bc| bc.get("kind").and_then(Value::as_i64));

    scalars
        .iter()
        .filter_map(|(pointer, check)| value.pointer(pointer).and_then(Value::as_i64).map(check))
        .chain(boundary_ids.map(|id| BoundaryKind::from_id(id).map(drop)))
        .find_map(Result::err)
}

// ============================================================
// 流体
// ============================================================

/// 流体常数（完全气体）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FluidConfig {
    /// 气体常数 R [J/(kg·K)]
    #[serde(default = "default_gas_constant")]
    pub gas_constant: f64,
    /// 比热比 γ
    #[serde(default = "default_gamma")]
    pub gamma: f64,
}

fn default_gas_constant() -> f64 { 287.0 }
fn default_gamma() -> f64 { 1.4 }

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            gas_constant: default_gas_constant(),
            gamma: default_gamma(),
        }
    }
}

impl FluidConfig {
    /// 校验
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.gas_constant > 0.0) || !self.gas_constant.is_finite() {
            return Err(ConfigError::invalid("fluid.gas_constant", self.gas_constant, "必须为正"));
        }
        if !(self.gamma > 1.0) || !self.gamma.is_finite() {
            return Err(ConfigError::invalid("fluid.gamma", self.gamma, "必须大于 1"));
        }
        Ok(())
    }
}

// ============================================================
// 物理模型
// ============================================================

/// 问题维度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "NameOrId")]
pub enum Dimension {
    /// 一维
    #[serde(rename = "1d")]
    OneD,
    /// 二维平面
    #[default]
    #[serde(rename = "2d")]
    TwoD,
    /// 二维轴对称（y 为径向）
    #[serde(rename = "axisymmetric")]
    Axisymmetric,
    /// 三维
    #[serde(rename = "3d")]
    ThreeD,
}

impl Dimension {
    /// 全部变体，按旧式编号排列
    pub const ALL: [Dimension; 4] = [Self::OneD, Self::TwoD, Self::Axisymmetric, Self::ThreeD];

    /// 名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::OneD => "1d",
            Self::TwoD => "2d",
            Self::Axisymmetric => "axisymmetric",
            Self::ThreeD => "3d",
        }
    }

    /// 从旧式数值编号解析
    pub fn from_id(id: i64) -> Result<Self, ConfigError> {
        match id {
            0 => Ok(Self::OneD),
            1 => Ok(Self::TwoD),
            2 => Ok(Self::Axisymmetric),
            3 => Ok(Self::ThreeD),
            _ => Err(ConfigError::UnknownId { kind: "维度", id }),
        }
    }

    /// 梯度计算中参与的空间方向数
    #[inline]
    pub fn active_dims(&self) -> usize {
        match self {
            Self::OneD => 1,
            Self::TwoD | Self::Axisymmetric => 2,
            Self::ThreeD => 3,
        }
    }

    /// 是否轴对称
    #[inline]
    pub fn is_axisymmetric(&self) -> bool {
        matches!(self, Self::Axisymmetric)
    }
}

impl TryFrom<NameOrId> for Dimension {
    type Error = ConfigError;

    fn try_from(value: NameOrId) -> Result<Self, ConfigError> {
        value.resolve("维度", &Self::ALL, Self::name, Self::from_id)
    }
}

/// 物理模型配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PhysicsConfig {
    /// 问题维度
    #[serde(default)]
    pub dimension: Dimension,
}

// ============================================================
// 数值格式
// ============================================================

/// 数值格式配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericalConfig {
    /// 重构格式
    #[serde(default)]
    pub reconstruction: ReconstructionKind,
    /// 限制器（仅 MUSCL 使用）
    #[serde(default)]
    pub limiter: LimiterKind,
    /// 黎曼求解器
    #[serde(default)]
    pub riemann: RiemannKind,
    /// 多步格式的级数
    #[serde(default = "default_time_stages")]
    pub time_stages: usize,
    /// 各级系数，级数为 1 时忽略
    #[serde(default)]
    pub stage_coefficients: Vec<f64>,
    /// CFL 数
    #[serde(default = "default_cfl")]
    pub cfl: f64,
    /// 最大模拟时间 [s]
    #[serde(default = "default_max_time")]
    pub max_time: f64,
    /// 最大迭代次数
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

fn default_time_stages() -> usize { 1 }
fn default_cfl() -> f64 { 0.8 }
fn default_max_time() -> f64 { 1.0 }
fn default_max_iterations() -> usize { 1000 }

impl Default for NumericalConfig {
    fn default() -> Self {
        Self {
            reconstruction: ReconstructionKind::default(),
            limiter: LimiterKind::default(),
            riemann: RiemannKind::default(),
            time_stages: default_time_stages(),
            stage_coefficients: Vec::new(),
            cfl: default_cfl(),
            max_time: default_max_time(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl NumericalConfig {
    /// 解析出实际使用的各级系数
    ///
    /// 单级格式固定为 `[1.0]`；多级格式要求系数个数等于级数。
    pub fn resolved_stage_coefficients(&self) -> Result<Vec<f64>, ConfigError> {
        match self.time_stages {
            0 => Err(ConfigError::invalid("numerical.time_stages", 0, "级数至少为 1")),
            1 => {
                if !self.stage_coefficients.is_empty() && self.stage_coefficients != [1.0] {
                    log::warn!(
                        "单级格式忽略给定的系数 {:?}，使用 [1.0]",
                        self.stage_coefficients
                    );
                }
                Ok(vec![1.0])
            }
            n if self.stage_coefficients.len() != n => Err(ConfigError::invalid(
                "numerical.stage_coefficients",
                format!("{:?}", self.stage_coefficients),
                format!("系数个数必须等于级数 {n}"),
            )),
            _ => {
                if let Some(a) = self.stage_coefficients.iter().find(|a| !(**a > 0.0) || !a.is_finite()) {
                    return Err(ConfigError::invalid(
                        "numerical.stage_coefficients",
                        a,
                        "系数必须为有限正数",
                    ));
                }
                Ok(self.stage_coefficients.clone())
            }
        }
    }

    /// 校验
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cfl > 0.0) || !self.cfl.is_finite() {
            return Err(ConfigError::invalid("numerical.cfl", self.cfl, "必须为有限正数"));
        }
        if !(self.max_time > 0.0) {
            return Err(ConfigError::invalid("numerical.max_time", self.max_time, "必须为正"));
        }
        self.resolved_stage_coefficients().map(|_| ())
    }
}
