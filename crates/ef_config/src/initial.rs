// crates/ef_config/src/initial.rs

//! 初始条件配置
//!
//! 全场先取均匀原始变量状态，再按顺序用初始化块覆盖；
//! 后出现的块优先。块中未给出的量继承均匀状态。

use serde::{Deserialize, Serialize};

use crate::boundary::Region;
use crate::error::ConfigError;

/// 初始状态以哪组热力学量给定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InitialVariables {
    /// 由 (p, T) 确定密度 ρ = p/(RT)
    #[default]
    TemperatureBased,
    /// 直接给定 (ρ, p)
    DensityBased,
}

/// 原始变量状态
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveState {
    /// 密度 [kg/m³]，仅在 `DensityBased` 时使用
    #[serde(default = "default_density")]
    pub density: f64,
    /// 压力 [Pa]
    #[serde(default = "default_pressure")]
    pub pressure: f64,
    /// 温度 [K]，仅在 `TemperatureBased` 时使用
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// 速度 [m/s]
    #[serde(default)]
    pub velocity: [f64; 3],
}

fn default_density() -> f64 { 1.0 }
fn default_pressure() -> f64 { 101325.0 }
fn default_temperature() -> f64 { 300.0 }

impl Default for PrimitiveState {
    fn default() -> Self {
        Self {
            density: default_density(),
            pressure: default_pressure(),
            temperature: default_temperature(),
            velocity: [0.0; 3],
        }
    }
}

impl PrimitiveState {
    /// 按给定方式求密度
    pub fn density_with(&self, variables: InitialVariables, gas_constant: f64) -> f64 {
        match variables {
            InitialVariables::TemperatureBased => self.pressure / self.temperature / gas_constant,
            InitialVariables::DensityBased => self.density,
        }
    }

    fn validate(&self, key: &str, variables: InitialVariables) -> Result<(), ConfigError> {
        if !(self.pressure > 0.0) {
            return Err(ConfigError::invalid(format!("{key}.pressure"), self.pressure, "压力必须为正"));
        }
        match variables {
            InitialVariables::TemperatureBased if !(self.temperature > 0.0) => Err(
                ConfigError::invalid(format!("{key}.temperature"), self.temperature, "温度必须为正"),
            ),
            InitialVariables::DensityBased if !(self.density > 0.0) => Err(
                ConfigError::invalid(format!("{key}.density"), self.density, "密度必须为正"),
            ),
            _ if self.velocity.iter().any(|u| !u.is_finite()) => Err(ConfigError::invalid(
                format!("{key}.velocity"),
                format!("{:?}", self.velocity),
                "速度必须有限",
            )),
            _ => Ok(()),
        }
    }
}

/// 初始化块
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct InitialBlock {
    /// 覆盖区域
    #[serde(default)]
    pub region: Region,
    /// 密度
    #[serde(default)]
    pub density: Option<f64>,
    /// 压力
    #[serde(default)]
    pub pressure: Option<f64>,
    /// 温度
    #[serde(default)]
    pub temperature: Option<f64>,
    /// 速度
    #[serde(default)]
    pub velocity: Option<[f64; 3]>,
}

impl InitialBlock {
    /// 在区域内使用给定原始状态的块
    pub fn new(region: Region, state: PrimitiveState) -> Self {
        Self {
            region,
            density: Some(state.density),
            pressure: Some(state.pressure),
            temperature: Some(state.temperature),
            velocity: Some(state.velocity),
        }
    }

    /// 以 `base` 补全未给出的量
    pub fn resolve(&self, base: &PrimitiveState) -> PrimitiveState {
        PrimitiveState {
            density: self.density.unwrap_or(base.density),
            pressure: self.pressure.unwrap_or(base.pressure),
            temperature: self.temperature.unwrap_or(base.temperature),
            velocity: self.velocity.unwrap_or(base.velocity),
        }
    }
}

/// 初始条件配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct InitialConfig {
    /// 给定方式
    #[serde(default)]
    pub variables: InitialVariables,
    /// 均匀状态
    #[serde(default)]
    pub state: PrimitiveState,
    /// 初始化块（按顺序覆盖）
    #[serde(default)]
    pub blocks: Vec<InitialBlock>,
}

impl InitialConfig {
    /// 均匀初始场
    pub fn uniform(variables: InitialVariables, state: PrimitiveState) -> Self {
        Self {
            variables,
            state,
            blocks: Vec::new(),
        }
    }

    /// 追加初始化块
    pub fn with_block(mut self, block: InitialBlock) -> Self {
        self.blocks.push(block);
        self
    }

    /// 校验
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.state.validate("initial.state", self.variables)?;
        for (b, block) in self.blocks.iter().enumerate() {
            block
                .resolve(&self.state)
                .validate(&format!("initial.blocks[{b}]"), self.variables)?;
        }
        Ok(())
    }
}
