// crates/ef_physics/src/error.rs

//! 物理层错误
//!
//! 只有启动期的配置/网格/边界错误与运行期的发散会向上传播，
//! 单元、面级别的数值问题一律就地处理。

use thiserror::Error;

use ef_config::ConfigError;
use ef_foundation::EfError;

use crate::boundary::BoundaryError;
use crate::mesh::MeshError;

/// 求解器错误
#[derive(Debug, Error)]
pub enum SolverError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 网格错误
    #[error("网格错误: {0}")]
    Mesh(#[from] MeshError),

    /// 边界条件错误
    #[error("边界条件错误: {0}")]
    Boundary(#[from] BoundaryError),

    /// 修复单元数超过阈值
    #[error("第 {iteration} 次迭代发散: 修复 {repairs} 个单元，超过阈值 {threshold}")]
    Divergence {
        /// 迭代次数
        iteration: usize,
        /// 本级修复数
        repairs: usize,
        /// 阈值
        threshold: f64,
    },
}

impl SolverError {
    /// 是否为运行期发散
    pub fn is_divergence(&self) -> bool {
        matches!(self, Self::Divergence { .. })
    }
}

impl From<SolverError> for EfError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::Config(e) => e.into(),
            other => EfError::internal(other.to_string()),
        }
    }
}

/// 求解器结果类型
pub type SolverResult<T> = Result<T, SolverError>;
