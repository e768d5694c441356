// crates/ef_physics/src/boundary/mod.rs

//! 边界条件模块
//!
//! - [`condition`]: 各类边界的 Init/Apply 策略
//! - [`manager`]: 边界表、面到边界的映射与边界面通量
//! - [`report`]: 按边界积分的质量流量、力与力矩
//!
//! 边界面通量直接由所属单元的重构状态计算，不经过黎曼求解器，
//! 结果（未乘面积）由管理器统一乘以面积写入面通量缓冲。

pub mod condition;
pub mod manager;
pub mod report;

use thiserror::Error;

pub use condition::{BoundaryCondition, StagnationInlet};
pub use manager::BoundaryManager;
pub use report::BoundaryReport;

/// 边界错误
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BoundaryError {
    /// 网格存在边界面但边界表为空
    #[error("网格有 {n_faces} 个边界面，但边界表为空")]
    EmptyTable {
        /// 边界面数
        n_faces: usize,
    },

    /// 边界参数无法生成参考状态
    #[error("边界 {index} ({kind}) 参数无效: {reason}")]
    InvalidParameters {
        /// 边界编号
        index: usize,
        /// 边界类型名称
        kind: &'static str,
        /// 原因
        reason: String,
    },
}
