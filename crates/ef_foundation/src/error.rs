// crates/ef_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `EfError` 枚举和 `EfResult` 类型别名。
//!
//! # 设计原则
//!
//! 1. **层次化**: 基础层只定义读取、配置、序列化与内部四类错误，
//!    求解相关错误在 `ef_physics` 中定义
//! 2. **易用性**: 提供便捷的构造方法
//!
//! # 示例
//!
//! ```
//! use ef_foundation::error::{EfError, EfResult};
//!
//! fn read_config() -> EfResult<()> {
//!     Err(EfError::config("配置文件格式错误"))
//! }
//! assert!(read_config().is_err());
//! ```

use thiserror::Error;

/// 统一结果类型
pub type EfResult<T> = Result<T, EfError>;

/// EulerFv 错误类型
#[derive(Error, Debug)]
pub enum EfError {
    // ========================================================================
    // IO 相关错误
    // ========================================================================
    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        /// 底层 IO 错误
        #[source]
        source: Option<std::io::Error>,
    },

    // ========================================================================
    // 配置相关错误
    // ========================================================================
    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },

    /// 配置值无效
    #[error("配置值无效: {key}={value}, 原因: {reason}")]
    InvalidConfig {
        /// 配置键名
        key: String,
        /// 配置值
        value: String,
        /// 无效原因说明
        reason: String,
    },

    /// 序列化错误
    #[error("序列化错误: {message}")]
    Serialization {
        /// 序列化失败原因
        message: String,
    },

    /// 内部错误
    #[error("内部错误: {message}")]
    Internal {
        /// 内部错误描述
        message: String,
    },
}

impl EfError {
    /// 创建 IO 错误
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(source),
        }
    }

    /// 创建配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 创建配置值无效错误
    pub fn invalid_config(
        key: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// 是否为配置类错误
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::InvalidConfig { .. })
    }
}

impl From<std::io::Error> for EfError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EfError::Serialization {
            message: "expected value at line 3".into(),
        };
        assert!(err.to_string().contains("line 3"));
        assert!(!err.is_config_error());
        assert!(EfError::config("边界表为空").is_config_error());
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let err = EfError::invalid_config("cfl", -1.0, "必须为正");
        assert!(err.is_config_error());
        assert!(err.to_string().contains("cfl"));
        assert!(!EfError::internal("x").is_config_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: EfError = io.into();
        assert!(matches!(err, EfError::Io { source: Some(_), .. }));
    }
}
