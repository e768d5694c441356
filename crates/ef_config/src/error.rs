// crates/ef_config/src/error.rs

//! 配置层错误类型

use ef_foundation::EfError;

/// 配置错误
///
/// 所有配置错误都在启动阶段报告，不重试。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 无效值
    #[error("无效值 '{key}': {value} - {reason}")]
    InvalidValue {
        /// 配置键
        key: String,
        /// 配置值
        value: String,
        /// 原因
        reason: String,
    },

    /// 未知的选择编号
    #[error("未知的{kind}编号: {id}")]
    UnknownId {
        /// 选择类别（限制器、重构格式、黎曼求解器、边界类型、维度）
        kind: &'static str,
        /// 编号
        id: i64,
    },

    /// 缺失配置
    #[error("缺失配置: {0}")]
    Missing(String),
}

impl ConfigError {
    /// 创建无效值错误
    pub fn invalid(key: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<ConfigError> for EfError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(source) => EfError::io("读取配置失败", source),
            ConfigError::Parse(message) => EfError::Serialization { message },
            ConfigError::InvalidValue { key, value, reason } => {
                EfError::InvalidConfig { key, value, reason }
            }
            other => EfError::config(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::invalid("cfl", -1.0, "必须为正");
        assert!(err.to_string().contains("cfl"));
    }

    #[test]
    fn test_unknown_id_display() {
        let err = ConfigError::UnknownId { kind: "限制器", id: 9 };
        let msg = err.to_string();
        assert!(msg.contains("限制器"));
        assert!(msg.contains('9'));
    }

    #[test]
    fn test_into_foundation_error() {
        let err: EfError = ConfigError::invalid("gamma", 0.5, "必须大于 1").into();
        assert!(err.is_config_error());
        let err: EfError = ConfigError::UnknownId { kind: "边界类型", id: 12 }.into();
        assert!(err.is_config_error());
    }
}
