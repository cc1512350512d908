use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

/// 控制台统一错误类型
///
/// `Display` 的输出即为界面上直接展示给用户的文本。
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum QdError {
    // === 后端调用错误 ===
    /// 后端返回了非 200 状态码
    #[error("Failed to {action}: {status}")]
    Status { action: String, status: u16 },

    /// 连接失败、DNS 错误等传输层问题
    #[error("Error {activity}: {message}")]
    Network { activity: String, message: String },

    /// 状态码正常但响应体无法解析
    #[error("Error {activity}: invalid response body: {message}")]
    Decode { activity: String, message: String },

    // === 本地错误 ===
    #[error("Invalid input: {message}")]
    Validation { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Configuration error: {key} - {reason}")]
    Configuration { key: String, reason: String },

    #[error("Serialization error ({format}): {message}")]
    Serialization { format: String, message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// 错误严重级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,      // 用户输入问题
    Medium,   // 后端暂时不可用或返回错误
    High,     // 响应格式与约定不符
    Critical, // 配置或内部错误
}

impl QdError {
    pub fn validation(message: impl Into<String>) -> Self {
        QdError::Validation {
            message: message.into(),
        }
    }

    /// 获取错误的严重级别
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            QdError::Validation { .. } | QdError::Io { .. } => ErrorSeverity::Low,
            QdError::Status { .. } | QdError::Network { .. } => ErrorSeverity::Medium,
            QdError::Decode { .. } | QdError::Serialization { .. } => ErrorSeverity::High,
            QdError::Configuration { .. } | QdError::Internal { .. } => ErrorSeverity::Critical,
        }
    }

    /// 后端返回的 HTTP 状态码（如果有）
    pub fn status_code(&self) -> Option<u16> {
        match self {
            QdError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 记录错误日志
    pub fn log(&self, component: &str, operation: &str) {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::Medium => {
                warn!(
                    component = %component,
                    operation = %operation,
                    status = ?self.status_code(),
                    error = %self,
                    "请求失败"
                );
            }
            ErrorSeverity::High | ErrorSeverity::Critical => {
                error!(
                    component = %component,
                    operation = %operation,
                    severity = ?self.severity(),
                    error = %self,
                    "严重错误"
                );
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, QdError>;

// === 转换实现 ===

impl From<serde_json::Error> for QdError {
    fn from(err: serde_json::Error) -> Self {
        QdError::Serialization {
            format: "json".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for QdError {
    fn from(err: serde_yaml::Error) -> Self {
        QdError::Configuration {
            key: "yaml".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for QdError {
    fn from(err: std::io::Error) -> Self {
        QdError::Io {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for QdError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            QdError::Internal {
                message: format!("building request: {err}"),
            }
        } else if err.is_connect() {
            QdError::Network {
                activity: "connecting".to_string(),
                message: err.to_string(),
            }
        } else {
            QdError::Network {
                activity: "sending request".to_string(),
                message: err.to_string(),
            }
        }
    }
}
