//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_records_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum RecordsError {
            $($variant(String),)*
        }

        impl RecordsError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(RecordsError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(RecordsError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(RecordsError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl RecordsError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        RecordsError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_records_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Conflict("E006", "Resource Conflict"),
    Serialization("E007", "Serialization Error"),
    DateParse("E008", "Date Parse Error"),
    Authentication("E009", "Authentication Error"),
    Authorization("E010", "Authorization Error"),
    Internal("E011", "Internal Error"),
}

impl RecordsError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 对应的 API 业务错误码
    pub fn api_code(&self) -> ErrorCode {
        match self {
            RecordsError::Validation(_) | RecordsError::DateParse(_) => ErrorCode::BadRequest,
            RecordsError::NotFound(_) => ErrorCode::NotFound,
            RecordsError::Conflict(_) => ErrorCode::Conflict,
            RecordsError::Authentication(_) => ErrorCode::AuthFailed,
            RecordsError::Authorization(_) => ErrorCode::Forbidden,
            _ => ErrorCode::InternalServerError,
        }
    }
}

impl fmt::Display for RecordsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for RecordsError {}

impl ResponseError for RecordsError {
    fn status_code(&self) -> StatusCode {
        match self {
            RecordsError::Validation(_) | RecordsError::DateParse(_) => StatusCode::BAD_REQUEST,
            RecordsError::NotFound(_) => StatusCode::NOT_FOUND,
            RecordsError::Conflict(_) => StatusCode::CONFLICT,
            RecordsError::Authentication(_) => StatusCode::UNAUTHORIZED,
            RecordsError::Authorization(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self.format_simple());
        }
        HttpResponse::build(status).json(ApiResponse::error_empty(self.api_code(), self.message()))
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for RecordsError {
    fn from(err: sea_orm::DbErr) -> Self {
        RecordsError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for RecordsError {
    fn from(err: serde_json::Error) -> Self {
        RecordsError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for RecordsError {
    fn from(err: std::io::Error) -> Self {
        RecordsError::Internal(err.to_string())
    }
}

impl From<chrono::ParseError> for RecordsError {
    fn from(err: chrono::ParseError) -> Self {
        RecordsError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RecordsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(RecordsError::database_config("test").code(), "E001");
        assert_eq!(RecordsError::validation("test").code(), "E004");
        assert_eq!(RecordsError::conflict("test").code(), "E006");
        assert_eq!(RecordsError::authentication("test").code(), "E009");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            RecordsError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            RecordsError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = RecordsError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = RecordsError::conflict("Username already exists");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Conflict"));
        assert!(formatted.contains("Username already exists"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            RecordsError::authentication("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            RecordsError::conflict("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            RecordsError::date_parse("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RecordsError::database_operation("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_chrono_parse_error() {
        let err: RecordsError = chrono::NaiveDate::parse_from_str("2024-13-40", "%Y-%m-%d")
            .unwrap_err()
            .into();
        assert_eq!(err.code(), "E008");
    }
}
