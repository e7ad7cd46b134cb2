//! 业务数据模型
//!
//! 与 `entity` 中的数据库实体分离，供 service / routes 层使用。

pub mod academics;
pub mod auth;
pub mod common;
pub mod dashboard;
pub mod recorders;
pub mod sessions;
pub mod users;

pub use common::{ApiResponse, ErrorCode, PageOutcome, RedirectResponse, RedirectTarget};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
