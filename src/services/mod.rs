pub mod admin;
pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod marks;
pub mod roster;

#[cfg(test)]
pub(crate) mod test_support;

pub use admin::AdminService;
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use marks::MarksService;

use actix_web::HttpRequest;
use std::sync::Arc;

use crate::errors::{RecordsError, Result};
use crate::storage::Storage;

// 从 app data 中取出存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> Result<Arc<dyn Storage>> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| RecordsError::internal("Storage not found in app data"))
}
