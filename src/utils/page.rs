//! 页面响应构造
//!
//! 页面以 JSON 视图数据下发，重定向使用 303 + Location。

use actix_web::{HttpResponse, http::StatusCode, http::header};
use serde::Serialize;
use ts_rs::TS;

use crate::models::{ApiResponse, PageOutcome, RedirectResponse, RedirectTarget};

/// 303 重定向，附带 JSON 响应体
pub fn redirect_to(location: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .json(ApiResponse::success(
            RedirectResponse {
                location: location.to_string(),
            },
            message,
        ))
}

/// 渲染页面视图
pub fn render_page<T: Serialize + TS>(view: T, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(StatusCode::OK).json(ApiResponse::success(view, message))
}

/// 把处理结果转换为响应
pub fn respond<T: Serialize + TS>(outcome: PageOutcome<T>) -> HttpResponse {
    match outcome {
        PageOutcome::Render(view) => render_page(view, "OK"),
        PageOutcome::Redirect(target) => redirect_to(target.path(), redirect_message(target)),
    }
}

fn redirect_message(target: RedirectTarget) -> &'static str {
    match target {
        RedirectTarget::Dashboard => "Redirecting to dashboard",
        RedirectTarget::Login => "Redirecting to login",
    }
}
