//! 请求参数解析失败时返回统一的 JSON 错误

use actix_web::{
    Error, HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, UrlencodedError},
};

use crate::models::{ApiResponse, ErrorCode};

/// 表单解析错误处理器
pub fn form_error_handler(err: UrlencodedError, req: &HttpRequest) -> Error {
    tracing::debug!("表单解析失败 {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid form data: {err}"),
    ));
    InternalError::from_response(err, response).into()
}

/// JSON 解析错误处理器
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    tracing::debug!("JSON 解析失败 {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid JSON payload: {err}"),
    ));
    InternalError::from_response(err, response).into()
}
