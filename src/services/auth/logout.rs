use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use crate::models::RedirectTarget;
use crate::utils::jwt::JwtUtils;
use crate::utils::redirect_to;

use super::AuthService;

/// 处理用户登出
///
/// 删除会话记录并清除 Cookie。没有有效会话时同样清除 Cookie 并跳转。
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(claims) =
        JwtUtils::extract_session_token(request).and_then(|t| JwtUtils::verify_token(&t).ok())
    {
        let storage = service.get_storage(request)?;
        match storage.delete_session(&claims.sid).await {
            Ok(true) => info!("Session {} closed for user {}", claims.sid, claims.sub),
            Ok(false) => {}
            Err(e) => warn!("Failed to delete session {}: {}", claims.sid, e),
        }
    }

    // max_age=0 会让浏览器删除该 cookie
    let mut response = redirect_to(RedirectTarget::Login.path(), "Logged out");
    response
        .add_cookie(&JwtUtils::create_empty_session_cookie())
        .map_err(actix_web::error::ErrorInternalServerError)?;
    Ok(response)
}
