/*!
 * 会话认证中间件
 *
 * 校验请求携带的会话 token（`session_token` Cookie 或 `Authorization: Bearer <token>`），
 * 加载对应的会话记录，并把 [`SessionContext`] 放入请求扩展。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::{RequireSession, SessionContext};
 *
 * App::new().service(
 *     web::scope("/dashboard")
 *         .wrap(RequireSession)
 *         .route("", web::get().to(handler)),
 * );
 *
 * async fn handler(session: SessionContext) -> HttpResponse {
 *     HttpResponse::Ok().body(session.user.username)
 * }
 * ```
 *
 * ## 认证流程
 *
 * 1. 提取并验证 JWT，取出会话 ID
 * 2. 读取会话记录，检查是否过期、是否属于 token 中的用户
 * 3. 读取用户并确认账号仍为 active
 * 4. 任一步失败返回 401
 */

use crate::models::ErrorCode;
use crate::models::sessions::entities::AcademicRole;
use crate::models::users::entities::{User, UserStatus};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;
use crate::errors::RecordsError;

/// 已认证请求的会话上下文
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: String,
    pub user: User,
    pub role: AcademicRole,
}

impl FromRequest for SessionContext {
    type Error = RecordsError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<SessionContext>()
                .cloned()
                .ok_or_else(|| RecordsError::authentication("Authentication required")),
        )
    }
}

#[derive(Clone)]
pub struct RequireSession;

// 辅助函数：验证 token 并加载会话
async fn extract_and_validate_session(req: &ServiceRequest) -> Result<SessionContext, String> {
    let token = JwtUtils::extract_session_token(req.request())
        .ok_or_else(|| "Missing session token".to_string())?;

    let claims = JwtUtils::verify_token(&token).map_err(|err| {
        info!("Session token validation failed: {}", err);
        "Invalid session token".to_string()
    })?;

    let user_id = claims
        .user_id()
        .ok_or_else(|| "Invalid user ID in session token".to_string())?;

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .ok_or_else(|| "Storage not found in app data".to_string())?
        .get_ref()
        .clone();

    let session = storage
        .get_session(&claims.sid)
        .await
        .map_err(|_| "Failed to retrieve session from storage".to_string())?
        .ok_or_else(|| "Session not found".to_string())?;

    if session.user_id != user_id {
        return Err("Session does not belong to token subject".to_string());
    }

    if session.is_expired(chrono::Utc::now()) {
        return Err("Session expired".to_string());
    }

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|_| "Failed to retrieve user from storage".to_string())?
        .ok_or_else(|| "User not found".to_string())?;

    if user.status != UserStatus::Active {
        return Err("User is not active".to_string());
    }

    Ok(SessionContext {
        session_id: session.id,
        user,
        role: session.role,
    })
}

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireSessionMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_session(&req).await {
                Ok(context) => {
                    debug!(
                        "Session authentication successful for user {} ({})",
                        context.user.id,
                        context.role.tag()
                    );
                    req.extensions_mut().insert(context);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "Session authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}
