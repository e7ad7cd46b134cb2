/*!
 * 基于会话角色的访问控制中间件
 *
 * 必须在 RequireSession 之后使用，角色取自登录时解析并保存在会话中的 [`AcademicRole`]。
 *
 * ```rust,ignore
 * web::scope("/attendance")
 *     .wrap(RequireRole::new(RoleKind::Faculty))
 *     .wrap(RequireSession)
 * ```
 *
 * [`AcademicRole`]: crate::models::sessions::entities::AcademicRole
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::{
    middlewares::SessionContext,
    models::{ErrorCode, sessions::entities::RoleKind},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    allowed: Vec<RoleKind>,
}

impl RequireRole {
    /// 创建需要特定角色的中间件
    pub fn new(kind: RoleKind) -> Self {
        Self {
            allowed: vec![kind],
        }
    }

    fn permits(allowed: &[RoleKind], kind: RoleKind) -> bool {
        allowed.contains(&kind)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed: self.allowed.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed: Vec<RoleKind>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let allowed = self.allowed.clone();

        Box::pin(async move {
            let context = req.extensions().get::<SessionContext>().cloned();

            match context {
                Some(context) => {
                    let kind = context.role.kind();
                    if RequireRole::permits(&allowed, kind) {
                        let res = srv.call(req).await?.map_into_left_body();
                        Ok(res)
                    } else {
                        info!(
                            "Access denied for user {} (role: {:?}). Required roles: {:?}",
                            context.user.id, kind, allowed
                        );
                        Ok(req.into_response(
                            create_error_response(
                                StatusCode::FORBIDDEN,
                                ErrorCode::Forbidden,
                                "Access denied.",
                            )
                            .map_into_right_body(),
                        ))
                    }
                }
                None => {
                    info!(
                        "Role check failed: No session found in request. Make sure RequireSession middleware is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permits() {
        let faculty_only = [RoleKind::Faculty];
        assert!(RequireRole::permits(&faculty_only, RoleKind::Faculty));
        assert!(!RequireRole::permits(&faculty_only, RoleKind::Student));
        assert!(!RequireRole::permits(&faculty_only, RoleKind::Administrator));
        assert!(!RequireRole::permits(&faculty_only, RoleKind::Unassigned));
    }
}
