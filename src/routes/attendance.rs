use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::middlewares::{self, SessionContext};
use crate::models::sessions::entities::RoleKind;
use crate::services::AttendanceService;

// 懒加载的全局 AttendanceService 实例
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn attendance_form(
    req: HttpRequest,
    session: SessionContext,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.form(&session, &req).await
}

pub async fn mark_attendance(
    req: HttpRequest,
    session: SessionContext,
    form: web::Form<HashMap<String, String>>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .submit(&session, form.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/attendance")
            .wrap(middlewares::RequireSession)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new(RoleKind::Faculty))
                    .route("/mark", web::get().to(attendance_form))
                    .route("/mark", web::post().to(mark_attendance)),
            ),
    );
}
