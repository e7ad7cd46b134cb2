use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::middlewares::{self, SessionContext};
use crate::models::sessions::entities::RoleKind;
use crate::services::MarksService;

// 懒加载的全局 MarksService 实例
static MARKS_SERVICE: Lazy<MarksService> = Lazy::new(MarksService::new_lazy);

pub async fn marks_form(req: HttpRequest, session: SessionContext) -> ActixResult<HttpResponse> {
    MARKS_SERVICE.form(&session, &req).await
}

pub async fn add_marks(
    req: HttpRequest,
    session: SessionContext,
    form: web::Form<HashMap<String, String>>,
) -> ActixResult<HttpResponse> {
    MARKS_SERVICE.submit(&session, form.into_inner(), &req).await
}

// 配置路由
pub fn configure_marks_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/marks")
            .wrap(middlewares::RequireSession)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new(RoleKind::Faculty))
                    .route("/add", web::get().to(marks_form))
                    .route("/add", web::post().to(add_marks)),
            ),
    );
}
