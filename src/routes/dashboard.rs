use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, SessionContext};
use crate::models::RedirectTarget;
use crate::services::DashboardService;
use crate::utils::redirect_to;

// 懒加载的全局 DashboardService 实例
static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);

pub async fn dashboard(req: HttpRequest, session: SessionContext) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.dashboard(&session, &req).await
}

pub async fn index() -> HttpResponse {
    redirect_to(RedirectTarget::Dashboard.path(), "Redirecting to dashboard")
}

// 配置路由
pub fn configure_dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index)).service(
        web::scope("/dashboard")
            .wrap(middlewares::RequireSession)
            .route("", web::get().to(dashboard)),
    );
}
