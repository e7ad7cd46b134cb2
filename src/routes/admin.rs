use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::academics::requests::{
    AssignSubjectRequest, CreateCourseRequest, CreateFacultyRequest, CreateStudentRequest,
    CreateSubjectRequest,
};
use crate::models::sessions::entities::RoleKind;
use crate::services::AdminService;

// 懒加载的全局 AdminService 实例
static ADMIN_SERVICE: Lazy<AdminService> = Lazy::new(AdminService::new_lazy);

// HTTP处理程序
pub async fn create_course(
    req: HttpRequest,
    body: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.create_course(body.into_inner(), &req).await
}

pub async fn create_subject(
    req: HttpRequest,
    body: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.create_subject(body.into_inner(), &req).await
}

pub async fn create_student(
    req: HttpRequest,
    body: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.create_student(body.into_inner(), &req).await
}

pub async fn create_faculty(
    req: HttpRequest,
    body: web::Json<CreateFacultyRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.create_faculty(body.into_inner(), &req).await
}

pub async fn assign_subject(
    req: HttpRequest,
    faculty_id: web::Path<i64>,
    body: web::Json<AssignSubjectRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .assign_subject(faculty_id.into_inner(), body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(middlewares::RequireSession)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new(RoleKind::Administrator))
                    .route("/courses", web::post().to(create_course))
                    .route("/subjects", web::post().to(create_subject))
                    .route("/students", web::post().to(create_student))
                    .route("/faculty", web::post().to(create_faculty))
                    .route("/faculty/{id}/subjects", web::post().to(assign_subject)),
            ),
    );
}
