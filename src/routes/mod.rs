pub mod admin;

pub mod attendance;

pub mod auth;

pub mod dashboard;

pub mod marks;

pub use admin::configure_admin_routes;
pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use dashboard::configure_dashboard_routes;
pub use marks::configure_marks_routes;

#[cfg(test)]
mod tests {
    use actix_web::cookie::Cookie;
    use actix_web::dev::ServiceResponse;
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test, web};
    use std::sync::Arc;

    use crate::config::AppConfig;
    use crate::models::academics::requests::{CreateFacultyRequest, CreateStudentRequest};
    use crate::models::users::entities::{User, UserRole};
    use crate::models::users::requests::CreateUserRequest;
    use crate::services::test_support;
    use crate::storage::Storage;
    use crate::utils::password::hash_password;
    use crate::utils::{form_error_handler, json_error_handler};

    const PASSWORD: &str = "s3cret";

    macro_rules! init_app {
        ($storage:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::FormConfig::default().error_handler(form_error_handler))
                    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                    .app_data(web::Data::new($storage.clone()))
                    .configure(super::configure_auth_routes)
                    .configure(super::configure_dashboard_routes)
                    .configure(super::configure_attendance_routes)
                    .configure(super::configure_marks_routes)
                    .configure(super::configure_admin_routes),
            )
            .await
        };
    }

    macro_rules! login {
        ($app:expr, $username:expr) => {{
            let req = test::TestRequest::post()
                .uri("/login")
                .set_form([("username", $username), ("password", PASSWORD)])
                .to_request();
            let resp = test::call_service(&$app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER);
            session_cookie(&resp).expect("login should set the session cookie")
        }};
    }

    fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
        let name = &AppConfig::get().session.cookie_name;
        resp.response()
            .cookies()
            .find(|c| c.name() == name)
            .map(|c| c.into_owned())
    }

    fn location<B>(resp: &ServiceResponse<B>) -> &str {
        resp.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    async fn account(storage: &dyn Storage, username: &str) -> User {
        storage
            .create_user(CreateUserRequest {
                username: username.to_string(),
                email: String::new(),
                password: hash_password(PASSWORD).unwrap(),
                role: UserRole::User,
            })
            .await
            .unwrap()
    }

    async fn storage() -> Arc<dyn Storage> {
        Arc::new(test_support::storage().await)
    }

    #[actix_web::test]
    async fn test_protected_routes_require_session() {
        let storage = storage().await;
        let app = init_app!(storage);

        for uri in ["/dashboard", "/attendance/mark", "/marks/add"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[actix_web::test]
    async fn test_login_sets_cookie_and_redirects_to_dashboard() {
        let storage = storage().await;
        account(storage.as_ref(), "ann").await;
        let app = init_app!(storage);

        let req = test::TestRequest::post()
            .uri("/login")
            .set_form([("username", "ann"), ("password", PASSWORD)])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/dashboard");
        let cookie = session_cookie(&resp).unwrap();
        assert!(!cookie.value().is_empty());

        let req = test::TestRequest::get()
            .uri("/dashboard")
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_login_wrong_password_is_unauthorized() {
        let storage = storage().await;
        account(storage.as_ref(), "ann").await;
        let app = init_app!(storage);

        let req = test::TestRequest::post()
            .uri("/login")
            .set_form([("username", "ann"), ("password", "wrong")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(session_cookie(&resp).is_none());
    }

    #[actix_web::test]
    async fn test_recorders_forbidden_for_student() {
        let storage = storage().await;
        let course = test_support::course(storage.as_ref(), "CS").await;
        let subject = test_support::subject(storage.as_ref(), course.id, "CS101").await;
        let user = account(storage.as_ref(), "stu").await;
        storage
            .create_student(CreateStudentRequest {
                user_id: user.id,
                roll_no: "R-1".into(),
                course_id: course.id,
                year: 1,
            })
            .await
            .unwrap();
        let app = init_app!(storage);
        let cookie = login!(app, "stu");

        let sid = subject.id.to_string();
        for uri in ["/attendance/mark", "/marks/add"] {
            let req = test::TestRequest::get()
                .uri(uri)
                .cookie(cookie.clone())
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::FORBIDDEN, "GET {uri}");

            let req = test::TestRequest::post()
                .uri(uri)
                .cookie(cookie.clone())
                .set_form([("subject", sid.as_str())])
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::FORBIDDEN, "POST {uri}");
        }
        assert!(
            storage
                .list_attendance_by_subject(subject.id)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[actix_web::test]
    async fn test_recorders_open_for_faculty() {
        let storage = storage().await;
        let user = account(storage.as_ref(), "fac").await;
        storage
            .create_faculty(CreateFacultyRequest {
                user_id: user.id,
                department: "Physics".into(),
            })
            .await
            .unwrap();
        let app = init_app!(storage);
        let cookie = login!(app, "fac");

        for uri in ["/attendance/mark", "/marks/add"] {
            let req = test::TestRequest::get()
                .uri(uri)
                .cookie(cookie.clone())
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        }
    }

    #[actix_web::test]
    async fn test_logout_clears_cookie_and_closes_session() {
        let storage = storage().await;
        account(storage.as_ref(), "ann").await;
        let app = init_app!(storage);
        let cookie = login!(app, "ann");

        let req = test::TestRequest::post()
            .uri("/logout")
            .cookie(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/login");
        let cleared = session_cookie(&resp).unwrap();
        assert!(cleared.value().is_empty());
        assert_eq!(
            cleared.max_age(),
            Some(actix_web::cookie::time::Duration::ZERO)
        );

        // 会话记录已删除，旧 token 不再有效
        let req = test::TestRequest::get()
            .uri("/dashboard")
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_index_redirects_to_dashboard() {
        let storage = storage().await;
        let app = init_app!(storage);

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/dashboard");
    }
}
