use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use tracing::{info, warn};

use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, RedirectTarget,
    auth::{LoginRequest, LoginResponse},
    sessions::entities::{AcademicRole, NewSession, Session},
    users::entities::User,
};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let config = service.get_config();

    // 1. 校验用户名和密码
    let user = authenticate(
        storage.as_ref(),
        &login_request.username,
        &login_request.password,
    )
    .await?;

    // 2. 更新最后登录时间
    if let Err(e) = storage.update_last_login(user.id).await {
        warn!("Failed to update last login for user {}: {}", user.id, e);
    }

    // 3. 解析角色并建立会话
    let session = establish_session(storage.as_ref(), &user, config.session.expiry).await?;

    // 4. 签发会话 token
    let token = JwtUtils::generate_session_token(user.id, &session.id, session.expires_at)
        .map_err(|e| RecordsError::internal(format!("Failed to sign session token: {e}")))?;

    info!(
        "User {} logged in successfully as {}",
        user.username,
        session.role.tag()
    );

    let location = RedirectTarget::Dashboard.path();
    let response = LoginResponse {
        location: location.to_string(),
        expires_in: config.session.expiry * 60, // 转换为秒
        access_token: token.clone(),
        user,
    };

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .cookie(JwtUtils::create_session_cookie(&token))
        .json(ApiResponse::success(response, "Login successful")))
}

/// 校验凭据
///
/// 用户不存在、密码错误、账号非 active 均返回相同的认证失败。
pub async fn authenticate(storage: &dyn Storage, username: &str, password: &str) -> Result<User> {
    let user = storage
        .get_user_by_username(username)
        .await?
        .ok_or_else(|| RecordsError::authentication(INVALID_CREDENTIALS))?;

    if !verify_password(password, &user.password_hash) {
        return Err(RecordsError::authentication(INVALID_CREDENTIALS));
    }

    if !user.is_active() {
        info!("Login rejected for inactive user {}", user.username);
        return Err(RecordsError::authentication(INVALID_CREDENTIALS));
    }

    Ok(user)
}

/// 解析用户角色：学生 > 教职工 > 管理员 > 未分配
pub async fn resolve_role(storage: &dyn Storage, user: &User) -> Result<AcademicRole> {
    let student_id = storage.get_student_by_user_id(user.id).await?.map(|s| s.id);
    let faculty_id = if student_id.is_some() {
        None
    } else {
        storage.get_faculty_by_user_id(user.id).await?.map(|f| f.id)
    };

    Ok(AcademicRole::resolve(
        student_id,
        faculty_id,
        user.role.is_admin(),
    ))
}

/// 建立会话，角色在此时解析并固定
pub async fn establish_session(
    storage: &dyn Storage,
    user: &User,
    expiry_minutes: i64,
) -> Result<Session> {
    let role = resolve_role(storage, user).await?;
    storage
        .create_session(NewSession {
            user_id: user.id,
            role,
            expires_at: chrono::Utc::now() + chrono::Duration::minutes(expiry_minutes),
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::models::users::requests::CreateUserRequest;
    use crate::services::test_support;
    use crate::utils::password::hash_password;

    async fn account(storage: &dyn Storage, username: &str, password: &str) -> User {
        storage
            .create_user(CreateUserRequest {
                username: username.to_string(),
                email: String::new(),
                password: hash_password(password).unwrap(),
                role: UserRole::User,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let storage = test_support::storage().await;
        account(&storage, "alice", "s3cret").await;

        let user = authenticate(&storage, "alice", "s3cret").await.unwrap();
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_authenticate_failures_look_the_same() {
        let storage = test_support::storage().await;
        account(&storage, "alice", "s3cret").await;

        let wrong_password = authenticate(&storage, "alice", "nope").await.unwrap_err();
        let unknown_user = authenticate(&storage, "bob", "s3cret").await.unwrap_err();

        for err in [wrong_password, unknown_user] {
            assert!(matches!(err, RecordsError::Authentication(_)));
            assert_eq!(err.message(), INVALID_CREDENTIALS);
        }
    }

    #[tokio::test]
    async fn test_authenticate_inactive_user() {
        use crate::entity::users::{Column, Entity as Users};
        use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, sea_query::Expr};

        let storage = test_support::storage().await;
        let user = account(&storage, "frozen", "s3cret").await;
        Users::update_many()
            .col_expr(Column::Status, Expr::value("inactive"))
            .filter(Column::Id.eq(user.id))
            .exec(&storage.db)
            .await
            .unwrap();

        let err = authenticate(&storage, "frozen", "s3cret").await.unwrap_err();
        assert_eq!(err.message(), INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_resolve_role_precedence() {
        let storage = test_support::storage().await;
        let course = test_support::course(&storage, "CS").await;
        let subject = test_support::subject(&storage, course.id, "CS101").await;

        let (student_user, student) = test_support::student(&storage, "stu", course.id).await;
        let (faculty_user, faculty) =
            test_support::faculty(&storage, "fac", &[subject.id]).await;
        let admin = test_support::user(&storage, "root", UserRole::Admin).await;
        let nobody = test_support::user(&storage, "nobody", UserRole::User).await;

        assert_eq!(
            resolve_role(&storage, &student_user).await.unwrap(),
            AcademicRole::Student {
                student_id: student.id
            }
        );
        assert_eq!(
            resolve_role(&storage, &faculty_user).await.unwrap(),
            AcademicRole::Faculty {
                faculty_id: faculty.id
            }
        );
        assert_eq!(
            resolve_role(&storage, &admin).await.unwrap(),
            AcademicRole::Administrator
        );
        assert_eq!(
            resolve_role(&storage, &nobody).await.unwrap(),
            AcademicRole::Unassigned
        );
    }

    #[tokio::test]
    async fn test_student_profile_wins_over_admin_flag() {
        let storage = test_support::storage().await;
        let course = test_support::course(&storage, "CS").await;
        let admin = test_support::user(&storage, "root", UserRole::Admin).await;
        let student = storage
            .create_student(crate::models::academics::requests::CreateStudentRequest {
                user_id: admin.id,
                roll_no: "R-1".into(),
                course_id: course.id,
                year: 1,
            })
            .await
            .unwrap();

        assert_eq!(
            resolve_role(&storage, &admin).await.unwrap(),
            AcademicRole::Student {
                student_id: student.id
            }
        );
    }

    #[tokio::test]
    async fn test_establish_session_persists_role() {
        let storage = test_support::storage().await;
        let admin = test_support::user(&storage, "root", UserRole::Admin).await;

        let session = establish_session(&storage, &admin, 60).await.unwrap();
        let loaded = storage.get_session(&session.id).await.unwrap().unwrap();

        assert_eq!(loaded.user_id, admin.id);
        assert_eq!(loaded.role, AcademicRole::Administrator);
        assert!(!loaded.is_expired(chrono::Utc::now()));
    }
}
