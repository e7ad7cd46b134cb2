use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use tracing::info;

use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode, RedirectTarget,
    auth::{RegisterRequest, RegisterResponse},
    users::{
        entities::{User, UserRole},
        requests::CreateUserRequest,
    },
};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password, validate_username};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 输入校验失败时返回更具体的业务错误码
    if let Err((code, msg)) = check_input(&register_request) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
    }

    let user = match register_account(storage.as_ref(), register_request).await {
        Ok(user) => user,
        Err(RecordsError::Conflict(msg)) => {
            return Ok(HttpResponse::Conflict()
                .json(ApiResponse::error_empty(ErrorCode::UserNameAlreadyExists, msg)));
        }
        Err(e) => return Err(e.into()),
    };
    info!("User {} registered", user.username);

    let location = RedirectTarget::Login.path();
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .json(ApiResponse::success(
            RegisterResponse {
                location: location.to_string(),
                user,
            },
            "Account created. Please login.",
        )))
}

fn check_input(req: &RegisterRequest) -> std::result::Result<(), (ErrorCode, &'static str)> {
    validate_username(&req.username).map_err(|msg| (ErrorCode::UserNameInvalid, msg))?;
    validate_email(&req.email).map_err(|msg| (ErrorCode::UserEmailInvalid, msg))?;
    validate_password(&req.password).map_err(|msg| (ErrorCode::UserPasswordInvalid, msg))?;
    Ok(())
}

/// 注册新账号，新账号不带任何档案
pub async fn register_account(storage: &dyn Storage, req: RegisterRequest) -> Result<User> {
    check_input(&req).map_err(|(_, msg)| RecordsError::validation(msg))?;

    // 1. 检查用户名是否已存在
    if storage.get_user_by_username(&req.username).await?.is_some() {
        return Err(RecordsError::conflict("Username already exists"));
    }

    // 2. 哈希密码并创建用户
    let password_hash = hash_password(&req.password)?;
    let username = req.username.clone();
    let created = storage
        .create_user(CreateUserRequest {
            username: req.username,
            email: req.email,
            password: password_hash,
            role: UserRole::User,
        })
        .await;

    match created {
        Ok(user) => Ok(user),
        // 并发注册同名账号时由唯一索引兜底
        Err(e) => match storage.get_user_by_username(&username).await {
            Ok(Some(_)) => Err(RecordsError::conflict("Username already exists")),
            _ => Err(e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support;

    fn request(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_creates_plain_user() {
        let storage = test_support::storage().await;

        let user = register_account(&storage, request("newbie", "", "pw"))
            .await
            .unwrap();

        assert_eq!(user.role, UserRole::User);
        assert!(user.is_active());
        assert_ne!(user.password_hash, "pw");
        assert!(storage.get_user_by_username("newbie").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_register_existing_username_leaves_account_unchanged() {
        let storage = test_support::storage().await;
        let original = test_support::user(&storage, "taken", UserRole::Admin).await;

        let err = register_account(&storage, request("taken", "other@example.edu", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::Conflict(_)));
        assert_eq!(err.message(), "Username already exists");

        let after = storage.get_user_by_id(original.id).await.unwrap().unwrap();
        assert_eq!(after.email, original.email);
        assert_eq!(after.password_hash, original.password_hash);
        assert_eq!(after.role, UserRole::Admin);
        assert_eq!(storage.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_rejects_bad_input() {
        let storage = test_support::storage().await;

        for req in [
            request("", "", "pw"),
            request("bad name", "", "pw"),
            request("ok", "not-an-email", "pw"),
            request("ok", "", ""),
        ] {
            let err = register_account(&storage, req).await.unwrap_err();
            assert!(matches!(err, RecordsError::Validation(_)));
        }
        assert_eq!(storage.count_users().await.unwrap(), 0);
    }
}
