use crate::models::users::entities::User;
use serde::Serialize;
use ts_rs::TS;

// 登录成功后的会话信息（同时通过 cookie 下发）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct LoginResponse {
    pub location: String,
    pub access_token: String,
    pub expires_in: i64,
    pub user: User,
}

// 注册成功
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct RegisterResponse {
    pub location: String,
    pub user: User,
}
