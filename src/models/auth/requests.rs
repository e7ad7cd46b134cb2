use serde::Deserialize;
use ts_rs::TS;

// 用户登录请求（表单）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// 用户注册请求（表单）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct RegisterRequest {
    pub username: String,
    /// 可以为空
    #[serde(default)]
    pub email: String,
    pub password: String,
}
