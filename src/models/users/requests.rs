use super::entities::UserRole;
use serde::Deserialize;

// 用户创建请求（用于存储层，password 已经是哈希值）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}
