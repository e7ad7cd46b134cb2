//! 会话存储操作

use super::SeaOrmStorage;
use crate::entity::sessions::{ActiveModel, Column, Entity as Sessions};
use crate::errors::{RecordsError, Result};
use crate::models::sessions::entities::{NewSession, Session};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建会话
    pub async fn create_session_impl(&self, req: NewSession) -> Result<Session> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            user_id: Set(req.user_id),
            role: Set(req.role.tag().to_string()),
            profile_id: Set(req.role.profile_id()),
            created_at: Set(now),
            expires_at: Set(req.expires_at.timestamp()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("创建会话失败: {e}")))?;

        result
            .into_session()
            .ok_or_else(|| RecordsError::internal("会话角色无法还原"))
    }

    /// 获取会话，角色标签损坏的会话视为不存在
    pub async fn get_session_impl(&self, session_id: &str) -> Result<Option<Session>> {
        let result = Sessions::find_by_id(session_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询会话失败: {e}")))?;

        Ok(result.and_then(|m| m.into_session()))
    }

    /// 删除会话
    pub async fn delete_session_impl(&self, session_id: &str) -> Result<bool> {
        let result = Sessions::delete_by_id(session_id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("删除会话失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 清理已过期的会话
    pub async fn delete_expired_sessions_impl(&self) -> Result<u64> {
        let now = chrono::Utc::now().timestamp();

        let result = Sessions::delete_many()
            .filter(Column::ExpiresAt.lte(now))
            .exec(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("清理过期会话失败: {e}")))?;

        Ok(result.rows_affected)
    }
}
