//! 会话实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: i64,
    pub role: String,
    pub profile_id: Option<i64>,
    pub created_at: i64,
    pub expires_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型，角色标签无法识别时返回 None
impl Model {
    pub fn into_session(self) -> Option<crate::models::sessions::entities::Session> {
        use crate::models::sessions::entities::{AcademicRole, Session};
        use chrono::{DateTime, Utc};

        let role = AcademicRole::from_parts(&self.role, self.profile_id)?;
        Some(Session {
            id: self.id,
            user_id: self.user_id,
            role,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            expires_at: DateTime::<Utc>::from_timestamp(self.expires_at, 0).unwrap_or_default(),
        })
    }
}
