//! 会话与角色
//!
//! 角色在登录时解析一次并随会话持久化，后续请求直接读取，不再逐次探测档案表。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 会话所属角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "session.ts")]
pub enum AcademicRole {
    Student { student_id: i64 },
    Faculty { faculty_id: i64 },
    Administrator,
    Unassigned,
}

/// 不带档案 ID 的角色类别，用于路由级别的权限校验
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleKind {
    Student,
    Faculty,
    Administrator,
    Unassigned,
}

impl AcademicRole {
    pub const STUDENT: &'static str = "student";
    pub const FACULTY: &'static str = "faculty";
    pub const ADMINISTRATOR: &'static str = "administrator";
    pub const UNASSIGNED: &'static str = "unassigned";

    /// 按优先级解析角色：学生 > 教职工 > 管理员 > 未分配
    pub fn resolve(student_id: Option<i64>, faculty_id: Option<i64>, is_admin: bool) -> Self {
        if let Some(student_id) = student_id {
            AcademicRole::Student { student_id }
        } else if let Some(faculty_id) = faculty_id {
            AcademicRole::Faculty { faculty_id }
        } else if is_admin {
            AcademicRole::Administrator
        } else {
            AcademicRole::Unassigned
        }
    }

    pub fn kind(&self) -> RoleKind {
        match self {
            AcademicRole::Student { .. } => RoleKind::Student,
            AcademicRole::Faculty { .. } => RoleKind::Faculty,
            AcademicRole::Administrator => RoleKind::Administrator,
            AcademicRole::Unassigned => RoleKind::Unassigned,
        }
    }

    /// 持久化用的角色标签
    pub fn tag(&self) -> &'static str {
        match self {
            AcademicRole::Student { .. } => Self::STUDENT,
            AcademicRole::Faculty { .. } => Self::FACULTY,
            AcademicRole::Administrator => Self::ADMINISTRATOR,
            AcademicRole::Unassigned => Self::UNASSIGNED,
        }
    }

    /// 关联档案 ID（学生或教职工）
    pub fn profile_id(&self) -> Option<i64> {
        match self {
            AcademicRole::Student { student_id } => Some(*student_id),
            AcademicRole::Faculty { faculty_id } => Some(*faculty_id),
            _ => None,
        }
    }

    /// 从持久化的标签和档案 ID 还原角色
    pub fn from_parts(tag: &str, profile_id: Option<i64>) -> Option<Self> {
        match (tag, profile_id) {
            (Self::STUDENT, Some(student_id)) => Some(AcademicRole::Student { student_id }),
            (Self::FACULTY, Some(faculty_id)) => Some(AcademicRole::Faculty { faculty_id }),
            (Self::ADMINISTRATOR, _) => Some(AcademicRole::Administrator),
            (Self::UNASSIGNED, _) => Some(AcademicRole::Unassigned),
            _ => None,
        }
    }
}

/// 会话实体
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: String,
    pub user_id: i64,
    pub role: AcademicRole,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

impl Session {
    pub fn is_expired(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.expires_at <= now
    }
}

/// 新建会话（存储层）
#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: i64,
    pub role: AcademicRole,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_precedence() {
        assert_eq!(
            AcademicRole::resolve(Some(3), Some(7), true),
            AcademicRole::Student { student_id: 3 }
        );
        assert_eq!(
            AcademicRole::resolve(None, Some(7), true),
            AcademicRole::Faculty { faculty_id: 7 }
        );
        assert_eq!(
            AcademicRole::resolve(None, None, true),
            AcademicRole::Administrator
        );
        assert_eq!(
            AcademicRole::resolve(None, None, false),
            AcademicRole::Unassigned
        );
    }

    #[test]
    fn test_parts_roundtrip() {
        for role in [
            AcademicRole::Student { student_id: 1 },
            AcademicRole::Faculty { faculty_id: 2 },
            AcademicRole::Administrator,
            AcademicRole::Unassigned,
        ] {
            assert_eq!(
                AcademicRole::from_parts(role.tag(), role.profile_id()),
                Some(role)
            );
        }
    }

    #[test]
    fn test_from_parts_rejects_missing_profile() {
        assert_eq!(AcademicRole::from_parts("student", None), None);
        assert_eq!(AcademicRole::from_parts("faculty", None), None);
        assert_eq!(AcademicRole::from_parts("janitor", Some(1)), None);
    }

    #[test]
    fn test_serde_tagged_shape() {
        let json = serde_json::to_value(AcademicRole::Faculty { faculty_id: 9 }).unwrap();
        assert_eq!(json["kind"], "faculty");
        assert_eq!(json["faculty_id"], 9);
    }

    #[test]
    fn test_session_expiry() {
        let now = chrono::Utc::now();
        let session = Session {
            id: "s".into(),
            user_id: 1,
            role: AcademicRole::Unassigned,
            created_at: now,
            expires_at: now + chrono::Duration::minutes(5),
        };
        assert!(!session.is_expired(now));
        assert!(session.is_expired(now + chrono::Duration::minutes(5)));
    }
}
