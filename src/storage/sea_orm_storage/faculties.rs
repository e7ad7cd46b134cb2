//! 教职工档案与科目分配存储操作

use super::SeaOrmStorage;
use crate::entity::faculties::{ActiveModel, Column, Entity as Faculties};
use crate::entity::faculty_subjects::{
    ActiveModel as FacultySubjectActiveModel, Column as FacultySubjectColumn,
    Entity as FacultySubjects,
};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::errors::{RecordsError, Result};
use crate::models::academics::{
    entities::{Faculty, Subject},
    requests::CreateFacultyRequest,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

impl SeaOrmStorage {
    /// 创建教职工档案
    pub async fn create_faculty_impl(&self, req: CreateFacultyRequest) -> Result<Faculty> {
        let model = ActiveModel {
            user_id: Set(req.user_id),
            department: Set(req.department),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("创建教职工档案失败: {e}")))?;

        Ok(result.into_faculty())
    }

    /// 通过 ID 获取教职工
    pub async fn get_faculty_by_id_impl(&self, faculty_id: i64) -> Result<Option<Faculty>> {
        let result = Faculties::find_by_id(faculty_id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询教职工失败: {e}")))?;

        Ok(result.map(|m| m.into_faculty()))
    }

    /// 通过用户 ID 获取教职工
    pub async fn get_faculty_by_user_id_impl(&self, user_id: i64) -> Result<Option<Faculty>> {
        let result = Faculties::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询教职工失败: {e}")))?;

        Ok(result.map(|m| m.into_faculty()))
    }

    /// 为教职工分配科目，已分配时不重复插入
    pub async fn assign_subject_impl(&self, faculty_id: i64, subject_id: i64) -> Result<bool> {
        let existing = FacultySubjects::find()
            .filter(
                Condition::all()
                    .add(FacultySubjectColumn::FacultyId.eq(faculty_id))
                    .add(FacultySubjectColumn::SubjectId.eq(subject_id)),
            )
            .count(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询科目分配失败: {e}")))?;

        if existing > 0 {
            return Ok(false);
        }

        let model = FacultySubjectActiveModel {
            faculty_id: Set(faculty_id),
            subject_id: Set(subject_id),
            ..Default::default()
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("分配科目失败: {e}")))?;

        Ok(true)
    }

    /// 列出教职工负责的科目
    pub async fn list_faculty_subjects_impl(&self, faculty_id: i64) -> Result<Vec<Subject>> {
        let result = Subjects::find()
            .join(
                JoinType::InnerJoin,
                crate::entity::subjects::Relation::FacultySubjects.def(),
            )
            .filter(FacultySubjectColumn::FacultyId.eq(faculty_id))
            .order_by_asc(SubjectColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询教职工科目失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_subject()).collect())
    }
}
