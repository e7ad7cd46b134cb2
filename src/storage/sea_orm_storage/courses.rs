//! 课程与科目存储操作

use super::SeaOrmStorage;
use crate::entity::courses::{ActiveModel as CourseActiveModel, Entity as Courses};
use crate::entity::subjects::{ActiveModel as SubjectActiveModel, Column, Entity as Subjects};
use crate::errors::{RecordsError, Result};
use crate::models::academics::{
    entities::{Course, Subject},
    requests::{CreateCourseRequest, CreateSubjectRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let model = CourseActiveModel {
            name: Set(req.name),
            code: Set(req.code),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 创建科目
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let model = SubjectActiveModel {
            course_id: Set(req.course_id),
            name: Set(req.name),
            code: Set(req.code),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("创建科目失败: {e}")))?;

        Ok(result.into_subject())
    }

    /// 通过 ID 获取科目
    pub async fn get_subject_by_id_impl(&self, subject_id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(subject_id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 批量获取科目
    pub async fn list_subjects_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Subject>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Subjects::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("批量查询科目失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_subject()).collect())
    }
}
