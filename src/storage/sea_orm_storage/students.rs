//! 学生档案存储操作

use super::SeaOrmStorage;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{RecordsError, Result};
use crate::models::academics::{entities::Student, requests::CreateStudentRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建学生档案
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let model = ActiveModel {
            user_id: Set(req.user_id),
            roll_no: Set(req.roll_no),
            course_id: Set(req.course_id),
            year: Set(req.year),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("创建学生档案失败: {e}")))?;

        Ok(result.into_student())
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, student_id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(student_id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 通过用户 ID 获取学生
    pub async fn get_student_by_user_id_impl(&self, user_id: i64) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 列出课程下的全部学生
    pub async fn list_students_by_course_impl(&self, course_id: i64) -> Result<Vec<Student>> {
        let result = Students::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询课程名册失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_student()).collect())
    }
}
