//! 考勤存储操作

use super::SeaOrmStorage;
use crate::entity::attendances::{ActiveModel, Column, Entity as Attendances};
use crate::errors::{RecordsError, Result};
use crate::models::academics::{entities::Attendance, requests::NewAttendance};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 插入一条考勤记录
    pub async fn create_attendance_impl(&self, req: NewAttendance) -> Result<Attendance> {
        let model = ActiveModel {
            student_id: Set(req.student_id),
            subject_id: Set(req.subject_id),
            date: Set(req.date),
            status: Set(req.status),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("创建考勤记录失败: {e}")))?;

        Ok(result.into_attendance())
    }

    /// 学生的全部考勤，日期倒序
    pub async fn list_attendance_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Attendance>> {
        let result = Attendances::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::Date)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询考勤记录失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_attendance()).collect())
    }

    /// 科目的全部考勤
    pub async fn list_attendance_by_subject_impl(
        &self,
        subject_id: i64,
    ) -> Result<Vec<Attendance>> {
        let result = Attendances::find()
            .filter(Column::SubjectId.eq(subject_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询考勤记录失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_attendance()).collect())
    }
}
