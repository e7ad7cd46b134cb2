//! 成绩存储操作

use super::SeaOrmStorage;
use crate::entity::marks::{ActiveModel, Column, Entity as MarksEntity};
use crate::errors::{RecordsError, Result};
use crate::models::academics::entities::Marks;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 按 (学生, 科目) 更新成绩，不存在时插入
    pub async fn upsert_marks_impl(
        &self,
        student_id: i64,
        subject_id: i64,
        marks: i32,
    ) -> Result<Marks> {
        let existing = MarksEntity::find()
            .filter(
                Condition::all()
                    .add(Column::StudentId.eq(student_id))
                    .add(Column::SubjectId.eq(subject_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询成绩失败: {e}")))?;

        let result = match existing {
            Some(model) => {
                let mut active: ActiveModel = model.into();
                active.marks = Set(marks);
                active
                    .update(&self.db)
                    .await
                    .map_err(|e| RecordsError::database_operation(format!("更新成绩失败: {e}")))?
            }
            None => ActiveModel {
                student_id: Set(student_id),
                subject_id: Set(subject_id),
                marks: Set(marks),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("创建成绩失败: {e}")))?,
        };

        Ok(result.into_marks())
    }

    /// 学生的全部成绩
    pub async fn list_marks_by_student_impl(&self, student_id: i64) -> Result<Vec<Marks>> {
        let result = MarksEntity::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::SubjectId)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_marks()).collect())
    }

    /// 科目的全部成绩
    pub async fn list_marks_by_subject_impl(&self, subject_id: i64) -> Result<Vec<Marks>> {
        let result = MarksEntity::find()
            .filter(Column::SubjectId.eq(subject_id))
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_marks()).collect())
    }
}
