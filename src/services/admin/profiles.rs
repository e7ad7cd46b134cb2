//! 学生 / 教职工档案开通与科目分配
//!
//! 角色在登录时解析，档案变更在用户下次登录后生效。

use tracing::info;

use crate::errors::{RecordsError, Result};
use crate::models::academics::{
    entities::{Faculty, Student, Subject},
    requests::{CreateFacultyRequest, CreateStudentRequest},
};
use crate::storage::Storage;

use super::catalog::check_text;

// 一个账号最多拥有一个档案
async fn ensure_no_profile(storage: &dyn Storage, user_id: i64) -> Result<()> {
    if storage.get_user_by_id(user_id).await?.is_none() {
        return Err(RecordsError::not_found(format!("User {user_id} not found")));
    }
    if storage.get_student_by_user_id(user_id).await?.is_some()
        || storage.get_faculty_by_user_id(user_id).await?.is_some()
    {
        return Err(RecordsError::conflict(format!(
            "User {user_id} already has a profile"
        )));
    }
    Ok(())
}

pub async fn provision_student(
    storage: &dyn Storage,
    req: CreateStudentRequest,
) -> Result<Student> {
    check_text("Roll number", &req.roll_no, 20)?;
    if req.year < 1 {
        return Err(RecordsError::validation("Year must be a positive number"));
    }
    ensure_no_profile(storage, req.user_id).await?;
    if storage.get_course_by_id(req.course_id).await?.is_none() {
        return Err(RecordsError::not_found(format!(
            "Course {} not found",
            req.course_id
        )));
    }

    let student = storage
        .create_student(CreateStudentRequest {
            roll_no: req.roll_no.trim().to_string(),
            ..req
        })
        .await?;
    info!(
        "Student profile {} created for user {}",
        student.id, student.user_id
    );
    Ok(student)
}

pub async fn provision_faculty(
    storage: &dyn Storage,
    req: CreateFacultyRequest,
) -> Result<Faculty> {
    check_text("Department", &req.department, 100)?;
    ensure_no_profile(storage, req.user_id).await?;

    let faculty = storage
        .create_faculty(CreateFacultyRequest {
            user_id: req.user_id,
            department: req.department.trim().to_string(),
        })
        .await?;
    info!(
        "Faculty profile {} created for user {}",
        faculty.id, faculty.user_id
    );
    Ok(faculty)
}

/// 分配科目（幂等），返回分配后的全部科目
pub async fn assign_subject(
    storage: &dyn Storage,
    faculty_id: i64,
    subject_id: i64,
) -> Result<Vec<Subject>> {
    if storage.get_faculty_by_id(faculty_id).await?.is_none() {
        return Err(RecordsError::not_found(format!(
            "Faculty {faculty_id} not found"
        )));
    }
    if storage.get_subject_by_id(subject_id).await?.is_none() {
        return Err(RecordsError::not_found(format!(
            "Subject {subject_id} not found"
        )));
    }

    if storage.assign_subject(faculty_id, subject_id).await? {
        info!("Subject {} assigned to faculty {}", subject_id, faculty_id);
    }
    storage.list_faculty_subjects(faculty_id).await
}
