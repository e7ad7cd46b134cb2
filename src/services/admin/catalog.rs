//! 课程与科目目录维护

use tracing::info;

use crate::errors::{RecordsError, Result};
use crate::models::academics::{
    entities::{Course, Subject},
    requests::{CreateCourseRequest, CreateSubjectRequest},
};
use crate::storage::Storage;

const NAME_MAX_LEN: usize = 100;
const CODE_MAX_LEN: usize = 20;

pub(super) fn check_text(field: &str, value: &str, max_len: usize) -> Result<()> {
    let len = value.trim().chars().count();
    if len == 0 {
        return Err(RecordsError::validation(format!("{field} is required")));
    }
    if len > max_len {
        return Err(RecordsError::validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(())
}

pub async fn create_course(storage: &dyn Storage, req: CreateCourseRequest) -> Result<Course> {
    check_text("Course name", &req.name, NAME_MAX_LEN)?;
    check_text("Course code", &req.code, CODE_MAX_LEN)?;

    let course = storage
        .create_course(CreateCourseRequest {
            name: req.name.trim().to_string(),
            code: req.code.trim().to_string(),
        })
        .await?;
    info!("Course {} ({}) created", course.code, course.id);
    Ok(course)
}

pub async fn create_subject(storage: &dyn Storage, req: CreateSubjectRequest) -> Result<Subject> {
    check_text("Subject name", &req.name, NAME_MAX_LEN)?;
    check_text("Subject code", &req.code, CODE_MAX_LEN)?;

    if storage.get_course_by_id(req.course_id).await?.is_none() {
        return Err(RecordsError::not_found(format!(
            "Course {} not found",
            req.course_id
        )));
    }

    let subject = storage
        .create_subject(CreateSubjectRequest {
            course_id: req.course_id,
            name: req.name.trim().to_string(),
            code: req.code.trim().to_string(),
        })
        .await?;
    info!(
        "Subject {} ({}) created in course {}",
        subject.code, subject.id, subject.course_id
    );
    Ok(subject)
}
