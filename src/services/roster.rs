//! 考勤录入和成绩录入共用的科目选择与名册

use std::collections::HashMap;

use tracing::info;

use crate::errors::{RecordsError, Result};
use crate::models::{
    academics::entities::{Student, Subject},
    recorders::{RecorderPage, RosterStudent},
};
use crate::storage::Storage;

/// 科目选择的结果
pub enum SubjectSelection {
    /// 科目不在教职工的负责范围内
    NotAssigned,
    Selected {
        assigned: Vec<Subject>,
        subject: Subject,
        /// 科目所属课程的全部学生，按 ID 升序
        roster: Vec<Student>,
    },
}

/// 录入页面初始状态：教职工负责的科目，名册为空
pub async fn empty_page(storage: &dyn Storage, faculty_id: i64) -> Result<RecorderPage> {
    Ok(RecorderPage {
        subjects: storage.list_faculty_subjects(faculty_id).await?,
        students: Vec::new(),
        selected_subject: None,
    })
}

/// 校验科目并解析名册
pub async fn select_subject(
    storage: &dyn Storage,
    faculty_id: i64,
    subject_id: i64,
) -> Result<SubjectSelection> {
    let subject = storage
        .get_subject_by_id(subject_id)
        .await?
        .ok_or_else(|| RecordsError::not_found(format!("Subject {subject_id} not found")))?;

    let assigned = storage.list_faculty_subjects(faculty_id).await?;
    if !assigned.iter().any(|s| s.id == subject.id) {
        info!(
            "Faculty {} attempted to record for unassigned subject {}",
            faculty_id, subject.id
        );
        return Ok(SubjectSelection::NotAssigned);
    }

    let roster = storage.list_students_by_course(subject.course_id).await?;
    Ok(SubjectSelection::Selected {
        assigned,
        subject,
        roster,
    })
}

/// 渲染带名册的录入页面
pub async fn roster_page(
    storage: &dyn Storage,
    assigned: Vec<Subject>,
    subject: Subject,
    roster: &[Student],
) -> Result<RecorderPage> {
    let user_ids: Vec<i64> = roster.iter().map(|s| s.user_id).collect();
    let usernames: HashMap<i64, String> = storage
        .list_users_by_ids(&user_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u.username))
        .collect();

    let students = roster
        .iter()
        .map(|s| RosterStudent {
            id: s.id,
            username: usernames.get(&s.user_id).cloned().unwrap_or_default(),
            roll_no: s.roll_no.clone(),
        })
        .collect();

    Ok(RecorderPage {
        subjects: assigned,
        students,
        selected_subject: Some(subject),
    })
}
