use tracing::info;

use crate::errors::Result;
use crate::models::{
    PageOutcome, RedirectTarget,
    academics::requests::NewAttendance,
    recorders::{AttendanceForm, RecorderPage},
};
use crate::services::roster::{SubjectSelection, roster_page, select_subject};
use crate::storage::Storage;

/// 考勤录入
///
/// 未带日期时渲染名册，带日期时为名册中每个学生各插入一条记录后跳转到仪表盘。
/// 同一天重复提交会产生重复记录。
pub async fn mark_attendance(
    storage: &dyn Storage,
    faculty_id: i64,
    form: &AttendanceForm,
) -> Result<PageOutcome<RecorderPage>> {
    let (assigned, subject, roster) =
        match select_subject(storage, faculty_id, form.subject_id).await? {
            SubjectSelection::NotAssigned => {
                return Ok(PageOutcome::Redirect(RedirectTarget::Dashboard));
            }
            SubjectSelection::Selected {
                assigned,
                subject,
                roster,
            } => (assigned, subject, roster),
        };

    let Some(date) = form.date()? else {
        let page = roster_page(storage, assigned, subject, &roster).await?;
        return Ok(PageOutcome::Render(page));
    };

    for student in &roster {
        storage
            .create_attendance(NewAttendance {
                student_id: student.id,
                subject_id: subject.id,
                date,
                status: form.is_present(student.id),
            })
            .await?;
    }

    info!(
        "Faculty {} recorded attendance for {} students in subject {} on {}",
        faculty_id,
        roster.len(),
        subject.id,
        date
    );
    Ok(PageOutcome::Redirect(RedirectTarget::Dashboard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RecordsError;
    use crate::services::test_support;
    use std::collections::HashMap;

    fn form(pairs: &[(&str, &str)]) -> AttendanceForm {
        let fields: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AttendanceForm::from_fields(fields).unwrap()
    }

    #[tokio::test]
    async fn test_selection_renders_course_roster() {
        let storage = test_support::storage().await;
        let cs = test_support::course(&storage, "CS").await;
        let ee = test_support::course(&storage, "EE").await;
        let subject = test_support::subject(&storage, cs.id, "CS101").await;
        let (_, s1) = test_support::student(&storage, "ann", cs.id).await;
        let (_, s2) = test_support::student(&storage, "ben", cs.id).await;
        let _other = test_support::student(&storage, "eve", ee.id).await;
        let (_, faculty) = test_support::faculty(&storage, "fac", &[subject.id]).await;

        let sid = subject.id.to_string();
        let selection = form(&[("subject", sid.as_str())]);
        let outcome = mark_attendance(&storage, faculty.id, &selection)
            .await
            .unwrap();

        let PageOutcome::Render(page) = outcome else {
            panic!("expected roster page");
        };
        let ids: Vec<i64> = page.students.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![s1.id, s2.id]);
        assert_eq!(page.students[0].username, "ann");
        assert_eq!(page.selected_subject, Some(subject.clone()));
        assert_eq!(page.subjects, vec![subject.clone()]);
        assert!(
            storage
                .list_attendance_by_subject(subject.id)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_submission_records_every_roster_student() {
        let storage = test_support::storage().await;
        let cs = test_support::course(&storage, "CS").await;
        let subject = test_support::subject(&storage, cs.id, "CS101").await;
        let (_, present) = test_support::student(&storage, "ann", cs.id).await;
        let (_, absent) = test_support::student(&storage, "ben", cs.id).await;
        let (_, odd) = test_support::student(&storage, "cal", cs.id).await;
        let (_, faculty) = test_support::faculty(&storage, "fac", &[subject.id]).await;

        let sid = subject.id.to_string();
        let present_key = present.id.to_string();
        let odd_key = odd.id.to_string();
        let outcome = mark_attendance(
            &storage,
            faculty.id,
            &form(&[
                ("subject", sid.as_str()),
                ("attendance_date", "2024-03-15"),
                (present_key.as_str(), "on"),
                (odd_key.as_str(), "yes"),
            ]),
        )
        .await
        .unwrap();
        assert!(outcome.is_redirect_to(RedirectTarget::Dashboard));

        let records = storage.list_attendance_by_subject(subject.id).await.unwrap();
        assert_eq!(records.len(), 3);
        let status: HashMap<i64, bool> =
            records.iter().map(|r| (r.student_id, r.status)).collect();
        assert!(status[&present.id]);
        assert!(!status[&absent.id]);
        assert!(!status[&odd.id]);
        assert!(records.iter().all(|r| r.date.to_string() == "2024-03-15"));
    }

    #[tokio::test]
    async fn test_resubmission_duplicates_records() {
        let storage = test_support::storage().await;
        let cs = test_support::course(&storage, "CS").await;
        let subject = test_support::subject(&storage, cs.id, "CS101").await;
        let (_, student) = test_support::student(&storage, "ann", cs.id).await;
        let (_, faculty) = test_support::faculty(&storage, "fac", &[subject.id]).await;

        let sid = subject.id.to_string();
        let key = student.id.to_string();
        let submission = form(&[
            ("subject", sid.as_str()),
            ("attendance_date", "2024-03-15"),
            (key.as_str(), "on"),
        ]);
        mark_attendance(&storage, faculty.id, &submission).await.unwrap();
        mark_attendance(&storage, faculty.id, &submission).await.unwrap();

        let records = storage.list_attendance_by_student(student.id).await.unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_unassigned_subject_redirects_without_writing() {
        let storage = test_support::storage().await;
        let cs = test_support::course(&storage, "CS").await;
        let x = test_support::subject(&storage, cs.id, "X").await;
        let y = test_support::subject(&storage, cs.id, "Y").await;
        let (_, student) = test_support::student(&storage, "ann", cs.id).await;
        let (_, faculty) = test_support::faculty(&storage, "fac", &[x.id]).await;

        let yid = y.id.to_string();
        let key = student.id.to_string();
        for date in ["2024-03-15", "not-a-date", ""] {
            let outcome = mark_attendance(
                &storage,
                faculty.id,
                &form(&[
                    ("subject", yid.as_str()),
                    ("attendance_date", date),
                    (key.as_str(), "on"),
                ]),
            )
            .await
            .unwrap();
            assert!(outcome.is_redirect_to(RedirectTarget::Dashboard));
        }

        assert!(
            storage
                .list_attendance_by_subject(y.id)
                .await
                .unwrap()
                .is_empty()
        );
        assert!(
            storage
                .list_attendance_by_student(student.id)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_unknown_subject_and_bad_date() {
        let storage = test_support::storage().await;
        let cs = test_support::course(&storage, "CS").await;
        let subject = test_support::subject(&storage, cs.id, "CS101").await;
        let (_, faculty) = test_support::faculty(&storage, "fac", &[subject.id]).await;

        let err = mark_attendance(&storage, faculty.id, &form(&[("subject", "9999")]))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordsError::NotFound(_)));

        let sid = subject.id.to_string();
        let err = mark_attendance(
            &storage,
            faculty.id,
            &form(&[("subject", sid.as_str()), ("attendance_date", "2024-02-30")]),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RecordsError::DateParse(_)));
    }
}
