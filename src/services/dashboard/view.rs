//! 按角色组装仪表盘视图

use std::collections::HashMap;

use tracing::warn;

use crate::errors::Result;
use crate::models::{
    academics::entities::Subject,
    dashboard::responses::{
        AttendanceRecordView, DashboardView, FacultyDashboard, FacultyProfileView, LandingView,
        MarksRecordView, StudentDashboard, StudentProfileView,
    },
    sessions::entities::AcademicRole,
    users::entities::User,
};
use crate::storage::Storage;

use super::stats::{attendance_percentage, marks_percentage};

/// 根据会话中固定的角色组装视图
///
/// 会话引用的档案已被删除时退回未分配视图。
pub async fn build_dashboard(
    storage: &dyn Storage,
    user: &User,
    role: AcademicRole,
) -> Result<DashboardView> {
    let view = match role {
        AcademicRole::Student { student_id } => {
            student_dashboard(storage, user, student_id)
                .await?
                .map(DashboardView::Student)
        }
        AcademicRole::Faculty { faculty_id } => {
            faculty_dashboard(storage, user, faculty_id)
                .await?
                .map(DashboardView::Faculty)
        }
        AcademicRole::Administrator => Some(DashboardView::Admin(landing(user))),
        AcademicRole::Unassigned => Some(DashboardView::Unassigned(landing(user))),
    };

    Ok(view.unwrap_or_else(|| {
        warn!(
            "Profile for user {} ({}) no longer exists, showing unassigned view",
            user.id,
            role.tag()
        );
        DashboardView::Unassigned(landing(user))
    }))
}

fn landing(user: &User) -> LandingView {
    LandingView {
        username: user.username.clone(),
    }
}

async fn student_dashboard(
    storage: &dyn Storage,
    user: &User,
    student_id: i64,
) -> Result<Option<StudentDashboard>> {
    let Some(student) = storage.get_student_by_id(student_id).await? else {
        return Ok(None);
    };
    let Some(course) = storage.get_course_by_id(student.course_id).await? else {
        return Ok(None);
    };

    let attendance = storage.list_attendance_by_student(student.id).await?;
    let marks = storage.list_marks_by_student(student.id).await?;

    // 一次性取出记录涉及的科目
    let mut subject_ids: Vec<i64> = attendance
        .iter()
        .map(|a| a.subject_id)
        .chain(marks.iter().map(|m| m.subject_id))
        .collect();
    subject_ids.sort_unstable();
    subject_ids.dedup();
    let subjects: HashMap<i64, Subject> = storage
        .list_subjects_by_ids(&subject_ids)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    let attendance_records = attendance
        .iter()
        .filter_map(|a| {
            subjects.get(&a.subject_id).map(|subject| AttendanceRecordView {
                id: a.id,
                subject: subject.clone(),
                date: a.date,
                status: a.status,
            })
        })
        .collect();

    let marks_records = marks
        .iter()
        .filter_map(|m| {
            subjects.get(&m.subject_id).map(|subject| MarksRecordView {
                id: m.id,
                subject: subject.clone(),
                marks: m.marks,
            })
        })
        .collect();

    Ok(Some(StudentDashboard {
        student: StudentProfileView {
            id: student.id,
            username: user.username.clone(),
            roll_no: student.roll_no,
            year: student.year,
            course,
        },
        attendance_records,
        marks_records,
        attendance_percentage: attendance_percentage(&attendance),
        marks_percentage: marks_percentage(&marks),
    }))
}

async fn faculty_dashboard(
    storage: &dyn Storage,
    user: &User,
    faculty_id: i64,
) -> Result<Option<FacultyDashboard>> {
    let Some(faculty) = storage.get_faculty_by_id(faculty_id).await? else {
        return Ok(None);
    };
    let subjects = storage.list_faculty_subjects(faculty.id).await?;

    Ok(Some(FacultyDashboard {
        faculty: FacultyProfileView {
            id: faculty.id,
            username: user.username.clone(),
            department: faculty.department,
        },
        subjects,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::academics::requests::NewAttendance;
    use crate::models::users::entities::UserRole;
    use crate::services::test_support;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[tokio::test]
    async fn test_student_dashboard_two_present_one_absent() {
        let storage = test_support::storage().await;
        let course = test_support::course(&storage, "CS").await;
        let subject = test_support::subject(&storage, course.id, "CS101").await;
        let (user, student) = test_support::student(&storage, "stu", course.id).await;

        for (d, status) in [(1, true), (3, false), (2, true)] {
            storage
                .create_attendance(NewAttendance {
                    student_id: student.id,
                    subject_id: subject.id,
                    date: day(d),
                    status,
                })
                .await
                .unwrap();
        }

        let view = build_dashboard(
            &storage,
            &user,
            AcademicRole::Student {
                student_id: student.id,
            },
        )
        .await
        .unwrap();

        let DashboardView::Student(dashboard) = view else {
            panic!("expected student view");
        };
        assert_eq!(dashboard.attendance_percentage, 66.67);
        assert_eq!(dashboard.marks_percentage, 0.0);
        assert!(dashboard.marks_records.is_empty());
        assert_eq!(dashboard.student.username, "stu");
        assert_eq!(dashboard.student.course, course);

        let dates: Vec<NaiveDate> = dashboard.attendance_records.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![day(3), day(2), day(1)]);
        assert!(dashboard
            .attendance_records
            .iter()
            .all(|r| r.subject == subject));
    }

    #[tokio::test]
    async fn test_student_dashboard_marks_average() {
        let storage = test_support::storage().await;
        let course = test_support::course(&storage, "CS").await;
        let a = test_support::subject(&storage, course.id, "CS101").await;
        let b = test_support::subject(&storage, course.id, "CS102").await;
        let (user, student) = test_support::student(&storage, "stu", course.id).await;

        storage.upsert_marks(student.id, a.id, 80).await.unwrap();
        storage.upsert_marks(student.id, b.id, 91).await.unwrap();

        let view = build_dashboard(
            &storage,
            &user,
            AcademicRole::Student {
                student_id: student.id,
            },
        )
        .await
        .unwrap();

        let DashboardView::Student(dashboard) = view else {
            panic!("expected student view");
        };
        assert_eq!(dashboard.marks_percentage, 85.5);
        assert_eq!(dashboard.marks_records.len(), 2);
        assert_eq!(dashboard.attendance_percentage, 0.0);
    }

    #[tokio::test]
    async fn test_faculty_dashboard_lists_assigned_subjects() {
        let storage = test_support::storage().await;
        let course = test_support::course(&storage, "CS").await;
        let x = test_support::subject(&storage, course.id, "X").await;
        let _y = test_support::subject(&storage, course.id, "Y").await;
        let (user, faculty) = test_support::faculty(&storage, "fac", &[x.id]).await;

        let view = build_dashboard(
            &storage,
            &user,
            AcademicRole::Faculty {
                faculty_id: faculty.id,
            },
        )
        .await
        .unwrap();

        let DashboardView::Faculty(dashboard) = view else {
            panic!("expected faculty view");
        };
        assert_eq!(dashboard.subjects, vec![x]);
        assert_eq!(dashboard.faculty.department, "Physics");
    }

    #[tokio::test]
    async fn test_admin_and_unassigned_landing() {
        let storage = test_support::storage().await;
        let admin = test_support::user(&storage, "root", UserRole::Admin).await;

        let view = build_dashboard(&storage, &admin, AcademicRole::Administrator)
            .await
            .unwrap();
        assert!(matches!(view, DashboardView::Admin(ref l) if l.username == "root"));

        let view = build_dashboard(&storage, &admin, AcademicRole::Unassigned)
            .await
            .unwrap();
        assert!(matches!(view, DashboardView::Unassigned(_)));
    }

    #[tokio::test]
    async fn test_missing_profile_falls_back_to_unassigned() {
        let storage = test_support::storage().await;
        let user = test_support::user(&storage, "ghost", UserRole::User).await;

        let view = build_dashboard(&storage, &user, AcademicRole::Student { student_id: 999 })
            .await
            .unwrap();
        assert!(matches!(view, DashboardView::Unassigned(_)));
    }
}
