//! 各角色仪表盘的视图数据

use serde::Serialize;
use ts_rs::TS;

use crate::models::academics::entities::{Course, Subject};

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct StudentProfileView {
    pub id: i64,
    pub username: String,
    pub roll_no: String,
    pub year: i32,
    pub course: Course,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct AttendanceRecordView {
    pub id: i64,
    pub subject: Subject,
    pub date: chrono::NaiveDate,
    pub status: bool,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct MarksRecordView {
    pub id: i64,
    pub subject: Subject,
    pub marks: i32,
}

// 学生仪表盘
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct StudentDashboard {
    pub student: StudentProfileView,
    /// 按日期倒序
    pub attendance_records: Vec<AttendanceRecordView>,
    pub marks_records: Vec<MarksRecordView>,
    pub attendance_percentage: f64,
    pub marks_percentage: f64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct FacultyProfileView {
    pub id: i64,
    pub username: String,
    pub department: String,
}

// 教职工仪表盘
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct FacultyDashboard {
    pub faculty: FacultyProfileView,
    pub subjects: Vec<Subject>,
}

// 管理员首页 / 未分配角色占位页
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct LandingView {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[serde(tag = "view", rename_all = "snake_case")]
#[ts(export, export_to = "dashboard.ts")]
pub enum DashboardView {
    Student(StudentDashboard),
    Faculty(FacultyDashboard),
    Admin(LandingView),
    Unassigned(LandingView),
}
