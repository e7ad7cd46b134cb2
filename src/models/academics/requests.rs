use serde::Deserialize;
use ts_rs::TS;

// 创建课程
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct CreateCourseRequest {
    pub name: String,
    pub code: String,
}

// 创建科目
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct CreateSubjectRequest {
    pub course_id: i64,
    pub name: String,
    pub code: String,
}

// 为已有账号建立学生档案
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct CreateStudentRequest {
    pub user_id: i64,
    pub roll_no: String,
    pub course_id: i64,
    pub year: i32,
}

// 为已有账号建立教职工档案
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct CreateFacultyRequest {
    pub user_id: i64,
    pub department: String,
}

// 给教职工分配科目
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct AssignSubjectRequest {
    pub subject_id: i64,
}

// 新增一条考勤（存储层）
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub student_id: i64,
    pub subject_id: i64,
    pub date: chrono::NaiveDate,
    pub status: bool,
}
