//! 教务业务实体：课程、科目、学生、教职工、考勤、成绩

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub code: String,
}

// 科目，隶属于唯一课程
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct Subject {
    pub id: i64,
    pub course_id: i64,
    pub name: String,
    pub code: String,
}

// 学生档案，与用户一对一
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct Student {
    pub id: i64,
    pub user_id: i64,
    pub roll_no: String,
    pub course_id: i64,
    pub year: i32,
}

// 教职工档案，与用户一对一
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct Faculty {
    pub id: i64,
    pub user_id: i64,
    pub department: String,
}

// 考勤记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct Attendance {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub date: chrono::NaiveDate,
    // true 表示出勤
    pub status: bool,
}

// 成绩记录，(student_id, subject_id) 至多一条
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "academics.ts")]
pub struct Marks {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub marks: i32,
}
