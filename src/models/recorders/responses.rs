use serde::Serialize;
use ts_rs::TS;

use crate::models::academics::entities::Subject;

// 名册中的学生
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "recorders.ts")]
pub struct RosterStudent {
    pub id: i64,
    pub username: String,
    pub roll_no: String,
}

// 考勤录入 / 成绩录入页面
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "recorders.ts")]
pub struct RecorderPage {
    /// 当前教职工负责的全部科目
    pub subjects: Vec<Subject>,
    /// 选中科目所属课程的学生名册，未选择科目时为空
    pub students: Vec<RosterStudent>,
    pub selected_subject: Option<Subject>,
}
