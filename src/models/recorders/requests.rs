//! 考勤 / 成绩录入表单
//!
//! 每个学生的字段以学生 ID 为键名，因此这里直接从原始表单字段解析，
//! 而不是依赖固定结构的反序列化。

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::errors::{RecordsError, Result};

pub const SUBJECT_FIELD: &str = "subject";
pub const ATTENDANCE_DATE_FIELD: &str = "attendance_date";
/// 复选框选中时提交的值
pub const PRESENT_MARKER: &str = "on";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_subject_id(fields: &HashMap<String, String>) -> Result<i64> {
    let raw = fields
        .get(SUBJECT_FIELD)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| RecordsError::validation("Subject is required"))?;

    raw.parse::<i64>()
        .map_err(|_| RecordsError::validation(format!("Invalid subject id: {raw}")))
}

/// 考勤表单
#[derive(Debug, Clone)]
pub struct AttendanceForm {
    pub subject_id: i64,
    fields: HashMap<String, String>,
}

impl AttendanceForm {
    pub fn from_fields(fields: HashMap<String, String>) -> Result<Self> {
        let subject_id = parse_subject_id(&fields)?;
        Ok(Self { subject_id, fields })
    }

    /// 考勤日期，存在时表示本次请求为提交
    ///
    /// 在科目校验通过后才解析，格式错误返回 DateParse。
    pub fn date(&self) -> Result<Option<NaiveDate>> {
        match self.fields.get(ATTENDANCE_DATE_FIELD).map(|s| s.trim()) {
            Some(raw) if !raw.is_empty() => {
                Ok(Some(NaiveDate::parse_from_str(raw, DATE_FORMAT)?))
            }
            _ => Ok(None),
        }
    }

    /// 学生是否出勤：仅当字段值为 "on" 时视为出勤
    pub fn is_present(&self, student_id: i64) -> bool {
        self.fields
            .get(&student_id.to_string())
            .is_some_and(|v| v == PRESENT_MARKER)
    }
}

/// 成绩表单
#[derive(Debug, Clone)]
pub struct MarksForm {
    pub subject_id: i64,
    fields: HashMap<String, String>,
}

impl MarksForm {
    pub fn from_fields(fields: HashMap<String, String>) -> Result<Self> {
        let subject_id = parse_subject_id(&fields)?;
        Ok(Self { subject_id, fields })
    }

    /// 学生提交的成绩原文，空白视为未提交
    pub fn raw_value(&self, student_id: i64) -> Option<&str> {
        self.fields
            .get(&student_id.to_string())
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// 按名册顺序收集已提交的成绩
    ///
    /// 任意一个值不是整数时整体失败，此时不应写入任何记录。
    pub fn scores_for(&self, student_ids: &[i64]) -> Result<Vec<(i64, i32)>> {
        let mut scores = Vec::new();
        for &student_id in student_ids {
            if let Some(raw) = self.raw_value(student_id) {
                let value = raw.parse::<i32>().map_err(|_| {
                    RecordsError::validation(format!(
                        "Invalid marks for student {student_id}: {raw}"
                    ))
                })?;
                scores.push((student_id, value));
            }
        }
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_attendance_selection_without_date() {
        let form = AttendanceForm::from_fields(fields(&[("subject", "4")])).unwrap();
        assert_eq!(form.subject_id, 4);
        assert!(form.date().unwrap().is_none());
    }

    #[test]
    fn test_attendance_empty_date_is_selection() {
        let form =
            AttendanceForm::from_fields(fields(&[("subject", "4"), ("attendance_date", "")]))
                .unwrap();
        assert!(form.date().unwrap().is_none());
    }

    #[test]
    fn test_attendance_submission_flags() {
        let form = AttendanceForm::from_fields(fields(&[
            ("subject", "4"),
            ("attendance_date", "2024-03-15"),
            ("10", "on"),
            ("11", "off"),
        ]))
        .unwrap();
        assert_eq!(form.date().unwrap(), NaiveDate::from_ymd_opt(2024, 3, 15));
        assert!(form.is_present(10));
        assert!(!form.is_present(11));
        assert!(!form.is_present(12));
    }

    #[test]
    fn test_attendance_bad_date() {
        let form = AttendanceForm::from_fields(fields(&[
            ("subject", "4"),
            ("attendance_date", "15/03/2024"),
        ]))
        .unwrap();
        let err = form.date().unwrap_err();
        assert!(matches!(err, RecordsError::DateParse(_)));
    }

    #[test]
    fn test_missing_or_bad_subject() {
        assert!(matches!(
            AttendanceForm::from_fields(fields(&[])).unwrap_err(),
            RecordsError::Validation(_)
        ));
        assert!(matches!(
            MarksForm::from_fields(fields(&[("subject", "abc")])).unwrap_err(),
            RecordsError::Validation(_)
        ));
    }

    #[test]
    fn test_marks_scores_skip_blank() {
        let form = MarksForm::from_fields(fields(&[
            ("subject", "2"),
            ("1", "87"),
            ("2", ""),
            ("3", "  "),
            ("4", " 45 "),
            ("99", "100"),
        ]))
        .unwrap();
        let scores = form.scores_for(&[1, 2, 3, 4]).unwrap();
        assert_eq!(scores, vec![(1, 87), (4, 45)]);
    }

    #[test]
    fn test_marks_scores_reject_non_numeric() {
        let form = MarksForm::from_fields(fields(&[("subject", "2"), ("1", "A+")])).unwrap();
        assert!(matches!(
            form.scores_for(&[1]).unwrap_err(),
            RecordsError::Validation(_)
        ));
    }
}
