//! 学生仪表盘的汇总统计

use crate::models::academics::entities::{Attendance, Marks};

// 保留两位小数，恰好落在中点时取偶数
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// 出勤率：100 * 出勤数 / 总数，无记录时为 0
pub fn attendance_percentage(records: &[Attendance]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let present = records.iter().filter(|r| r.status).count();
    round2(100.0 * present as f64 / records.len() as f64)
}

/// 平均成绩，无记录时为 0
pub fn marks_percentage(records: &[Marks]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let total: i64 = records.iter().map(|r| r.marks as i64).sum();
    round2(total as f64 / records.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn attendance(id: i64, status: bool) -> Attendance {
        Attendance {
            id,
            student_id: 1,
            subject_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 3, id as u32).unwrap(),
            status,
        }
    }

    fn marks(subject_id: i64, value: i32) -> Marks {
        Marks {
            id: subject_id,
            student_id: 1,
            subject_id,
            marks: value,
        }
    }

    #[test]
    fn test_empty_records_are_zero() {
        assert_eq!(attendance_percentage(&[]), 0.0);
        assert_eq!(marks_percentage(&[]), 0.0);
    }

    #[test]
    fn test_two_of_three_present() {
        let records = [attendance(1, true), attendance(2, false), attendance(3, true)];
        assert_eq!(attendance_percentage(&records), 66.67);
    }

    #[test]
    fn test_attendance_order_invariant() {
        let forward = [
            attendance(1, true),
            attendance(2, false),
            attendance(3, false),
            attendance(4, true),
            attendance(5, true),
            attendance(6, true),
            attendance(7, false),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();
        let mut rotated = forward.clone();
        rotated.rotate_left(3);

        let expected = round2(100.0 * 4.0 / 7.0);
        assert_eq!(attendance_percentage(&forward), expected);
        assert_eq!(attendance_percentage(&reversed), expected);
        assert_eq!(attendance_percentage(&rotated), expected);
    }

    #[test]
    fn test_marks_mean() {
        assert_eq!(marks_percentage(&[marks(1, 80), marks(2, 91)]), 85.5);
        assert_eq!(marks_percentage(&[marks(1, 70), marks(2, 70), marks(3, 71)]), 70.33);
    }

    #[test]
    fn test_marks_mean_midpoint_rounds_to_even() {
        // 561 / 8 = 70.125
        let records: Vec<Marks> = (1..=8)
            .map(|subject_id| marks(subject_id, if subject_id == 8 { 71 } else { 70 }))
            .collect();
        assert_eq!(marks_percentage(&records), 70.12);

        // 563 / 8 = 70.375
        let records: Vec<Marks> = (1..=8)
            .map(|subject_id| marks(subject_id, if subject_id <= 3 { 71 } else { 70 }))
            .collect();
        assert_eq!(marks_percentage(&records), 70.38);
    }
}
