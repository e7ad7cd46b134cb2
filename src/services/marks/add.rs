use tracing::info;

use crate::errors::Result;
use crate::models::{
    PageOutcome, RedirectTarget,
    recorders::{MarksForm, RecorderPage},
};
use crate::services::roster::{SubjectSelection, roster_page, select_subject};
use crate::storage::Storage;

/// 成绩录入
///
/// 名册中至少一个学生填写了成绩才视为提交；每个填写的值按 (学生, 科目) 更新或插入，
/// 未填写的学生保持不变。任一值不是整数时不写入任何记录。
pub async fn add_marks(
    storage: &dyn Storage,
    faculty_id: i64,
    form: &MarksForm,
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

    let student_ids: Vec<i64> = roster.iter().map(|s| s.id).collect();
    let scores = form.scores_for(&student_ids)?;

    if scores.is_empty() {
        let page = roster_page(storage, assigned, subject, &roster).await?;
        return Ok(PageOutcome::Render(page));
    }

    for &(student_id, value) in &scores {
        storage.upsert_marks(student_id, subject.id, value).await?;
    }

    info!(
        "Faculty {} saved marks for {} students in subject {}",
        faculty_id,
        scores.len(),
        subject.id
    );
    Ok(PageOutcome::Redirect(RedirectTarget::Dashboard))
}
