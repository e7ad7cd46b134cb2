pub mod mark;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::{RecordsError, Result};
use crate::middlewares::SessionContext;
use crate::models::{
    ApiResponse, ErrorCode, recorders::AttendanceForm, sessions::entities::AcademicRole,
};
use crate::storage::Storage;
use crate::utils::{render_page, respond};

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 考勤录入页面
    pub async fn form(
        &self,
        session: &SessionContext,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let faculty_id = faculty_id(session)?;
        let storage = self.get_storage(request)?;
        let page = super::roster::empty_page(storage.as_ref(), faculty_id).await?;
        Ok(render_page(page, "Mark attendance"))
    }

    // 选择科目 / 提交考勤
    pub async fn submit(
        &self,
        session: &SessionContext,
        fields: HashMap<String, String>,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let faculty_id = faculty_id(session)?;
        let storage = self.get_storage(request)?;
        let form = match AttendanceForm::from_fields(fields) {
            Ok(form) => form,
            Err(e) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::AttendanceFormInvalid, e.message())));
            }
        };
        let outcome = mark::mark_attendance(storage.as_ref(), faculty_id, &form).await?;
        Ok(respond(outcome))
    }
}

fn faculty_id(session: &SessionContext) -> Result<i64> {
    match session.role {
        AcademicRole::Faculty { faculty_id } => Ok(faculty_id),
        _ => Err(RecordsError::authorization("Only faculty may record attendance")),
    }
}
