pub mod add;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::{RecordsError, Result};
use crate::middlewares::SessionContext;
use crate::models::{
    ApiResponse, ErrorCode, recorders::MarksForm, sessions::entities::AcademicRole,
};
use crate::storage::Storage;
use crate::utils::{render_page, respond};

pub struct MarksService {
    storage: Option<Arc<dyn Storage>>,
}

impl MarksService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 成绩录入页面
    pub async fn form(
        &self,
        session: &SessionContext,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let faculty_id = faculty_id(session)?;
        let storage = self.get_storage(request)?;
        let page = super::roster::empty_page(storage.as_ref(), faculty_id).await?;
        Ok(render_page(page, "Add marks"))
    }

    // 选择科目 / 提交成绩
    pub async fn submit(
        &self,
        session: &SessionContext,
        fields: HashMap<String, String>,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let faculty_id = faculty_id(session)?;
        let storage = self.get_storage(request)?;
        let form = match MarksForm::from_fields(fields) {
            Ok(form) => form,
            Err(e) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::MarksFormInvalid, e.message())));
            }
        };
        let outcome = add::add_marks(storage.as_ref(), faculty_id, &form).await?;
        Ok(respond(outcome))
    }
}

fn faculty_id(session: &SessionContext) -> Result<i64> {
    match session.role {
        AcademicRole::Faculty { faculty_id } => Ok(faculty_id),
        _ => Err(RecordsError::authorization("Only faculty may add marks")),
    }
}
