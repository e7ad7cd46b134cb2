pub mod stats;
pub mod view;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::middlewares::SessionContext;
use crate::storage::Storage;
use crate::utils::render_page;

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 按会话角色渲染仪表盘
    pub async fn dashboard(
        &self,
        session: &SessionContext,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let view = view::build_dashboard(storage.as_ref(), &session.user, session.role).await?;
        Ok(render_page(view, "Dashboard"))
    }
}
