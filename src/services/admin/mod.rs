pub mod catalog;
pub mod profiles;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::academics::requests::{
    AssignSubjectRequest, CreateCourseRequest, CreateFacultyRequest, CreateStudentRequest,
    CreateSubjectRequest,
};
use crate::storage::Storage;

pub struct AdminService {
    storage: Option<Arc<dyn Storage>>,
}

impl AdminService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Result<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 创建课程
    pub async fn create_course(
        &self,
        req: CreateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let course = catalog::create_course(storage.as_ref(), req).await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(course, "Course created")))
    }

    // 创建科目
    pub async fn create_subject(
        &self,
        req: CreateSubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let subject = catalog::create_subject(storage.as_ref(), req).await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(subject, "Subject created")))
    }

    // 建立学生档案
    pub async fn create_student(
        &self,
        req: CreateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let student = profiles::provision_student(storage.as_ref(), req).await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(
            student,
            "Student profile created",
        )))
    }

    // 建立教职工档案
    pub async fn create_faculty(
        &self,
        req: CreateFacultyRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let faculty = profiles::provision_faculty(storage.as_ref(), req).await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(
            faculty,
            "Faculty profile created",
        )))
    }

    // 为教职工分配科目
    pub async fn assign_subject(
        &self,
        faculty_id: i64,
        req: AssignSubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let subjects =
            profiles::assign_subject(storage.as_ref(), faculty_id, req.subject_id).await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(subjects, "Subject assigned")))
    }
}
