//! 服务层测试用的内存数据库与数据构造

use crate::models::academics::entities::{Course, Faculty, Student, Subject};
use crate::models::academics::requests::{
    CreateCourseRequest, CreateFacultyRequest, CreateStudentRequest, CreateSubjectRequest,
};
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::storage::sea_orm_storage::SeaOrmStorage;

pub async fn storage() -> SeaOrmStorage {
    SeaOrmStorage::in_memory()
        .await
        .expect("in-memory storage should initialize")
}

pub async fn user(storage: &dyn Storage, username: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@example.edu"),
            password: "not-a-real-hash".to_string(),
            role,
        })
        .await
        .unwrap()
}

pub async fn course(storage: &dyn Storage, code: &str) -> Course {
    storage
        .create_course(CreateCourseRequest {
            name: format!("Course {code}"),
            code: code.to_string(),
        })
        .await
        .unwrap()
}

pub async fn subject(storage: &dyn Storage, course_id: i64, code: &str) -> Subject {
    storage
        .create_subject(CreateSubjectRequest {
            course_id,
            name: format!("Subject {code}"),
            code: code.to_string(),
        })
        .await
        .unwrap()
}

pub async fn student(storage: &dyn Storage, username: &str, course_id: i64) -> (User, Student) {
    let user = user(storage, username, UserRole::User).await;
    let student = storage
        .create_student(CreateStudentRequest {
            user_id: user.id,
            roll_no: format!("R-{username}"),
            course_id,
            year: 2,
        })
        .await
        .unwrap();
    (user, student)
}

pub async fn faculty(storage: &dyn Storage, username: &str, subjects: &[i64]) -> (User, Faculty) {
    let user = user(storage, username, UserRole::User).await;
    let faculty = storage
        .create_faculty(CreateFacultyRequest {
            user_id: user.id,
            department: "Physics".to_string(),
        })
        .await
        .unwrap();
    for &subject_id in subjects {
        storage.assign_subject(faculty.id, subject_id).await.unwrap();
    }
    (user, faculty)
}
