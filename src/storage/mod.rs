use std::sync::Arc;

use crate::models::{
    academics::{
        entities::{Attendance, Course, Faculty, Marks, Student, Subject},
        requests::{
            CreateCourseRequest, CreateFacultyRequest, CreateStudentRequest, CreateSubjectRequest,
            NewAttendance,
        },
    },
    sessions::entities::{NewSession, Session},
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 批量获取用户（名册展示用户名）
    async fn list_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 会话管理方法
    async fn create_session(&self, session: NewSession) -> Result<Session>;
    async fn get_session(&self, session_id: &str) -> Result<Option<Session>>;
    async fn delete_session(&self, session_id: &str) -> Result<bool>;
    // 清理过期会话，返回删除数量
    async fn delete_expired_sessions(&self) -> Result<u64>;

    /// 课程与科目
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, subject_id: i64) -> Result<Option<Subject>>;
    // 批量获取科目
    async fn list_subjects_by_ids(&self, ids: &[i64]) -> Result<Vec<Subject>>;

    /// 学生档案
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>>;
    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>>;
    // 课程名册，按学生 ID 升序
    async fn list_students_by_course(&self, course_id: i64) -> Result<Vec<Student>>;

    /// 教职工档案
    async fn create_faculty(&self, faculty: CreateFacultyRequest) -> Result<Faculty>;
    async fn get_faculty_by_id(&self, faculty_id: i64) -> Result<Option<Faculty>>;
    async fn get_faculty_by_user_id(&self, user_id: i64) -> Result<Option<Faculty>>;
    // 分配科目，已分配时返回 false
    async fn assign_subject(&self, faculty_id: i64, subject_id: i64) -> Result<bool>;
    // 教职工负责的科目
    async fn list_faculty_subjects(&self, faculty_id: i64) -> Result<Vec<Subject>>;

    /// 考勤
    // 总是插入新记录，不去重
    async fn create_attendance(&self, attendance: NewAttendance) -> Result<Attendance>;
    // 学生全部考勤，按日期倒序
    async fn list_attendance_by_student(&self, student_id: i64) -> Result<Vec<Attendance>>;
    // 某科目全部考勤
    async fn list_attendance_by_subject(&self, subject_id: i64) -> Result<Vec<Attendance>>;

    /// 成绩
    // 按 (学生, 科目) 更新或插入
    async fn upsert_marks(&self, student_id: i64, subject_id: i64, marks: i32) -> Result<Marks>;
    async fn list_marks_by_student(&self, student_id: i64) -> Result<Vec<Marks>>;
    async fn list_marks_by_subject(&self, subject_id: i64) -> Result<Vec<Marks>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
