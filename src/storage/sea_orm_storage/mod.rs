//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod attendances;
mod courses;
mod faculties;
mod marks;
mod sessions;
mod students;
mod users;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{RecordsError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 按给定的数据库配置连接并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Self::migrate(&db).await?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    async fn migrate(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None)
            .await
            .map_err(|e| RecordsError::database_operation(format!("数据库迁移失败: {e}")))
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| RecordsError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| RecordsError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| RecordsError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(RecordsError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 单连接内存数据库，供测试使用
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| RecordsError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .foreign_keys(true);

        // 内存库随连接销毁，必须保持唯一的常驻连接
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .map_err(|e| RecordsError::database_connection(format!("SQLite 连接失败: {e}")))?;

        let db = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);
        Self::migrate(&db).await?;
        Ok(Self { db })
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn list_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
        self.list_users_by_ids_impl(ids).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    // 会话模块
    async fn create_session(&self, session: NewSession) -> Result<Session> {
        self.create_session_impl(session).await
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<Session>> {
        self.get_session_impl(session_id).await
    }

    async fn delete_session(&self, session_id: &str) -> Result<bool> {
        self.delete_session_impl(session_id).await
    }

    async fn delete_expired_sessions(&self) -> Result<u64> {
        self.delete_expired_sessions_impl().await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(subject).await
    }

    async fn get_subject_by_id(&self, subject_id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(subject_id).await
    }

    async fn list_subjects_by_ids(&self, ids: &[i64]) -> Result<Vec<Subject>> {
        self.list_subjects_by_ids_impl(ids).await
    }

    // 学生模块
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(student_id).await
    }

    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>> {
        self.get_student_by_user_id_impl(user_id).await
    }

    async fn list_students_by_course(&self, course_id: i64) -> Result<Vec<Student>> {
        self.list_students_by_course_impl(course_id).await
    }

    // 教职工模块
    async fn create_faculty(&self, faculty: CreateFacultyRequest) -> Result<Faculty> {
        self.create_faculty_impl(faculty).await
    }

    async fn get_faculty_by_id(&self, faculty_id: i64) -> Result<Option<Faculty>> {
        self.get_faculty_by_id_impl(faculty_id).await
    }

    async fn get_faculty_by_user_id(&self, user_id: i64) -> Result<Option<Faculty>> {
        self.get_faculty_by_user_id_impl(user_id).await
    }

    async fn assign_subject(&self, faculty_id: i64, subject_id: i64) -> Result<bool> {
        self.assign_subject_impl(faculty_id, subject_id).await
    }

    async fn list_faculty_subjects(&self, faculty_id: i64) -> Result<Vec<Subject>> {
        self.list_faculty_subjects_impl(faculty_id).await
    }

    // 考勤模块
    async fn create_attendance(&self, attendance: NewAttendance) -> Result<Attendance> {
        self.create_attendance_impl(attendance).await
    }

    async fn list_attendance_by_student(&self, student_id: i64) -> Result<Vec<Attendance>> {
        self.list_attendance_by_student_impl(student_id).await
    }

    async fn list_attendance_by_subject(&self, subject_id: i64) -> Result<Vec<Attendance>> {
        self.list_attendance_by_subject_impl(subject_id).await
    }

    // 成绩模块
    async fn upsert_marks(&self, student_id: i64, subject_id: i64, marks: i32) -> Result<Marks> {
        self.upsert_marks_impl(student_id, subject_id, marks).await
    }

    async fn list_marks_by_student(&self, student_id: i64) -> Result<Vec<Marks>> {
        self.list_marks_by_student_impl(student_id).await
    }

    async fn list_marks_by_subject(&self, subject_id: i64) -> Result<Vec<Marks>> {
        self.list_marks_by_subject_impl(subject_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("academic_records.db").unwrap(),
            "sqlite://academic_records.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/records").unwrap(),
            "postgres://u:p@localhost/records"
        );
        assert!(matches!(
            SeaOrmStorage::build_database_url("records").unwrap_err(),
            RecordsError::DatabaseConfig(_)
        ));
    }
}
