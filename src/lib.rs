//! Academic Records - 基于角色的教务记录系统后端服务
//!
//! 基于 Actix Web 构建，覆盖课程、科目、学生、教师档案以及考勤和成绩录入。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 会话与角色中间件
//! - `models`: 数据模型定义
//! - `routes`: 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
