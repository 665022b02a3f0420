//! EduHub - 校园管理平台后端服务
//!
//! 基于 Actix Web 构建的学校管理系统后端：作业、考勤与 AI 导师。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）
//! - `clients`: 外部服务 HTTP 客户端（AI 导师/批改、人脸识别、Cloudinary、WhatsApp）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层（含意图分类与上下文组装）
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod clients;
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
