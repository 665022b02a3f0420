use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use crate::models::assignments::entities::Question;
use crate::models::common::pagination::PaginationQuery;

/// 创建作业请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub subject: String,
    pub topic: Option<String>,
    pub class_level: String,
    pub questions: Vec<Question>,
    pub due_date: Option<DateTime<Utc>>, // ISO 8601 格式，如 "2026-08-01T12:00:00Z"
}

/// 更新作业请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub topic: Option<String>,
    pub class_level: Option<String>,
    pub questions: Option<Vec<Question>>,
    pub due_date: Option<DateTime<Utc>>, // ISO 8601 格式
}

/// 作业列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub subject: Option<String>,
    pub class_level: Option<String>,
    pub teacher_id: Option<i64>,
    pub search: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct AssignmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub subject: Option<String>,
    pub class_level: Option<String>,
    pub teacher_id: Option<i64>,
    pub search: Option<String>,
}

impl From<AssignmentListParams> for AssignmentListQuery {
    fn from(p: AssignmentListParams) -> Self {
        Self {
            page: Some(p.pagination.page),
            size: Some(p.pagination.size),
            subject: p.subject,
            class_level: p.class_level,
            teacher_id: p.teacher_id,
            search: p.search,
        }
    }
}
