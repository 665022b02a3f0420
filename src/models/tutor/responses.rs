use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::pagination::PaginationInfo;
use crate::models::tutor::entities::ChatInteraction;

/// 导师聊天响应
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/tutor.ts")]
pub struct ChatResponse {
    pub answer: String,
    pub intent: String,
    pub subject: Option<String>,
    /// 回答是否来自外部生成服务（false 表示本地模板/回退文案）
    pub generated: bool,
}

/// 聊天历史响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/tutor.ts")]
pub struct ChatHistoryResponse {
    pub items: Vec<ChatInteraction>,
    pub pagination: PaginationInfo,
}

/// 学科维度的进度统计
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/tutor.ts")]
pub struct SubjectProgress {
    pub subject: String,
    pub questions_asked: i64,
    pub average_score: Option<f64>,
}

/// 学生学习进度响应
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/tutor.ts")]
pub struct ProgressResponse {
    pub student_code: String,
    pub grade_level: String,
    pub learning_style: String,
    pub total_interactions: i64,
    pub subjects: Vec<SubjectProgress>,
    pub academic_summary: String,
}

/// 学习偏好响应
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/tutor.ts")]
pub struct PreferencesResponse {
    pub student_code: String,
    pub learning_style: String,
    pub subjects: Vec<String>,
}
