use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;

/// 导师聊天请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/tutor.ts")]
pub struct ChatRequest {
    pub student_code: String,
    pub question: String,
}

/// 聊天历史查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/tutor.ts")]
pub struct ChatHistoryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}

// 存储层的写入参数（内部使用，不进出 HTTP）
#[derive(Debug, Clone)]
pub struct NewChatInteraction {
    pub student_id: i64,
    pub question: String,
    pub response: String,
    pub intent: String,
    pub subject: Option<String>,
    pub channel: crate::models::tutor::entities::ChatChannel,
    pub retrieved_docs: i32,
}
