use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 作业题目（questions JSON 列的元素）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Question {
    pub text: String,
    /// 参考答案，学生端响应中不返回
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_answer: Option<String>,
    pub max_score: Option<f64>,
}

// 作业实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub subject: String,
    pub topic: Option<String>,
    pub class_level: String,
    pub questions: Vec<Question>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    /// 学生视角：隐去参考答案
    pub fn without_expected_answers(mut self) -> Self {
        for q in &mut self.questions {
            q.expected_answer = None;
        }
        self
    }
}
