//! AI 批改服务客户端
//!
//! 将提交的问答对送外部批改服务评分，返回逐题分数与反馈。

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::errors::{EduHubError, Result};

/// 待批改的问答对
#[derive(Debug, Serialize)]
pub struct EvaluationPair {
    pub question: String,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_answer: Option<String>,
}

/// 批改请求
#[derive(Debug, Serialize)]
pub struct EvaluateAssignmentRequest {
    pub pairs: Vec<EvaluationPair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_info: Option<StudentInfo>,
}

/// 学生背景信息（用于个性化评语）
#[derive(Debug, Serialize)]
pub struct StudentInfo {
    pub student_id: String,
    pub name: String,
    pub grade_level: String,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_style: Option<String>,
}

/// 单题批改结果
#[derive(Debug, Deserialize)]
pub struct AnswerEvaluation {
    pub question_number: usize,
    pub is_correct: bool,
    /// 0-10 分
    pub score: f64,
    pub feedback: String,
    pub confidence: String,
}

/// 批改响应
#[derive(Debug, Deserialize)]
pub struct EvaluateAssignmentResponse {
    pub evaluations: Vec<AnswerEvaluation>,
    pub overall_feedback: String,
    #[serde(default)]
    pub personalized_advice: Option<String>,
}

pub struct CorrectionServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl CorrectionServiceClient {
    pub fn new() -> Result<Self> {
        let config = AppConfig::get();
        Ok(Self {
            client: super::build_http_client(config.ai.timeout)?,
            base_url: config.ai.correction_url.trim_end_matches('/').to_string(),
        })
    }

    /// 批改一份提交
    pub async fn evaluate_assignment(
        &self,
        request: &EvaluateAssignmentRequest,
    ) -> Result<EvaluateAssignmentResponse> {
        let url = format!("{}/evaluate-assignment", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| EduHubError::http_client(format!("请求批改服务失败: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(EduHubError::external_service(format!(
                "批改服务返回 HTTP {status}: {detail}"
            )));
        }

        response
            .json::<EvaluateAssignmentResponse>()
            .await
            .map_err(|e| EduHubError::serialization(format!("解析批改服务响应失败: {e}")))
    }
}
