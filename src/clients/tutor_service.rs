//! AI 导师服务客户端
//!
//! 对接外部 FastAPI 微服务：意图分类（LLM 兜底）、RAG 检索与回答生成。
//! 上下文由本服务组装后随请求下发。

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::errors::{EduHubError, Result};

/// 生成请求（/chat 与 /parent-chat 共用）
#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    pub student_code: String,
    pub question: String,
    pub intent: String,
    pub subject: Option<String>,
    /// 组装好的学生/家长上下文
    pub context: serde_json::Value,
}

/// 生成响应
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub answer: String,
    #[serde(default)]
    pub retrieved_docs: Vec<String>,
}

/// 意图分类响应
#[derive(Debug, Deserialize)]
pub struct IntentClassification {
    pub intent: String,
    pub confidence: f32,
    pub subject: Option<String>,
}

/// 健康检查响应
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

pub struct TutorServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl TutorServiceClient {
    pub fn new() -> Result<Self> {
        let config = AppConfig::get();
        Ok(Self {
            client: super::build_http_client(config.ai.timeout)?,
            base_url: config.ai.tutor_url.trim_end_matches('/').to_string(),
        })
    }

    /// 学生问答生成
    pub async fn chat(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        self.post_json("/chat", request).await
    }

    /// 家长问答生成
    pub async fn parent_chat(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        self.post_json("/parent-chat", request).await
    }

    /// LLM 意图分类（关键词匹配置信度不足时的兜底）
    pub async fn classify_intent(&self, message: &str) -> Result<IntentClassification> {
        let body = serde_json::json!({ "message": message });
        self.post_json("/classify-intent", &body).await
    }

    /// 健康检查
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| EduHubError::http_client(format!("导师服务不可达: {e}")))?;

        if !response.status().is_success() {
            return Err(EduHubError::external_service(format!(
                "导师服务健康检查失败: HTTP {}",
                response.status()
            )));
        }

        response
            .json::<HealthResponse>()
            .await
            .map_err(|e| EduHubError::serialization(format!("解析健康检查响应失败: {e}")))
    }

    async fn post_json<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| EduHubError::http_client(format!("请求导师服务失败: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(EduHubError::external_service(format!(
                "导师服务返回 HTTP {status}: {detail}"
            )));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| EduHubError::serialization(format!("解析导师服务响应失败: {e}")))
    }
}
