//! 人脸识别服务客户端
//!
//! 人脸检测与特征比对由外部服务完成，这里只传图片 URL。

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::errors::{EduHubError, Result};

#[derive(Debug, Serialize)]
struct ImageUrlPayload<'a> {
    image_url: &'a str,
}

/// /encode 响应：单张人脸的特征向量
#[derive(Debug, Deserialize)]
pub struct EncodeResponse {
    pub status: String,
    pub embedding: Vec<f64>,
}

/// /recognize 响应：识别出的学号列表
#[derive(Debug, Deserialize)]
pub struct RecognizeResponse {
    pub status: String,
    pub recognized_students: Vec<String>,
    pub count: usize,
}

pub struct FaceServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl FaceServiceClient {
    pub fn new() -> Result<Self> {
        let config = AppConfig::get();
        Ok(Self {
            client: super::build_http_client(config.face.timeout)?,
            base_url: config.face.url.trim_end_matches('/').to_string(),
        })
    }

    /// 提取单张人脸特征（学生照片录入）
    ///
    /// 服务端要求照片中恰好一张人脸，否则返回 400。
    pub async fn encode(&self, image_url: &str) -> Result<EncodeResponse> {
        self.post_json("/encode", &ImageUrlPayload { image_url })
            .await
    }

    /// 识别课堂合照中的学生（拍照点名）
    pub async fn recognize(&self, image_url: &str) -> Result<RecognizeResponse> {
        self.post_json("/recognize", &ImageUrlPayload { image_url })
            .await
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
            .map_err(|e| EduHubError::http_client(format!("请求人脸服务失败: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(EduHubError::external_service(format!(
                "人脸服务返回 HTTP {status}: {detail}"
            )));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| EduHubError::serialization(format!("解析人脸服务响应失败: {e}")))
    }
}
