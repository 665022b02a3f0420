//! Cloudinary 图片托管客户端
//!
//! 使用 unsigned upload preset 上传，避免在本服务持有签名密钥。

use serde::Deserialize;

use crate::config::AppConfig;
use crate::errors::{EduHubError, Result};

/// 上传响应（只取用到的字段）
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub secure_url: String,
    pub public_id: String,
    #[serde(default)]
    pub bytes: u64,
}

pub struct CloudinaryClient {
    client: reqwest::Client,
    upload_url: String,
    upload_preset: String,
    folder: String,
}

impl CloudinaryClient {
    pub fn new() -> Result<Self> {
        let config = AppConfig::get();
        Ok(Self {
            client: super::build_http_client(config.cloudinary.timeout)?,
            upload_url: format!(
                "https://api.cloudinary.com/v1_1/{}/image/upload",
                config.cloudinary.cloud_name
            ),
            upload_preset: config.cloudinary.upload_preset.clone(),
            folder: config.cloudinary.folder.clone(),
        })
    }

    /// 上传一张图片，返回可公开访问的 URL
    pub async fn upload_image(
        &self,
        data: Vec<u8>,
        file_name: &str,
        mime: &str,
    ) -> Result<UploadResponse> {
        let part = reqwest::multipart::Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .map_err(|e| EduHubError::validation(format!("无效的 MIME 类型: {e}")))?;

        let form = reqwest::multipart::Form::new()
            .text("upload_preset", self.upload_preset.clone())
            .text("folder", self.folder.clone())
            .part("file", part);

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| EduHubError::http_client(format!("上传图片失败: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(EduHubError::external_service(format!(
                "Cloudinary 返回 HTTP {status}: {detail}"
            )));
        }

        response
            .json::<UploadResponse>()
            .await
            .map_err(|e| EduHubError::serialization(format!("解析上传响应失败: {e}")))
    }
}
