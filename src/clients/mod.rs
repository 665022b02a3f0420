//! 外部服务 HTTP 客户端
//!
//! 所有 AI 能力（生成、检索、人脸识别）与第三方平台（Cloudinary、
//! WhatsApp Graph API）都是 HTTP 协作方。客户端只做编解码和超时控制，
//! 不做重试与熔断。

pub mod cloudinary;
pub mod correction_service;
pub mod face_service;
pub mod tutor_service;
pub mod whatsapp;

pub use cloudinary::CloudinaryClient;
pub use correction_service::CorrectionServiceClient;
pub use face_service::FaceServiceClient;
pub use tutor_service::TutorServiceClient;
pub use whatsapp::WhatsAppClient;

use std::time::Duration;

use crate::errors::{EduHubError, Result};

/// 构建带超时的 reqwest 客户端
pub(crate) fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(format!(
            "{}/{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ))
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| EduHubError::http_client(format!("构建 HTTP 客户端失败: {e}")))
}
