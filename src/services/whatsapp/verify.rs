//! Webhook 验证握手
//!
//! Meta 在配置 webhook 时发 GET 请求，带 hub.mode / hub.verify_token /
//! hub.challenge 三个参数；验证通过须原样返回 challenge 明文。

use actix_web::{HttpResponse, Result as ActixResult};
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::AppConfig;

#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

pub async fn handle_verify(params: VerifyParams) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();

    let mode_ok = params.mode.as_deref() == Some("subscribe");
    let token_ok = params.verify_token.as_deref() == Some(config.whatsapp.verify_token.as_str());

    if mode_ok && token_ok {
        let challenge = params.challenge.unwrap_or_default();
        info!("WhatsApp webhook verified");
        Ok(HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(challenge))
    } else {
        warn!("WhatsApp webhook verification failed");
        Ok(HttpResponse::Forbidden().finish())
    }
}
