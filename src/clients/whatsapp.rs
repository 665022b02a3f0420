//! WhatsApp Business (Meta Graph API) 客户端
//!
//! 发送文本消息，并定义 webhook 推送的载荷结构。

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::errors::{EduHubError, Result};

// ------------------------------
// 发送消息
// ------------------------------

#[derive(Debug, Serialize)]
struct SendTextPayload<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    message_type: &'static str,
    text: TextBody<'a>,
}

#[derive(Debug, Serialize)]
struct TextBody<'a> {
    body: &'a str,
}

/// 发送结果（只取消息 ID）
#[derive(Debug, Deserialize)]
pub struct SendMessageResponse {
    #[serde(default)]
    pub messages: Vec<SentMessage>,
}

#[derive(Debug, Deserialize)]
pub struct SentMessage {
    pub id: String,
}

pub struct WhatsAppClient {
    client: reqwest::Client,
    messages_url: String,
    access_token: String,
}

impl WhatsAppClient {
    pub fn new() -> Result<Self> {
        let config = AppConfig::get();
        Ok(Self {
            client: super::build_http_client(config.whatsapp.timeout)?,
            messages_url: format!(
                "{}/{}/messages",
                config.whatsapp.graph_api_base.trim_end_matches('/'),
                config.whatsapp.phone_number_id
            ),
            access_token: config.whatsapp.access_token.clone(),
        })
    }

    /// 发送文本消息给指定号码
    pub async fn send_text(&self, to: &str, body: &str) -> Result<SendMessageResponse> {
        let payload = SendTextPayload {
            messaging_product: "whatsapp",
            to,
            message_type: "text",
            text: TextBody { body },
        };

        let response = self
            .client
            .post(&self.messages_url)
            .bearer_auth(&self.access_token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| EduHubError::http_client(format!("发送 WhatsApp 消息失败: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(EduHubError::external_service(format!(
                "Graph API 返回 HTTP {status}: {detail}"
            )));
        }

        response
            .json::<SendMessageResponse>()
            .await
            .map_err(|e| EduHubError::serialization(format!("解析 Graph API 响应失败: {e}")))
    }
}

// ------------------------------
// Webhook 载荷（Meta 推送格式）
// ------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub entry: Vec<WebhookEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEntry {
    #[serde(default)]
    pub changes: Vec<WebhookChange>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookChange {
    pub value: WebhookValue,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookValue {
    #[serde(default)]
    pub messages: Vec<IncomingMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    /// 发送者号码（E.164 无加号）
    pub from: String,
    pub id: String,
    #[serde(rename = "type")]
    pub message_type: String,
    pub text: Option<IncomingText>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncomingText {
    pub body: String,
}

impl WebhookPayload {
    /// 展平出所有文本消息 (from, body)
    pub fn text_messages(&self) -> Vec<(&str, &str)> {
        self.entry
            .iter()
            .flat_map(|e| &e.changes)
            .flat_map(|c| &c.value.messages)
            .filter(|m| m.message_type == "text")
            .filter_map(|m| {
                m.text
                    .as_ref()
                    .map(|t| (m.from.as_str(), t.body.as_str()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_webhook_payload() {
        let raw = r#"{
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "1",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "messages": [{
                            "from": "8615500000000",
                            "id": "wamid.xxx",
                            "timestamp": "1754000000",
                            "type": "text",
                            "text": { "body": "How is my child doing?" }
                        }]
                    }
                }]
            }]
        }"#;

        let payload: WebhookPayload = serde_json::from_str(raw).unwrap();
        let messages = payload.text_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, "8615500000000");
        assert_eq!(messages[0].1, "How is my child doing?");
    }

    #[test]
    fn test_non_text_messages_are_skipped() {
        let raw = r#"{
            "entry": [{
                "changes": [{
                    "value": {
                        "messages": [{
                            "from": "8615500000000",
                            "id": "wamid.yyy",
                            "type": "image"
                        }]
                    }
                }]
            }]
        }"#;

        let payload: WebhookPayload = serde_json::from_str(raw).unwrap();
        assert!(payload.text_messages().is_empty());
    }

    #[test]
    fn test_status_only_payload() {
        // 状态回执没有 messages 字段
        let raw = r#"{"entry": [{"changes": [{"value": {}}]}]}"#;
        let payload: WebhookPayload = serde_json::from_str(raw).unwrap();
        assert!(payload.text_messages().is_empty());
    }
}
