//! Webhook 消息处理
//!
//! 发送方号码对应某个学生的家长电话时，走家长聊天流程并回信；
//! 未知号码回固定提示。无论处理结果如何都回 200，避免 Meta 重试风暴。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::WhatsAppService;
use crate::clients::WhatsAppClient;
use crate::clients::whatsapp::WebhookPayload;
use crate::models::tutor::entities::ChatChannel;
use crate::services::tutor::chat::{ChatAudience, run_chat};

const UNKNOWN_SENDER_REPLY: &str =
    "Sorry, this number is not linked to any student. Please contact the school to register your phone number.";

pub async fn handle_ingest(
    service: &WhatsAppService,
    request: &HttpRequest,
    payload: WebhookPayload,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let messages = payload.text_messages();
    if messages.is_empty() {
        // 状态回执等非文本推送直接确认
        return Ok(HttpResponse::Ok().finish());
    }

    let client = match WhatsAppClient::new() {
        Ok(client) => client,
        Err(e) => {
            warn!("WhatsApp client unavailable: {}", e);
            return Ok(HttpResponse::Ok().finish());
        }
    };

    for (from, body) in messages {
        let student = match storage.get_student_by_parent_phone(from).await {
            Ok(Some(student)) => student,
            Ok(None) => {
                info!("WhatsApp message from unregistered number: {}", from);
                if let Err(e) = client.send_text(from, UNKNOWN_SENDER_REPLY).await {
                    warn!("Failed to reply to unregistered number {}: {}", from, e);
                }
                continue;
            }
            Err(e) => {
                warn!("Failed to look up parent phone {}: {}", from, e);
                continue;
            }
        };

        let outcome = match run_chat(
            &storage,
            &student,
            body,
            ChatChannel::Whatsapp,
            ChatAudience::Parent,
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(
                    "Parent chat flow failed for student {}: {}",
                    student.student_code, e
                );
                continue;
            }
        };

        if let Err(e) = client.send_text(from, &outcome.answer).await {
            warn!("Failed to send WhatsApp reply to {}: {}", from, e);
        } else {
            info!(
                "WhatsApp reply sent to {} (student {}, intent {})",
                from, student.student_code, outcome.intent
            );
        }
    }

    // Meta 只关心 200
    Ok(HttpResponse::Ok().finish())
}
