//! 导师聊天核心流程
//!
//! REST、WebSocket 与 WhatsApp 三个入口共用：
//! 意图分类 → 上下文组装 → 外部生成（或本地模板）→ 交互落库。

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::TutorService;
use super::context::{build_parent_context, build_student_context};
use super::intent::{Classification, Intent, classify};
use crate::clients::TutorServiceClient;
use crate::clients::tutor_service::GenerateRequest;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::middlewares::RequireJWT;
use crate::models::students::entities::Student;
use crate::models::tutor::entities::ChatChannel;
use crate::models::tutor::requests::{ChatRequest, NewChatInteraction};
use crate::models::tutor::responses::ChatResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 问候的本地回答池，不走外部生成
const GREETING_RESPONSES: &[&str] = &[
    "Hello! I'm your AI tutor. How can I help you learn today?",
    "Hi there! Ready to tackle some learning together?",
    "Good to see you! What subject would you like to explore?",
    "Hello! I'm here to help you succeed. What can we work on?",
];

/// 轮换问候语的游标
static GREETING_CURSOR: AtomicUsize = AtomicUsize::new(0);

fn next_greeting() -> &'static str {
    let idx = GREETING_CURSOR.fetch_add(1, Ordering::Relaxed);
    GREETING_RESPONSES[idx % GREETING_RESPONSES.len()]
}

/// 外部生成失败时的学生侧兜底文案
const STUDENT_FALLBACK: &str =
    "I'm having trouble processing your question right now. Could you please try asking again?";

fn parent_fallback(name: &str) -> String {
    format!(
        "I'm having trouble processing your question about {name} right now. Please try again later."
    )
}

/// 聊天受众
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChatAudience {
    Student,
    Parent,
}

/// 一次聊天的结果
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub answer: String,
    pub intent: String,
    pub subject: Option<String>,
    /// 是否来自外部生成服务
    pub generated: bool,
}

/// 关键词分类，置信度不足时回退到外部分类器
async fn classify_with_fallback(question: &str) -> Classification {
    let local = classify(question);
    let threshold = AppConfig::get().ai.intent_fallback_confidence;
    if local.confidence >= threshold {
        return local;
    }

    let client = match TutorServiceClient::new() {
        Ok(client) => client,
        Err(_) => return local,
    };
    match client.classify_intent(question).await {
        Ok(remote) => {
            info!(
                "Intent fallback: '{}' -> {} ({:.2})",
                question, remote.intent, remote.confidence
            );
            match remote.intent.parse::<Intent>() {
                Ok(intent) => Classification {
                    intent,
                    confidence: remote.confidence,
                    // 学科沿用本地关键词提取，外部结果只用于意图
                    subject: local.subject,
                },
                Err(_) => local,
            }
        }
        Err(e) => {
            warn!("Intent classifier fallback failed: {}", e);
            local
        }
    }
}

/// 执行完整聊天流程并落库
pub async fn run_chat(
    storage: &Arc<dyn Storage>,
    student: &Student,
    question: &str,
    channel: ChatChannel,
    audience: ChatAudience,
) -> Result<ChatOutcome> {
    let question = question.trim();
    let classification = classify_with_fallback(question).await;
    let intent = classification.intent;

    let mut retrieved_docs = 0;
    let (answer, generated) = if intent == Intent::Greeting && audience == ChatAudience::Student {
        (next_greeting().to_string(), false)
    } else {
        let generate = async {
            let client = TutorServiceClient::new()?;
            let context = match audience {
                ChatAudience::Student => {
                    serde_json::to_value(build_student_context(storage, student).await?)?
                }
                ChatAudience::Parent => {
                    serde_json::to_value(build_parent_context(storage, student).await?)?
                }
            };
            let request = GenerateRequest {
                student_code: student.student_code.clone(),
                question: question.to_string(),
                intent: intent.as_str().to_string(),
                subject: classification.subject.map(str::to_string),
                context,
            };
            match audience {
                ChatAudience::Student => client.chat(&request).await,
                ChatAudience::Parent => client.parent_chat(&request).await,
            }
        };

        match generate.await {
            Ok(response) => {
                retrieved_docs = response.retrieved_docs.len() as i32;
                (response.answer, true)
            }
            Err(e) => {
                warn!(
                    "Tutor generation failed for student {}: {}",
                    student.student_code, e
                );
                let fallback = match audience {
                    ChatAudience::Student => STUDENT_FALLBACK.to_string(),
                    ChatAudience::Parent => parent_fallback(&student.student_code),
                };
                (fallback, false)
            }
        }
    };

    // 交互落库失败只告警，不影响回答
    let interaction = NewChatInteraction {
        student_id: student.id,
        question: question.to_string(),
        response: answer.clone(),
        intent: intent.as_str().to_string(),
        subject: classification.subject.map(str::to_string),
        channel,
        retrieved_docs,
    };
    if let Err(e) = storage.create_chat_interaction(interaction).await {
        warn!("Failed to persist chat interaction: {}", e);
    }

    Ok(ChatOutcome {
        answer,
        intent: intent.as_str().to_string(),
        subject: classification.subject.map(str::to_string),
        generated,
    })
}

/// REST 聊天入口
pub async fn handle_chat(
    service: &TutorService,
    request: &HttpRequest,
    chat_request: ChatRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    if chat_request.question.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "问题不能为空",
        )));
    }

    let student = match storage.get_student_by_code(&chat_request.student_code).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "学生不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询学生失败: {e}"),
                )),
            );
        }
    };

    // 学生只能以自己的身份聊天
    if current_user.role == UserRole::Student && student.user_id != current_user.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能使用自己的学生档案聊天",
        )));
    }

    match run_chat(
        &storage,
        &student,
        &chat_request.question,
        ChatChannel::Web,
        ChatAudience::Student,
    )
    .await
    {
        Ok(outcome) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ChatResponse {
                answer: outcome.answer,
                intent: outcome.intent,
                subject: outcome.subject,
                generated: outcome.generated,
            },
            "回答生成成功",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("聊天流程失败: {e}"),
            )),
        ),
    }
}
