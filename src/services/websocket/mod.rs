/*!
 * WebSocket 实时聊天服务
 *
 * 客户端通过以下 URL 连接：
 * ```
 * ws://host/api/v1/ws/chat?token=<access_token>
 * ```
 *
 * ## 消息格式
 *
 * ### 客户端提问
 * ```json
 * {"type": "chat", "question": "explain newton's laws"}
 * ```
 *
 * ### 服务端回答
 * ```json
 * {
 *     "type": "answer",
 *     "payload": {
 *         "question": "explain newton's laws",
 *         "answer": "...",
 *         "intent": "ask_question",
 *         "subject": "physics",
 *         "generated": true
 *     }
 * }
 * ```
 *
 * ### 心跳
 * ```json
 * {"type": "ping"}
 * {"type": "pong"}
 * ```
 */

use actix_ws::Message;
use dashmap::DashMap;
use futures_util::StreamExt;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::models::students::entities::Student;
use crate::models::tutor::entities::ChatChannel;
use crate::services::tutor::chat::{ChatAudience, run_chat};
use crate::storage::Storage;

/// 全局连接管理器
static CONNECTION_MANAGER: Lazy<ConnectionManager> = Lazy::new(ConnectionManager::new);

/// WebSocket 消息类型
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    /// 客户端提问
    Chat { question: String },
    /// 服务端回答
    Answer { payload: AnswerPayload },
    /// 心跳请求
    Ping,
    /// 心跳响应
    Pong,
    /// 连接成功
    Connected { user_id: i64, student_code: String },
    /// 错误消息
    Error { message: String },
}

/// 回答载荷
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerPayload {
    pub question: String,
    pub answer: String,
    pub intent: String,
    pub subject: Option<String>,
    pub generated: bool,
}

/// 连接管理器
pub struct ConnectionManager {
    /// 用户 ID -> 广播发送器
    connections: DashMap<i64, broadcast::Sender<WsMessage>>,
}

impl ConnectionManager {
    fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// 获取全局实例
    pub fn get() -> &'static Self {
        &CONNECTION_MANAGER
    }

    /// 注册用户连接
    pub fn register(&self, user_id: i64) -> broadcast::Receiver<WsMessage> {
        let entry = self.connections.entry(user_id).or_insert_with(|| {
            let (tx, _) = broadcast::channel(100);
            tx
        });
        entry.subscribe()
    }

    /// 移除用户连接
    pub fn unregister(&self, user_id: i64) {
        // 只有当没有订阅者时才移除
        if let Some(entry) = self.connections.get(&user_id)
            && entry.receiver_count() == 0
        {
            self.connections.remove(&user_id);
        }
    }

    /// 向指定用户发送消息（同一用户的所有连接都会收到）
    pub fn send_to_user(&self, user_id: i64, message: WsMessage) -> bool {
        if let Some(sender) = self.connections.get(&user_id) {
            sender.send(message).is_ok()
        } else {
            false
        }
    }

    /// 获取在线用户数
    pub fn online_count(&self) -> usize {
        self.connections
            .iter()
            .filter(|entry| entry.receiver_count() > 0)
            .count()
    }

    /// 检查用户是否在线
    pub fn is_online(&self, user_id: i64) -> bool {
        self.connections
            .get(&user_id)
            .is_some_and(|s| s.receiver_count() > 0)
    }
}

/// WebSocket 服务
pub struct WebSocketService;

impl WebSocketService {
    /// 处理 WebSocket 聊天连接
    pub async fn handle_connection(
        user_id: i64,
        student: Student,
        storage: Arc<dyn Storage>,
        mut session: actix_ws::Session,
        mut stream: actix_ws::MessageStream,
    ) {
        info!(
            "WebSocket chat connected for user {} (student {})",
            user_id, student.student_code
        );

        // 注册连接
        let mut rx = ConnectionManager::get().register(user_id);

        // 发送连接成功消息
        let connected_msg = WsMessage::Connected {
            user_id,
            student_code: student.student_code.clone(),
        };
        if let Ok(json) = serde_json::to_string(&connected_msg) {
            let _ = session.text(json).await;
        }

        // 心跳间隔
        let heartbeat_interval = std::time::Duration::from_secs(30);
        let mut heartbeat = tokio::time::interval(heartbeat_interval);

        loop {
            tokio::select! {
                // 处理来自客户端的消息
                msg = stream.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            match serde_json::from_str::<WsMessage>(&text) {
                                Ok(WsMessage::Ping) => {
                                    let pong = serde_json::to_string(&WsMessage::Pong)
                                        .unwrap_or_else(|_| r#"{"type":"pong"}"#.to_string());
                                    if session.text(pong).await.is_err() {
                                        break;
                                    }
                                }
                                Ok(WsMessage::Chat { question }) => {
                                    Self::handle_chat_message(user_id, &student, &storage, question)
                                        .await;
                                }
                                Ok(other) => {
                                    debug!("Ignoring message from user {}: {:?}", user_id, other);
                                }
                                Err(_) => {
                                    let err = WsMessage::Error {
                                        message: "Malformed message".to_string(),
                                    };
                                    if let Ok(json) = serde_json::to_string(&err)
                                        && session.text(json).await.is_err() {
                                            break;
                                        }
                                }
                            }
                        }
                        Some(Ok(Message::Ping(data))) => {
                            if session.pong(&data).await.is_err() {
                                break;
                            }
                        }
                        Some(Ok(Message::Close(_))) | None => {
                            info!("WebSocket closed for user: {}", user_id);
                            break;
                        }
                        Some(Err(e)) => {
                            warn!("WebSocket error for user {}: {:?}", user_id, e);
                            break;
                        }
                        _ => {}
                    }
                }

                // 处理推送给该用户的消息
                msg = rx.recv() => {
                    match msg {
                        Ok(ws_msg) => {
                            if let Ok(json) = serde_json::to_string(&ws_msg)
                                && session.text(json).await.is_err() {
                                    break;
                                }
                        }
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            warn!("WebSocket for user {} lagged by {} messages", user_id, n);
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            break;
                        }
                    }
                }

                // 心跳
                _ = heartbeat.tick() => {
                    if session.ping(b"").await.is_err() {
                        break;
                    }
                }
            }
        }

        // 清理连接
        ConnectionManager::get().unregister(user_id);
        info!("WebSocket disconnected for user: {}", user_id);
    }

    /// 跑聊天流程，把回答广播给该用户的所有连接
    async fn handle_chat_message(
        user_id: i64,
        student: &Student,
        storage: &Arc<dyn Storage>,
        question: String,
    ) {
        if question.trim().is_empty() {
            ConnectionManager::get().send_to_user(
                user_id,
                WsMessage::Error {
                    message: "Question must not be empty".to_string(),
                },
            );
            return;
        }

        match run_chat(
            storage,
            student,
            &question,
            ChatChannel::Websocket,
            ChatAudience::Student,
        )
        .await
        {
            Ok(outcome) => {
                ConnectionManager::get().send_to_user(
                    user_id,
                    WsMessage::Answer {
                        payload: AnswerPayload {
                            question,
                            answer: outcome.answer,
                            intent: outcome.intent,
                            subject: outcome.subject,
                            generated: outcome.generated,
                        },
                    },
                );
            }
            Err(e) => {
                warn!("Chat flow failed over WebSocket for user {}: {}", user_id, e);
                ConnectionManager::get().send_to_user(
                    user_id,
                    WsMessage::Error {
                        message: "Failed to process your question".to_string(),
                    },
                );
            }
        }
    }
}

/// 辅助函数：检查用户是否在线
pub fn is_user_online(user_id: i64) -> bool {
    ConnectionManager::get().is_online(user_id)
}

/// 辅助函数：获取在线用户数
pub fn get_online_count() -> usize {
    ConnectionManager::get().online_count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ws_message_tagging() {
        let msg: WsMessage = serde_json::from_str(r#"{"type":"chat","question":"hi"}"#).unwrap();
        match msg {
            WsMessage::Chat { question } => assert_eq!(question, "hi"),
            other => panic!("unexpected message: {other:?}"),
        }

        let pong = serde_json::to_string(&WsMessage::Pong).unwrap();
        assert_eq!(pong, r#"{"type":"pong"}"#);
    }

    #[test]
    fn test_connection_manager_register_unregister() {
        let manager = ConnectionManager::new();
        let rx = manager.register(42);
        assert!(manager.is_online(42));
        assert_eq!(manager.online_count(), 1);

        drop(rx);
        manager.unregister(42);
        assert!(!manager.is_online(42));
        assert_eq!(manager.online_count(), 0);
    }

    #[test]
    fn test_send_to_offline_user() {
        let manager = ConnectionManager::new();
        assert!(!manager.send_to_user(7, WsMessage::Ping));
    }
}
