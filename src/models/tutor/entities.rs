use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 聊天渠道
#[derive(Debug, Clone, Copy, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/tutor.ts")]
pub enum ChatChannel {
    Web,       // REST 接口
    Websocket, // WebSocket 实时聊天
    Whatsapp,  // 家长 WhatsApp
}

impl std::fmt::Display for ChatChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatChannel::Web => write!(f, "web"),
            ChatChannel::Websocket => write!(f, "websocket"),
            ChatChannel::Whatsapp => write!(f, "whatsapp"),
        }
    }
}

impl std::str::FromStr for ChatChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "web" => Ok(ChatChannel::Web),
            "websocket" => Ok(ChatChannel::Websocket),
            "whatsapp" => Ok(ChatChannel::Whatsapp),
            _ => Err(format!("Invalid chat channel: {s}")),
        }
    }
}

impl<'de> Deserialize<'de> for ChatChannel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// 聊天交互实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/tutor.ts")]
pub struct ChatInteraction {
    pub id: i64,
    pub student_id: i64,
    pub question: String,
    pub response: String,
    pub intent: String,
    pub subject: Option<String>,
    pub channel: ChatChannel,
    /// 外部服务检索到的文档数
    pub retrieved_docs: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
