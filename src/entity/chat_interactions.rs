//! 聊天交互实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "chat_interactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    #[sea_orm(column_type = "Text")]
    pub question: String,
    #[sea_orm(column_type = "Text")]
    pub response: String,
    pub intent: String,
    pub subject: Option<String>,
    pub channel: String,
    pub retrieved_docs: i32,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_chat_interaction(self) -> crate::models::tutor::entities::ChatInteraction {
        use crate::models::tutor::entities::{ChatChannel, ChatInteraction};
        use chrono::{DateTime, Utc};

        ChatInteraction {
            id: self.id,
            student_id: self.student_id,
            question: self.question,
            response: self.response,
            intent: self.intent,
            subject: self.subject,
            channel: self
                .channel
                .parse::<ChatChannel>()
                .unwrap_or(ChatChannel::Web),
            retrieved_docs: self.retrieved_docs,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
