use super::SeaOrmStorage;
use crate::entity::chat_interactions::{ActiveModel, Column, Entity as ChatInteractions};
use crate::errors::{EduHubError, Result};
use crate::models::{
    PaginationInfo,
    tutor::{
        entities::ChatInteraction, requests::NewChatInteraction, responses::ChatHistoryResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 保存一次聊天交互
    pub async fn create_chat_interaction_impl(
        &self,
        interaction: NewChatInteraction,
    ) -> Result<ChatInteraction> {
        let model = ActiveModel {
            student_id: Set(interaction.student_id),
            question: Set(interaction.question),
            response: Set(interaction.response),
            intent: Set(interaction.intent),
            subject: Set(interaction.subject),
            channel: Set(interaction.channel.to_string()),
            retrieved_docs: Set(interaction.retrieved_docs),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("保存聊天交互失败: {e}")))?;

        Ok(result.into_chat_interaction())
    }

    /// 分页列出学生的聊天历史（按时间倒序）
    pub async fn list_chat_interactions_with_pagination_impl(
        &self,
        student_id: i64,
        page: u64,
        size: u64,
    ) -> Result<ChatHistoryResponse> {
        let page = page.max(1);
        let size = size.clamp(1, 100);

        let paginator = ChatInteractions::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::CreatedAt)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询聊天总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询聊天页数失败: {e}")))?;
        let interactions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询聊天历史失败: {e}")))?;

        Ok(ChatHistoryResponse {
            items: interactions
                .into_iter()
                .map(|m| m.into_chat_interaction())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 学生最近的聊天交互
    pub async fn list_recent_chat_interactions_impl(
        &self,
        student_id: i64,
        limit: u64,
    ) -> Result<Vec<ChatInteraction>> {
        let interactions = ChatInteractions::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询最近聊天失败: {e}")))?;

        Ok(interactions
            .into_iter()
            .map(|m| m.into_chat_interaction())
            .collect())
    }

    /// 按学科统计学生的提问次数
    pub async fn count_chat_interactions_by_subject_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<(Option<String>, i64)>> {
        let rows: Vec<(Option<String>, i64)> = ChatInteractions::find()
            .select_only()
            .column(Column::Subject)
            .column_as(Column::Id.count(), "count")
            .filter(Column::StudentId.eq(student_id))
            .group_by(Column::Subject)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("统计学科提问失败: {e}")))?;

        Ok(rows)
    }

    /// 学生的聊天交互总数
    pub async fn count_chat_interactions_impl(&self, student_id: i64) -> Result<i64> {
        let count = ChatInteractions::find()
            .filter(Column::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("统计聊天总数失败: {e}")))?;

        Ok(count as i64)
    }
}
