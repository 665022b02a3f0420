use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{EduHubError, Result};
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::{Answer, Submission},
        requests::SubmissionListQuery,
        responses::SubmissionListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

fn answers_to_json(answers: &[Answer]) -> Result<String> {
    serde_json::to_string(answers)
        .map_err(|e| EduHubError::serialization(format!("序列化作答失败: {e}")))
}

impl SeaOrmStorage {
    /// 提交作业（重复提交覆盖原答案，保留首次提交时间）
    pub async fn upsert_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        answers: Vec<Answer>,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();
        let answers_json = answers_to_json(&answers)?;

        let existing = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询提交失败: {e}")))?;

        let result = match existing {
            Some(model) => {
                let mut active: ActiveModel = model.into();
                active.answers = Set(answers_json);
                // 重新提交使既有评分失效
                active.total_score = Set(None);
                active.overall_feedback = Set(None);
                active.updated_at = Set(now);
                active
                    .update(&self.db)
                    .await
                    .map_err(|e| EduHubError::database_operation(format!("更新提交失败: {e}")))?
            }
            None => {
                let active = ActiveModel {
                    assignment_id: Set(assignment_id),
                    student_id: Set(student_id),
                    answers: Set(answers_json),
                    submitted_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                active
                    .insert(&self.db)
                    .await
                    .map_err(|e| EduHubError::database_operation(format!("创建提交失败: {e}")))?
            }
        };

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 获取某学生对某作业的提交
    pub async fn get_submission_by_assignment_and_student_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 分页列出提交
    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Submissions::find();

        if let Some(assignment_id) = query.assignment_id {
            select = select.filter(Column::AssignmentId.eq(assignment_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        select = select.order_by_desc(Column::SubmittedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询提交总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询提交页数失败: {e}")))?;
        let submissions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(SubmissionListResponse {
            items: submissions
                .into_iter()
                .map(|m| m.into_submission())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 学生最近的提交
    pub async fn list_recent_submissions_by_student_impl(
        &self,
        student_id: i64,
        limit: u64,
    ) -> Result<Vec<Submission>> {
        let submissions = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::SubmittedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询最近提交失败: {e}")))?;

        Ok(submissions
            .into_iter()
            .map(|m| m.into_submission())
            .collect())
    }

    /// 写回批改结果
    pub async fn update_submission_evaluation_impl(
        &self,
        id: i64,
        answers: Vec<Answer>,
        total_score: Option<f64>,
        overall_feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        let Some(existing) = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询提交失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.answers = Set(answers_to_json(&answers)?);
        model.total_score = Set(total_score);
        model.overall_feedback = Set(overall_feedback);
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("写回批改结果失败: {e}")))?;

        Ok(Some(result.into_submission()))
    }
}
