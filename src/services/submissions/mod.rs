pub mod detail;
pub mod evaluate;
pub mod list;
pub mod r#override;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::requests::{
    OverrideAnswerRequest, SubmissionListParams, SubmitAssignmentRequest,
};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 提交作业
    pub async fn submit_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        submit_request: SubmitAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        submit::handle_submit_assignment(self, request, assignment_id, submit_request).await
    }

    // 列出提交
    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        params: SubmissionListParams,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_submissions(self, request, params).await
    }

    // 获取提交详情
    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::handle_get_submission(self, request, submission_id).await
    }

    // AI 批改
    pub async fn evaluate_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        evaluate::handle_evaluate_submission(self, request, submission_id).await
    }

    // 教师覆盖单题评分
    pub async fn override_answer(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        override_request: OverrideAnswerRequest,
    ) -> ActixResult<HttpResponse> {
        r#override::handle_override_answer(self, request, submission_id, override_request).await
    }
}
