pub mod chat;
pub mod context;
pub mod history;
pub mod intent;
pub mod preferences;
pub mod progress;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::UpdatePreferencesRequest;
use crate::models::tutor::requests::{ChatHistoryParams, ChatRequest};
use crate::storage::Storage;

pub struct TutorService {
    storage: Option<Arc<dyn Storage>>,
}

impl TutorService {
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

    // 导师聊天
    pub async fn chat(
        &self,
        request: &HttpRequest,
        chat_request: ChatRequest,
    ) -> ActixResult<HttpResponse> {
        chat::handle_chat(self, request, chat_request).await
    }

    // 学习进度
    pub async fn get_progress(
        &self,
        request: &HttpRequest,
        student_code: String,
    ) -> ActixResult<HttpResponse> {
        progress::handle_get_progress(self, request, student_code).await
    }

    // 获取学习偏好
    pub async fn get_preferences(
        &self,
        request: &HttpRequest,
        student_code: String,
    ) -> ActixResult<HttpResponse> {
        preferences::handle_get_preferences(self, request, student_code).await
    }

    // 更新学习偏好
    pub async fn update_preferences(
        &self,
        request: &HttpRequest,
        student_code: String,
        update_request: UpdatePreferencesRequest,
    ) -> ActixResult<HttpResponse> {
        preferences::handle_update_preferences(self, request, student_code, update_request).await
    }

    // 聊天历史
    pub async fn get_history(
        &self,
        request: &HttpRequest,
        student_code: String,
        params: ChatHistoryParams,
    ) -> ActixResult<HttpResponse> {
        history::handle_get_history(self, request, student_code, params).await
    }
}

/// 校验当前用户对学生档案的访问权（学生本人或教师/管理员）
pub(crate) async fn check_student_access(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    student_code: &str,
) -> Result<crate::models::students::entities::Student, HttpResponse> {
    use crate::middlewares::RequireJWT;
    use crate::models::users::entities::UserRole;
    use crate::models::{ApiResponse, ErrorCode};

    let Some(current_user) = RequireJWT::extract_user_claims(request) else {
        return Err(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    let student = match storage.get_student_by_code(student_code).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "学生不存在",
            )));
        }
        Err(e) => {
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询学生失败: {e}"),
                )),
            );
        }
    };

    if current_user.role == UserRole::Student && student.user_id != current_user.id {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "没有访问该学生数据的权限",
        )));
    }

    Ok(student)
}
