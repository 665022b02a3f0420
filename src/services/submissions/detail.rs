use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::SubmissionService;
use crate::middlewares::RequireJWT;
use crate::models::submissions::entities::Submission;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 检查用户是否有权限访问某个提交
///
/// 提交者本人、教师与管理员可以查看。
pub(crate) async fn check_submission_access(
    storage: &Arc<dyn Storage>,
    current_user: &crate::models::users::entities::User,
    submission: &Submission,
) -> Result<(), HttpResponse> {
    // 教师和管理员直接放行
    if current_user.role != UserRole::Student {
        return Ok(());
    }

    // 学生只能查看自己的提交
    match storage.get_student_by_user_id(current_user.id).await {
        Ok(Some(student)) if student.id == submission.student_id => Ok(()),
        Ok(_) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "没有查看该提交的权限",
        ))),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询学生失败: {e}"),
            )),
        ),
    }
}

pub async fn handle_get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "提交不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询提交失败: {e}"),
                )),
            );
        }
    };

    if let Err(resp) = check_submission_access(&storage, &current_user, &submission).await {
        return Ok(resp);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "查询成功")))
}
