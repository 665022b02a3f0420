use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    teacher_id: i64,
    create_request: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if create_request.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "作业标题不能为空",
        )));
    }
    if create_request.questions.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "作业至少需要一道题目",
        )));
    }

    match storage.create_assignment(teacher_id, create_request).await {
        Ok(assignment) => {
            tracing::info!(
                "Assignment '{}' created by teacher {}",
                assignment.title,
                teacher_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(assignment, "作业创建成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建作业失败: {e}"),
            )),
        ),
    }
}
