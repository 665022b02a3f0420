use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TutorService, check_student_access};
use crate::models::tutor::requests::ChatHistoryParams;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_get_history(
    service: &TutorService,
    request: &HttpRequest,
    student_code: String,
    params: ChatHistoryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match check_student_access(&storage, request, &student_code).await {
        Ok(student) => student,
        Err(resp) => return Ok(resp),
    };

    let page = params.pagination.page.max(1) as u64;
    let size = params.pagination.size.clamp(1, 100) as u64;

    match storage
        .list_chat_interactions_with_pagination(student.id, page, size)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询聊天历史失败: {e}"),
            )),
        ),
    }
}
