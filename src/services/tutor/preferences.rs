use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TutorService, check_student_access};
use crate::models::students::requests::{UpdatePreferencesRequest, UpdateStudentRequest};
use crate::models::tutor::responses::PreferencesResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_get_preferences(
    service: &TutorService,
    request: &HttpRequest,
    student_code: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match check_student_access(&storage, request, &student_code).await {
        Ok(student) => student,
        Err(resp) => return Ok(resp),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        PreferencesResponse {
            student_code,
            learning_style: student.learning_style,
            subjects: student.subjects,
        },
        "查询成功",
    )))
}

pub async fn handle_update_preferences(
    service: &TutorService,
    request: &HttpRequest,
    student_code: String,
    update_request: UpdatePreferencesRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match check_student_access(&storage, request, &student_code).await {
        Ok(student) => student,
        Err(resp) => return Ok(resp),
    };

    let update = UpdateStudentRequest {
        grade_level: None,
        subjects: update_request.subjects,
        learning_style: update_request.learning_style,
        interests: None,
        academic_history: None,
        parent_name: None,
        parent_phone: None,
    };

    match storage.update_student(student.id, update).await {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PreferencesResponse {
                student_code,
                learning_style: updated.learning_style,
                subjects: updated.subjects,
            },
            "偏好更新成功",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "学生不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新偏好失败: {e}"),
            )),
        ),
    }
}
