use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::RequireJWT;
use crate::models::submissions::entities::Answer;
use crate::models::submissions::requests::SubmitAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_submit_assignment(
    service: &SubmissionService,
    request: &HttpRequest,
    assignment_id: i64,
    submit_request: SubmitAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    // 提交者必须有学生档案
    let student = match storage.get_student_by_user_id(current_user.id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "当前用户没有学生档案",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询学生失败: {e}"),
                )),
            );
        }
    };

    // 作业必须存在
    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询作业失败: {e}"),
                )),
            );
        }
    };

    // 作答必须对应作业题目
    if submit_request.answers.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "至少提交一道题的作答",
        )));
    }
    let question_count = assignment.questions.len();
    if submit_request
        .answers
        .iter()
        .any(|a| a.question_index >= question_count)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            format!("作答的题号超出范围（共 {question_count} 题）"),
        )));
    }

    let answers: Vec<Answer> = submit_request
        .answers
        .into_iter()
        .map(|a| Answer {
            question_index: a.question_index,
            text: a.text,
            ai_score: None,
            ai_feedback: None,
            teacher_override: None,
        })
        .collect();

    match storage
        .upsert_submission(assignment_id, student.id, answers)
        .await
    {
        Ok(submission) => {
            tracing::info!(
                "Student {} submitted assignment {}",
                student.student_code,
                assignment_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(submission, "提交成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("提交失败: {e}"),
            )),
        ),
    }
}
