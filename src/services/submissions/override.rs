use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::submissions::entities::TeacherOverride;
use crate::models::submissions::requests::OverrideAnswerRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_override_answer(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    override_request: OverrideAnswerRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

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

    let mut answers = submission.answers.clone();
    let Some(answer) = answers
        .iter_mut()
        .find(|a| a.question_index == override_request.question_index)
    else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "该题号没有对应的作答",
        )));
    };

    answer.teacher_override = Some(TeacherOverride {
        score: override_request.score,
        feedback: override_request.feedback,
    });

    // 按覆盖后的有效得分重算总分
    let total_score = {
        let scores: Vec<f64> = answers.iter().filter_map(|a| a.effective_score()).collect();
        if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum())
        }
    };

    match storage
        .update_submission_evaluation(
            submission_id,
            answers,
            total_score,
            submission.overall_feedback.clone(),
        )
        .await
    {
        Ok(Some(updated)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "评分覆盖成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "提交不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("覆盖评分失败: {e}"),
            )),
        ),
    }
}
