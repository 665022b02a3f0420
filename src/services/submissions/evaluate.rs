use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::clients::CorrectionServiceClient;
use crate::clients::correction_service::{EvaluateAssignmentRequest, EvaluationPair, StudentInfo};
use crate::models::submissions::responses::EvaluationResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_evaluate_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
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

    let assignment = match storage.get_assignment_by_id(submission.assignment_id).await {
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

    // 学生背景信息用于个性化评语，查不到不阻塞批改
    let student_info = match storage.get_student_by_id(submission.student_id).await {
        Ok(Some(student)) => Some(StudentInfo {
            student_id: student.student_code.clone(),
            name: student.student_code,
            grade_level: student.grade_level,
            subject: assignment.subject.clone(),
            learning_style: Some(student.learning_style),
        }),
        _ => None,
    };

    // 组装问答对
    let pairs: Vec<EvaluationPair> = submission
        .answers
        .iter()
        .filter_map(|answer| {
            assignment
                .questions
                .get(answer.question_index)
                .map(|q| EvaluationPair {
                    question: q.text.clone(),
                    answer: answer.text.clone(),
                    expected_answer: q.expected_answer.clone(),
                })
        })
        .collect();

    if pairs.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "提交中没有可批改的作答",
        )));
    }

    // 调用外部批改服务；失败时不改动提交，返回 502
    let client = match CorrectionServiceClient::new() {
        Ok(client) => client,
        Err(e) => return Ok(external_error(e)),
    };
    let evaluation = match client
        .evaluate_assignment(&EvaluateAssignmentRequest {
            pairs,
            student_info,
        })
        .await
    {
        Ok(evaluation) => evaluation,
        Err(e) => return Ok(external_error(e)),
    };

    // 把逐题结果写回作答（question_number 从 1 开始）
    let mut answers = submission.answers.clone();
    for eval in &evaluation.evaluations {
        if let Some(answer) = answers.get_mut(eval.question_number.saturating_sub(1)) {
            answer.ai_score = Some(eval.score);
            answer.ai_feedback = Some(eval.feedback.clone());
        }
    }

    let total_score = {
        let scores: Vec<f64> = answers.iter().filter_map(|a| a.effective_score()).collect();
        if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum())
        }
    };

    let evaluated_answers = evaluation.evaluations.len();
    match storage
        .update_submission_evaluation(
            submission_id,
            answers,
            total_score,
            Some(evaluation.overall_feedback),
        )
        .await
    {
        Ok(Some(updated)) => {
            tracing::info!(
                "Submission {} evaluated, {} answers scored",
                submission_id,
                evaluated_answers
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                EvaluationResponse {
                    submission: updated,
                    evaluated_answers,
                },
                "批改完成",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "提交不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("写回批改结果失败: {e}"),
            )),
        ),
    }
}

fn external_error(e: crate::errors::EduHubError) -> HttpResponse {
    tracing::error!("Correction service call failed: {}", e);
    HttpResponse::BadGateway().json(ApiResponse::error_empty(
        ErrorCode::ExternalServiceError,
        e.format_simple(),
    ))
}
