use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::{TutorService, check_student_access};
use crate::models::tutor::responses::{ProgressResponse, SubjectProgress};
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_get_progress(
    service: &TutorService,
    request: &HttpRequest,
    student_code: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match check_student_access(&storage, request, &student_code).await {
        Ok(student) => student,
        Err(resp) => return Ok(resp),
    };

    let total_interactions = match storage.count_chat_interactions(student.id).await {
        Ok(count) => count,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("统计聊天交互失败: {e}"),
                )),
            );
        }
    };

    // 学科维度：提问次数
    let mut questions_by_subject: HashMap<String, i64> = HashMap::new();
    match storage.count_chat_interactions_by_subject(student.id).await {
        Ok(rows) => {
            for (subject, count) in rows {
                if let Some(subject) = subject {
                    questions_by_subject.insert(subject, count);
                }
            }
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("统计学科提问失败: {e}"),
                )),
            );
        }
    }

    // 学科维度：最近提交的平均分
    let mut scores_by_subject: HashMap<String, Vec<f64>> = HashMap::new();
    match storage
        .list_recent_submissions_by_student(student.id, 20)
        .await
    {
        Ok(submissions) => {
            for submission in submissions {
                let Ok(Some(assignment)) =
                    storage.get_assignment_by_id(submission.assignment_id).await
                else {
                    continue;
                };
                if let Some(avg) = submission.average_score() {
                    scores_by_subject
                        .entry(assignment.subject)
                        .or_default()
                        .push(avg);
                }
            }
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询提交失败: {e}"),
                )),
            );
        }
    }

    // 合并两个维度的学科集合
    let mut subjects: Vec<String> = questions_by_subject
        .keys()
        .chain(scores_by_subject.keys())
        .cloned()
        .collect();
    subjects.sort();
    subjects.dedup();

    let subjects: Vec<SubjectProgress> = subjects
        .into_iter()
        .map(|subject| {
            let questions_asked = questions_by_subject.get(&subject).copied().unwrap_or(0);
            let average_score = scores_by_subject.get(&subject).map(|scores| {
                scores.iter().sum::<f64>() / scores.len() as f64
            });
            SubjectProgress {
                subject,
                questions_asked,
                average_score,
            }
        })
        .collect();

    let response = ProgressResponse {
        student_code,
        grade_level: student.grade_level.clone(),
        learning_style: student.learning_style.clone(),
        total_interactions,
        subjects,
        academic_summary: student.academic_summary(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
