use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::middlewares::RequireJWT;
use crate::models::attendance::responses::AttendanceSummaryResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_student_summary(
    service: &AttendanceService,
    request: &HttpRequest,
    student_code: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    let student = match storage.get_student_by_code(&student_code).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "学生不存在",
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

    // 学生只能查看自己的出勤
    if current_user.role == UserRole::Student && student.user_id != current_user.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "没有查看该学生出勤的权限",
        )));
    }

    match storage.get_attendance_stats_for_student(student.id).await {
        Ok(stats) => {
            let attendance_rate = if stats.total_sessions > 0 {
                Some(stats.present_count as f64 / stats.total_sessions as f64 * 100.0)
            } else {
                None
            };
            let recent_absences = stats.absence_dates.into_iter().take(3).collect();

            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AttendanceSummaryResponse {
                    student_code,
                    total_sessions: stats.total_sessions,
                    present_count: stats.present_count,
                    attendance_rate,
                    recent_absences,
                },
                "查询成功",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询出勤统计失败: {e}"),
            )),
        ),
    }
}
