use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT, RequireRole};
use crate::models::attendance::requests::AttendanceListParams;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::AttendanceService;
use crate::utils::SafeStudentCode;

// 懒加载的全局 AttendanceService 实例
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

// 拍照点名
pub async fn mark_attendance(
    req: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    ATTENDANCE_SERVICE
        .mark_attendance(&req, user_id, payload)
        .await
}

// 列出考勤记录
pub async fn list_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceListParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_attendance(&req, query.into_inner())
        .await
}

// 学生出勤汇总
pub async fn student_summary(
    req: HttpRequest,
    code: SafeStudentCode,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.get_student_summary(&req, code.0).await
}

// 配置路由
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attendance")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列出考勤记录 - 仅教师和管理员
                    .route(
                        web::get()
                            .to(list_attendance)
                            .wrap(RequireRole::new_any(UserRole::teacher_roles())),
                    )
                    // 拍照点名 - 仅教师和管理员
                    .route(
                        web::post()
                            .to(mark_attendance)
                            .wrap(RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                web::resource("/students/{code}")
                    // 学生出勤汇总 - 业务层校验本人或教师
                    .route(web::get().to(student_summary)),
            ),
    );
}
