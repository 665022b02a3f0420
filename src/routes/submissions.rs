use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::submissions::requests::{
    OverrideAnswerRequest, SubmissionListParams, SubmitAssignmentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::SubmissionService;
use crate::utils::SafeIDI64;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 提交作业（路径中的 id 为作业 ID）
pub async fn submit_assignment(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<SubmitAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .submit_assignment(&req, path.0, body.into_inner())
        .await
}

// 列出提交
pub async fn list_submissions(
    req: HttpRequest,
    query: web::Query<SubmissionListParams>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(&req, query.into_inner())
        .await
}

// 获取提交详情
pub async fn get_submission(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.get_submission(&req, path.0).await
}

// AI 批改
pub async fn evaluate_submission(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.evaluate_submission(&req, path.0).await
}

// 教师覆盖单题评分
pub async fn override_answer(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<OverrideAnswerRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .override_answer(&req, path.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments/{id}/submissions")
            .wrap(middlewares::RequireJWT)
            // 提交作业 - 学生提交自己的作答
            .route("", web::post().to(submit_assignment)),
    );

    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireJWT)
            // 列出提交 - 学生只能看自己的，业务层过滤
            .route("", web::get().to(list_submissions))
            .service(
                web::resource("/{id}")
                    // 获取提交详情 - 业务层校验提交者或教师
                    .route(web::get().to(get_submission)),
            )
            .service(
                web::resource("/{id}/evaluate")
                    // AI 批改 - 仅教师和管理员
                    .route(
                        web::post()
                            .to(evaluate_submission)
                            .wrap(RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                web::resource("/{id}/override")
                    // 覆盖评分 - 仅教师和管理员
                    .route(
                        web::post()
                            .to(override_answer)
                            .wrap(RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            ),
    );
}
