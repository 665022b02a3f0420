use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::students::requests::UpdatePreferencesRequest;
use crate::models::tutor::requests::{ChatHistoryParams, ChatRequest};
use crate::services::TutorService;
use crate::utils::SafeStudentCode;

// 懒加载的全局 TutorService 实例
static TUTOR_SERVICE: Lazy<TutorService> = Lazy::new(TutorService::new_lazy);

// 导师聊天
pub async fn chat(req: HttpRequest, body: web::Json<ChatRequest>) -> ActixResult<HttpResponse> {
    TUTOR_SERVICE.chat(&req, body.into_inner()).await
}

// 学习进度
pub async fn get_progress(req: HttpRequest, code: SafeStudentCode) -> ActixResult<HttpResponse> {
    TUTOR_SERVICE.get_progress(&req, code.0).await
}

// 获取学习偏好
pub async fn get_preferences(req: HttpRequest, code: SafeStudentCode) -> ActixResult<HttpResponse> {
    TUTOR_SERVICE.get_preferences(&req, code.0).await
}

// 更新学习偏好
pub async fn update_preferences(
    req: HttpRequest,
    code: SafeStudentCode,
    body: web::Json<UpdatePreferencesRequest>,
) -> ActixResult<HttpResponse> {
    TUTOR_SERVICE
        .update_preferences(&req, code.0, body.into_inner())
        .await
}

// 聊天历史
pub async fn get_history(
    req: HttpRequest,
    code: SafeStudentCode,
    query: web::Query<ChatHistoryParams>,
) -> ActixResult<HttpResponse> {
    TUTOR_SERVICE
        .get_history(&req, code.0, query.into_inner())
        .await
}

// 配置路由
pub fn configure_tutor_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/tutor")
            .wrap(middlewares::RequireJWT)
            // 聊天 - 学生本人（教师可代查，业务层校验）
            .route("/chat", web::post().to(chat))
            // 进度 / 偏好 / 历史 - 业务层校验本人或教师
            .route("/progress/{code}", web::get().to(get_progress))
            .service(
                web::resource("/preferences/{code}")
                    .route(web::get().to(get_preferences))
                    .route(web::put().to(update_preferences)),
            )
            .route("/history/{code}", web::get().to(get_history)),
    );
}
