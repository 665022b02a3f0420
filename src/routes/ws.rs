use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::models::users::entities::UserStatus;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::websocket::WebSocketService;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub token: String,
}

// WebSocket 升级入口
//
// 升级请求无法带 Authorization 头，token 走查询参数。
pub async fn chat_ws(
    req: HttpRequest,
    stream: web::Payload,
    query: web::Query<WsQuery>,
) -> ActixResult<HttpResponse> {
    // 1. 校验 access token
    let claims = match JwtUtils::verify_access_token(&query.token) {
        Ok(claims) => claims,
        Err(e) => {
            info!("WebSocket token rejected: {}", e);
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Invalid or expired token",
            )));
        }
    };
    let Ok(user_id) = claims.sub.parse::<i64>() else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Invalid token subject",
        )));
    };

    // 2. 加载用户与学生档案
    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone();

    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) if user.status == UserStatus::Active => user,
        Ok(_) => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "User not found or inactive",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询用户失败: {e}"),
                )),
            );
        }
    };

    let student = match storage.get_student_by_user_id(user.id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Chat is only available for student accounts",
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

    // 3. 升级连接并交给 WebSocket 服务
    let (response, session, msg_stream) = actix_ws::handle(&req, stream)?;
    actix_web::rt::spawn(WebSocketService::handle_connection(
        user.id, student, storage, session, msg_stream,
    ));

    Ok(response)
}

// 配置路由
pub fn configure_ws_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1/ws").route("/chat", web::get().to(chat_ws)));
}
