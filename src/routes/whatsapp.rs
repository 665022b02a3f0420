use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::clients::whatsapp::WebhookPayload;
use crate::services::WhatsAppService;
use crate::services::whatsapp::verify::VerifyParams;

// 懒加载的全局 WhatsAppService 实例
static WHATSAPP_SERVICE: Lazy<WhatsAppService> = Lazy::new(WhatsAppService::new_lazy);

// Meta 验证握手
pub async fn verify_webhook(query: web::Query<VerifyParams>) -> ActixResult<HttpResponse> {
    WHATSAPP_SERVICE.verify(query.into_inner()).await
}

// 消息推送
pub async fn receive_webhook(
    req: HttpRequest,
    body: web::Json<WebhookPayload>,
) -> ActixResult<HttpResponse> {
    WHATSAPP_SERVICE.ingest(&req, body.into_inner()).await
}

// 配置路由
//
// webhook 由 Meta 调用，不走 JWT；验证依赖 verify_token。
pub fn configure_whatsapp_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/whatsapp").service(
            web::resource("/webhook")
                .route(web::get().to(verify_webhook))
                .route(web::post().to(receive_webhook)),
        ),
    );
}
