pub mod ingest;
pub mod verify;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::clients::whatsapp::WebhookPayload;
use crate::storage::Storage;

pub struct WhatsAppService {
    storage: Option<Arc<dyn Storage>>,
}

impl WhatsAppService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // Meta 验证握手
    pub async fn verify(
        &self,
        params: verify::VerifyParams,
    ) -> ActixResult<HttpResponse> {
        verify::handle_verify(params).await
    }

    // 接收消息推送
    pub async fn ingest(
        &self,
        request: &HttpRequest,
        payload: WebhookPayload,
    ) -> ActixResult<HttpResponse> {
        ingest::handle_ingest(self, request, payload).await
    }
}
