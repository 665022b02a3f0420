pub mod list;
pub mod mark;
pub mod summary;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::AttendanceListParams;
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
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

    // 拍照点名
    pub async fn mark_attendance(
        &self,
        request: &HttpRequest,
        marked_by: i64,
        payload: actix_multipart::Multipart,
    ) -> ActixResult<HttpResponse> {
        mark::handle_mark_attendance(self, request, marked_by, payload).await
    }

    // 列出考勤记录
    pub async fn list_attendance(
        &self,
        request: &HttpRequest,
        params: AttendanceListParams,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_attendance(self, request, params).await
    }

    // 学生出勤汇总
    pub async fn get_student_summary(
        &self,
        request: &HttpRequest,
        student_code: String,
    ) -> ActixResult<HttpResponse> {
        summary::handle_student_summary(self, request, student_code).await
    }
}
