pub mod create;
pub mod enroll;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::{
    CreateStudentRequest, StudentListParams, UpdateStudentRequest,
};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    // 创建学生档案
    pub async fn create_student(
        &self,
        request: &HttpRequest,
        create_request: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create_student(self, request, create_request).await
    }

    // 获取学生档案
    pub async fn get_student(
        &self,
        request: &HttpRequest,
        student_code: String,
    ) -> ActixResult<HttpResponse> {
        get::handle_get_student(self, request, student_code).await
    }

    // 列出学生
    pub async fn list_students(
        &self,
        request: &HttpRequest,
        params: StudentListParams,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_students(self, request, params).await
    }

    // 更新学生档案
    pub async fn update_student(
        &self,
        request: &HttpRequest,
        student_code: String,
        update_request: UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        update::handle_update_student(self, request, student_code, update_request).await
    }

    // 照片录入（Cloudinary 上传 + 人脸特征提取）
    pub async fn enroll_face(
        &self,
        request: &HttpRequest,
        student_code: String,
        payload: actix_multipart::Multipart,
    ) -> ActixResult<HttpResponse> {
        enroll::handle_enroll_face(self, request, student_code, payload).await
    }
}
