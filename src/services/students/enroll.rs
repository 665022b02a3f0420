use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::{StreamExt, TryStreamExt};

use super::StudentService;
use crate::clients::{CloudinaryClient, FaceServiceClient};
use crate::config::AppConfig;
use crate::models::students::responses::FaceEnrollmentResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::file_magic::validate_image_upload;

/// 从 multipart 载荷中读出第一个文件字段的内容
pub(crate) async fn read_image_field(
    mut payload: Multipart,
    max_size: usize,
) -> Result<Vec<u8>, String> {
    while let Ok(Some(mut field)) = payload.try_next().await {
        if field.content_disposition().and_then(|cd| cd.get_filename()).is_none() {
            continue;
        }

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| format!("读取上传内容失败: {e}"))?;
            if data.len() + chunk.len() > max_size {
                return Err(format!("图片超过大小上限 {max_size} 字节"));
            }
            data.extend_from_slice(&chunk);
        }

        if data.is_empty() {
            return Err("上传内容为空".to_string());
        }
        return Ok(data);
    }

    Err("请求中没有文件字段".to_string())
}

pub async fn handle_enroll_face(
    service: &StudentService,
    request: &HttpRequest,
    student_code: String,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = AppConfig::get();

    // 学生必须存在
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

    // 1. 读取并校验图片
    let data = match read_image_field(payload, config.upload.max_size).await {
        Ok(data) => data,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
        }
    };

    let mime = match validate_image_upload(&data, &config.upload.allowed_types) {
        Ok(mime) => mime,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
        }
    };

    // 2. 上传到 Cloudinary
    let cloudinary = match CloudinaryClient::new() {
        Ok(client) => client,
        Err(e) => return Ok(external_error(e)),
    };
    // 带 uuid 避免 CDN 旧缓存
    let file_name = format!("student_{student_code}_{}", uuid::Uuid::new_v4());
    let uploaded = match cloudinary.upload_image(data, &file_name, mime).await {
        Ok(resp) => resp,
        Err(e) => return Ok(external_error(e)),
    };

    // 3. 提取人脸特征
    let face_client = match FaceServiceClient::new() {
        Ok(client) => client,
        Err(e) => return Ok(external_error(e)),
    };
    let encoded = match face_client.encode(&uploaded.secure_url).await {
        Ok(resp) => resp,
        Err(e) => return Ok(external_error(e)),
    };

    // 4. 落库
    let embedding_json = match serde_json::to_string(&encoded.embedding) {
        Ok(json) => json,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("序列化人脸特征失败: {e}"),
                )),
            );
        }
    };

    match storage
        .update_student_face(student.id, &uploaded.secure_url, &embedding_json)
        .await
    {
        Ok(true) => {
            tracing::info!("Face enrolled for student {}", student_code);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                FaceEnrollmentResponse {
                    student_code,
                    photo_url: uploaded.secure_url,
                    embedding_dims: encoded.embedding.len(),
                },
                "照片录入成功",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "学生不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("保存人脸特征失败: {e}"),
            )),
        ),
    }
}

/// 外部服务错误统一返回 502
fn external_error(e: crate::errors::EduHubError) -> HttpResponse {
    tracing::error!("External service call failed: {}", e);
    HttpResponse::BadGateway().json(ApiResponse::error_empty(
        ErrorCode::ExternalServiceError,
        e.format_simple(),
    ))
}
