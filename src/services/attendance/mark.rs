use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::{StreamExt, TryStreamExt};
use std::collections::HashSet;

use super::AttendanceService;
use crate::clients::{CloudinaryClient, FaceServiceClient};
use crate::config::AppConfig;
use crate::models::attendance::responses::MarkAttendanceResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::file_magic::validate_image_upload;

/// 点名 multipart 请求解析结果
struct MarkPayload {
    class_level: Option<String>,
    date: Option<String>,
    photo: Option<Vec<u8>>,
}

/// 解析 multipart：class_level / date 文本字段 + photo 文件字段
async fn parse_mark_payload(mut payload: Multipart, max_size: usize) -> Result<MarkPayload, String> {
    let mut result = MarkPayload {
        class_level: None,
        date: None,
        photo: None,
    };

    while let Ok(Some(mut field)) = payload.try_next().await {
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| format!("读取上传内容失败: {e}"))?;
            if data.len() + chunk.len() > max_size {
                return Err(format!("上传内容超过大小上限 {max_size} 字节"));
            }
            data.extend_from_slice(&chunk);
        }

        match name.as_str() {
            "class_level" => {
                result.class_level =
                    Some(String::from_utf8(data).map_err(|_| "class_level 不是合法 UTF-8")?);
            }
            "date" => {
                result.date = Some(String::from_utf8(data).map_err(|_| "date 不是合法 UTF-8")?);
            }
            "photo" => {
                result.photo = Some(data);
            }
            _ => {}
        }
    }

    Ok(result)
}

pub async fn handle_mark_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    marked_by: i64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = AppConfig::get();

    let parsed = match parse_mark_payload(payload, config.upload.max_size).await {
        Ok(parsed) => parsed,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
        }
    };

    let Some(class_level) = parsed.class_level.filter(|c| !c.trim().is_empty()) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "缺少 class_level 字段",
        )));
    };
    let Some(photo) = parsed.photo else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "缺少 photo 字段",
        )));
    };
    let date = parsed
        .date
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| chrono::Utc::now().format("%Y-%m-%d").to_string());

    let mime = match validate_image_upload(&photo, &config.upload.allowed_types) {
        Ok(mime) => mime,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
        }
    };

    // 当天同一年级只点一次名
    match storage
        .get_attendance_by_date_and_class(&date, &class_level)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::AttendanceAlreadyMarked,
                format!("{class_level} 在 {date} 已有点名记录"),
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询考勤记录失败: {e}"),
                )),
            );
        }
    }

    // 名册为空说明年级不存在
    let roster = match storage.list_students_by_class_level(&class_level).await {
        Ok(roster) if !roster.is_empty() => roster,
        Ok(_) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationError,
                format!("年级 {class_level} 没有学生"),
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询名册失败: {e}"),
                )),
            );
        }
    };

    // 1. 上传课堂照片
    let cloudinary = match CloudinaryClient::new() {
        Ok(client) => client,
        Err(e) => return Ok(external_error(e)),
    };
    let file_name = format!("attendance_{class_level}_{date}_{}", uuid::Uuid::new_v4());
    let uploaded = match cloudinary.upload_image(photo, &file_name, mime).await {
        Ok(resp) => resp,
        Err(e) => return Ok(external_error(e)),
    };

    // 2. 人脸识别
    let face_client = match FaceServiceClient::new() {
        Ok(client) => client,
        Err(e) => return Ok(external_error(e)),
    };
    let recognition = match face_client.recognize(&uploaded.secure_url).await {
        Ok(resp) => resp,
        Err(e) => return Ok(external_error(e)),
    };
    let recognized: HashSet<&str> = recognition
        .recognized_students
        .iter()
        .map(|s| s.as_str())
        .collect();

    // 3. 名册里识别到的记出勤，其余记缺勤
    let entries: Vec<(i64, bool)> = roster
        .iter()
        .map(|s| (s.id, recognized.contains(s.student_code.as_str())))
        .collect();
    let absent: Vec<String> = roster
        .iter()
        .filter(|s| !recognized.contains(s.student_code.as_str()))
        .map(|s| s.student_code.clone())
        .collect();

    match storage
        .create_attendance(
            &date,
            &class_level,
            Some(uploaded.secure_url),
            marked_by,
            entries,
        )
        .await
    {
        Ok(record) => {
            tracing::info!(
                "Attendance marked for {} on {}: {}/{} present",
                class_level,
                date,
                record.present_count(),
                roster.len()
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                MarkAttendanceResponse {
                    record,
                    recognized: recognition.recognized_students,
                    absent,
                },
                "点名完成",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("写入考勤记录失败: {e}"),
            )),
        ),
    }
}

fn external_error(e: crate::errors::EduHubError) -> HttpResponse {
    tracing::error!("External service call failed: {}", e);
    HttpResponse::BadGateway().json(ApiResponse::error_empty(
        ErrorCode::ExternalServiceError,
        e.format_simple(),
    ))
}
