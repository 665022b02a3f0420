//! 路径参数提取器
//!
//! 对路径中的 ID / 学号做格式校验，非法输入直接返回 400，
//! 避免在业务层里到处手写解析。

use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorBadRequest};
use futures_util::future::{Ready, ready};

use crate::utils::validate::validate_student_code;

/// 安全的 i64 路径 ID
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = req
            .match_info()
            .get("id")
            .ok_or_else(|| ErrorBadRequest("Missing id path parameter"))
            .and_then(|raw| {
                raw.parse::<i64>()
                    .map_err(|_| ErrorBadRequest("Invalid id path parameter"))
            })
            .and_then(|id| {
                if id > 0 {
                    Ok(SafeIDI64(id))
                } else {
                    Err(ErrorBadRequest("Id must be positive"))
                }
            });
        ready(result)
    }
}

/// 安全的学号路径参数
pub struct SafeStudentCode(pub String);

impl FromRequest for SafeStudentCode {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = req
            .match_info()
            .get("code")
            .ok_or_else(|| ErrorBadRequest("Missing student code path parameter"))
            .and_then(|raw| {
                validate_student_code(raw)
                    .map(|_| SafeStudentCode(raw.to_string()))
                    .map_err(ErrorBadRequest)
            });
        ready(result)
    }
}
