pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod common;
pub mod students;
pub mod submissions;
pub mod tutor;
pub mod users;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

use serde::Serialize;

/// 业务错误码（HTTP 状态码 * 100 + 序号）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ErrorCode {
    Success = 0,
    BadRequest = 40000,
    InvalidPayload = 40001,
    Unauthorized = 40100,
    AuthFailed = 40101,
    TokenExpired = 40102,
    Forbidden = 40300,
    NotFound = 40400,
    UserNotFound = 40401,
    StudentNotFound = 40402,
    AssignmentNotFound = 40403,
    SubmissionNotFound = 40404,
    AttendanceNotFound = 40405,
    UserNameAlreadyExists = 40900,
    UserEmailAlreadyExists = 40901,
    StudentAlreadyExists = 40902,
    AttendanceAlreadyMarked = 40903,
    UserNameInvalid = 42200,
    UserEmailInvalid = 42201,
    PasswordPolicyViolation = 42202,
    ValidationError = 42203,
    RegisterFailed = 42204,
    InternalServerError = 50000,
    ExternalServiceError = 50200,
}

/// 应用启动时间（注入到 app data，用于 uptime 统计）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::AuthFailed as i32, 40101);
        assert_eq!(ErrorCode::StudentNotFound as i32, 40402);
        assert_eq!(ErrorCode::ExternalServiceError as i32, 50200);
    }
}
