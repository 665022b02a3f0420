use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;

/// 考勤列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    /// 日期，格式 YYYY-MM-DD
    pub date: Option<String>,
    pub class_level: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct AttendanceListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub date: Option<String>,
    pub class_level: Option<String>,
}

impl From<AttendanceListParams> for AttendanceListQuery {
    fn from(p: AttendanceListParams) -> Self {
        Self {
            page: Some(p.pagination.page),
            size: Some(p.pagination.size),
            date: p.date,
            class_level: p.class_level,
        }
    }
}
