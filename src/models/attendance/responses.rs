use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::attendance::entities::AttendanceRecord;
use crate::models::common::pagination::PaginationInfo;

/// 考勤列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceListResponse {
    pub items: Vec<AttendanceRecord>,
    pub pagination: PaginationInfo,
}

/// 拍照点名结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct MarkAttendanceResponse {
    pub record: AttendanceRecord,
    /// 识别出的学号
    pub recognized: Vec<String>,
    /// 名册中未被识别到的学号（记为缺勤）
    pub absent: Vec<String>,
}

/// 学生出勤汇总
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSummaryResponse {
    pub student_code: String,
    pub total_sessions: i64,
    pub present_count: i64,
    /// 出勤率百分比，无记录时为 None
    pub attendance_rate: Option<f64>,
    /// 最近缺勤日期（最多 3 条）
    pub recent_absences: Vec<String>,
}
