use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 单个学生的出勤状态
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceEntry {
    pub student_id: i64,
    pub student_code: String,
    pub present: bool,
}

// 考勤记录实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceRecord {
    pub id: i64,
    /// 日期，格式 YYYY-MM-DD
    pub date: String,
    pub class_level: String,
    pub photo_url: Option<String>,
    pub marked_by: i64,
    pub students: Vec<AttendanceEntry>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl AttendanceRecord {
    pub fn present_count(&self) -> usize {
        self.students.iter().filter(|s| s.present).count()
    }
}
