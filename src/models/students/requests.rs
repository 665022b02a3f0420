use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;
use crate::models::students::entities::AcademicRecord;

/// 创建学生档案请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub student_code: String,
    pub user_id: i64,
    pub grade_level: String,
    #[serde(default)]
    pub subjects: Vec<String>,
    pub learning_style: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
}

/// 更新学生档案请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub grade_level: Option<String>,
    pub subjects: Option<Vec<String>>,
    pub learning_style: Option<String>,
    pub interests: Option<Vec<String>>,
    pub academic_history: Option<Vec<AcademicRecord>>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
}

/// 学习偏好更新请求（导师端）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdatePreferencesRequest {
    pub learning_style: Option<String>,
    pub subjects: Option<Vec<String>>,
}

/// 学生列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub grade_level: Option<String>,
    pub search: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub grade_level: Option<String>,
    pub search: Option<String>,
}

impl From<StudentListParams> for StudentListQuery {
    fn from(p: StudentListParams) -> Self {
        Self {
            page: Some(p.pagination.page),
            size: Some(p.pagination.size),
            grade_level: p.grade_level,
            search: p.search,
        }
    }
}
