use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 学科学习记录（academic_history JSON 列的元素）
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct AcademicRecord {
    pub subject: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

// 学生档案实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    /// 对外的学号，如 "STU-2026-0042"
    pub student_code: String,
    pub user_id: i64,
    pub grade_level: String,
    pub subjects: Vec<String>,
    pub learning_style: String,
    pub interests: Vec<String>,
    pub academic_history: Vec<AcademicRecord>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub photo_url: Option<String>,
    /// 是否已录入人脸特征（特征本身不出库）
    pub has_face_embedding: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Student {
    /// 将学业历史概括为一句话，供提示词上下文使用
    pub fn academic_summary(&self) -> String {
        if self.academic_history.is_empty() {
            return "No academic history available.".to_string();
        }

        let summaries: Vec<String> = self
            .academic_history
            .iter()
            .take(3)
            .map(|record| {
                if record.topics.is_empty() {
                    format!("{}: Just started", record.subject)
                } else {
                    format!("{}: {} topics covered", record.subject, record.topics.len())
                }
            })
            .collect();

        summaries.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student_with_history(history: Vec<AcademicRecord>) -> Student {
        Student {
            id: 1,
            student_code: "STU-0001".to_string(),
            user_id: 1,
            grade_level: "9".to_string(),
            subjects: vec![],
            learning_style: "visual".to_string(),
            interests: vec![],
            academic_history: history,
            parent_name: None,
            parent_phone: None,
            photo_url: None,
            has_face_embedding: false,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_academic_summary_empty() {
        let student = student_with_history(vec![]);
        assert_eq!(student.academic_summary(), "No academic history available.");
    }

    #[test]
    fn test_academic_summary_limits_to_three_subjects() {
        let history = ["mathematics", "physics", "chemistry", "biology"]
            .iter()
            .map(|s| AcademicRecord {
                subject: s.to_string(),
                topics: vec!["a".to_string(), "b".to_string()],
            })
            .collect();
        let student = student_with_history(history);
        let summary = student.academic_summary();
        assert!(summary.contains("mathematics: 2 topics covered"));
        assert!(!summary.contains("biology"));
    }

    #[test]
    fn test_academic_summary_just_started() {
        let student = student_with_history(vec![AcademicRecord {
            subject: "history".to_string(),
            topics: vec![],
        }]);
        assert_eq!(student.academic_summary(), "history: Just started");
    }
}
