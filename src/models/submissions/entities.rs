use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 教师对单题评分的人工覆盖
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct TeacherOverride {
    pub score: Option<f64>,
    pub feedback: Option<String>,
}

/// 单题作答（answers JSON 列的元素）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Answer {
    pub question_index: usize,
    pub text: String,
    /// 外部批改服务给出的分数（0-10）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_override: Option<TeacherOverride>,
}

impl Answer {
    /// 有效得分：教师覆盖优先于 AI 评分
    pub fn effective_score(&self) -> Option<f64> {
        self.teacher_override
            .as_ref()
            .and_then(|o| o.score)
            .or(self.ai_score)
    }

    /// 有效反馈：教师覆盖优先于 AI 反馈
    pub fn effective_feedback(&self) -> Option<&str> {
        self.teacher_override
            .as_ref()
            .and_then(|o| o.feedback.as_deref())
            .or(self.ai_feedback.as_deref())
    }
}

// 提交实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub answers: Vec<Answer>,
    pub total_score: Option<f64>,
    pub overall_feedback: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Submission {
    /// 已评分作答的平均分
    pub fn average_score(&self) -> Option<f64> {
        let scores: Vec<f64> = self
            .answers
            .iter()
            .filter_map(|a| a.effective_score())
            .collect();
        if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_score_prefers_teacher_override() {
        let answer = Answer {
            question_index: 0,
            text: "4".to_string(),
            ai_score: Some(6.0),
            ai_feedback: Some("Close".to_string()),
            teacher_override: Some(TeacherOverride {
                score: Some(9.0),
                feedback: None,
            }),
        };
        assert_eq!(answer.effective_score(), Some(9.0));
        // 覆盖没有给反馈时回退到 AI 反馈
        assert_eq!(answer.effective_feedback(), Some("Close"));
    }

    #[test]
    fn test_average_score_ignores_unscored() {
        let submission = Submission {
            id: 1,
            assignment_id: 1,
            student_id: 1,
            answers: vec![
                Answer {
                    question_index: 0,
                    text: "a".to_string(),
                    ai_score: Some(8.0),
                    ai_feedback: None,
                    teacher_override: None,
                },
                Answer {
                    question_index: 1,
                    text: "b".to_string(),
                    ai_score: None,
                    ai_feedback: None,
                    teacher_override: None,
                },
                Answer {
                    question_index: 2,
                    text: "c".to_string(),
                    ai_score: Some(4.0),
                    ai_feedback: None,
                    teacher_override: None,
                },
            ],
            total_score: None,
            overall_feedback: None,
            submitted_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        assert_eq!(submission.average_score(), Some(6.0));
    }
}
