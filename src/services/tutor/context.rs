//! 提示词上下文组装
//!
//! 从存储层聚合学生画像、近期聊天、作业表现和出勤情况，
//! 作为 JSON 随生成请求发给外部导师服务。

use std::sync::Arc;

use serde::Serialize;

use crate::errors::Result;
use crate::models::students::entities::Student;
use crate::storage::Storage;

/// 学生聊天上下文
#[derive(Debug, Serialize)]
pub struct StudentContext {
    pub name: String,
    pub grade_level: String,
    pub subjects: Vec<String>,
    pub learning_style: String,
    pub academic_summary: String,
    pub recent_interactions: Vec<RecentInteraction>,
}

/// 家长聊天上下文（在学生上下文之上追加出勤与作业表现）
#[derive(Debug, Serialize)]
pub struct ParentContext {
    #[serde(flatten)]
    pub student: StudentContext,
    pub interests: Vec<String>,
    pub parent_info: Option<ParentInfo>,
    pub recent_absences: Vec<String>,
    pub assignment_performance: Vec<AssignmentPerformance>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecentInteraction {
    pub question: String,
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct ParentInfo {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Serialize)]
pub struct AssignmentPerformance {
    pub title: String,
    pub avg_score: Option<f64>,
    pub feedbacks: Vec<String>,
}

/// 组装学生上下文：画像 + 最近 3 次聊天
pub async fn build_student_context(
    storage: &Arc<dyn Storage>,
    student: &Student,
) -> Result<StudentContext> {
    let name = match storage.get_user_by_id(student.user_id).await? {
        Some(user) if !user.profile.profile_name.is_empty() => user.profile.profile_name,
        Some(user) => user.username,
        None => "Student".to_string(),
    };

    let recent_interactions = storage
        .list_recent_chat_interactions(student.id, 3)
        .await?
        .into_iter()
        .map(|i| RecentInteraction {
            question: i.question,
            response: i.response,
        })
        .collect();

    Ok(StudentContext {
        name,
        grade_level: student.grade_level.clone(),
        subjects: student.subjects.clone(),
        learning_style: student.learning_style.clone(),
        academic_summary: student.academic_summary(),
        recent_interactions,
    })
}

/// 组装家长上下文：学生上下文 + 出勤 + 最近 5 次提交的表现
pub async fn build_parent_context(
    storage: &Arc<dyn Storage>,
    student: &Student,
) -> Result<ParentContext> {
    let student_context = build_student_context(storage, student).await?;

    let parent_info = match (&student.parent_name, &student.parent_phone) {
        (Some(name), Some(phone)) => Some(ParentInfo {
            name: name.clone(),
            phone: phone.clone(),
        }),
        _ => None,
    };

    let stats = storage.get_attendance_stats_for_student(student.id).await?;
    let recent_absences = stats.absence_dates.into_iter().take(3).collect();

    let submissions = storage
        .list_recent_submissions_by_student(student.id, 5)
        .await?;
    let mut assignment_performance = Vec::with_capacity(submissions.len());
    for submission in submissions {
        let title = match storage.get_assignment_by_id(submission.assignment_id).await? {
            Some(assignment) => assignment.title,
            None => continue,
        };
        let feedbacks: Vec<String> = submission
            .answers
            .iter()
            .filter_map(|a| a.effective_feedback().map(str::to_string))
            .take(2)
            .collect();
        assignment_performance.push(AssignmentPerformance {
            title,
            avg_score: submission.average_score(),
            feedbacks,
        });
    }

    Ok(ParentContext {
        student: student_context,
        interests: student.interests.clone(),
        parent_info,
        recent_absences,
        assignment_performance,
        photo_url: student.photo_url.clone(),
    })
}
