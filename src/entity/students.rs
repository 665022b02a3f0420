//! 学生档案实体
//!
//! JSON 文本列（subjects/interests/academic_history/face_embedding）在转换为
//! 业务模型时反序列化，解析失败按空值处理。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub student_code: String,
    pub user_id: i64,
    pub grade_level: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub subjects: Option<String>,
    pub learning_style: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub interests: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub academic_history: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub photo_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub face_embedding: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
    #[sea_orm(has_many = "super::attendance_students::Entity")]
    AttendanceStudents,
    #[sea_orm(has_many = "super::chat_interactions::Entity")]
    ChatInteractions,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl Related<super::attendance_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceStudents.def()
    }
}

impl Related<super::chat_interactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChatInteractions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn parse_json_list(raw: Option<String>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_student(self) -> crate::models::students::entities::Student {
        use crate::models::students::entities::{AcademicRecord, Student};
        use chrono::{DateTime, Utc};

        let academic_history: Vec<AcademicRecord> = self
            .academic_history
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();

        Student {
            id: self.id,
            student_code: self.student_code,
            user_id: self.user_id,
            grade_level: self.grade_level,
            subjects: parse_json_list(self.subjects),
            learning_style: self.learning_style.unwrap_or_else(|| "visual".to_string()),
            interests: parse_json_list(self.interests),
            academic_history,
            parent_name: self.parent_name,
            parent_phone: self.parent_phone,
            photo_url: self.photo_url,
            has_face_embedding: self.face_embedding.is_some(),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
