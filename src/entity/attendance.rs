//! 考勤记录实体
//!
//! 一条记录对应某个班级某一天的一次点名，明细在 attendance_students 表。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 日期，格式 YYYY-MM-DD
    pub date: String,
    pub class_level: String,
    pub photo_url: Option<String>,
    pub marked_by: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::MarkedBy",
        to = "super::users::Column::Id"
    )]
    Marker,
    #[sea_orm(has_many = "super::attendance_students::Entity")]
    AttendanceStudents,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Marker.def()
    }
}

impl Related<super::attendance_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceStudents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
