use super::SeaOrmStorage;
use crate::entity::attendance::{ActiveModel, Column, Entity as Attendance, Model};
use crate::entity::attendance_students::{
    ActiveModel as EntryActiveModel, Column as EntryColumn, Entity as AttendanceStudents,
};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{EduHubError, Result};
use crate::models::{
    PaginationInfo,
    attendance::{
        entities::{AttendanceEntry, AttendanceRecord},
        requests::AttendanceListQuery,
        responses::AttendanceListResponse,
    },
};
use crate::storage::AttendanceStats;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// 加载一条考勤主记录的明细并组装业务模型
    async fn assemble_attendance_record(&self, model: Model) -> Result<AttendanceRecord> {
        let entries = AttendanceStudents::find()
            .filter(EntryColumn::AttendanceId.eq(model.id))
            .all(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询考勤明细失败: {e}")))?;

        // 批量取学号，避免逐条查询
        let student_ids: Vec<i64> = entries.iter().map(|e| e.student_id).collect();
        let students = Students::find()
            .filter(StudentColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询学生失败: {e}")))?;
        let code_by_id: HashMap<i64, String> = students
            .into_iter()
            .map(|s| (s.id, s.student_code))
            .collect();

        let students = entries
            .into_iter()
            .map(|e| AttendanceEntry {
                student_id: e.student_id,
                student_code: code_by_id
                    .get(&e.student_id)
                    .cloned()
                    .unwrap_or_default(),
                present: e.present,
            })
            .collect();

        Ok(AttendanceRecord {
            id: model.id,
            date: model.date,
            class_level: model.class_level,
            photo_url: model.photo_url,
            marked_by: model.marked_by,
            students,
            created_at: chrono::DateTime::from_timestamp(model.created_at, 0).unwrap_or_default(),
        })
    }

    /// 写入一次点名结果
    pub async fn create_attendance_impl(
        &self,
        date: &str,
        class_level: &str,
        photo_url: Option<String>,
        marked_by: i64,
        entries: Vec<(i64, bool)>,
    ) -> Result<AttendanceRecord> {
        let now = chrono::Utc::now().timestamp();

        let record = ActiveModel {
            date: Set(date.to_string()),
            class_level: Set(class_level.to_string()),
            photo_url: Set(photo_url),
            marked_by: Set(marked_by),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| EduHubError::database_operation(format!("创建考勤记录失败: {e}")))?;

        if !entries.is_empty() {
            let rows: Vec<EntryActiveModel> = entries
                .into_iter()
                .map(|(student_id, present)| EntryActiveModel {
                    attendance_id: Set(record.id),
                    student_id: Set(student_id),
                    present: Set(present),
                    ..Default::default()
                })
                .collect();

            AttendanceStudents::insert_many(rows)
                .exec(&self.db)
                .await
                .map_err(|e| EduHubError::database_operation(format!("写入考勤明细失败: {e}")))?;
        }

        self.assemble_attendance_record(record).await
    }

    /// 查询某天某年级的点名记录
    pub async fn get_attendance_by_date_and_class_impl(
        &self,
        date: &str,
        class_level: &str,
    ) -> Result<Option<AttendanceRecord>> {
        let result = Attendance::find()
            .filter(Column::Date.eq(date))
            .filter(Column::ClassLevel.eq(class_level))
            .one(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询考勤记录失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.assemble_attendance_record(model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出考勤记录
    pub async fn list_attendance_with_pagination_impl(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Attendance::find();

        if let Some(ref date) = query.date {
            select = select.filter(Column::Date.eq(date));
        }
        if let Some(ref class_level) = query.class_level {
            select = select.filter(Column::ClassLevel.eq(class_level));
        }

        select = select.order_by_desc(Column::Date);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询考勤总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询考勤页数失败: {e}")))?;
        let records = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询考勤列表失败: {e}")))?;

        let mut items = Vec::with_capacity(records.len());
        for model in records {
            items.push(self.assemble_attendance_record(model).await?);
        }

        Ok(AttendanceListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 学生出勤统计
    pub async fn get_attendance_stats_for_student_impl(
        &self,
        student_id: i64,
    ) -> Result<AttendanceStats> {
        let rows = AttendanceStudents::find()
            .filter(EntryColumn::StudentId.eq(student_id))
            .find_also_related(Attendance)
            .all(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询出勤统计失败: {e}")))?;

        let total_sessions = rows.len() as i64;
        let present_count = rows.iter().filter(|(entry, _)| entry.present).count() as i64;

        let mut absence_dates: Vec<String> = rows
            .iter()
            .filter(|(entry, _)| !entry.present)
            .filter_map(|(_, record)| record.as_ref().map(|r| r.date.clone()))
            .collect();
        // 最近的缺勤排在前面
        absence_dates.sort_by(|a, b| b.cmp(a));

        Ok(AttendanceStats {
            total_sessions,
            present_count,
            absence_dates,
        })
    }
}
