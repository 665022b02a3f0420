use super::SeaOrmStorage;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{EduHubError, Result};
use crate::models::{
    PaginationInfo,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

fn to_json_text<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| EduHubError::serialization(format!("序列化 JSON 列失败: {e}")))
}

impl SeaOrmStorage {
    /// 创建学生档案
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_code: Set(req.student_code),
            user_id: Set(req.user_id),
            grade_level: Set(req.grade_level),
            subjects: Set(Some(to_json_text(&req.subjects)?)),
            learning_style: Set(req.learning_style),
            interests: Set(Some(to_json_text(&req.interests)?)),
            academic_history: Set(None),
            parent_name: Set(req.parent_name),
            parent_phone: Set(req.parent_phone),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("创建学生档案失败: {e}")))?;

        Ok(result.into_student())
    }

    /// 通过 ID 获取学生档案
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 通过学号获取学生档案
    pub async fn get_student_by_code_impl(&self, student_code: &str) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::StudentCode.eq(student_code))
            .one(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 通过用户 ID 获取学生档案
    pub async fn get_student_by_user_id_impl(&self, user_id: i64) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 通过家长电话获取学生档案
    pub async fn get_student_by_parent_phone_impl(&self, phone: &str) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::ParentPhone.eq(phone))
            .one(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 分页列出学生
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Students::find();

        if let Some(ref grade_level) = query.grade_level {
            select = select.filter(Column::GradeLevel.eq(grade_level));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::StudentCode.contains(&escaped))
                    .add(Column::ParentName.contains(&escaped)),
            );
        }

        select = select.order_by_asc(Column::StudentCode);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询学生总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询学生页数失败: {e}")))?;
        let students = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(StudentListResponse {
            items: students.into_iter().map(|m| m.into_student()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 列出某年级的全部学生
    pub async fn list_students_by_class_level_impl(
        &self,
        class_level: &str,
    ) -> Result<Vec<Student>> {
        let students = Students::find()
            .filter(Column::GradeLevel.eq(class_level))
            .order_by_asc(Column::StudentCode)
            .all(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询年级名册失败: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    /// 更新学生档案
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        let Some(existing) = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询学生失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(grade_level) = update.grade_level {
            model.grade_level = Set(grade_level);
        }
        if let Some(subjects) = update.subjects {
            model.subjects = Set(Some(to_json_text(&subjects)?));
        }
        if let Some(learning_style) = update.learning_style {
            model.learning_style = Set(Some(learning_style));
        }
        if let Some(interests) = update.interests {
            model.interests = Set(Some(to_json_text(&interests)?));
        }
        if let Some(academic_history) = update.academic_history {
            model.academic_history = Set(Some(to_json_text(&academic_history)?));
        }
        if let Some(parent_name) = update.parent_name {
            model.parent_name = Set(Some(parent_name));
        }
        if let Some(parent_phone) = update.parent_phone {
            model.parent_phone = Set(Some(parent_phone));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("更新学生档案失败: {e}")))?;

        Ok(Some(result.into_student()))
    }

    /// 录入人脸特征与照片
    pub async fn update_student_face_impl(
        &self,
        id: i64,
        photo_url: &str,
        embedding_json: &str,
    ) -> Result<bool> {
        let Some(existing) = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("查询学生失败: {e}")))?
        else {
            return Ok(false);
        };

        let mut model: ActiveModel = existing.into();
        model.photo_url = Set(Some(photo_url.to_string()));
        model.face_embedding = Set(Some(embedding_json.to_string()));
        model.updated_at = Set(chrono::Utc::now().timestamp());

        model
            .update(&self.db)
            .await
            .map_err(|e| EduHubError::database_operation(format!("录入人脸特征失败: {e}")))?;

        Ok(true)
    }
}
