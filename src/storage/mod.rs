use std::sync::Arc;

use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    attendance::{
        entities::AttendanceRecord, requests::AttendanceListQuery,
        responses::AttendanceListResponse,
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    submissions::{
        entities::{Answer, Submission},
        requests::SubmissionListQuery,
        responses::SubmissionListResponse,
    },
    tutor::{
        entities::ChatInteraction, requests::NewChatInteraction, responses::ChatHistoryResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 学生出勤汇总的原始统计（total, present, 缺勤日期列表）
#[derive(Debug, Clone)]
pub struct AttendanceStats {
    pub total_sessions: i64,
    pub present_count: i64,
    pub absence_dates: Vec<String>,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户总数
    async fn count_users(&self) -> Result<u64>;

    /// 学生档案管理方法
    // 创建学生档案
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    // 通过ID获取学生档案
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    // 通过学号获取学生档案
    async fn get_student_by_code(&self, student_code: &str) -> Result<Option<Student>>;
    // 通过用户ID获取学生档案
    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>>;
    // 通过家长电话获取学生档案（WhatsApp 渠道）
    async fn get_student_by_parent_phone(&self, phone: &str) -> Result<Option<Student>>;
    // 列出学生
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    // 列出某年级的全部学生（考勤名册）
    async fn list_students_by_class_level(&self, class_level: &str) -> Result<Vec<Student>>;
    // 更新学生档案
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    // 录入人脸特征与照片
    async fn update_student_face(
        &self,
        id: i64,
        photo_url: &str,
        embedding_json: &str,
    ) -> Result<bool>;

    /// 作业管理方法
    // 创建作业
    async fn create_assignment(
        &self,
        teacher_id: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    // 列出作业
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    // 更新作业
    async fn update_assignment(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    // 删除作业
    async fn delete_assignment(&self, id: i64) -> Result<bool>;

    /// 提交管理方法
    // 提交作业（同一学生重复提交时覆盖原答案）
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        answers: Vec<Answer>,
    ) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    // 获取某学生对某作业的提交
    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 列出提交
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    // 学生最近的提交（家长上下文用）
    async fn list_recent_submissions_by_student(
        &self,
        student_id: i64,
        limit: u64,
    ) -> Result<Vec<Submission>>;
    // 写回批改结果（答案内嵌评分 + 总分 + 总评）
    async fn update_submission_evaluation(
        &self,
        id: i64,
        answers: Vec<Answer>,
        total_score: Option<f64>,
        overall_feedback: Option<String>,
    ) -> Result<Option<Submission>>;

    /// 考勤管理方法
    // 写入一次点名结果（主记录 + 明细）
    async fn create_attendance(
        &self,
        date: &str,
        class_level: &str,
        photo_url: Option<String>,
        marked_by: i64,
        entries: Vec<(i64, bool)>,
    ) -> Result<AttendanceRecord>;
    // 查询某天某年级的点名记录
    async fn get_attendance_by_date_and_class(
        &self,
        date: &str,
        class_level: &str,
    ) -> Result<Option<AttendanceRecord>>;
    // 列出考勤记录
    async fn list_attendance_with_pagination(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse>;
    // 学生出勤统计
    async fn get_attendance_stats_for_student(&self, student_id: i64) -> Result<AttendanceStats>;

    /// 聊天交互管理方法
    // 保存一次聊天交互
    async fn create_chat_interaction(
        &self,
        interaction: NewChatInteraction,
    ) -> Result<ChatInteraction>;
    // 分页列出学生的聊天历史
    async fn list_chat_interactions_with_pagination(
        &self,
        student_id: i64,
        page: u64,
        size: u64,
    ) -> Result<ChatHistoryResponse>;
    // 学生最近的聊天交互（上下文组装用）
    async fn list_recent_chat_interactions(
        &self,
        student_id: i64,
        limit: u64,
    ) -> Result<Vec<ChatInteraction>>;
    // 按学科统计学生的提问次数
    async fn count_chat_interactions_by_subject(
        &self,
        student_id: i64,
    ) -> Result<Vec<(Option<String>, i64)>>;
    // 学生的聊天交互总数
    async fn count_chat_interactions(&self, student_id: i64) -> Result<i64>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
