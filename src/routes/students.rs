use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::students::requests::{
    CreateStudentRequest, StudentListParams, UpdateStudentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::StudentService;
use crate::utils::SafeStudentCode;

// 懒加载的全局 StudentService 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

// 创建学生档案
pub async fn create_student(
    req: HttpRequest,
    body: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.create_student(&req, body.into_inner()).await
}

// 列出学生
pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(&req, query.into_inner()).await
}

// 获取学生档案
pub async fn get_student(req: HttpRequest, code: SafeStudentCode) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student(&req, code.0).await
}

// 更新学生档案
pub async fn update_student(
    req: HttpRequest,
    code: SafeStudentCode,
    body: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(&req, code.0, body.into_inner())
        .await
}

// 照片录入
pub async fn enroll_face(
    req: HttpRequest,
    code: SafeStudentCode,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.enroll_face(&req, code.0, payload).await
}

// 配置路由
pub fn configure_students_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列出学生 - 仅教师和管理员
                    .route(
                        web::get()
                            .to(list_students)
                            .wrap(RequireRole::new_any(UserRole::teacher_roles())),
                    )
                    // 创建学生档案 - 仅教师和管理员
                    .route(
                        web::post()
                            .to(create_student)
                            .wrap(RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                web::resource("/{code}")
                    // 获取学生档案 - 业务层校验本人或教师
                    .route(web::get().to(get_student))
                    // 更新学生档案 - 仅教师和管理员
                    .route(
                        web::put()
                            .to(update_student)
                            .wrap(RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            .service(
                web::resource("/{code}/photo")
                    // 照片录入 - 仅教师和管理员
                    .route(
                        web::post()
                            .to(enroll_face)
                            .wrap(RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            ),
    );
}
