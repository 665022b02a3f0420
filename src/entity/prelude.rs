//! 预导入模块，方便使用

pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::attendance::{
    ActiveModel as AttendanceActiveModel, Entity as Attendance, Model as AttendanceModel,
};
pub use super::attendance_students::{
    ActiveModel as AttendanceStudentActiveModel, Entity as AttendanceStudents,
    Model as AttendanceStudentModel,
};
pub use super::chat_interactions::{
    ActiveModel as ChatInteractionActiveModel, Entity as ChatInteractions,
    Model as ChatInteractionModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
