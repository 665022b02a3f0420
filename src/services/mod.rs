pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod students;
pub mod submissions;
pub mod tutor;
pub mod users;
pub mod websocket;
pub mod whatsapp;

pub use assignments::AssignmentService;
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use students::StudentService;
pub use submissions::SubmissionService;
pub use tutor::TutorService;
pub use users::UserService;
pub use whatsapp::WhatsAppService;
