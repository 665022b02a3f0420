pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod frontend;
pub mod students;
pub mod submissions;
pub mod tutor;
pub mod users;
pub mod whatsapp;
pub mod ws;

pub use assignments::configure_assignments_routes;
pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use frontend::configure_frontend_routes;
pub use students::configure_students_routes;
pub use submissions::configure_submissions_routes;
pub use tutor::configure_tutor_routes;
pub use users::configure_user_routes;
pub use whatsapp::configure_whatsapp_routes;
pub use ws::configure_ws_routes;
