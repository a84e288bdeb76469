pub mod admin;

pub mod announcements;

pub mod auth;

pub mod events;

pub mod frontend;

pub mod notifications;

pub mod parent;

pub mod profile;

pub mod student;

pub mod system;

pub mod teacher;

pub use admin::configure_admin_routes;
pub use announcements::configure_announcement_routes;
pub use auth::configure_auth_routes;
pub use events::configure_event_routes;
pub use frontend::configure_frontend_routes;
pub use notifications::configure_notification_routes;
pub use parent::configure_parent_routes;
pub use profile::configure_profile_routes;
pub use student::configure_student_routes;
pub use system::configure_system_routes;
pub use teacher::configure_teacher_routes;
