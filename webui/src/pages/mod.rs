mod admin;
mod auth;
mod dashboard;
mod home;
mod user_files;

pub use admin::Admin;
pub use auth::{Login, PasswordReset, PasswordResetConfirm, Register};
pub use dashboard::Dashboard;
pub use home::Home;
pub use user_files::AdminUserFiles;
