pub mod csrf;
pub mod current_user;

pub use csrf::CsrfGuard;
pub use current_user::CurrentUser;
