mod log_in;
mod log_out;
mod middleware;
mod redirect;
mod session;
mod sign_up;

pub use log_in::{REMEMBER_ME_COOKIE_DURATION, get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{auth_guard, auth_guard_hx};
pub use session::{DEFAULT_COOKIE_DURATION, Session};
pub use sign_up::{get_sign_up_page, post_sign_up};

#[cfg(test)]
pub(crate) use middleware::AuthState;
#[cfg(test)]
pub(crate) use session::{COOKIE_USER_INFO, save_session};
