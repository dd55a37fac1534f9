//! Admin-managed store users (`_type == "user"`).

pub mod password;
pub mod user;

pub use password::PasswordDigest;
pub use user::{NewUser, User, UserDraft, UserStats, UserView, user_stats};
