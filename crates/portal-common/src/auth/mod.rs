//! Authentication utilities

mod password;

pub use password::PasswordService;
