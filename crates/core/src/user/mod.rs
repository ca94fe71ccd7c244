mod error;
mod operations;
mod types;
mod validation;

pub use error::{Result, UserError};
pub use operations::UserTable;
pub use types::User;
pub use validation::{is_email_valid, EmailMatch, MAX_EMAIL_LEN, MIN_EMAIL_LEN};
