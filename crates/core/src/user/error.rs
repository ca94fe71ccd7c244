use thiserror::Error;

/// The closed set of failures a user operation can end in.
///
/// `Display` is the single-line message shown to API callers. Variants that
/// wrap a lower-level failure keep its description in `detail` for logging;
/// it never reaches the response body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserError {
    #[error("Invalid data")]
    InvalidData { detail: String },
    #[error("Invalid email address")]
    InvalidEmailAddress,
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User does not exist")]
    UserDoesNotExist,
    #[error("Could not marshal item")]
    CouldNotMarshal { detail: String },
    #[error("Could not create item")]
    CouldNotCreateItem { detail: String },
    #[error("Could not update item")]
    CouldNotUpdateItem { detail: String },
    #[error("Could not delete item")]
    CouldNotDeleteItem { detail: String },
    #[error("Failed to fetch")]
    FailedToFetch { detail: String },
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl UserError {
    /// The taxonomy tag of this error, stable across message changes.
    pub fn kind(&self) -> &'static str {
        match self {
            UserError::InvalidData { .. } => "InvalidData",
            UserError::InvalidEmailAddress => "InvalidEmailAddress",
            UserError::UserAlreadyExists => "UserAlreadyExists",
            UserError::UserDoesNotExist => "UserDoesNotExist",
            UserError::CouldNotMarshal { .. } => "CouldNotMarshal",
            UserError::CouldNotCreateItem { .. } => "CouldNotCreateItem",
            UserError::CouldNotUpdateItem { .. } => "CouldNotUpdateItem",
            UserError::CouldNotDeleteItem { .. } => "CouldNotDeleteItem",
            UserError::FailedToFetch { .. } => "FailedToFetch",
            UserError::MethodNotAllowed => "MethodNotAllowed",
        }
    }

    /// Description of the underlying failure, if this error wraps one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            UserError::InvalidData { detail }
            | UserError::CouldNotMarshal { detail }
            | UserError::CouldNotCreateItem { detail }
            | UserError::CouldNotUpdateItem { detail }
            | UserError::CouldNotDeleteItem { detail }
            | UserError::FailedToFetch { detail } => Some(detail),
            UserError::InvalidEmailAddress
            | UserError::UserAlreadyExists
            | UserError::UserDoesNotExist
            | UserError::MethodNotAllowed => None,
        }
    }

    pub(crate) fn invalid_data(err: impl std::fmt::Display) -> Self {
        UserError::InvalidData {
            detail: err.to_string(),
        }
    }

    pub(crate) fn could_not_marshal(err: impl std::fmt::Display) -> Self {
        UserError::CouldNotMarshal {
            detail: err.to_string(),
        }
    }

    pub(crate) fn failed_to_fetch(err: impl std::fmt::Display) -> Self {
        UserError::FailedToFetch {
            detail: err.to_string(),
        }
    }
}

/// Result type for user operations.
pub type Result<T> = std::result::Result<T, UserError>;
