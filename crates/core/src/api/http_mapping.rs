//! Pure functions for mapping operation outcomes to HTTP status codes.

use crate::user::UserError;

use super::Route;

/// Maps a successful outcome of `route` to an HTTP status code.
///
/// - `Create` -> 201 (Created)
/// - everything else -> 200 (OK)
pub fn success_status_code(route: &Route) -> u16 {
    match route {
        Route::Create => 201,
        Route::FetchOne { .. }
        | Route::FetchAll
        | Route::Update
        | Route::Delete { .. }
        | Route::Unsupported { .. } => 200,
    }
}

/// Maps a failure of `route` to an HTTP status code.
///
/// - `MethodNotAllowed` -> 405
/// - `FailedToFetch` while listing -> 500, the store itself failed
/// - any other failure -> 400
///
/// # Examples
///
/// ```
/// use usersvc_core::api::{error_status_code, Route};
/// use usersvc_core::user::UserError;
///
/// let error = UserError::FailedToFetch { detail: "timeout".to_string() };
/// assert_eq!(error_status_code(&Route::FetchAll, &error), 500);
/// assert_eq!(error_status_code(&Route::Create, &error), 400);
/// ```
pub fn error_status_code(route: &Route, error: &UserError) -> u16 {
    match error {
        UserError::MethodNotAllowed => 405,
        UserError::FailedToFetch { .. } if matches!(route, Route::FetchAll) => 500,
        UserError::InvalidData { .. }
        | UserError::InvalidEmailAddress
        | UserError::UserAlreadyExists
        | UserError::UserDoesNotExist
        | UserError::CouldNotMarshal { .. }
        | UserError::CouldNotCreateItem { .. }
        | UserError::CouldNotUpdateItem { .. }
        | UserError::CouldNotDeleteItem { .. }
        | UserError::FailedToFetch { .. } => 400,
    }
}
