use serde::Serialize;

use crate::storage::ItemStore;
use crate::user::{UserError, UserTable};

use super::http_mapping::{error_status_code, success_status_code};
use super::types::{ApiRequest, ApiResponse, ErrorBody};

/// Query parameter naming the target user.
pub const EMAIL_PARAM: &str = "email";

/// The operation selected for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Create,
    FetchOne { email: String },
    FetchAll,
    Update,
    Delete { email: String },
    Unsupported { method: String },
}

impl Route {
    /// Selects the operation for `request` from its method.
    ///
    /// `GET` fetches a single user when a non-empty `email` query parameter
    /// is present, and lists the table otherwise. Method names are matched
    /// exactly.
    pub fn resolve(request: &ApiRequest) -> Self {
        match request.method.as_str() {
            "POST" => Route::Create,
            "GET" => match request.query(EMAIL_PARAM) {
                Some(email) => Route::FetchOne {
                    email: email.to_string(),
                },
                None => Route::FetchAll,
            },
            "PUT" => Route::Update,
            "DELETE" => Route::Delete {
                email: request
                    .query_parameters
                    .get(EMAIL_PARAM)
                    .cloned()
                    .unwrap_or_default(),
            },
            other => Route::Unsupported {
                method: other.to_string(),
            },
        }
    }

    /// Short operation name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Create => "create",
            Route::FetchOne { .. } => "fetch_one",
            Route::FetchAll => "fetch_all",
            Route::Update => "update",
            Route::Delete { .. } => "delete",
            Route::Unsupported { .. } => "unsupported",
        }
    }
}

/// A handled request: the chosen route, the failure if any, and the
/// rendered response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    pub route: Route,
    pub error: Option<UserError>,
    pub response: ApiResponse,
}

impl From<Dispatched> for ApiResponse {
    fn from(dispatched: Dispatched) -> Self {
        dispatched.response
    }
}

/// Routes `request` to a user operation on `table` and renders the envelope.
///
/// Never fails: every error is turned into a response with a status code and
/// an `{"error": ...}` body.
pub async fn dispatch<S: ItemStore + ?Sized>(
    table: &UserTable<'_, S>,
    request: &ApiRequest,
) -> Dispatched {
    let route = Route::resolve(request);

    let result = match &route {
        Route::Create => table
            .create(&request.body)
            .await
            .and_then(|user| encode(&user)),
        Route::FetchOne { email } => match table.fetch(email).await {
            Ok(Some(user)) => encode(&user),
            Ok(None) => Err(UserError::UserDoesNotExist),
            Err(e) => Err(e),
        },
        Route::FetchAll => table.fetch_all().await.and_then(|users| encode(&users)),
        Route::Update => table
            .update(&request.body)
            .await
            .and_then(|user| encode(&user)),
        Route::Delete { email } => table.delete(email).await.and_then(|()| encode(&())),
        Route::Unsupported { .. } => Err(UserError::MethodNotAllowed),
    };

    match result {
        Ok(body) => Dispatched {
            response: ApiResponse {
                status_code: success_status_code(&route),
                body,
            },
            route,
            error: None,
        },
        Err(error) => reject(route, error),
    }
}

/// Renders `error` as the failure envelope for `route` without running any
/// operation.
///
/// Used when a request is refused before it reaches the store, e.g. a body
/// that is not valid UTF-8.
pub fn reject(route: Route, error: UserError) -> Dispatched {
    Dispatched {
        response: ApiResponse {
            status_code: error_status_code(&route, &error),
            body: error_body(&error),
        },
        route,
        error: Some(error),
    }
}

fn encode<T: Serialize>(value: &T) -> Result<String, UserError> {
    serde_json::to_string(value).map_err(UserError::could_not_marshal)
}

fn error_body(error: &UserError) -> String {
    serde_json::to_string(&ErrorBody::new(error.to_string()))
        .unwrap_or_else(|_| String::from(r#"{"error":"Internal error"}"#))
}
