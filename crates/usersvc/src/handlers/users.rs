//! The users endpoint.
//!
//! Every request that is not a probe lands here. The request is turned into
//! an [`ApiRequest`] and handed to the dispatcher, which picks the operation
//! from the HTTP method.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};

use usersvc_core::api::{dispatch, reject, ApiRequest, Route};
use usersvc_core::user::UserError;

use crate::state::AppState;

/// Handles any method on any path (fallback).
///
/// - `POST` creates a user from the JSON body (201)
/// - `GET ?email=` fetches one user, `GET` lists all users
/// - `PUT` replaces a user from the JSON body
/// - `DELETE ?email=` removes a user
/// - anything else answers 405
///
/// Query values are form-decoded, so a `+` in an email must be sent as `%2B`.
/// The body is read as raw bytes; it only has to be UTF-8 for the routes that
/// decode it.
#[axum::debug_handler]
pub async fn handle_users(
    State(state): State<AppState>,
    method: Method,
    Query(query_parameters): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    let mut request = ApiRequest {
        method: method.as_str().to_string(),
        body: String::new(),
        query_parameters,
    };

    let dispatched = match String::from_utf8(body.to_vec()) {
        Ok(body) => {
            request.body = body;
            dispatch(&state.users(), &request).await
        }
        Err(err) => match Route::resolve(&request) {
            route @ (Route::Create | Route::Update) => reject(
                route,
                UserError::InvalidData {
                    detail: err.to_string(),
                },
            ),
            _ => dispatch(&state.users(), &request).await,
        },
    };

    let route = dispatched.route.name();
    let status = dispatched.response.status_code;

    match &dispatched.error {
        None => tracing::debug!(route, status, "Handled users request"),
        Some(error) if status >= 500 => tracing::error!(
            route,
            status,
            kind = error.kind(),
            detail = error.detail().unwrap_or_default(),
            "Users request failed"
        ),
        Some(error) => tracing::warn!(
            route,
            status,
            kind = error.kind(),
            detail = error.detail().unwrap_or_default(),
            "Users request rejected"
        ),
    }

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        dispatched.response.body,
    )
        .into_response()
}
