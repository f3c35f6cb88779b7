use crate::models::{
    AuthorExistsError, CreateAuthorError, DeleteAuthorError, FindAllAuthorsError,
    FindAuthorError, UpdateAuthorError,
};
use axum::extract::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Returned to clients in place of any internal failure detail.
pub const ERROR_500_MESSAGE: &str =
    "Something went wrong while processing your request. Please try again later.";

#[derive(Debug)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub const fn new(status: StatusCode, data: T) -> Self {
        Self(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// `201 Created` with the new resource as body and its address in `Location`.
#[derive(Debug)]
pub struct ApiCreated<T: Serialize> {
    location: String,
    data: T,
}

impl<T: Serialize> ApiCreated<T> {
    pub fn new(location: impl Into<String>, data: T) -> Self {
        Self {
            location: location.into(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiCreated<T> {
    fn into_response(self) -> Response {
        (
            StatusCode::CREATED,
            [(LOCATION, self.location)],
            Json(self.data),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    status_code: u16,
    message: &'static str,
}

/// Every failure the author endpoints can report. Not-found and bad-request
/// carry no body; internal errors carry only [`ERROR_500_MESSAGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    BadRequest,
    NotFound,
    InternalServerError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST.into_response(),
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::InternalServerError => {
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let body = ApiErrorBody {
                    status_code: status.as_u16(),
                    message: ERROR_500_MESSAGE,
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

impl ApiError {
    fn internal(cause: &anyhow::Error) -> Self {
        tracing::error!(error = ?cause, "request failed");
        Self::InternalServerError
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(reason = %rejection.body_text(), "rejected request body");
        Self::BadRequest
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::warn!(reason = %rejection.body_text(), "rejected path parameter");
        Self::BadRequest
    }
}

impl From<FindAuthorError> for ApiError {
    fn from(err: FindAuthorError) -> Self {
        match err {
            FindAuthorError::NotFound { id } => {
                tracing::warn!(id, "author not found");
                Self::NotFound
            }
            FindAuthorError::Unknown(cause) => Self::internal(&cause),
        }
    }
}

impl From<FindAllAuthorsError> for ApiError {
    fn from(err: FindAllAuthorsError) -> Self {
        Self::internal(&err.0)
    }
}

impl From<CreateAuthorError> for ApiError {
    fn from(err: CreateAuthorError) -> Self {
        Self::internal(&err.0)
    }
}

impl From<AuthorExistsError> for ApiError {
    fn from(err: AuthorExistsError) -> Self {
        Self::internal(&err.0)
    }
}

impl From<DeleteAuthorError> for ApiError {
    fn from(err: DeleteAuthorError) -> Self {
        match err {
            DeleteAuthorError::NotFound { id } => {
                tracing::warn!(id, "author vanished before removal");
                Self::NotFound
            }
            DeleteAuthorError::Unknown(cause) => Self::internal(&cause),
        }
    }
}

impl From<UpdateAuthorError> for ApiError {
    fn from(err: UpdateAuthorError) -> Self {
        match err {
            UpdateAuthorError::Conflict { id } => {
                tracing::error!(id, "unresolved update conflict");
                Self::InternalServerError
            }
            UpdateAuthorError::Unknown(cause) => Self::internal(&cause),
        }
    }
}
