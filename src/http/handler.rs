use crate::http::AppState;
use crate::http::response::{ApiCreated, ApiError, ApiSuccess};
use crate::http::views::{AuthorCreateView, AuthorReadView, AuthorUpdateView};
use crate::models::{CreateAuthorRequest, UpdateAuthorError, UpdateAuthorRequest};
use crate::repositories::AuthorRepository;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use tracing::{Span, field};

pub fn author_location(id: i32) -> String {
    format!("{}/{id}", crate::http::AUTHORS_PATH)
}

#[tracing::instrument(skip_all)]
pub async fn get_authors<AR: AuthorRepository>(
    State(state): State<AppState<AR>>,
) -> Result<ApiSuccess<Vec<AuthorReadView>>, ApiError> {
    let authors = state.author_repo.find_all_authors().await?;
    let views = authors.into_iter().map(AuthorReadView::from).collect();
    Ok(ApiSuccess::new(StatusCode::OK, views))
}

#[tracing::instrument(skip_all, fields(id = field::Empty))]
pub async fn get_author<AR: AuthorRepository>(
    State(state): State<AppState<AR>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<ApiSuccess<AuthorReadView>, ApiError> {
    let Path(id) = path?;
    Span::current().record("id", id);

    let author = state.author_repo.find_author(id).await?;
    Ok(ApiSuccess::new(StatusCode::OK, author.into()))
}

#[tracing::instrument(skip_all, fields(id = field::Empty))]
pub async fn update_author<AR: AuthorRepository>(
    State(state): State<AppState<AR>>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<AuthorUpdateView>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    Span::current().record("id", id);
    let Json(body) = body?;

    if body.id != id {
        tracing::warn!(body_id = body.id, "update id does not match route id");
        return Err(ApiError::BadRequest);
    }
    let req = UpdateAuthorRequest::try_from(body).map_err(|err| {
        tracing::warn!(error = %err, "invalid author update");
        ApiError::BadRequest
    })?;

    let mut author = state.author_repo.find_author(id).await?;
    author.apply(req);

    match state.author_repo.update_author(&author).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(UpdateAuthorError::Conflict { id }) => {
            if state.author_repo.author_exists(id).await? {
                Err(UpdateAuthorError::Conflict { id }.into())
            } else {
                tracing::warn!("author removed while being updated");
                Err(ApiError::NotFound)
            }
        }
        Err(err) => Err(err.into()),
    }
}

#[tracing::instrument(skip_all)]
pub async fn create_author<AR: AuthorRepository>(
    State(state): State<AppState<AR>>,
    body: Result<Json<AuthorCreateView>, JsonRejection>,
) -> Result<ApiCreated<AuthorReadView>, ApiError> {
    let Json(body) = body?;
    let req = CreateAuthorRequest::try_from(body).map_err(|err| {
        tracing::warn!(error = %err, "invalid author");
        ApiError::BadRequest
    })?;

    let author = state.author_repo.create_author(&req).await?;
    tracing::info!(id = author.id(), "author created");
    Ok(ApiCreated::new(
        author_location(author.id()),
        AuthorReadView::from(author),
    ))
}

#[tracing::instrument(skip_all, fields(id = field::Empty))]
pub async fn delete_author<AR: AuthorRepository>(
    State(state): State<AppState<AR>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    Span::current().record("id", id);

    let author = state.author_repo.find_author(id).await?;
    state.author_repo.delete_author(&author).await?;
    Ok(StatusCode::NO_CONTENT)
}
