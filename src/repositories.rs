use crate::models::{
    Author, AuthorExistsError, CreateAuthorError, CreateAuthorRequest, DeleteAuthorError,
    FindAllAuthorsError, FindAuthorError, UpdateAuthorError,
};
use async_trait::async_trait;

/// Persistence boundary for authors. Every write is committed in its own
/// transaction before the call returns.
#[async_trait]
pub trait AuthorRepository: Send + Sync + 'static {
    async fn create_author(&self, req: &CreateAuthorRequest) -> Result<Author, CreateAuthorError>;

    async fn find_author(&self, id: i32) -> Result<Author, FindAuthorError>;

    async fn find_all_authors(&self) -> Result<Vec<Author>, FindAllAuthorsError>;

    /// Saves `author`'s fields if the stored row still carries `author.version()`.
    /// Returns [`UpdateAuthorError::Conflict`] when the row changed or vanished.
    async fn update_author(&self, author: &Author) -> Result<(), UpdateAuthorError>;

    async fn delete_author(&self, author: &Author) -> Result<(), DeleteAuthorError>;

    async fn author_exists(&self, id: i32) -> Result<bool, AuthorExistsError>;
}
