use crate::models::{
    Author, AuthorExistsError, AuthorName, Biography, CreateAuthorError, CreateAuthorRequest,
    DeleteAuthorError, FindAllAuthorsError, FindAuthorError, UpdateAuthorError,
};
use crate::repositories::AuthorRepository;
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteRow};
use sqlx::{FromRow, Row, SqlitePool};
use std::str::FromStr;

static MIGRATOR: Migrator = sqlx::migrate!();

#[derive(Debug, Clone)]
pub struct Sqlite {
    pool: SqlitePool,
}

impl Sqlite {
    pub async fn new(path: &str) -> anyhow::Result<Self> {
        let opts = SqliteConnectOptions::from_str(path)
            .with_context(|| format!("Invalid database path {path}"))?
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal);
        let pool = SqlitePool::connect_with(opts)
            .await
            .with_context(|| format!("Failed to open database at {path}"))?;

        MIGRATOR
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;

        Ok(Self { pool })
    }
}

impl<'r> FromRow<'r, SqliteRow> for Author {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id = row.try_get("id")?;
        let first_name: &str = row.try_get("first_name")?;
        let last_name: &str = row.try_get("last_name")?;
        let bio: Option<&str> = row.try_get("bio")?;
        let version = row.try_get("version")?;

        let first_name = AuthorName::new_unchecked(first_name);
        let last_name = AuthorName::new_unchecked(last_name);
        let bio = bio.map(Biography::new_unchecked);
        Ok(Self::new(id, first_name, last_name, bio, version))
    }
}

#[async_trait]
impl AuthorRepository for Sqlite {
    async fn create_author(&self, req: &CreateAuthorRequest) -> Result<Author, CreateAuthorError> {
        let context = || {
            format!(
                r#"Failed to create author "{} {}""#,
                req.first_name(),
                req.last_name()
            )
        };

        let mut tx = self.pool.begin().await.with_context(context)?;
        let author = sqlx::query_as(
            "INSERT INTO author (first_name, last_name, bio) VALUES (?, ?, ?) \
             RETURNING id, first_name, last_name, bio, version",
        )
        .bind(req.first_name().to_string())
        .bind(req.last_name().to_string())
        .bind(req.bio().map(ToString::to_string))
        .fetch_one(&mut *tx)
        .await
        .with_context(context)?;
        tx.commit().await.with_context(context)?;

        Ok(author)
    }

    async fn find_author(&self, id: i32) -> Result<Author, FindAuthorError> {
        let author =
            sqlx::query_as("SELECT id, first_name, last_name, bio, version FROM author WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|err| {
                    let err = anyhow!(err)
                        .context(format!(r#"Failed to retrieve author with id "{id}""#));
                    FindAuthorError::Unknown(err)
                })?;

        author.ok_or(FindAuthorError::NotFound { id })
    }

    async fn find_all_authors(&self) -> Result<Vec<Author>, FindAllAuthorsError> {
        let authors = sqlx::query_as("SELECT id, first_name, last_name, bio, version FROM author")
            .fetch_all(&self.pool)
            .await
            .context("Failed to retrieve all authors")?;

        Ok(authors)
    }

    async fn update_author(&self, author: &Author) -> Result<(), UpdateAuthorError> {
        let id = author.id();
        let context = || format!(r#"Failed to update author with id "{id}""#);

        let mut tx = self
            .pool
            .begin()
            .await
            .with_context(context)
            .map_err(UpdateAuthorError::Unknown)?;
        let result = sqlx::query(
            "UPDATE author SET first_name = ?, last_name = ?, bio = ?, version = version + 1 \
             WHERE id = ? AND version = ?",
        )
        .bind(author.first_name().to_string())
        .bind(author.last_name().to_string())
        .bind(author.bio().map(ToString::to_string))
        .bind(id)
        .bind(author.version())
        .execute(&mut *tx)
        .await
        .with_context(context)
        .map_err(UpdateAuthorError::Unknown)?;

        if result.rows_affected() == 0 {
            return Err(UpdateAuthorError::Conflict { id });
        }

        tx.commit()
            .await
            .with_context(context)
            .map_err(UpdateAuthorError::Unknown)
    }

    async fn delete_author(&self, author: &Author) -> Result<(), DeleteAuthorError> {
        let id = author.id();
        let context = || format!(r#"Failed to delete author with id "{id}""#);

        let mut tx = self.pool.begin().await.with_context(context)?;
        let result = sqlx::query("DELETE FROM author WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .with_context(context)?;

        if result.rows_affected() == 0 {
            return Err(DeleteAuthorError::NotFound { id });
        }

        tx.commit().await.with_context(context)?;
        Ok(())
    }

    async fn author_exists(&self, id: i32) -> Result<bool, AuthorExistsError> {
        let exists = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM author WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!(r#"Failed to check whether author "{id}" exists"#))?;

        Ok(exists)
    }
}
