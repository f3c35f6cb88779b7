use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use bookstore_api::models::{
    Author, AuthorExistsError, CreateAuthorError, CreateAuthorRequest, DeleteAuthorError,
    FindAllAuthorsError, FindAuthorError, UpdateAuthorError,
};
use bookstore_api::repositories::AuthorRepository;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tower::ServiceExt;

/// What another writer does to a row between a handler's read and its commit.
#[derive(Debug, Clone, Copy)]
pub enum Interference {
    Delete,
    Modify,
    /// The store faults while committing.
    Fail,
}

/// In-memory gateway that counts every call and can simulate failures.
#[derive(Debug, Default)]
pub struct MockAuthorRepository {
    rows: Mutex<BTreeMap<i32, Author>>,
    next_id: AtomicUsize,
    calls: AtomicUsize,
    failing: AtomicBool,
    interference: Mutex<Option<Interference>>,
    failing_existence_checks: AtomicBool,
    vanish_before_next_delete: AtomicBool,
}

impl MockAuthorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn interfere_on_next_update(&self, interference: Interference) {
        *self.interference.lock().unwrap() = Some(interference);
    }

    pub fn fail_existence_checks(&self) {
        self.failing_existence_checks.store(true, Ordering::SeqCst);
    }

    /// Removes the row between the handler's lookup and its delete.
    pub fn vanish_before_next_delete(&self) {
        self.vanish_before_next_delete.store(true, Ordering::SeqCst);
    }

    fn record_call(&self) -> Result<(), anyhow::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("database is locked"));
        }
        Ok(())
    }
}

#[async_trait]
impl AuthorRepository for MockAuthorRepository {
    async fn create_author(&self, req: &CreateAuthorRequest) -> Result<Author, CreateAuthorError> {
        self.record_call()?;
        let id = i32::try_from(self.next_id.fetch_add(1, Ordering::SeqCst) + 1).unwrap();
        let author = Author::new(
            id,
            req.first_name().clone(),
            req.last_name().clone(),
            req.bio().cloned(),
            1,
        );
        self.rows.lock().unwrap().insert(id, author.clone());
        Ok(author)
    }

    async fn find_author(&self, id: i32) -> Result<Author, FindAuthorError> {
        self.record_call().map_err(FindAuthorError::Unknown)?;
        self.rows
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(FindAuthorError::NotFound { id })
    }

    async fn find_all_authors(&self) -> Result<Vec<Author>, FindAllAuthorsError> {
        self.record_call()?;
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn update_author(&self, author: &Author) -> Result<(), UpdateAuthorError> {
        self.record_call().map_err(UpdateAuthorError::Unknown)?;
        let mut rows = self.rows.lock().unwrap();

        match self.interference.lock().unwrap().take() {
            Some(Interference::Delete) => {
                rows.remove(&author.id());
            }
            Some(Interference::Modify) => {
                if let Some(row) = rows.get_mut(&author.id()) {
                    *row = Author::new(
                        row.id(),
                        row.first_name().clone(),
                        row.last_name().clone(),
                        row.bio().cloned(),
                        row.version() + 1,
                    );
                }
            }
            Some(Interference::Fail) => {
                return Err(UpdateAuthorError::Unknown(anyhow::anyhow!(
                    "disk I/O error during commit"
                )));
            }
            None => {}
        }

        match rows.get_mut(&author.id()) {
            Some(row) if row.version() == author.version() => {
                *row = Author::new(
                    author.id(),
                    author.first_name().clone(),
                    author.last_name().clone(),
                    author.bio().cloned(),
                    author.version() + 1,
                );
                Ok(())
            }
            _ => Err(UpdateAuthorError::Conflict { id: author.id() }),
        }
    }

    async fn delete_author(&self, author: &Author) -> Result<(), DeleteAuthorError> {
        self.record_call()?;
        let mut rows = self.rows.lock().unwrap();
        if self.vanish_before_next_delete.swap(false, Ordering::SeqCst) {
            rows.remove(&author.id());
        }
        rows
            .remove(&author.id())
            .map(|_| ())
            .ok_or(DeleteAuthorError::NotFound { id: author.id() })
    }

    async fn author_exists(&self, id: i32) -> Result<bool, AuthorExistsError> {
        self.record_call()?;
        if self.failing_existence_checks.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("connection reset while checking author {id}").into());
        }
        Ok(self.rows.lock().unwrap().contains_key(&id))
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}
