use thiserror::Error;

const AUTHOR_NAME_MAX_CHARS: usize = 50;
const BIOGRAPHY_MAX_CHARS: usize = 250;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorName(String);

impl AuthorName {
    pub fn new(raw: &str) -> Result<Self, AuthorNameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AuthorNameError::Empty);
        }
        let len = trimmed.chars().count();
        if len > AUTHOR_NAME_MAX_CHARS {
            return Err(AuthorNameError::TooLong {
                len,
                max: AUTHOR_NAME_MAX_CHARS,
            });
        }
        Ok(Self(trimmed.into()))
    }

    pub fn new_unchecked(raw: &str) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AuthorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorNameError {
    #[error("Author name cannot be empty")]
    Empty,
    #[error("Author name is {len} characters long, at most {max} are allowed")]
    TooLong { len: usize, max: usize },
}

/// Free-form author biography. Blank input means the author has none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Biography(String);

impl Biography {
    pub fn parse(raw: &str) -> Result<Option<Self>, BiographyTooLongError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let len = trimmed.chars().count();
        if len > BIOGRAPHY_MAX_CHARS {
            return Err(BiographyTooLongError {
                len,
                max: BIOGRAPHY_MAX_CHARS,
            });
        }
        Ok(Some(Self(trimmed.into())))
    }

    pub fn new_unchecked(raw: &str) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Biography {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Biography is {len} characters long, at most {max} are allowed")]
pub struct BiographyTooLongError {
    len: usize,
    max: usize,
}

/// A persisted author. `version` is the optimistic-concurrency token the store
/// checks on every update; it never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    id: i32,
    first_name: AuthorName,
    last_name: AuthorName,
    bio: Option<Biography>,
    version: i64,
}

impl Author {
    pub const fn new(
        id: i32,
        first_name: AuthorName,
        last_name: AuthorName,
        bio: Option<Biography>,
        version: i64,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            bio,
            version,
        }
    }

    pub const fn id(&self) -> i32 {
        self.id
    }

    pub const fn first_name(&self) -> &AuthorName {
        &self.first_name
    }

    pub const fn last_name(&self) -> &AuthorName {
        &self.last_name
    }

    pub const fn bio(&self) -> Option<&Biography> {
        self.bio.as_ref()
    }

    pub const fn version(&self) -> i64 {
        self.version
    }

    /// Overwrites every mapped field with the request's values. Identity and
    /// version are left untouched.
    pub fn apply(&mut self, req: UpdateAuthorRequest) {
        self.first_name = req.first_name;
        self.last_name = req.last_name;
        self.bio = req.bio;
    }
}

#[derive(Debug, Clone)]
pub struct CreateAuthorRequest {
    first_name: AuthorName,
    last_name: AuthorName,
    bio: Option<Biography>,
}

impl CreateAuthorRequest {
    pub const fn new(first_name: AuthorName, last_name: AuthorName, bio: Option<Biography>) -> Self {
        Self {
            first_name,
            last_name,
            bio,
        }
    }

    pub const fn first_name(&self) -> &AuthorName {
        &self.first_name
    }

    pub const fn last_name(&self) -> &AuthorName {
        &self.last_name
    }

    pub const fn bio(&self) -> Option<&Biography> {
        self.bio.as_ref()
    }
}

#[derive(Error, Debug)]
#[error(transparent)]
pub struct CreateAuthorError(#[from] pub anyhow::Error);

#[derive(Error, Debug)]
pub enum FindAuthorError {
    #[error("Author with id \"{id}\" does not exist")]
    NotFound { id: i32 },
    #[error(transparent)]
    Unknown(anyhow::Error),
}

#[derive(Error, Debug)]
#[error(transparent)]
pub struct FindAllAuthorsError(#[from] pub anyhow::Error);

/// Full replacement of an author's mapped fields.
#[derive(Debug, Clone)]
pub struct UpdateAuthorRequest {
    id: i32,
    first_name: AuthorName,
    last_name: AuthorName,
    bio: Option<Biography>,
}

impl UpdateAuthorRequest {
    pub const fn new(
        id: i32,
        first_name: AuthorName,
        last_name: AuthorName,
        bio: Option<Biography>,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            bio,
        }
    }

    pub const fn id(&self) -> i32 {
        self.id
    }
}

#[derive(Error, Debug)]
pub enum UpdateAuthorError {
    #[error("Author with id \"{id}\" was modified or removed since it was read")]
    Conflict { id: i32 },
    #[error(transparent)]
    Unknown(anyhow::Error),
}

#[derive(Error, Debug)]
pub enum DeleteAuthorError {
    #[error("Author with id \"{id}\" does not exist")]
    NotFound { id: i32 },
    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
#[error(transparent)]
pub struct AuthorExistsError(#[from] pub anyhow::Error);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_name_is_trimmed() {
        let name = AuthorName::new("  Jane ").unwrap();
        assert_eq!(name.as_str(), "Jane");
    }

    #[test]
    fn blank_author_name_is_rejected() {
        assert_eq!(AuthorName::new("   "), Err(AuthorNameError::Empty));
    }

    #[test]
    fn long_author_name_is_rejected() {
        let raw = "x".repeat(51);
        assert_eq!(
            AuthorName::new(&raw),
            Err(AuthorNameError::TooLong { len: 51, max: 50 })
        );
        assert!(AuthorName::new(&"x".repeat(50)).is_ok());
    }

    #[test]
    fn blank_biography_is_absent() {
        assert_eq!(Biography::parse(" \n").unwrap(), None);
    }

    #[test]
    fn long_biography_is_rejected() {
        assert!(Biography::parse(&"b".repeat(251)).is_err());
        assert!(Biography::parse(&"b".repeat(250)).unwrap().is_some());
    }

    #[test]
    fn apply_replaces_fields_but_keeps_identity() {
        let mut author = Author::new(
            7,
            AuthorName::new_unchecked("Jane"),
            AuthorName::new_unchecked("Austen"),
            Some(Biography::new_unchecked("Novelist")),
            3,
        );
        let req = UpdateAuthorRequest::new(
            99,
            AuthorName::new_unchecked("Charlotte"),
            AuthorName::new_unchecked("Bronte"),
            None,
        );

        author.apply(req);

        assert_eq!(author.id(), 7);
        assert_eq!(author.version(), 3);
        assert_eq!(author.first_name().as_str(), "Charlotte");
        assert_eq!(author.last_name().as_str(), "Bronte");
        assert_eq!(author.bio(), None);
    }
}
