//! Transport shapes for authors and their mapping to and from the domain.

use crate::models::{
    Author, AuthorName, AuthorNameError, Biography, BiographyTooLongError, CreateAuthorRequest,
    UpdateAuthorRequest,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorReadView {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
}

impl From<Author> for AuthorReadView {
    fn from(value: Author) -> Self {
        Self {
            id: value.id(),
            first_name: value.first_name().to_string(),
            last_name: value.last_name().to_string(),
            bio: value.bio().map(ToString::to_string),
        }
    }
}

/// Body of a create request. An `id` sent by the client is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorCreateView {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorUpdateView {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Error)]
pub enum ParseAuthorViewError {
    #[error("first name: {0}")]
    FirstName(#[source] AuthorNameError),
    #[error("last name: {0}")]
    LastName(#[source] AuthorNameError),
    #[error("bio: {0}")]
    Bio(#[from] BiographyTooLongError),
}

fn parse_fields(
    first_name: &str,
    last_name: &str,
    bio: Option<&str>,
) -> Result<(AuthorName, AuthorName, Option<Biography>), ParseAuthorViewError> {
    let first_name = AuthorName::new(first_name).map_err(ParseAuthorViewError::FirstName)?;
    let last_name = AuthorName::new(last_name).map_err(ParseAuthorViewError::LastName)?;
    let bio = match bio {
        Some(raw) => Biography::parse(raw)?,
        None => None,
    };
    Ok((first_name, last_name, bio))
}

impl TryFrom<AuthorCreateView> for CreateAuthorRequest {
    type Error = ParseAuthorViewError;

    fn try_from(value: AuthorCreateView) -> Result<Self, Self::Error> {
        let (first_name, last_name, bio) =
            parse_fields(&value.first_name, &value.last_name, value.bio.as_deref())?;
        Ok(Self::new(first_name, last_name, bio))
    }
}

impl TryFrom<AuthorUpdateView> for UpdateAuthorRequest {
    type Error = ParseAuthorViewError;

    fn try_from(value: AuthorUpdateView) -> Result<Self, Self::Error> {
        let (first_name, last_name, bio) =
            parse_fields(&value.first_name, &value.last_name, value.bio.as_deref())?;
        Ok(Self::new(value.id, first_name, last_name, bio))
    }
}
