//! Data models for requests to and responses from the media server API

use serde::{Deserialize, Serialize};

/// Login request body
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response; only the token is required
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginResponse {
    pub user: LoginUser,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginUser {
    pub token: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// A library as listed by `GET /api/libraries`
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Library {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "mediaType", default)]
    pub media_type: Option<String>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct LibrariesResponse {
    pub libraries: Vec<Library>,
}

/// Anything carrying an id; items, collections and authors are all listed
/// this way.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Identified {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Paged listing (`/items`, `/collections`)
#[derive(Deserialize, Serialize, Debug)]
pub struct ResultsPage {
    pub results: Vec<Identified>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub page: Option<u64>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct AuthorsResponse {
    pub authors: Vec<Identified>,
}

/// Body of `POST /api/collections`
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct NewCollection {
    #[serde(rename = "libraryId")]
    pub library_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub books: Option<Vec<String>>,
}

impl NewCollection {
    /// Empty descriptions and empty book lists are left out of the body.
    pub fn new(
        library_id: &str,
        name: &str,
        description: Option<&str>,
        books: Option<&[String]>,
    ) -> Self {
        NewCollection {
            library_id: library_id.to_string(),
            name: name.to_string(),
            description: description.filter(|d| !d.is_empty()).map(str::to_string),
            books: books.filter(|b| !b.is_empty()).map(<[String]>::to_vec),
        }
    }
}

/// Body of `PATCH /api/collections/{id}`; absent fields are left untouched
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct CollectionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub books: Option<Vec<String>>,
}

/// Body of `POST /api/collections/{id}/book`
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct BookRef {
    pub id: String,
}

/// Body of the batch add/remove endpoints. An empty list is sent as `[]`.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct BookBatch {
    pub books: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LibraryFolder {
    #[serde(rename = "fullPath")]
    pub full_path: String,
}

/// Body of `POST /api/libraries`
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewLibrary {
    pub name: String,
    pub folders: Vec<LibraryFolder>,
}

impl NewLibrary {
    pub fn new<S: AsRef<str>>(name: &str, folders: &[S]) -> Self {
        NewLibrary {
            name: name.to_string(),
            folders: folders
                .iter()
                .map(|f| LibraryFolder { full_path: f.as_ref().to_string() })
                .collect(),
        }
    }
}

/// Body of `PATCH /api/authors/{id}`
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct AuthorUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `POST /api/authors/{id}/match`; `asin` wins over `q` server-side
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct AuthorMatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}
