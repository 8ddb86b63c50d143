//! Typed wrappers over the library, item, collection and author endpoints

use tracing::debug;
use urlencoding::encode;

use crate::api::models::{
    AuthorMatch, AuthorUpdate, AuthorsResponse, BookBatch, BookRef, CollectionUpdate,
    LibrariesResponse, NewCollection, NewLibrary, ResultsPage,
};
use crate::api::{AbsClient, ApiError, ApiResponse};

/// Query options accepted by `GET /api/libraries/{id}/items`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemsQuery {
    pub limit: Option<u32>,
    pub page: Option<u32>,
    pub sort: Option<String>,
    pub desc: Option<bool>,
    pub minified: Option<bool>,
    pub collapse_series: Option<bool>,
}

fn flag(value: bool) -> String {
    let text = if value { "1" } else { "0" };
    text.to_string()
}

impl ItemsQuery {
    pub fn limit(limit: u32) -> Self {
        ItemsQuery { limit: Some(limit), ..Default::default() }
    }

    /// Wire form; booleans are sent as `1`/`0`.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort", sort.clone()));
        }
        if let Some(desc) = self.desc {
            params.push(("desc", flag(desc)));
        }
        if let Some(minified) = self.minified {
            params.push(("minified", flag(minified)));
        }
        if let Some(collapse) = self.collapse_series {
            params.push(("collapseseries", flag(collapse)));
        }
        params
    }
}

/// Read-only sub-resources of a library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryResource {
    EpisodeDownloads,
    Series,
    Collections,
    Playlists,
    Personalized,
    FilterData,
    Search,
    Stats,
    Authors,
    Narrators,
    Opml,
}

impl LibraryResource {
    pub const ALL: [LibraryResource; 11] = [
        LibraryResource::EpisodeDownloads,
        LibraryResource::Series,
        LibraryResource::Collections,
        LibraryResource::Playlists,
        LibraryResource::Personalized,
        LibraryResource::FilterData,
        LibraryResource::Search,
        LibraryResource::Stats,
        LibraryResource::Authors,
        LibraryResource::Narrators,
        LibraryResource::Opml,
    ];

    pub fn as_path(&self) -> &'static str {
        match self {
            LibraryResource::EpisodeDownloads => "episode-downloads",
            LibraryResource::Series => "series",
            LibraryResource::Collections => "collections",
            LibraryResource::Playlists => "playlists",
            LibraryResource::Personalized => "personalized",
            LibraryResource::FilterData => "filterdata",
            LibraryResource::Search => "search",
            LibraryResource::Stats => "stats",
            LibraryResource::Authors => "authors",
            LibraryResource::Narrators => "narrators",
            LibraryResource::Opml => "opml",
        }
    }
}

pub fn library_path(library_id: &str) -> String {
    format!("/api/libraries/{}", encode(library_id))
}

pub fn collection_path(collection_id: &str) -> String {
    format!("/api/collections/{}", encode(collection_id))
}

pub fn author_path(author_id: &str) -> String {
    format!("/api/authors/{}", encode(author_id))
}

impl AbsClient {
    // --- Libraries ---

    pub async fn libraries(&self) -> Result<ApiResponse, ApiError> {
        self.get("/api/libraries", None).await
    }

    /// Ids of every library, in server order.
    pub async fn library_ids(&self) -> Result<Vec<String>, ApiError> {
        let response: LibrariesResponse = self.libraries().await?.decode()?;
        let ids: Vec<String> = response.libraries.into_iter().map(|l| l.id).collect();
        debug!("Found {} libraries", ids.len());
        Ok(ids)
    }

    pub async fn library(&self, library_id: &str) -> Result<ApiResponse, ApiError> {
        self.get(&library_path(library_id), None).await
    }

    pub async fn create_library(&self, library: &NewLibrary) -> Result<ApiResponse, ApiError> {
        self.post("/api/libraries", library).await
    }

    pub async fn delete_library(&self, library_id: &str) -> Result<ApiResponse, ApiError> {
        self.delete(&library_path(library_id)).await
    }

    pub async fn delete_library_issues(&self, library_id: &str) -> Result<ApiResponse, ApiError> {
        self.delete(&format!("{}/issues", library_path(library_id))).await
    }

    pub async fn library_items(
        &self,
        library_id: &str,
        query: &ItemsQuery,
    ) -> Result<ApiResponse, ApiError> {
        let params = query.to_params();
        self.get(&format!("{}/items", library_path(library_id)), Some(&params[..])).await
    }

    pub async fn library_item_ids(
        &self,
        library_id: &str,
        query: &ItemsQuery,
    ) -> Result<Vec<String>, ApiError> {
        let page: ResultsPage = self.library_items(library_id, query).await?.decode()?;
        Ok(page.results.into_iter().map(|i| i.id).collect())
    }

    pub async fn library_resource(
        &self,
        library_id: &str,
        resource: LibraryResource,
    ) -> Result<ApiResponse, ApiError> {
        let path = format!("{}/{}", library_path(library_id), resource.as_path());
        self.get(&path, None).await
    }

    // --- Items ---

    pub async fn item(&self, item_id: &str) -> Result<ApiResponse, ApiError> {
        self.get(&format!("/api/items/{}", encode(item_id)), None).await
    }

    // --- Collections ---

    pub async fn collections(&self) -> Result<ApiResponse, ApiError> {
        self.get("/api/collections", None).await
    }

    pub async fn create_collection(&self, collection: &NewCollection) -> Result<ApiResponse, ApiError> {
        self.post("/api/collections", collection).await
    }

    pub async fn library_collection_ids(&self, library_id: &str) -> Result<Vec<String>, ApiError> {
        let page: ResultsPage = self
            .library_resource(library_id, LibraryResource::Collections)
            .await?
            .decode()?;
        Ok(page.results.into_iter().map(|c| c.id).collect())
    }

    pub async fn update_collection(
        &self,
        collection_id: &str,
        update: &CollectionUpdate,
    ) -> Result<ApiResponse, ApiError> {
        self.patch(&collection_path(collection_id), update).await
    }

    pub async fn delete_collection(&self, collection_id: &str) -> Result<ApiResponse, ApiError> {
        self.delete(&collection_path(collection_id)).await
    }

    pub async fn collection_add_book(
        &self,
        collection_id: &str,
        book_id: &str,
    ) -> Result<ApiResponse, ApiError> {
        let body = BookRef { id: book_id.to_string() };
        self.post(&format!("{}/book", collection_path(collection_id)), &body).await
    }

    pub async fn collection_remove_book(
        &self,
        collection_id: &str,
        book_id: &str,
    ) -> Result<ApiResponse, ApiError> {
        let path = format!("{}/book/{}", collection_path(collection_id), encode(book_id));
        self.delete(&path).await
    }

    pub async fn collection_batch_add(
        &self,
        collection_id: &str,
        books: &[String],
    ) -> Result<ApiResponse, ApiError> {
        let body = BookBatch { books: books.to_vec() };
        self.post(&format!("{}/batch/add", collection_path(collection_id)), &body).await
    }

    pub async fn collection_batch_remove(
        &self,
        collection_id: &str,
        books: &[String],
    ) -> Result<ApiResponse, ApiError> {
        let body = BookBatch { books: books.to_vec() };
        self.post(&format!("{}/batch/remove", collection_path(collection_id)), &body).await
    }

    // --- Authors ---

    pub async fn library_authors(&self, library_id: &str) -> Result<AuthorsResponse, ApiError> {
        self.library_resource(library_id, LibraryResource::Authors)
            .await?
            .decode()
    }

    /// `include` is a comma separated list, e.g. `items,series`.
    pub async fn author(&self, author_id: &str, include: Option<&str>) -> Result<ApiResponse, ApiError> {
        let path = author_path(author_id);
        match include {
            Some(include) => {
                let params = [("include", include.to_string())];
                self.get(&path, Some(&params[..])).await
            }
            None => self.get(&path, None).await,
        }
    }

    pub async fn update_author(&self, author_id: &str, update: &AuthorUpdate) -> Result<ApiResponse, ApiError> {
        self.patch(&author_path(author_id), update).await
    }

    pub async fn match_author(&self, author_id: &str, query: &AuthorMatch) -> Result<ApiResponse, ApiError> {
        self.post(&format!("{}/match", author_path(author_id)), query).await
    }
}
