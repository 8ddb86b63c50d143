//! Library listing, the read-only GET sweep, and the create/delete lifecycle

use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::api::models::{Identified, LibrariesResponse, NewLibrary, ResultsPage};
use crate::api::{AbsClient, ApiError, ItemsQuery, LibraryResource};
use crate::scenarios::{probe, UNKNOWN_LIBRARY_ID};
use crate::ui::Reporter;

/// What `list` found
#[derive(Debug, Clone, Default)]
pub struct LibraryOverview {
    pub library_ids: Vec<String>,
    pub item_ids: Vec<String>,
}

/// Lists libraries, the items of the first one, and the first item itself.
#[instrument(skip(client, reporter))]
pub async fn list(client: &AbsClient, reporter: &Reporter) -> Result<LibraryOverview, ApiError> {
    let libraries: LibrariesResponse = probe(reporter, "libraries", client.libraries())
        .await?
        .decode()?;
    let library_ids: Vec<String> = libraries.libraries.into_iter().map(|l| l.id).collect();
    info!("Found {} libraries", library_ids.len());

    let first = library_ids
        .first()
        .ok_or_else(|| ApiError::NotFound("server reports no libraries".to_string()))?;

    let page: ResultsPage = probe(
        reporter,
        "library items",
        client.library_items(first, &ItemsQuery::default()),
    )
    .await?
    .decode()?;
    let item_ids: Vec<String> = page.results.into_iter().map(|i| i.id).collect();
    info!("Library {} has {} items", first, item_ids.len());

    match item_ids.first() {
        Some(item_id) => {
            probe(reporter, "item details", client.item(item_id)).await?;
        }
        None => warn!("Library {} is empty, skipping item details", first),
    }

    Ok(LibraryOverview { library_ids, item_ids })
}

/// Resolves the library to work on: the given id, or the server's first.
pub async fn resolve_library(client: &AbsClient, library_id: Option<String>) -> Result<String, ApiError> {
    match library_id {
        Some(id) => Ok(id),
        None => client
            .library_ids()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound("server reports no libraries".to_string())),
    }
}

/// Every item listing variant the sweep requests.
pub fn item_query_permutations() -> Vec<ItemsQuery> {
    let mut queries = vec![
        ItemsQuery::default(),
        ItemsQuery::limit(0),
        ItemsQuery::limit(4),
        ItemsQuery { page: Some(1), ..Default::default() },
        ItemsQuery { limit: Some(4), page: Some(1), ..Default::default() },
        ItemsQuery { sort: Some("media.metadata.title".to_string()), ..Default::default() },
    ];
    for value in [true, false] {
        queries.push(ItemsQuery { desc: Some(value), ..Default::default() });
    }
    for value in [true, false] {
        queries.push(ItemsQuery { minified: Some(value), ..Default::default() });
    }
    for value in [true, false] {
        queries.push(ItemsQuery { collapse_series: Some(value), ..Default::default() });
    }
    queries
}

/// Issues every read-only GET against an existing library. Returns the
/// number of requests sent.
#[instrument(skip(client, reporter))]
pub async fn existing_gets(
    client: &AbsClient,
    reporter: &Reporter,
    library_id: &str,
) -> Result<usize, ApiError> {
    let mut sent = 0;

    probe(reporter, "library", client.library(library_id)).await?;
    sent += 1;

    for query in item_query_permutations() {
        let label = match query.to_params() {
            params if params.is_empty() => "items".to_string(),
            params => {
                let pairs: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                format!("items {}", pairs.join("&"))
            }
        };
        probe(reporter, &label, client.library_items(library_id, &query)).await?;
        sent += 1;
    }

    for resource in LibraryResource::ALL {
        probe(reporter, resource.as_path(), client.library_resource(library_id, resource)).await?;
        sent += 1;
    }

    info!("Sent {} requests against library {}", sent, library_id);
    Ok(sent)
}

/// Creates a library, inspects it, clears its issues and deletes it, doing
/// the same against an unknown id after each step. Returns the id of the
/// library that was created.
#[instrument(skip(client, reporter))]
pub async fn lifecycle<S: AsRef<str> + std::fmt::Debug>(
    client: &AbsClient,
    reporter: &Reporter,
    name: &str,
    folders: &[S],
    pause: Duration,
) -> Result<String, ApiError> {
    let library = NewLibrary::new(name, folders);
    let created: Identified = probe(reporter, "create library", client.create_library(&library))
        .await?
        .decode()?;
    info!("Created library {}", created.id);
    tokio::time::sleep(pause).await;

    probe(reporter, "get new library", client.library(&created.id)).await?;
    probe(reporter, "get unknown library", client.library(UNKNOWN_LIBRARY_ID)).await?;
    tokio::time::sleep(pause).await;

    probe(reporter, "clear issues", client.delete_library_issues(&created.id)).await?;
    probe(
        reporter,
        "clear issues unknown",
        client.delete_library_issues(UNKNOWN_LIBRARY_ID),
    )
    .await?;
    tokio::time::sleep(pause).await;

    probe(reporter, "delete library", client.delete_library(&created.id)).await?;
    probe(reporter, "delete unknown library", client.delete_library(UNKNOWN_LIBRARY_ID)).await?;

    Ok(created.id)
}
