//! Author lookups, update and match

use tracing::{info, instrument, warn};

use crate::api::models::{AuthorMatch, AuthorUpdate};
use crate::api::{AbsClient, ApiError};
use crate::scenarios::{probe, UNKNOWN_AUTHOR_ID};
use crate::ui::Reporter;

/// Probes the first author of `library_id`. Returns its id, or `None` when
/// the library has no authors.
#[instrument(skip(client, reporter))]
pub async fn run(
    client: &AbsClient,
    reporter: &Reporter,
    library_id: &str,
) -> Result<Option<String>, ApiError> {
    let authors = client.library_authors(library_id).await?;
    info!("Library {} has {} authors", library_id, authors.authors.len());

    let Some(author) = authors.authors.into_iter().next() else {
        warn!("No authors in library {}", library_id);
        return Ok(None);
    };

    probe(reporter, "author", client.author(&author.id, None)).await?;
    probe(reporter, "author with items", client.author(&author.id, Some("items"))).await?;
    probe(
        reporter,
        "author with items and series",
        client.author(&author.id, Some("items,series")),
    )
    .await?;
    probe(reporter, "unknown author", client.author(UNKNOWN_AUTHOR_ID, None)).await?;

    // Renaming to the current name leaves the author untouched.
    let update = AuthorUpdate { name: author.name.clone(), ..Default::default() };
    probe(reporter, "update author", client.update_author(&author.id, &update)).await?;

    match &author.name {
        Some(name) => {
            let query = AuthorMatch { q: Some(name.clone()), ..Default::default() };
            probe(reporter, "match author", client.match_author(&author.id, &query)).await?;
        }
        None => warn!("Author {} has no name, skipping match", author.id),
    }

    Ok(Some(author.id))
}
