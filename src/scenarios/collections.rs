//! Collection create/update/membership/delete permutations

use tracing::{info, instrument, warn};

use crate::api::models::{CollectionUpdate, Identified, NewCollection};
use crate::api::{AbsClient, ApiError, ApiResponse};
use crate::scenarios::{probe, slice_books, UNKNOWN_BOOK_ID, UNKNOWN_COLLECTION_ID};
use crate::ui::Reporter;

/// Cross product of descriptions and book lists to create collections from
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionPlan {
    pub descriptions: Vec<Option<String>>,
    pub book_sets: Vec<Option<Vec<String>>>,
}

impl CollectionPlan {
    /// No description / short / long, against no books / one / two / four.
    pub fn from_books(books: &[String]) -> Self {
        CollectionPlan {
            descriptions: vec![
                None,
                Some("First description".to_string()),
                Some("Hello, here we go with some extra things.".to_string()),
            ],
            book_sets: vec![
                None,
                Some(slice_books(books, 0, 1)),
                Some(slice_books(books, 1, 3)),
                Some(slice_books(books, 3, 7)),
            ],
        }
    }

    /// Collections to create, titled `Col 0`, `Col 1`, ... in plan order.
    pub fn collections(&self, library_id: &str) -> Vec<NewCollection> {
        let mut out = Vec::with_capacity(self.descriptions.len() * self.book_sets.len());
        for description in &self.descriptions {
            for books in &self.book_sets {
                let title = format!("Col {}", out.len());
                out.push(NewCollection::new(
                    library_id,
                    &title,
                    description.as_deref(),
                    books.as_deref(),
                ));
            }
        }
        out
    }
}

/// Name, description and books alone, pairwise, then all three.
pub fn update_permutations(books: &[String]) -> Vec<CollectionUpdate> {
    let name = |n: &str| Some(n.to_string());
    let books = Some(books.to_vec());
    vec![
        CollectionUpdate { name: name("New collection"), ..Default::default() },
        CollectionUpdate { description: name("New description"), ..Default::default() },
        CollectionUpdate { books: books.clone(), ..Default::default() },
        CollectionUpdate {
            name: name("New collection"),
            description: name("New description"),
            books: None,
        },
        CollectionUpdate { name: name("New collection"), description: None, books: books.clone() },
        CollectionUpdate { name: None, description: name("Second description"), books: books.clone() },
        CollectionUpdate {
            name: name("Last collection"),
            description: name("Last description"),
            books,
        },
    ]
}

/// Outcome of a collections run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionsRun {
    pub created: Vec<String>,
    pub deleted: Vec<String>,
}

/// Id of a collection the server reports as created.
fn created_id(response: &ApiResponse) -> Option<String> {
    if !response.is_success() {
        return None;
    }
    response.decode::<Identified>().ok().map(|c| c.id)
}

/// Runs the whole collection sequence against `library_id`, using `books`
/// as the pool of item ids. Only collections created by this run are
/// updated, filled and deleted; anything already in the library is left
/// alone.
#[instrument(skip(client, reporter, books, plan), fields(book_count = books.len()))]
pub async fn run(
    client: &AbsClient,
    reporter: &Reporter,
    library_id: &str,
    books: &[String],
    plan: &CollectionPlan,
) -> Result<CollectionsRun, ApiError> {
    let mut run = CollectionsRun::default();

    for collection in plan.collections(library_id) {
        info!(
            name = %collection.name,
            description = collection.description.is_some(),
            books = collection.books.as_ref().map_or(0, Vec::len),
            "Creating collection"
        );
        let response = probe(reporter, &collection.name, client.create_collection(&collection)).await?;
        match created_id(&response) {
            Some(id) => run.created.push(id),
            None => warn!(name = %collection.name, status = %response.status, "Collection was not created"),
        }
    }

    probe(reporter, "all collections", client.collections()).await?;
    let listed = client.library_collection_ids(library_id).await?;
    let foreign = listed.iter().filter(|id| !run.created.contains(id)).count();
    info!(
        "Library {} lists {} collections, {} not created by this run",
        library_id,
        listed.len(),
        foreign
    );

    if run.created.is_empty() {
        warn!("No collections were created in library {}, nothing to update", library_id);
        return Ok(run);
    }
    let target = run.created[0].clone();

    info!("Updating collection {}", target);
    let updates = update_permutations(&slice_books(books, 6, books.len()));
    for (n, update) in updates.iter().enumerate() {
        let label = format!("update collection {}", n + 1);
        probe(reporter, &label, client.update_collection(&target, update)).await?;
    }

    if let Some(book) = books.first() {
        info!("Adding and removing a single book");
        probe(reporter, "add book", client.collection_add_book(&target, book)).await?;
        probe(reporter, "add book again", client.collection_add_book(&target, book)).await?;
        probe(
            reporter,
            "add book unknown collection",
            client.collection_add_book(UNKNOWN_COLLECTION_ID, book),
        )
        .await?;
        probe(
            reporter,
            "add unknown book",
            client.collection_add_book(&target, UNKNOWN_BOOK_ID),
        )
        .await?;

        probe(reporter, "remove book", client.collection_remove_book(&target, book)).await?;
        probe(reporter, "remove book again", client.collection_remove_book(&target, book)).await?;
        probe(
            reporter,
            "remove book unknown collection",
            client.collection_remove_book(UNKNOWN_COLLECTION_ID, book),
        )
        .await?;
        probe(
            reporter,
            "remove unknown book",
            client.collection_remove_book(&target, UNKNOWN_BOOK_ID),
        )
        .await?;
    } else {
        warn!("No books available, skipping single book membership calls");
    }

    info!("Batch adding and removing books");
    let batch = slice_books(books, 0, 3);
    probe(reporter, "batch add", client.collection_batch_add(&target, &batch)).await?;
    probe(reporter, "batch add again", client.collection_batch_add(&target, &batch)).await?;
    probe(reporter, "batch remove", client.collection_batch_remove(&target, &batch)).await?;
    probe(reporter, "batch remove again", client.collection_batch_remove(&target, &batch)).await?;
    probe(
        reporter,
        "batch add unknown collection",
        client.collection_batch_add(UNKNOWN_COLLECTION_ID, &batch),
    )
    .await?;
    probe(
        reporter,
        "batch remove unknown collection",
        client.collection_batch_remove(UNKNOWN_COLLECTION_ID, &batch),
    )
    .await?;
    probe(reporter, "batch add empty", client.collection_batch_add(&target, &[])).await?;
    probe(reporter, "batch remove empty", client.collection_batch_remove(&target, &[])).await?;

    info!("Deleting {} collections", run.created.len());
    for id in &run.created {
        let label = format!("delete collection {}", id);
        probe(reporter, &label, client.delete_collection(id)).await?;
        run.deleted.push(id.clone());
    }

    Ok(run)
}
