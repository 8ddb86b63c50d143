//! Scripted call sequences against a live server.
//!
//! Every scenario awaits each call before building the next, reports each
//! exchange, and keeps going when the server answers with an error status.
//! Only transport failures, or a listing it cannot continue without, stop a
//! scenario early.

pub mod authors;
pub mod collections;
pub mod libraries;

use std::future::Future;

use crate::api::{ApiError, ApiResponse};
use crate::ui::Reporter;

/// Ids the server is not expected to know, used to probe error responses.
pub const UNKNOWN_LIBRARY_ID: &str = "no-such-library";
pub const UNKNOWN_COLLECTION_ID: &str = "no-such-collection";
pub const UNKNOWN_BOOK_ID: &str = "no-such-book";
pub const UNKNOWN_AUTHOR_ID: &str = "no-such-author";

/// Awaits one call and hands the response to the reporter.
pub async fn probe<F>(reporter: &Reporter, label: &str, call: F) -> Result<ApiResponse, ApiError>
where
    F: Future<Output = Result<ApiResponse, ApiError>>,
{
    let response = call.await?;
    reporter.report(label, &response)?;
    Ok(response)
}

/// `books[start..end]`, clamped to what is available.
pub fn slice_books(books: &[String], start: usize, end: usize) -> Vec<String> {
    let end = end.min(books.len());
    let start = start.min(end);
    books[start..end].to_vec()
}
