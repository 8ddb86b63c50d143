//! Media server REST API client module

pub mod auth;
pub mod client;
pub mod endpoints;
mod error;
pub mod models;
pub mod response;

pub use auth::{login, open_session};
pub use client::{AbsClient, Params};
pub use endpoints::{ItemsQuery, LibraryResource};
pub use error::ApiError;
pub use response::{ApiResponse, Body};
