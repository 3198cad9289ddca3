// src/lib.rs
// =============================================================================
// tradeco_client: a client for the TRADEco second-hand marketplace API.
//
// Modules:
// - api: ApiClient and one method per REST endpoint
// - session: where the bearer token and user snapshot are kept
// - models: typed views of users, products and transactions
// - ui: alerts, navbar, badges and formatting helpers
//
// Quick start:
//
//     let session = Session::new(Arc::new(FileStorage::new("session.json")));
//     let client = ApiClient::new(DEFAULT_BASE_URL, session)?;
//     let response = client.login("ana@mail.com", "secreto").await;
//     if response.success { /* token and user are now stored */ }
//
// Every request method returns an ApiResponse; none of them return Err.
// =============================================================================

pub mod api;
pub mod models;
pub mod session;
pub mod ui;

pub use api::{ApiClient, ApiResponse, ClientError, DEFAULT_BASE_URL};
pub use session::{FileStorage, MemoryStorage, Session, Storage};
