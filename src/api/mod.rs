// src/api/mod.rs
// =============================================================================
// Client for the TRADEco marketplace REST API.
//
// Submodules:
// - client: ApiClient and the shared request template
// - response: the {success, message, data} shape every call returns
// - error: what can go wrong inside the client
// - auth, products, users, transactions: one file per resource, each adding
//   methods to ApiClient
// =============================================================================

mod auth;
mod client;
mod error;
mod products;
mod response;
mod transactions;
mod users;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::{LoginRequest, RegisterRequest, LANDING_PAGE};
pub(crate) use auth::sign_out;
pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::ClientError;
pub use products::{ProductFilters, ProductForm};
pub use response::{ApiResponse, MSG_CONNECTION_ERROR, MSG_LOGIN_REQUIRED};
pub use transactions::Pagination;
pub use users::ProfileUpdate;
