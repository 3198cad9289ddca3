// src/api/transactions.rs
// =============================================================================
// The buyer/seller transaction workflow.
//
//   reserve ─▶ pendiente ─▶ confirmada ─▶ pago_confirmado ─▶ completada
//                  └──────────────┴───────────────┴─────────▶ cancelada
//
// The server owns the state machine and decides whether a step is allowed.
// Each method here is a single authenticated request; the client does not
// check the current status first.
// =============================================================================

use reqwest::Method;
use serde::Serialize;
use serde_json::json;

use super::{ApiClient, ApiResponse};

/// Pagination for the purchases/sales listings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

impl ApiClient {
    /// `POST /transactions/reserve`: starts a transaction for a product.
    pub async fn reserve_product(&self, product_id: &str) -> ApiResponse {
        self.post_json(&["transactions", "reserve"], json!({ "product_id": product_id }))
            .await
    }

    /// `GET /transactions/{id}`
    pub async fn get_transaction(&self, transaction_id: &str) -> ApiResponse {
        self.dispatch(self.authorized(Method::GET, &["transactions", transaction_id]))
            .await
    }

    /// `GET /transactions/code/{code}`, e.g. `TRD-AB12CD`.
    pub async fn get_transaction_by_code(&self, code: &str) -> ApiResponse {
        self.dispatch(self.authorized(Method::GET, &["transactions", "code", code]))
            .await
    }

    /// `GET /transactions/my-purchases`
    pub async fn get_my_purchases(&self, page: Pagination) -> ApiResponse {
        self.dispatch(
            self.authorized(Method::GET, &["transactions", "my-purchases"])
                .map(|request| request.query(&page)),
        )
        .await
    }

    /// `GET /transactions/my-sales`
    pub async fn get_my_sales(&self, page: Pagination) -> ApiResponse {
        self.dispatch(
            self.authorized(Method::GET, &["transactions", "my-sales"])
                .map(|request| request.query(&page)),
        )
        .await
    }

    /// `POST /transactions/{id}/seller-confirm`: seller accepts the sale.
    pub async fn seller_confirm(&self, transaction_id: &str, payment_method: &str) -> ApiResponse {
        self.post_json(
            &["transactions", transaction_id, "seller-confirm"],
            json!({ "payment_method": payment_method }),
        )
        .await
    }

    /// `POST /transactions/{id}/buyer-confirm-payment`: buyer says they paid.
    pub async fn buyer_confirm_payment(&self, transaction_id: &str) -> ApiResponse {
        self.post_json(
            &["transactions", transaction_id, "buyer-confirm-payment"],
            json!({}),
        )
        .await
    }

    /// `POST /transactions/{id}/complete`
    pub async fn complete_transaction(&self, transaction_id: &str) -> ApiResponse {
        self.post_json(&["transactions", transaction_id, "complete"], json!({}))
            .await
    }

    /// `POST /transactions/{id}/cancel`
    pub async fn cancel_transaction(&self, transaction_id: &str, reason: &str) -> ApiResponse {
        self.post_json(
            &["transactions", transaction_id, "cancel"],
            json!({ "reason": reason }),
        )
        .await
    }

    /// `POST /transactions/{id}/note`
    pub async fn add_note(&self, transaction_id: &str, note: &str) -> ApiResponse {
        self.post_json(
            &["transactions", transaction_id, "note"],
            json!({ "note": note }),
        )
        .await
    }

    // Every workflow step is an authenticated POST with a JSON body
    async fn post_json(&self, segments: &[&str], body: serde_json::Value) -> ApiResponse {
        self.dispatch(
            self.authorized(Method::POST, segments)
                .map(|request| request.json(&body)),
        )
        .await
    }
}
