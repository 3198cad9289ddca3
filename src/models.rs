// src/models.rs
// =============================================================================
// Typed views of the JSON the marketplace API sends back.
//
// The client never relies on these for logic: responses are passed through as
// raw JSON, and these structs only exist so the terminal can render them.
// Every field has a serde default, so a sparse object still deserializes.
//
// Status values stay as strings on the wire. The enums below map the known
// codes to labels; anything unknown is rendered as "Desconocido".
// =============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Product categories the backend accepts.
pub const CATEGORIES: [&str; 6] = [
    "Remeras",
    "Abrigos",
    "Pantalones",
    "Vestidos",
    "Calzado",
    "Accesorios",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub nombre: String,
    pub whatsapp: String,
    pub rol: String,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: String,
    pub nombre: String,
    pub descripcion: String,
    pub precio: f64,
    pub talla: String,
    pub categoria: String,
    pub imagen_url: String,
    pub user_id: String,
    pub username: String,
    pub estado: String,
    pub stock: u32,
    pub reserved_by: Option<String>,
    pub transaction_id: Option<String>,
    pub views: u64,
    pub created_at: Option<String>,
}

/// Product data frozen into a transaction when it is created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductSnapshot {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub precio: Option<f64>,
    pub categoria: Option<String>,
    pub talla: Option<String>,
    pub imagen_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineEvent {
    pub status: String,
    pub timestamp: Option<String>,
    pub message: String,
    pub by_user_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    pub id: String,
    pub transaction_code: String,
    pub product_id: String,
    pub buyer_id: String,
    pub seller_id: String,
    pub product_snapshot: ProductSnapshot,
    pub status: String,
    pub timeline: Vec<TimelineEvent>,
    pub seller_confirmed: bool,
    pub buyer_paid: bool,
    pub payment_method: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub completed_at: Option<String>,
    /// Present on `GET /transactions/{id}` only.
    pub buyer: Option<Value>,
    pub seller: Option<Value>,
}

/// Server-side transaction states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    PaymentConfirmed,
    Completed,
    Cancelled,
    Disputed,
}

impl TransactionStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pendiente" => Some(Self::Pending),
            "confirmada" => Some(Self::Confirmed),
            "pago_confirmado" => Some(Self::PaymentConfirmed),
            "completada" => Some(Self::Completed),
            "cancelada" => Some(Self::Cancelled),
            "en_disputa" => Some(Self::Disputed),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Pending => "pendiente",
            Self::Confirmed => "confirmada",
            Self::PaymentConfirmed => "pago_confirmado",
            Self::Completed => "completada",
            Self::Cancelled => "cancelada",
            Self::Disputed => "en_disputa",
        }
    }
}

/// Product availability states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductStatus {
    Available,
    Reserved,
    Sold,
    Inactive,
}

impl ProductStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "disponible" => Some(Self::Available),
            "reservado" => Some(Self::Reserved),
            "vendido" => Some(Self::Sold),
            "inactivo" => Some(Self::Inactive),
            _ => None,
        }
    }
}
