// src/ui/badges.rs
// =============================================================================
// Status and category badges.
//
// Each badge is a fixed (Bootstrap colour, label) pair looked up from the
// value the server sent. Values we do not know get the grey "Desconocido"
// badge instead of an error, so a new server-side status never breaks a page.
// =============================================================================

use crate::models::{ProductStatus, TransactionStatus};

/// One entry of a badge table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    /// Bootstrap background suffix: `warning` → `bg-warning`.
    pub style: &'static str,
    pub label: &'static str,
}

impl Badge {
    pub const UNKNOWN: Badge = Badge {
        style: "secondary",
        label: "Desconocido",
    };

    pub fn html(&self) -> String {
        format!(r#"<span class="badge bg-{}">{}</span>"#, self.style, self.label)
    }
}

pub fn transaction_badge(status: &str) -> Badge {
    let Some(status) = TransactionStatus::from_code(status) else {
        return Badge::UNKNOWN;
    };

    let (style, label) = match status {
        TransactionStatus::Pending => ("warning", "Pendiente"),
        TransactionStatus::Confirmed => ("info", "Confirmada"),
        TransactionStatus::PaymentConfirmed => ("primary", "Pago Confirmado"),
        TransactionStatus::Completed => ("success", "Completada"),
        TransactionStatus::Cancelled => ("danger", "Cancelada"),
        TransactionStatus::Disputed => ("dark", "En Disputa"),
    };
    Badge { style, label }
}

pub fn product_status_badge(estado: &str) -> Badge {
    let Some(estado) = ProductStatus::from_code(estado) else {
        return Badge::UNKNOWN;
    };

    let (style, label) = match estado {
        ProductStatus::Available => ("success", "Disponible"),
        ProductStatus::Reserved => ("warning", "Reservado"),
        ProductStatus::Sold => ("secondary", "Vendido"),
        ProductStatus::Inactive => ("dark", "Inactivo"),
    };
    Badge { style, label }
}

pub fn category_badge(categoria: &str) -> Badge {
    let (style, label) = match categoria {
        "Remeras" => ("primary", "Remeras"),
        "Abrigos" => ("info", "Abrigos"),
        "Pantalones" => ("dark", "Pantalones"),
        "Vestidos" => ("danger", "Vestidos"),
        "Calzado" => ("warning", "Calzado"),
        "Accesorios" => ("success", "Accesorios"),
        _ => return Badge::UNKNOWN,
    };
    Badge { style, label }
}

/// Badge markup for a transaction status.
pub fn get_status_badge(status: &str) -> String {
    transaction_badge(status).html()
}

/// Badge markup for a product's `estado`.
pub fn get_product_status_badge(estado: &str) -> String {
    product_status_badge(estado).html()
}

/// Badge markup for a product category.
pub fn get_category_badge(categoria: &str) -> String {
    category_badge(categoria).html()
}
