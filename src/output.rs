// src/output.rs
// =============================================================================
// Turns API responses into terminal output.
//
// - With --json the response is printed exactly as received
// - Otherwise the message goes out as an alert (stderr) and the data, if
//   any, is rendered as a table or a detail view on stdout
// =============================================================================

use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use tradeco_client::models::{Product, Transaction, User};
use tradeco_client::ui::{
    category_badge, format_date, format_price, product_status_badge, show_alert,
    transaction_badge, AlertKind, Page,
};
use tradeco_client::ApiResponse;

/// How to render a successful response's `data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Only the message
    Message,
    /// Pretty-printed JSON of `data`
    Raw,
    ProductList,
    Product,
    Categories,
    User,
    TransactionList,
    Transaction,
    /// `{transaction, seller}` as returned by reserve
    Reservation,
}

pub fn print_response(
    response: &ApiResponse,
    view: View,
    json: bool,
    page: &Arc<dyn Page>,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
        return Ok(());
    }

    if let Some(message) = response.message.as_deref() {
        let kind = if response.success {
            AlertKind::Success
        } else {
            AlertKind::Danger
        };
        show_alert(page, message, kind);
    }

    if !response.success {
        return Ok(());
    }

    match (view, response.data.as_ref()) {
        (View::Message, _) | (_, None) => {}
        (View::Raw, Some(data)) => println!("{}", serde_json::to_string_pretty(data)?),
        (View::ProductList, Some(_)) => {
            print_products(&response.data_as::<Vec<Product>>().unwrap_or_default())
        }
        (View::Product, Some(_)) => {
            print_product(&response.data_as::<Product>().unwrap_or_default())
        }
        (View::Categories, Some(data)) => print_categories(data),
        (View::User, Some(_)) => print_user(&response.data_as::<User>().unwrap_or_default()),
        (View::TransactionList, Some(_)) => {
            print_transactions(&response.data_as::<Vec<Transaction>>().unwrap_or_default())
        }
        (View::Transaction, Some(_)) => {
            print_transaction(&response.data_as::<Transaction>().unwrap_or_default())
        }
        (View::Reservation, Some(data)) => print_reservation(data),
    }

    Ok(())
}

/// Cuts `text` to `max` characters, marking the cut with "...".
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("No hay productos para mostrar");
        return;
    }

    println!(
        "{:<26} {:<30} {:>12} {:<12} {:<12}",
        "ID", "NOMBRE", "PRECIO", "CATEGORÍA", "ESTADO"
    );
    println!("{}", "=".repeat(96));

    for product in products {
        println!(
            "{:<26} {:<30} {:>12} {:<12} {:<12}",
            product.id,
            truncate(&product.nombre, 30),
            format_price(product.precio),
            category_badge(&product.categoria).label,
            product_status_badge(&product.estado).label,
        );
    }

    println!();
    println!("📋 Total: {}", products.len());
}

fn print_product(product: &Product) {
    println!("🏷️  {}", product.nombre);
    println!("   ID:          {}", product.id);
    println!("   Precio:      {}", format_price(product.precio));
    println!("   Categoría:   {}", category_badge(&product.categoria).label);
    if !product.talla.is_empty() {
        println!("   Talla:       {}", product.talla);
    }
    println!("   Estado:      {}", product_status_badge(&product.estado).label);
    println!("   Vendedor:    {} ({})", product.username, product.user_id);
    println!("   Vistas:      {}", product.views);
    println!("   Publicado:   {}", format_date(product.created_at.as_deref()));
    if !product.descripcion.is_empty() {
        println!();
        println!("   {}", product.descripcion);
    }
}

fn print_categories(data: &Value) {
    let categories = data.as_array().map(Vec::as_slice).unwrap_or_default();
    for category in categories {
        if let Some(name) = category.as_str() {
            println!("• {}", name);
        }
    }
}

fn print_user(user: &User) {
    println!("👤 {} (@{})", user.nombre, user.username);
    if !user.id.is_empty() {
        println!("   ID:        {}", user.id);
    }
    if !user.email.is_empty() {
        println!("   Email:     {}", user.email);
    }
    if !user.whatsapp.is_empty() {
        println!("   WhatsApp:  {}", user.whatsapp);
    }
    if user.created_at.is_some() {
        println!("   Desde:     {}", format_date(user.created_at.as_deref()));
    }
}

pub fn print_transactions(transactions: &[Transaction]) {
    if transactions.is_empty() {
        println!("No hay transacciones");
        return;
    }

    println!(
        "{:<12} {:<30} {:>12} {:<16} {:<28}",
        "CÓDIGO", "PRODUCTO", "PRECIO", "ESTADO", "FECHA"
    );
    println!("{}", "=".repeat(102));

    for tx in transactions {
        let snapshot = &tx.product_snapshot;
        println!(
            "{:<12} {:<30} {:>12} {:<16} {:<28}",
            tx.transaction_code,
            truncate(snapshot.nombre.as_deref().unwrap_or("-"), 30),
            format_price(snapshot.precio.unwrap_or_default()),
            transaction_badge(&tx.status).label,
            format_date(tx.created_at.as_deref()),
        );
    }
}

fn print_transaction(tx: &Transaction) {
    println!("🧾 {}  [{}]", tx.transaction_code, transaction_badge(&tx.status).label);
    println!("   ID:                 {}", tx.id);
    println!(
        "   Producto:           {} ({})",
        tx.product_snapshot.nombre.as_deref().unwrap_or("-"),
        format_price(tx.product_snapshot.precio.unwrap_or_default())
    );
    println!("   Vendedor confirmó:  {}", yes_no(tx.seller_confirmed));
    println!("   Comprador pagó:     {}", yes_no(tx.buyer_paid));
    if !tx.payment_method.is_empty() {
        println!("   Método de pago:     {}", tx.payment_method);
    }
    println!("   Creada:             {}", format_date(tx.created_at.as_deref()));
    if tx.completed_at.is_some() {
        println!("   Completada:         {}", format_date(tx.completed_at.as_deref()));
    }
    if let Some(whatsapp) = tx
        .seller
        .as_ref()
        .and_then(|s| s.get("whatsapp"))
        .and_then(Value::as_str)
        .filter(|w| !w.is_empty())
    {
        println!("   WhatsApp vendedor:  {}", whatsapp);
    }

    if !tx.timeline.is_empty() {
        println!();
        println!("   Historial:");
        for event in &tx.timeline {
            println!(
                "   - {}  {:<16} {}",
                format_date(event.timestamp.as_deref()),
                transaction_badge(&event.status).label,
                event.message
            );
        }
    }
}

fn print_reservation(data: &Value) {
    if let Some(tx) = data
        .get("transaction")
        .cloned()
        .and_then(|t| serde_json::from_value::<Transaction>(t).ok())
    {
        print_transaction(&tx);
    }

    if let Some(seller) = data.get("seller") {
        let field = |name: &str| seller.get(name).and_then(Value::as_str).unwrap_or("");
        println!();
        println!("   Contactá al vendedor: {} (@{})", field("nombre"), field("username"));
        if !field("whatsapp").is_empty() {
            println!("   WhatsApp: {}", field("whatsapp"));
        }
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "sí"
    } else {
        "no"
    }
}
