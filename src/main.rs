// src/main.rs
// =============================================================================
// Entry point of the tradeco CLI.
//
// What happens here:
// 1. Load .env, set up logging, parse command-line arguments
// 2. Build an ApiClient over a file-backed session
// 3. Run the subcommand and print the response
// 4. Exit with 0 (success), 1 (server said success: false) or 2 (error)
// =============================================================================

mod cli;
mod output;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ProductCommands, ProfileCommands, TxCommands};
use output::{print_response, View};
use tradeco_client::api::{Pagination, RegisterRequest};
use tradeco_client::models::{Transaction, User};
use tradeco_client::ui::{require_auth, Page, TerminalPage};
use tradeco_client::{ApiClient, ApiResponse, FileStorage, Session};

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    // Logs go to stderr so --json output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let session = Session::new(Arc::new(FileStorage::new(&cli.session_file)));
    let client = ApiClient::new(&cli.api_url, session.clone())
        .with_context(|| format!("cannot use API URL '{}'", cli.api_url))?;
    let page: Arc<dyn Page> = Arc::new(TerminalPage);

    tracing::debug!(api_url = %client.base_url(), session_file = %cli.session_file.display(), "starting");

    let (response, view) = match cli.command {
        Commands::Health => (client.health().await, View::Message),

        Commands::Register {
            username,
            email,
            password,
            nombre,
            whatsapp,
        } => {
            let request = RegisterRequest {
                username,
                email,
                password,
                nombre,
                whatsapp,
            };
            (client.register(&request).await, View::Message)
        }

        Commands::Login { email, password } => {
            (client.login(&email, &password).await, View::Message)
        }

        Commands::Logout => {
            client.logout(page.as_ref());
            println!("👋 Sesión cerrada");
            return Ok(0);
        }

        Commands::Whoami => {
            if !require_auth(&session, &page) {
                return Ok(1);
            }
            let user = session
                .current_user()
                .and_then(|u| serde_json::from_value::<User>(u).ok())
                .unwrap_or_default();
            let response = ApiResponse {
                success: true,
                message: None,
                data: serde_json::to_value(user).ok(),
                extra: Default::default(),
            };
            (response, View::User)
        }

        Commands::Products(command) => run_products(&client, command).await,

        Commands::Profile(ProfileCommands::Show) => (client.get_profile().await, View::User),
        Commands::Profile(ProfileCommands::Update {
            nombre,
            email,
            whatsapp,
        }) => {
            let update = cli::profile_update(nombre, email, whatsapp);
            (client.update_profile(&update).await, View::User)
        }

        Commands::User { user_id } => (client.get_public_profile(&user_id).await, View::User),

        Commands::Tx(command) => {
            return run_transactions(&client, command, cli.json, &page).await;
        }
    };

    finish(&response, view, cli.json, &page)
}

/// Prints a single response and picks the exit code.
fn finish(response: &ApiResponse, view: View, json: bool, page: &Arc<dyn Page>) -> Result<i32> {
    print_response(response, view, json, page)?;
    Ok(if response.success { 0 } else { 1 })
}

async fn run_products(client: &ApiClient, command: ProductCommands) -> (ApiResponse, View) {
    match command {
        ProductCommands::List {
            page,
            categoria,
            search,
        } => (
            client.list_products(&page.filters(categoria, search)).await,
            View::ProductList,
        ),
        ProductCommands::Show { product_id } => {
            (client.get_product(&product_id).await, View::Product)
        }
        ProductCommands::Create { fields } => {
            (client.create_product(fields.into()).await, View::Raw)
        }
        ProductCommands::Update { product_id, fields } => (
            client.update_product(&product_id, fields.into()).await,
            View::Raw,
        ),
        ProductCommands::Delete { product_id } => {
            (client.delete_product(&product_id).await, View::Message)
        }
        ProductCommands::Categories => (client.get_categories().await, View::Categories),
        ProductCommands::ByUser { user_id } => {
            (client.get_user_products(&user_id).await, View::ProductList)
        }
    }
}

async fn run_transactions(
    client: &ApiClient,
    command: TxCommands,
    json: bool,
    page: &Arc<dyn Page>,
) -> Result<i32> {
    let (response, view) = match command {
        // Two requests, printed as two tables
        TxCommands::List { page: page_args } => {
            return print_all_transactions(client, page_args.into(), json, page).await;
        }
        TxCommands::Reserve { product_id } => {
            (client.reserve_product(&product_id).await, View::Reservation)
        }
        TxCommands::Show { transaction_id } => {
            (client.get_transaction(&transaction_id).await, View::Transaction)
        }
        TxCommands::Code { code } => {
            (client.get_transaction_by_code(&code).await, View::Transaction)
        }
        TxCommands::Purchases { page } => (
            client.get_my_purchases(page.into()).await,
            View::TransactionList,
        ),
        TxCommands::Sales { page } => {
            (client.get_my_sales(page.into()).await, View::TransactionList)
        }
        TxCommands::SellerConfirm {
            transaction_id,
            payment_method,
        } => (
            client.seller_confirm(&transaction_id, &payment_method).await,
            View::Message,
        ),
        TxCommands::ConfirmPayment { transaction_id } => (
            client.buyer_confirm_payment(&transaction_id).await,
            View::Message,
        ),
        TxCommands::Complete { transaction_id } => (
            client.complete_transaction(&transaction_id).await,
            View::Message,
        ),
        TxCommands::Cancel {
            transaction_id,
            reason,
        } => (
            client.cancel_transaction(&transaction_id, &reason).await,
            View::Message,
        ),
        TxCommands::Note {
            transaction_id,
            note,
        } => (client.add_note(&transaction_id, &note).await, View::Message),
    };

    finish(&response, view, json, page)
}

// Purchases and sales are independent requests, so both go out at once
async fn print_all_transactions(
    client: &ApiClient,
    pagination: Pagination,
    json: bool,
    page: &Arc<dyn Page>,
) -> Result<i32> {
    let (purchases, sales) = futures::join!(
        client.get_my_purchases(pagination),
        client.get_my_sales(pagination)
    );

    if json {
        let combined = serde_json::json!({ "purchases": purchases, "sales": sales });
        println!("{}", serde_json::to_string_pretty(&combined)?);
    } else {
        for (title, response) in [("🛒 Mis compras", &purchases), ("💰 Mis ventas", &sales)] {
            println!("{}", title);
            if response.success {
                let transactions = response.data_as::<Vec<Transaction>>().unwrap_or_default();
                output::print_transactions(&transactions);
            } else {
                print_response(response, View::Message, false, page)?;
            }
            println!();
        }
    }

    Ok(if purchases.success && sales.success { 0 } else { 1 })
}
