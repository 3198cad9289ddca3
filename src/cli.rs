// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
// tradeco [--api-url URL] [--session-file PATH] [--json] <COMMAND>
//
// Commands mirror the API: auth (register/login/logout/whoami), products,
// profile, users and tx (transactions). Global flags can also be set through
// TRADECO_* environment variables or a .env file.
// =============================================================================

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use tradeco_client::api::{Pagination, ProductFilters, ProductForm, ProfileUpdate};
use tradeco_client::DEFAULT_BASE_URL;

#[derive(Parser, Debug)]
#[command(
    name = "tradeco",
    version,
    about = "Command-line client for the TRADEco marketplace API",
    long_about = "tradeco talks to a TRADEco backend: log in, browse and publish products, \
                  and move purchases through reservation, payment and completion."
)]
pub struct Cli {
    /// Base URL of the API
    #[arg(long, global = true, env = "TRADECO_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// File where the token and user snapshot are kept between runs
    #[arg(
        long,
        global = true,
        env = "TRADECO_SESSION_FILE",
        default_value = ".tradeco/session.json"
    )]
    pub session_file: PathBuf,

    /// Print the raw JSON response instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the backend is reachable
    Health,

    /// Create an account and log in with it
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        /// Can also come from TRADECO_PASSWORD so it stays out of shell history
        #[arg(long, env = "TRADECO_PASSWORD", hide_env_values = true)]
        password: String,
        /// Full name
        #[arg(long)]
        nombre: String,
        #[arg(long)]
        whatsapp: Option<String>,
    },

    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TRADECO_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user from the stored session (no request)
    Whoami,

    /// Browse and manage products
    #[command(subcommand)]
    Products(ProductCommands),

    /// Your own profile
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Someone else's public profile
    User { user_id: String },

    /// Purchases and sales
    #[command(subcommand)]
    Tx(TxCommands),
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// List available products
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Only this category (Remeras, Abrigos, Pantalones, ...)
        #[arg(long)]
        categoria: Option<String>,
        /// Free-text search on name and description
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one product
    Show { product_id: String },

    /// Publish a product
    Create {
        #[command(flatten)]
        fields: ProductArgs,
    },

    /// Edit one of your products (only the given fields change)
    Update {
        product_id: String,
        #[command(flatten)]
        fields: ProductArgs,
    },

    /// Delete one of your products
    Delete { product_id: String },

    /// List the product categories
    Categories,

    /// List the products published by a user
    ByUser { user_id: String },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Show your profile as stored on the server
    Show,

    /// Change profile fields
    Update {
        #[arg(long)]
        nombre: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        whatsapp: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TxCommands {
    /// Reserve a product (starts a transaction)
    Reserve { product_id: String },

    /// Show a transaction by id
    Show { transaction_id: String },

    /// Show a transaction by its code (TRD-XXXXXX)
    Code { code: String },

    /// Transactions where you are the buyer
    Purchases {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Transactions where you are the seller
    Sales {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Purchases and sales together
    List {
        #[command(flatten)]
        page: PageArgs,
    },

    /// (seller) Accept the sale
    SellerConfirm {
        transaction_id: String,
        /// Agreed payment method, e.g. "efectivo" or "transferencia"
        #[arg(long, default_value = "")]
        payment_method: String,
    },

    /// (buyer) Confirm that you paid
    ConfirmPayment { transaction_id: String },

    /// Mark the transaction as completed
    Complete { transaction_id: String },

    /// Cancel the transaction
    Cancel {
        transaction_id: String,
        #[arg(long, default_value = "")]
        reason: String,
    },

    /// Add a note to the transaction timeline
    Note { transaction_id: String, note: String },
}

#[derive(Args, Debug, Clone, Copy)]
pub struct PageArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long, default_value_t = 20)]
    pub limit: u32,
}

impl From<PageArgs> for Pagination {
    fn from(args: PageArgs) -> Self {
        Pagination {
            page: args.page,
            limit: args.limit,
        }
    }
}

impl PageArgs {
    pub fn filters(self, categoria: Option<String>, search: Option<String>) -> ProductFilters {
        ProductFilters {
            page: self.page,
            limit: self.limit,
            categoria,
            search,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ProductArgs {
    #[arg(long)]
    pub nombre: Option<String>,
    #[arg(long)]
    pub descripcion: Option<String>,
    #[arg(long)]
    pub precio: Option<f64>,
    /// Size, e.g. "M" or "42"
    #[arg(long)]
    pub talla: Option<String>,
    #[arg(long)]
    pub categoria: Option<String>,
    /// Image file to upload
    #[arg(long)]
    pub imagen: Option<PathBuf>,
}

impl From<ProductArgs> for ProductForm {
    fn from(args: ProductArgs) -> Self {
        ProductForm {
            nombre: args.nombre,
            descripcion: args.descripcion,
            precio: args.precio,
            talla: args.talla,
            categoria: args.categoria,
            imagen: args.imagen,
        }
    }
}

pub fn profile_update(
    nombre: Option<String>,
    email: Option<String>,
    whatsapp: Option<String>,
) -> ProfileUpdate {
    ProfileUpdate {
        nombre,
        email,
        whatsapp,
    }
}
