//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sicme-admin", version, about = "SICME administration console")]
pub struct Cli {
    /// API base URL; falls back to SICME_API_BASE_URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// File holding the session token between invocations
    #[arg(
        long,
        global = true,
        env = "SICME_TOKEN_PATH",
        default_value = ".sicme-session.json"
    )]
    pub token_path: PathBuf,

    /// Prefix prepended to passwords on local login
    #[arg(long, global = true, env = "SICME_LOCAL_PASSWORD_PREFIX")]
    pub password_prefix: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Print records as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and keep the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SICME_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// End the session and forget the token
    Logout,

    /// Show the logged-in user
    Me,

    /// List records with optional search and paging
    List {
        resource: ResourceKind,
        #[arg(long, short)]
        search: Option<String>,
        #[arg(long, short, default_value_t = 1)]
        page: usize,
    },

    /// Show a single record
    Show { resource: ResourceKind, id: i64 },

    /// Create a record from a JSON payload
    Create {
        resource: ResourceKind,
        /// e.g. '{"name": "Sucursal Centro"}'
        #[arg(long)]
        data: String,
    },

    /// Update a record from a JSON payload
    Update {
        resource: ResourceKind,
        id: i64,
        #[arg(long)]
        data: String,
    },

    /// Activate or deactivate a record
    SetState {
        resource: ResourceKind,
        id: i64,
        state: StateArg,
    },

    /// Permanently delete a record (categories only)
    Delete { resource: ResourceKind, id: i64 },

    /// Browse the stock of a branch
    Stock {
        branch_id: i64,
        #[arg(long, short)]
        search: Option<String>,
        #[arg(long)]
        only_available: bool,
        #[arg(long)]
        category_id: Option<i64>,
        #[arg(long)]
        brand_id: Option<i64>,
        #[arg(long, short, default_value_t = 1)]
        page: u32,
    },

    /// Set the stock quantity of a product at a branch
    SetStock {
        product_id: i64,
        branch_id: i64,
        quantity: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Users,
    Categories,
    Products,
    Brands,
    Colors,
    Suppliers,
    Branches,
    Countries,
    Routes,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Users => "users",
            Self::Categories => "categories",
            Self::Products => "products",
            Self::Brands => "brands",
            Self::Colors => "colors",
            Self::Suppliers => "suppliers",
            Self::Branches => "branches",
            Self::Countries => "countries",
            Self::Routes => "routes",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StateArg {
    Active,
    Inactive,
}

impl From<StateArg> for shared::EntityState {
    fn from(value: StateArg) -> Self {
        match value {
            StateArg::Active => Self::Active,
            StateArg::Inactive => Self::Inactive,
        }
    }
}
