use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "BOOKMARK_GATEWAY_LISTEN_ADDR";
pub const STORAGE_BACKEND_ENV: &str = "BOOKMARK_GATEWAY_STORAGE_BACKEND";
pub const SQLITE_URL_ENV: &str = "BOOKMARK_GATEWAY_SQLITE_URL";
pub const SEED_ENV: &str = "BOOKMARK_GATEWAY_SEED";
pub const CORS_ORIGINS_ENV: &str = "BOOKMARK_GATEWAY_CORS_ORIGINS";
pub const LOG_FORMAT_ENV: &str = "BOOKMARK_GATEWAY_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_SQLITE_URL: &str = "sqlite://bookmarks.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "sqlite")]
    Sqlite,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Sqlite => write!(f, "sqlite"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "pretty")]
    Pretty,
    #[value(name = "json")]
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "bookmark-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::Sqlite
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = SQLITE_URL_ENV, default_value = DEFAULT_SQLITE_URL)]
    pub sqlite_url: String,

    /// Insert the sample bookmarks at start-up if the store is empty.
    #[arg(long, env = SEED_ENV)]
    pub seed: bool,

    /// Browser origins allowed to call the API; any origin when empty.
    #[arg(long = "cors-origin", env = CORS_ORIGINS_ENV, value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Pretty
    )]
    pub log_format: LogFormatArg,
}
