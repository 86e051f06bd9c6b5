//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod ls;
pub(crate) mod status;

pub(crate) use check::CheckArgs;
pub(crate) use ls::LsArgs;
pub(crate) use status::StatusArgs;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use o2b_bookstack::{BookstackError, Client, LocalClient, RemoteClient};
use o2b_config::{
    MemoryStore, PathStore, Settings, SqliteStore, StoreError, default_config_dir, load_env,
    load_toml,
};
use tracing::{info, warn};

use crate::error::CliError;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to the .env file with BOOKSTACK_* credentials (default: last used, then ./.env).
    #[arg(short, long, global = true)]
    pub(crate) env: Option<String>,

    /// Path to the TOML config file (default: last used, then <config dir>/conf.toml).
    #[arg(short, long, global = true)]
    pub(crate) config: Option<String>,

    /// Enable info-level logging.
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,
}

/// Kind of content to list or compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Resource {
    Shelves,
    Books,
    Chapters,
    Pages,
}

impl Resource {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Shelves => "Shelves",
            Self::Books => "Books",
            Self::Chapters => "Chapters",
            Self::Pages => "Pages",
        }
    }
}

/// Loaded environment plus access to the config file.
pub(crate) struct Session {
    store: Box<dyn PathStore>,
    config: Option<String>,
}

impl Session {
    /// Open the path store and load the dotenv file.
    pub(crate) fn open(global: &GlobalArgs) -> Result<Self, CliError> {
        let store = open_store(default_config_dir());
        let env_path = load_env(global.env.as_deref(), store.as_ref())?;
        info!("Loaded environment from {}", env_path.display());

        Ok(Self {
            store,
            config: global.config.clone(),
        })
    }

    /// Parse the config file.
    pub(crate) fn settings(&self) -> Result<Settings, CliError> {
        let table = load_toml(self.config.as_deref(), self.store.as_ref())?;
        Ok(Settings::from_table(table)?)
    }

    /// Client for the Bookstack instance named in the environment.
    pub(crate) fn remote(&self) -> RemoteClient {
        RemoteClient::from_env()
    }

    /// Client for the configured vault.
    pub(crate) fn local(&self) -> Result<LocalClient, CliError> {
        let settings = self.settings()?;
        Ok(LocalClient::new(settings.wiki.path, settings.wiki.excluded))
    }
}

/// Open the `SQLite` path store, or fall back to one that forgets on exit.
fn open_store(config_dir: Result<PathBuf, StoreError>) -> Box<dyn PathStore> {
    let config_dir = match config_dir {
        Ok(dir) => dir,
        Err(e) => {
            warn!("{e}; paths will not be remembered");
            return Box::new(MemoryStore::new(PathBuf::new()));
        }
    };

    match SqliteStore::open(&config_dir) {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!("{e}; paths will not be remembered");
            Box::new(MemoryStore::new(config_dir))
        }
    }
}

/// Names of all records of one kind.
pub(crate) fn resource_names(
    client: &dyn Client,
    resource: Resource,
) -> Result<Vec<String>, BookstackError> {
    Ok(match resource {
        Resource::Shelves => client.shelves()?.into_iter().map(|s| s.name).collect(),
        Resource::Books => client.books()?.into_iter().map(|b| b.name).collect(),
        Resource::Chapters => client.chapters()?.into_iter().map(|c| c.name).collect(),
        Resource::Pages => client.pages()?.into_iter().map(|p| p.name).collect(),
    })
}
