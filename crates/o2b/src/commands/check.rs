//! `o2b check` command implementation.

use clap::Args;
use o2b_bookstack::{Client, RemoteClient};

use super::{GlobalArgs, Session};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Also check that the configured vault can be read.
    #[arg(long)]
    vault: bool,
}

impl CheckArgs {
    /// Execute the check command.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let session = Session::open(global)?;

        let client = session.remote();
        output.info(&format!("Connecting to {}...", display_url(&client)));
        let info = client.system_info()?;

        output.success(&format!(
            "Connected to {} (Bookstack {})",
            info.app_name.as_deref().unwrap_or("Bookstack"),
            info.version
        ));

        if self.vault {
            let local = session.local()?;
            let shelves = local.shelves()?;
            output.success(&format!(
                "Vault {} readable ({} shelves)",
                local.root().display(),
                shelves.len()
            ));
        }

        Ok(())
    }
}

fn display_url(client: &RemoteClient) -> &str {
    match client.base_url() {
        "" => "<BOOKSTACK_BASE_URL not set>",
        url => url,
    }
}
