//! `o2b ls` command implementation.

use clap::Args;
use tracing::info;

use super::{GlobalArgs, Resource, Session, resource_names};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the ls command.
#[derive(Args)]
pub(crate) struct LsArgs {
    /// What to list.
    resource: Resource,

    /// List from the local vault instead of Bookstack.
    #[arg(short, long)]
    local: bool,
}

impl LsArgs {
    /// Execute the ls command.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let session = Session::open(global)?;

        let names = if self.local {
            resource_names(&session.local()?, self.resource)?
        } else {
            resource_names(&session.remote(), self.resource)?
        };

        info!("{} {}", names.len(), self.resource.label());
        for name in &names {
            output.record(name);
        }

        Ok(())
    }
}
