//! `o2b status` command implementation.

use std::collections::BTreeSet;

use clap::Args;

use super::{GlobalArgs, Resource, Session, resource_names};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the status command.
#[derive(Args)]
pub(crate) struct StatusArgs {
    /// Only compare this kind of content (default: all).
    #[arg(short, long)]
    only: Option<Resource>,
}

impl StatusArgs {
    /// Execute the status command.
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let session = Session::open(global)?;
        let local = session.local()?;
        let remote = session.remote();

        let resources = match self.only {
            Some(resource) => vec![resource],
            None => vec![
                Resource::Shelves,
                Resource::Books,
                Resource::Chapters,
                Resource::Pages,
            ],
        };

        let mut in_sync = true;
        for resource in resources {
            let diff = NameDiff::new(
                resource_names(&local, resource)?,
                resource_names(&remote, resource)?,
            );
            in_sync &= diff.is_empty();
            print_diff(&output, resource, &diff);
        }

        if in_sync {
            output.success("\nVault and Bookstack are in sync.");
        }

        Ok(())
    }
}

/// Names present on only one side.
#[derive(Debug, Default, PartialEq, Eq)]
struct NameDiff {
    only_local: Vec<String>,
    only_remote: Vec<String>,
}

impl NameDiff {
    fn new(local: Vec<String>, remote: Vec<String>) -> Self {
        let local: BTreeSet<String> = local.into_iter().collect();
        let remote: BTreeSet<String> = remote.into_iter().collect();

        Self {
            only_local: local.difference(&remote).cloned().collect(),
            only_remote: remote.difference(&local).cloned().collect(),
        }
    }

    fn is_empty(&self) -> bool {
        self.only_local.is_empty() && self.only_remote.is_empty()
    }
}

fn print_diff(output: &Output, resource: Resource, diff: &NameDiff) {
    output.heading(&format!("\n{}", resource.label()));

    if diff.is_empty() {
        output.info("  up to date");
        return;
    }

    if !diff.only_local.is_empty() {
        output.warning(&format!(
            "  Not yet in Bookstack ({}):",
            diff.only_local.len()
        ));
        for name in &diff.only_local {
            output.item(name);
        }
    }

    if !diff.only_remote.is_empty() {
        output.warning(&format!(
            "  Only in Bookstack ({}):",
            diff.only_remote.len()
        ));
        for name in &diff.only_remote {
            output.item(name);
        }
    }
}
