//! onserver - search for a featureclass, database, mxd, or service, and view
//! info about the map services that contain that item.
//!
//! The catalog is built once per run by scanning the server's config store
//! for service manifests; listings and search results are plain line-oriented
//! text on stdout.

use anyhow::Result;
use clap::Parser;

mod catalog;
mod cli;
mod configstore;
mod manifest;
mod search;
mod service;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
