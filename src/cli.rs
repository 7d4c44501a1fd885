//! CLI module - argument definitions and the listing/search dispatcher.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use chrono::Local;
use clap::{ArgAction, Parser};

use crate::service::{MapService, Verbosity};
use crate::{catalog, configstore, search};

/// Columns of the CSV listing, in render order.
const CSV_HEADER: &str = "Service Name,Service Folder,Source MXD Path,Data Source(s)";

/// Find a featureclass, database, mxd, or service in ArcGIS Server.
#[derive(Parser, Debug)]
#[command(name = "onserver")]
#[command(
    version,
    about,
    after_help = "For search strings including spaces, enclose the query in double-quotes."
)]
pub struct Cli {
    /// String for which to search (blank returns info on all services).
    #[arg(value_name = "NAME", default_value = "")]
    pub name: String,

    /// Only display service names and URLs; repeat (-qq) for URLs only.
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Only display service URLs; a full listing is comma delimited.
    #[arg(long, alias = "qq")]
    pub veryquiet: bool,

    /// Explicitly provide the full path to the config store.
    #[arg(short = 'c', long, alias = "cs", value_name = "PATH")]
    pub configstore: Option<PathBuf>,

    /// Create CSV output (listing mode only).
    #[arg(long = "tocsv", alias = "csv")]
    pub tocsv: bool,

    /// Create Markdown output (listing mode only).
    #[arg(short = 'm', long, alias = "md")]
    pub markdown: bool,
}

impl Cli {
    fn verbosity(&self) -> Verbosity {
        if self.veryquiet || self.quiet >= 2 {
            Verbosity::VeryQuiet
        } else if self.quiet == 1 {
            Verbosity::Quiet
        } else {
            Verbosity::Full
        }
    }
}

/// Run the CLI with parsed arguments.
pub fn run(cli: Cli) -> Result<()> {
    let root = match &cli.configstore {
        Some(path) => path.clone(),
        None => match configstore::find_config_store() {
            Some(path) => path,
            None => {
                eprintln!("Cannot find ArcGIS Server configuration.");
                process::exit(1);
            }
        },
    };

    let services = catalog::build_catalog(&root);
    if cli.name.is_empty() {
        list_services(&cli, &services);
    } else {
        let matches = search::search_services(&services, &cli.name, cli.verbosity());
        if matches.is_empty() {
            println!("No Matches Found.");
        } else {
            println!("{}", matches.join("\n"));
        }
    }
    Ok(())
}

/// Render the whole catalog (empty query).
fn list_services(cli: &Cli, services: &[MapService]) {
    if cli.verbosity() == Verbosity::VeryQuiet {
        let urls: Vec<&str> = services.iter().map(|s| s.url.as_str()).collect();
        println!("{}", urls.join(","));
        return;
    }
    if cli.tocsv {
        println!("Run time: {}", Local::now().format("%Y-%m-%d @ %I:%M:%S %p"));
        println!("{}", CSV_HEADER);
    }
    for service in services {
        if cli.quiet >= 1 {
            println!("{}", service.render(Verbosity::Quiet));
        } else if cli.tocsv {
            println!("{}", service.to_csv());
        } else if cli.markdown {
            println!("{}", service.to_markdown());
        } else {
            println!("{}", service.render(Verbosity::Full));
        }
    }
}
