mod browse;
mod primary;
mod taxonomy;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::browse::BrowseArgs;

#[derive(Debug, Parser)]
#[command(name = "tackroom")]
#[command(about = "Category mapping and filtering for the tackroom storefront")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the product types, title, breadcrumbs and children of a category path
    Resolve {
        /// Category path, e.g. horse/boots/bell-boots
        path: String,
    },
    /// Filter a catalog export down to one category page
    Browse(BrowseArgs),
    /// Compare computed primary collections against recorded values (read-only)
    Primary {
        /// Catalog export (defaults to TACKROOM_CATALOG_PATH)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Only list products whose recorded value would change
        #[arg(long)]
        only_changes: bool,
        /// Print the full plan as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Summarize the taxonomy dataset
    Taxonomy {
        /// Dataset to inspect (defaults to TACKROOM_TAXONOMY_PATH)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let config = tackroom_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Resolve { path }) => browse::run_resolve(&config, &path),
        Some(Commands::Browse(args)) => browse::run_browse(&config, &args),
        Some(Commands::Primary {
            catalog,
            only_changes,
            json,
        }) => primary::run_primary(&config, catalog.as_deref(), only_changes, json),
        Some(Commands::Taxonomy { path }) => {
            taxonomy::run_taxonomy(path.as_deref().unwrap_or(&config.taxonomy_path));
            Ok(())
        }
        None => {
            println!("tackroom: run with --help to list commands");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
