//! Command-line interface for corg.
//!
//! Provides commands for loading the workshop catalog, listing character
//! categories, and inspecting the resolved configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::catalog::CatalogStore;
use crate::config::ResolvedConfig;
use crate::loader;

/// corg - workshop catalog organizer
#[derive(Parser, Debug)]
#[command(name = "corg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Workshop file locations, overriding the config file.
#[derive(Args, Debug, Clone)]
pub struct PathArgs {
    /// Workshop directory the order file's entries are relative to
    #[arg(short, long, env = "CORG_WORKSHOP")]
    pub workshop: Option<PathBuf>,

    /// Order file (order.roa)
    #[arg(short, long, env = "CORG_ORDER")]
    pub order: Option<PathBuf>,

    /// Categories file (categories.roa)
    #[arg(short, long, env = "CORG_CATEGORIES")]
    pub categories: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the workshop catalog and print a summary
    Load {
        #[command(flatten)]
        paths: PathArgs,

        /// Print the full catalog as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// List character categories and their sizes
    Categories {
        #[command(flatten)]
        paths: PathArgs,
    },

    /// Show resolved configuration
    Config,
}

/// Workshop file locations with every path pinned down.
struct WorkshopPaths {
    workshop: PathBuf,
    order: PathBuf,
    categories: PathBuf,
}

impl WorkshopPaths {
    /// Merge CLI flags over the config file, requiring each path to come
    /// from somewhere.
    fn resolve(args: &PathArgs, config: &ResolvedConfig) -> Result<Self> {
        let workshop = args
            .workshop
            .clone()
            .or_else(|| config.workshop.clone())
            .context("No workshop directory configured (use --workshop or corg.yaml)")?;

        let order = args
            .order
            .clone()
            .or_else(|| config.order.clone())
            .unwrap_or_else(|| workshop.join("order.roa"));

        let categories = args
            .categories
            .clone()
            .or_else(|| config.categories.clone())
            .unwrap_or_else(|| workshop.join("categories.roa"));

        Ok(Self {
            workshop,
            order,
            categories,
        })
    }
}

impl Cli {
    /// Execute the parsed command.
    pub async fn execute(self) -> Result<()> {
        let config = ResolvedConfig::load()?;

        match self.command {
            Commands::Load { paths, json } => {
                let paths = WorkshopPaths::resolve(&paths, &config)?;
                let store = load_into_store(&paths).await?;

                if json {
                    let catalog = store.get_current();
                    println!("{}", serde_json::to_string_pretty(&catalog)?);
                }
                Ok(())
            }

            Commands::Categories { paths } => {
                let paths = WorkshopPaths::resolve(&paths, &config)?;
                let store = load_into_store(&paths).await?;

                for category in &store.get_current().char_tree.categories {
                    println!("{:<24} {} items", category.name, category.items.len());
                }
                Ok(())
            }

            Commands::Config => {
                match &config.config_file {
                    Some(path) => println!("config file: {}", path.display()),
                    None => println!("config file: (none found)"),
                }
                println!("workshop:    {}", display_opt(&config.workshop));
                println!("order:       {}", display_opt(&config.order));
                println!("categories:  {}", display_opt(&config.categories));
                Ok(())
            }
        }
    }
}

/// Load the catalog and publish it into a fresh store.
async fn load_into_store(paths: &WorkshopPaths) -> Result<CatalogStore> {
    let store = CatalogStore::new();

    // Trace each publication, including the initial empty catalog
    let subscription = store.subscribe(|catalog| {
        info!(entries = catalog.len(), "Catalog published");
    });

    let (catalog, summary) = loader::load_catalog(&paths.workshop, &paths.order, &paths.categories)
        .await
        .context("Failed to load workshop catalog")?;
    store.set(catalog);
    subscription.unsubscribe();

    info!(
        loaded_at = %summary.loaded_at.to_rfc3339(),
        duration_ms = summary.duration_ms,
        "Load complete"
    );

    Ok(store)
}

fn display_opt(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "(unset)".to_string(),
    }
}
