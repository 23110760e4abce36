//! corg - reactive workshop catalog for game mod organizers
//!
//! Models the game's workshop content as a four-branch catalog, publishes it
//! through a reactive single-slot store, and loads it from the on-disk
//! layout files (`order.roa`, `categories.roa`, per-item `config.ini`).
//!
//! # Architecture
//!
//! - The catalog is plain data: four always-present branches owning their
//!   items exclusively.
//! - The store holds exactly one catalog and notifies observers
//!   synchronously, in registration order, on every replacement. It never
//!   validates what it is handed.
//! - The loader is the only component that touches the filesystem; it
//!   assembles a catalog and the caller publishes it via the store.
//!
//! # Modules
//!
//! - `catalog`: data model and reactive store
//! - `roa`: binary layout-file parsing
//! - `metadata`: per-item `config.ini` parsing
//! - `loader`: catalog population from disk
//! - `config`: path configuration
//! - `cli`: command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Load a workshop directory and print the catalog as JSON
//! corg load --workshop ~/rivals/workshop --json
//!
//! # List character categories
//! corg categories --workshop ~/rivals/workshop
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod loader;
pub mod metadata;
pub mod roa;

// Re-export main types at crate root for convenience
pub use catalog::{Catalog, CatalogStore, Category, CharactersTree, GenericTree, Item, Subscription};
pub use loader::{load_catalog, LoadSummary};
pub use roa::{CategoryMarker, OrderFile, RoaError};
