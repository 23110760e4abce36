//! Workshop content catalog: data model and reactive store.
//!
//! The catalog mirrors the game's workshop layout:
//!
//! ```text
//! Catalog
//! ├── char_tree   (tag 0)  categories of character items
//! ├── buddy_tree  (tag 1)  flat list of buddy items
//! ├── skin_tree   (tag 0)  flat list of skin items
//! └── stage_tree  (tag 2)  flat list of stage items
//! ```
//!
//! [`CatalogStore`] holds exactly one [`Catalog`] and notifies registered
//! observers whenever it is replaced.

pub mod model;
pub mod store;

pub use model::{Catalog, Category, CharactersTree, GenericTree, Item};
pub use store::{CatalogStore, Subscription};
