//! Catalog population from on-disk workshop files.
//!
//! The loader is the only place that touches the filesystem: it reads the
//! order and categories files, parses them via [`crate::roa`], reads each
//! listed item's `config.ini`, and assembles a [`Catalog`]. Publishing the
//! result is the caller's job — the loader never talks to the store.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Category, CharactersTree, Item};
use crate::metadata;
use crate::roa::{self, CategoryMarker};

/// What a load produced, for logging and CLI summaries.
#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    /// When the load finished
    pub loaded_at: DateTime<Utc>,

    /// Wall time spent loading
    pub duration_ms: u64,

    /// Character items read
    pub characters: usize,

    /// Character categories built (including a synthetic "Free" one)
    pub categories: usize,

    /// Buddy items read
    pub buddies: usize,

    /// Skin items read
    pub skins: usize,

    /// Stage items read
    pub stages: usize,
}

/// Load the complete catalog from a workshop directory.
///
/// `order_path` and `categories_path` are the game's layout files;
/// `workshop_dir` is the directory the order file's entries are relative to.
/// A missing or unreadable `config.ini` degrades to a default item rather
/// than failing the load; malformed layout files fail it.
pub async fn load_catalog(
    workshop_dir: &Path,
    order_path: &Path,
    categories_path: &Path,
) -> Result<(Catalog, LoadSummary)> {
    let started = Instant::now();

    let order_bytes = fs::read(order_path)
        .await
        .with_context(|| format!("Failed to read order file: {}", order_path.display()))?;
    let order = roa::parse_order_file(&order_bytes)
        .with_context(|| format!("Malformed order file: {}", order_path.display()))?;

    let category_bytes = fs::read(categories_path).await.with_context(|| {
        format!(
            "Failed to read categories file: {}",
            categories_path.display()
        )
    })?;
    let markers = roa::parse_categories(&category_bytes)
        .with_context(|| format!("Malformed categories file: {}", categories_path.display()))?;

    let characters = read_items(workshop_dir, &order.characters).await;
    let buddies = read_items(workshop_dir, &order.buddies).await;
    let stages = read_items(workshop_dir, &order.stages).await;
    let skins = read_items(workshop_dir, &order.skins).await;

    let mut catalog = Catalog::new();
    catalog.char_tree = group_characters(characters, &markers);
    catalog.buddy_tree.items = buddies;
    catalog.stage_tree.items = stages;
    catalog.skin_tree.items = skins;

    let summary = LoadSummary {
        loaded_at: Utc::now(),
        duration_ms: started.elapsed().as_millis() as u64,
        characters: order.characters.len(),
        categories: catalog.char_tree.categories.len(),
        buddies: catalog.buddy_tree.items.len(),
        skins: catalog.skin_tree.items.len(),
        stages: catalog.stage_tree.items.len(),
    };

    info!(
        characters = summary.characters,
        categories = summary.categories,
        buddies = summary.buddies,
        skins = summary.skins,
        stages = summary.stages,
        duration_ms = summary.duration_ms,
        "Loaded workshop catalog"
    );

    Ok((catalog, summary))
}

/// Read each listed item's `config.ini`, in order.
async fn read_items(workshop_dir: &Path, paths: &[String]) -> Vec<Item> {
    let mut items = Vec::with_capacity(paths.len());
    for path in paths {
        items.push(read_item(workshop_dir, path).await);
    }
    items
}

/// Read one item's metadata, degrading to the default item on failure.
async fn read_item(workshop_dir: &Path, path: &str) -> Item {
    let config_path = workshop_dir.join(path).join("config.ini");

    match fs::read_to_string(&config_path).await {
        Ok(text) => {
            debug!(path = %config_path.display(), "Read item config");
            metadata::parse_item(&text)
        }
        Err(error) => {
            warn!(
                path = %config_path.display(),
                %error,
                "Missing or unreadable item config, using defaults"
            );
            Item::new()
        }
    }
}

/// Group an ordered character list into categories.
///
/// Items before the first marker's offset form a synthetic `"Free"`
/// category; each marker's category spans from its offset to the next
/// marker's offset (or the end of the list). Offsets beyond the list are
/// clamped, so a short item list never panics.
fn group_characters(items: Vec<Item>, markers: &[CategoryMarker]) -> CharactersTree {
    let mut tree = CharactersTree::new();
    let total = items.len();
    let mut iter = items.into_iter();

    let first = markers
        .first()
        .map_or(total, |m| (m.offset as usize).min(total));
    if first > 0 {
        let mut free = Category::new("Free");
        free.items = iter.by_ref().take(first).collect();
        tree.add_category(free);
    }

    let mut start = first;
    for (i, marker) in markers.iter().enumerate() {
        let end = markers
            .get(i + 1)
            .map_or(total, |m| (m.offset as usize).min(total));
        let end = end.max(start);

        let mut category = Category::new(marker.name.clone());
        category.items = iter.by_ref().take(end - start).collect();
        tree.add_category(category);

        start = end;
    }

    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_item(name: &str) -> Item {
        Item {
            name: name.to_string(),
            ..Item::new()
        }
    }

    fn marker(name: &str, offset: u16) -> CategoryMarker {
        CategoryMarker {
            name: name.to_string(),
            offset,
        }
    }

    #[test]
    fn test_group_without_free_items() {
        let items = vec![named_item("a"), named_item("b"), named_item("c")];
        let markers = vec![marker("Vanilla", 0), marker("Modded", 2)];

        let tree = group_characters(items, &markers);

        assert_eq!(tree.categories.len(), 2);
        assert_eq!(tree.categories[0].name, "Vanilla");
        assert_eq!(tree.categories[0].items.len(), 2);
        assert_eq!(tree.categories[1].name, "Modded");
        assert_eq!(tree.categories[1].items[0].name, "c");
    }

    #[test]
    fn test_group_with_free_items() {
        let items = vec![named_item("free1"), named_item("free2"), named_item("a")];
        let markers = vec![marker("Vanilla", 2)];

        let tree = group_characters(items, &markers);

        assert_eq!(tree.categories.len(), 2);
        assert_eq!(tree.categories[0].name, "Free");
        assert_eq!(tree.categories[0].items.len(), 2);
        assert_eq!(tree.categories[1].name, "Vanilla");
        assert_eq!(tree.categories[1].items[0].name, "a");
    }

    #[test]
    fn test_group_without_markers() {
        let items = vec![named_item("a"), named_item("b")];

        let tree = group_characters(items, &[]);

        assert_eq!(tree.categories.len(), 1);
        assert_eq!(tree.categories[0].name, "Free");
        assert_eq!(tree.categories[0].items.len(), 2);
    }

    #[test]
    fn test_group_empty() {
        let tree = group_characters(Vec::new(), &[]);
        assert!(tree.categories.is_empty());
    }

    #[test]
    fn test_group_clamps_out_of_range_offsets() {
        let items = vec![named_item("a")];
        let markers = vec![marker("Beyond", 9)];

        let tree = group_characters(items, &markers);

        // All items land in Free; the marked category exists but is empty
        assert_eq!(tree.categories.len(), 2);
        assert_eq!(tree.categories[0].items.len(), 1);
        assert!(tree.categories[1].items.is_empty());
    }
}
