//! Catalog data model.
//!
//! Plain serde-derived shapes matching the JSON the frontend consumes.
//! Branch tags (`item_type`) are the game's own discriminators and are kept
//! literally, including the 0 shared by the character and skin branches.

use serde::{Deserialize, Serialize};

/// A single workshop content entry.
///
/// Every field is populated from the item's `config.ini`; entries whose
/// metadata is missing keep the zero/empty defaults from [`Item::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Icon reference (path or sprite identifier)
    pub icon: String,

    /// Display name
    pub name: String,

    /// Content kind tag (matches the owning branch's tag)
    pub item_type: u8,

    /// Opaque numeric identifier (workshop file id)
    pub url: u32,

    /// Author display string
    pub author: String,

    /// Description text
    pub description: String,

    /// (major, minor) version pair
    pub version: (u8, u8),

    /// Completion flag
    pub finished: bool,

    /// Background color token
    pub bg_color: String,

    /// Whether the display name is plural
    pub plural: bool,

    /// Path or key prefix inside the item's directory
    pub root: String,
}

impl Item {
    /// Create an item with empty/zero fields.
    pub fn new() -> Self {
        Self {
            icon: String::new(),
            name: String::new(),
            item_type: 0,
            url: 0,
            author: String::new(),
            description: String::new(),
            version: (0, 0),
            finished: false,
            bg_color: String::new(),
            plural: false,
            root: String::new(),
        }
    }
}

impl Default for Item {
    fn default() -> Self {
        Self::new()
    }
}

/// A named, ordered grouping of character items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Display name
    pub name: String,

    /// Items in layout order
    pub items: Vec<Item>,
}

impl Category {
    /// Create an empty category with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Append an item, preserving insertion order.
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }
}

/// The character branch, organized by category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharactersTree {
    /// Branch tag
    pub item_type: u8,

    /// Categories in layout order
    pub categories: Vec<Category>,
}

impl CharactersTree {
    /// Create the empty character branch (tag 0).
    pub fn new() -> Self {
        Self {
            item_type: 0,
            categories: Vec::new(),
        }
    }

    /// Append a category, preserving insertion order.
    pub fn add_category(&mut self, category: Category) {
        self.categories.push(category);
    }
}

impl Default for CharactersTree {
    fn default() -> Self {
        Self::new()
    }
}

/// A flat branch for non-character content (buddies, skins, stages).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericTree {
    /// Branch tag
    pub item_type: u8,

    /// Items in layout order
    pub items: Vec<Item>,
}

impl GenericTree {
    /// Create an empty branch with the given tag.
    pub fn new(item_type: u8) -> Self {
        Self {
            item_type,
            items: Vec::new(),
        }
    }

    /// Append an item, preserving insertion order.
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }
}

/// The complete application catalog (aggregate root).
///
/// All four branches always exist; an unloaded catalog is one where every
/// branch is empty, never one where a branch is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Character branch (tag 0)
    pub char_tree: CharactersTree,

    /// Buddy branch (tag 1)
    pub buddy_tree: GenericTree,

    /// Skin branch (tag 0, shared with the character branch)
    pub skin_tree: GenericTree,

    /// Stage branch (tag 2)
    pub stage_tree: GenericTree,
}

impl Catalog {
    /// Create the empty catalog: all four branches present, no content.
    pub fn new() -> Self {
        Self {
            char_tree: CharactersTree::new(),
            buddy_tree: GenericTree::new(1),
            skin_tree: GenericTree::new(0),
            stage_tree: GenericTree::new(2),
        }
    }

    /// Total entry count across branches: categories for the character
    /// branch, items for the flat branches.
    pub fn len(&self) -> usize {
        self.char_tree.categories.len()
            + self.buddy_tree.items.len()
            + self.skin_tree.items.len()
            + self.stage_tree.items.len()
    }

    /// Whether no branch holds any content.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Batch-reorder character categories.
    ///
    /// Removes the categories at `from` indices (given in ascending order,
    /// compensating for the shift each removal causes), then reinserts them
    /// at the corresponding `to` indices in order. Index pairs beyond the
    /// current category count are ignored rather than panicking.
    pub fn move_categories(&mut self, from: &[usize], to: &[usize]) {
        let cats = &mut self.char_tree.categories;
        let mut removed: Vec<Category> = Vec::with_capacity(from.len());

        for (shift, &i) in from.iter().enumerate() {
            let idx = i - shift;
            if idx < cats.len() {
                removed.push(cats.remove(idx));
            }
        }

        for (category, &dest) in removed.into_iter().zip(to) {
            let dest = dest.min(cats.len());
            cats.insert(dest, category);
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
