//! Per-item `config.ini` metadata parsing.
//!
//! Each workshop item directory carries a `config.ini` whose `[general]`
//! section holds `key = "value"` pairs describing the item. Parsing is
//! deliberately tolerant, matching how the game itself treats these files:
//! a missing key yields an empty string, an unparseable number yields 0, an
//! unparseable boolean yields false. A missing file is the caller's concern.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::Item;

/// Matches the `[general]` section and its body lines.
static GENERAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(^\[general](?:\r?\n(?:[^\[\r\n].*)?)*)").expect("general section regex")
});

/// Matches one `key = "value"` pair.
static KEYPAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)(.+?)\s*=\s*"(.*)""#).expect("key pair regex"));

/// The `[general]` section's key/value pairs, in file order.
fn general_pairs(text: &str) -> Vec<(&str, &str)> {
    let Some(section) = GENERAL_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
    else {
        return Vec::new();
    };

    KEYPAIR_RE
        .captures_iter(section)
        .filter_map(|c| match (c.get(1), c.get(2)) {
            (Some(key), Some(value)) => Some((key.as_str(), value.as_str())),
            _ => None,
        })
        .collect()
}

fn value_of<'a>(pairs: &[(&'a str, &'a str)], key: &str) -> &'a str {
    pairs
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or("")
}

fn parsed_or_zero<T: std::str::FromStr + Default>(pairs: &[(&str, &str)], key: &str) -> T {
    value_of(pairs, key).parse().unwrap_or_default()
}

fn parsed_or_false(pairs: &[(&str, &str)], key: &str) -> bool {
    value_of(pairs, key).parse().unwrap_or(false)
}

/// Build an [`Item`] from `config.ini` text.
///
/// Never fails; fields without a usable value keep the [`Item::new`]
/// defaults.
pub fn parse_item(text: &str) -> Item {
    let pairs = general_pairs(text);

    let mut item = Item::new();
    item.icon = value_of(&pairs, "icon").to_string();
    item.name = value_of(&pairs, "name").to_string();
    item.item_type = parsed_or_zero(&pairs, "type");
    item.url = parsed_or_zero(&pairs, "url");
    item.author = value_of(&pairs, "author").to_string();
    item.description = value_of(&pairs, "description").to_string();
    item.version = (
        parsed_or_zero(&pairs, "major_version"),
        parsed_or_zero(&pairs, "minor_version"),
    );
    item.finished = parsed_or_false(&pairs, "finished");
    item.bg_color = value_of(&pairs, "bg_color").to_string();
    item.plural = parsed_or_false(&pairs, "plural");
    item.root = value_of(&pairs, "root").to_string();
    item
}
