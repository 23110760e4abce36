//! Binary reader for the game's workshop layout files.
//!
//! Two little-endian formats share this module:
//!
//! - **Order file** (`order.roa`): four consecutive sections, one per branch
//!   in the fixed order characters, buddies, stages, skins. Each section is
//!   a NUL-terminated `"order.roa"` magic, a `u8` flag that must be 1, a
//!   `u16` entry count, a `u16` pad that must be 0, then `count`
//!   NUL-terminated item directory names.
//! - **Categories file** (`categories.roa`): a `u16` category count, then per
//!   category a `u16` start offset into the character order and a
//!   NUL-terminated name.
//!
//! Parsing operates on in-memory byte slices; reading the files is the
//! loader's job.

use thiserror::Error;

/// Magic string opening every order-file section.
const ORDER_MAGIC: &str = "order.roa";

/// Errors raised while decoding layout files.
#[derive(Debug, Error)]
pub enum RoaError {
    #[error("input ended after {offset} bytes while reading {what}")]
    Truncated { what: &'static str, offset: usize },

    #[error("bad section magic: expected \"order.roa\", found {found:?}")]
    BadMagic { found: String },

    #[error("unexpected section flag {found} (expected 1)")]
    BadFlag { found: u8 },

    #[error("unexpected section padding {found} (expected 0)")]
    BadPadding { found: u16 },
}

/// The four path lists of a complete order file, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFile {
    /// Character item directories, layout order
    pub characters: Vec<String>,

    /// Buddy item directories
    pub buddies: Vec<String>,

    /// Stage item directories
    pub stages: Vec<String>,

    /// Skin item directories
    pub skins: Vec<String>,
}

/// A category declaration from the categories file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMarker {
    /// Category display name
    pub name: String,

    /// Index into the character order where this category starts
    pub offset: u16,
}

/// Cursor over a layout-file byte slice.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn read_u8(&mut self, what: &'static str) -> Result<u8, RoaError> {
        let byte = *self.data.get(self.pos).ok_or(RoaError::Truncated {
            what,
            offset: self.pos,
        })?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_u16(&mut self, what: &'static str) -> Result<u16, RoaError> {
        let end = self.pos + 2;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(RoaError::Truncated {
                what,
                offset: self.pos,
            })?;
        self.pos = end;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// NUL-terminated byte string, decoded as one char per byte as the game
    /// writes it.
    fn read_cstring(&mut self, what: &'static str) -> Result<String, RoaError> {
        let mut result = String::new();
        loop {
            let byte = self.read_u8(what)?;
            if byte == 0 {
                return Ok(result);
            }
            result.push(byte as char);
        }
    }
}

/// Parse one order-file section, advancing the reader past it.
fn parse_order_section(reader: &mut Reader<'_>) -> Result<Vec<String>, RoaError> {
    let magic = reader.read_cstring("section magic")?;
    if magic != ORDER_MAGIC {
        return Err(RoaError::BadMagic { found: magic });
    }

    let flag = reader.read_u8("section flag")?;
    if flag != 1 {
        return Err(RoaError::BadFlag { found: flag });
    }

    let count = reader.read_u16("entry count")?;

    let pad = reader.read_u16("section padding")?;
    if pad != 0 {
        return Err(RoaError::BadPadding { found: pad });
    }

    let mut paths = Vec::with_capacity(count as usize);
    for _ in 0..count {
        paths.push(reader.read_cstring("entry path")?);
    }
    Ok(paths)
}

/// Parse a complete order file: characters, buddies, stages, skins.
pub fn parse_order_file(data: &[u8]) -> Result<OrderFile, RoaError> {
    let mut reader = Reader::new(data);

    let characters = parse_order_section(&mut reader)?;
    let buddies = parse_order_section(&mut reader)?;
    let stages = parse_order_section(&mut reader)?;
    let skins = parse_order_section(&mut reader)?;

    Ok(OrderFile {
        characters,
        buddies,
        stages,
        skins,
    })
}

/// Parse the categories file into markers, in file order.
pub fn parse_categories(data: &[u8]) -> Result<Vec<CategoryMarker>, RoaError> {
    let mut reader = Reader::new(data);

    let count = reader.read_u16("category count")?;
    let mut markers = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let offset = reader.read_u16("category offset")?;
        let name = reader.read_cstring("category name")?;
        markers.push(CategoryMarker { name, offset });
    }
    Ok(markers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(paths: &[&str]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"order.roa\0");
        bytes.push(1);
        bytes.extend_from_slice(&(paths.len() as u16).to_le_bytes());
        bytes.extend_from_slice(&0u16.to_le_bytes());
        for path in paths {
            bytes.extend_from_slice(path.as_bytes());
            bytes.push(0);
        }
        bytes
    }

    #[test]
    fn test_parse_order_file() {
        let mut data = Vec::new();
        data.extend(section(&["zetterburn", "orcane"]));
        data.extend(section(&["buddy_a"]));
        data.extend(section(&[]));
        data.extend(section(&["skin_a", "skin_b", "skin_c"]));

        let order = parse_order_file(&data).unwrap();
        assert_eq!(order.characters, vec!["zetterburn", "orcane"]);
        assert_eq!(order.buddies, vec!["buddy_a"]);
        assert!(order.stages.is_empty());
        assert_eq!(order.skins.len(), 3);
    }

    #[test]
    fn test_bad_magic() {
        let mut data = section(&[]);
        data[0] = b'x';
        data.extend(section(&[]));
        data.extend(section(&[]));
        data.extend(section(&[]));

        match parse_order_file(&data) {
            Err(RoaError::BadMagic { found }) => assert!(found.starts_with('x')),
            other => panic!("expected BadMagic, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_flag() {
        let mut data = section(&[]);
        // Flag byte sits right after the NUL-terminated magic
        data[10] = 7;

        match parse_order_file(&data) {
            Err(RoaError::BadFlag { found: 7 }) => {}
            other => panic!("expected BadFlag, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_padding() {
        let mut data = section(&[]);
        data[13] = 9;

        match parse_order_file(&data) {
            Err(RoaError::BadPadding { found: 9 }) => {}
            other => panic!("expected BadPadding, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_entry() {
        let mut data = Vec::new();
        data.extend_from_slice(b"order.roa\0");
        data.push(1);
        data.extend_from_slice(&2u16.to_le_bytes());
        data.extend_from_slice(&0u16.to_le_bytes());
        data.extend_from_slice(b"only_one\0");

        match parse_order_file(&data) {
            Err(RoaError::Truncated { what, .. }) => assert_eq!(what, "entry path"),
            other => panic!("expected Truncated, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_categories() {
        let mut data = Vec::new();
        data.extend_from_slice(&2u16.to_le_bytes());
        data.extend_from_slice(&0u16.to_le_bytes());
        data.extend_from_slice(b"Vanilla\0");
        data.extend_from_slice(&3u16.to_le_bytes());
        data.extend_from_slice(b"Modded\0");

        let markers = parse_categories(&data).unwrap();
        assert_eq!(
            markers,
            vec![
                CategoryMarker {
                    name: "Vanilla".to_string(),
                    offset: 0
                },
                CategoryMarker {
                    name: "Modded".to_string(),
                    offset: 3
                },
            ]
        );
    }

    #[test]
    fn test_empty_categories() {
        let data = 0u16.to_le_bytes();
        assert!(parse_categories(&data).unwrap().is_empty());
    }
}
