//=========================================================================
// Asset Catalog
//=========================================================================
//
// Read-only view over the merged lump directory.
//
// Archive loading and merging happen outside the session core; the core
// only needs name lookup and a directory listing. Names follow lump
// rules: compared case-insensitively and on at most eight characters.
// When several archives provide the same name, the last one wins.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Constants ===========================================================

/// Maximum significant length of a lump name.
pub const LUMP_NAME_LEN: usize = 8;

//=== LumpId ==============================================================

/// Opaque handle to a lump in the catalog directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LumpId(pub usize);

//=== AssetCatalog Trait ==================================================

/// Name-based access to the loaded content.
///
/// Implemented by whatever owns the archive directory. The session core
/// never mutates the catalog.
pub trait AssetCatalog: Send {
    /// Looks a lump up by name; the last lump carrying the name wins.
    fn resolve(&self, name: &str) -> Option<LumpId>;

    /// Lists every lump name in directory order.
    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Returns true if a lump with this name exists.
    fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }
}

//--- Name Normalization --------------------------------------------------

/// Normalizes a name to lump form: ASCII uppercase, eight characters max.
pub fn normalize_lump_name(name: &str) -> String {
    name.chars()
        .take(LUMP_NAME_LEN)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Compares two names the way the lump directory does.
pub fn lump_names_equal(a: &str, b: &str) -> bool {
    normalize_lump_name(a) == normalize_lump_name(b)
}

//=== NameCatalog =========================================================

/// In-memory catalog built from a list of lump names.
///
/// Useful for embedding applications that already hold a directory and
/// for driving the session core without real archives.
///
/// ```rust
/// # use session_engine::core::catalog::{AssetCatalog, NameCatalog};
/// let catalog = NameCatalog::from_names(["PLAYPAL", "e1m1", "TITLEPIC"]);
/// assert!(catalog.contains("E1M1"));
/// assert!(!catalog.contains("MAP01"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NameCatalog {
    names: Vec<String>,
    index: HashMap<String, LumpId>,
}

impl NameCatalog {
    //--- Construction -----------------------------------------------------

    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from names in directory order.
    pub fn from_names<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let mut catalog = Self::new();
        for name in names {
            catalog.push(name.as_ref());
        }
        catalog
    }

    /// Appends a lump to the directory, shadowing earlier lumps of the same name.
    pub fn push(&mut self, name: &str) -> LumpId {
        let normalized = normalize_lump_name(name);
        let id = LumpId(self.names.len());
        self.index.insert(normalized.clone(), id);
        self.names.push(normalized);
        id
    }

    /// Number of lumps in the directory (shadowed lumps included).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the directory holds no lumps.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl AssetCatalog for NameCatalog {
    fn resolve(&self, name: &str) -> Option<LumpId> {
        self.index.get(&normalize_lump_name(name)).copied()
    }

    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.names.iter().map(String::as_str))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
