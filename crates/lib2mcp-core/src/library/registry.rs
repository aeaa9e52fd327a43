//! Library catalog for looking up libraries by identifier
//!
//! This is the "import by name" step: a library identifier maps to a factory
//! that builds the [`Library`] on demand.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::builtin;
use super::definition::Library;

/// Factory function type for building libraries
pub type LibraryFactory = Box<dyn Fn() -> Library + Send + Sync>;

/// Definition of a catalogued library
pub struct LibraryDefinition {
    /// Import identifier
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Factory function to build the library
    pub factory: LibraryFactory,
}

impl std::fmt::Debug for LibraryDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

/// Global catalog of libraries
static CATALOG: Lazy<RwLock<HashMap<String, LibraryDefinition>>> = Lazy::new(|| {
    let mut map = HashMap::new();

    for (name, description, factory) in builtin::definitions() {
        map.insert(
            name.to_string(),
            LibraryDefinition {
                name: name.to_string(),
                description: description.to_string(),
                factory,
            },
        );
    }

    RwLock::new(map)
});

/// Register a library under an identifier, replacing any previous entry
///
/// # Example
///
/// ```
/// use lib2mcp_core::library::{register_library, has_library, Library};
///
/// register_library("empty", "Nothing to see", Box::new(|| Library::new("empty")));
/// assert!(has_library("empty"));
/// ```
pub fn register_library(name: &str, description: &str, factory: LibraryFactory) {
    CATALOG.write().insert(
        name.to_string(),
        LibraryDefinition {
            name: name.to_string(),
            description: description.to_string(),
            factory,
        },
    );
}

/// Build a library by identifier
///
/// Returns `None` if the identifier is not catalogued.
pub fn load_library(name: &str) -> Option<Arc<Library>> {
    let catalog = CATALOG.read();
    catalog.get(name).map(|def| Arc::new((def.factory)()))
}

/// List catalogued libraries as (name, description), sorted by name
pub fn list_libraries() -> Vec<(String, String)> {
    let catalog = CATALOG.read();
    let mut entries: Vec<_> = catalog
        .values()
        .map(|def| (def.name.clone(), def.description.clone()))
        .collect();
    entries.sort();
    entries
}

/// Check if a library is catalogued
pub fn has_library(name: &str) -> bool {
    CATALOG.read().contains_key(name)
}

/// Remove a library from the catalog (mainly for testing)
pub fn unregister_library(name: &str) -> bool {
    CATALOG.write().remove(name).is_some()
}
