//! Metadata catalog of known types.

use std::collections::HashMap;

use tracing::debug;
use types::{MessageType, TypeDescriptor};

/// Queryable set of known types, populated from caller-supplied descriptor
/// batches at startup.
///
/// Batches may be added in any grouping; the catalog holds the deduplicated
/// union. Adding the same type twice is idempotent (the first descriptor
/// wins). Entries are never removed.
#[derive(Debug, Default)]
pub struct TypeCatalog {
    entries: HashMap<MessageType, TypeDescriptor>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one batch of descriptors, deduplicating by type identity.
    /// Empty batches are not an error.
    pub fn add<I>(&mut self, source: I)
    where
        I: IntoIterator<Item = TypeDescriptor>,
    {
        for descriptor in source {
            let ty = descriptor.described_type();
            if self.entries.contains_key(&ty) {
                continue;
            }
            debug!(ty = %ty, "catalog entry added");
            self.entries.insert(ty, descriptor);
        }
    }

    /// All known types. Lazy and restartable; order is unspecified.
    pub fn all_types(&self) -> impl Iterator<Item = &TypeDescriptor> + '_ {
        self.entries.values()
    }

    /// Whether a type is known to the catalog.
    pub fn contains(&self, ty: MessageType) -> bool {
        self.entries.contains_key(&ty)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
