//! Root event resolution
//!
//! An instruction line names the native id of the event that started an event
//! chain. The assembler asks a [`RootEventResolver`] to turn that id into the
//! persisted root identity, so parsing never talks to a store directly.

use std::collections::HashMap;
use tracing::debug;

use crate::error::{NordicError, Result};
use crate::models::UNASSIGNED_ID;

/// Lookup of persisted root event identities
///
/// Implementations are shared across worker threads by the parallel batch
/// driver and must answer the same id with the same result every time.
pub trait RootEventResolver: Send + Sync {
    fn resolve_root_id(&self, native_event_id: i64) -> Result<i64>;
}

/// Resolver for runs without a backing store: every root stays unassigned
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedResolver;

impl RootEventResolver for DetachedResolver {
    fn resolve_root_id(&self, native_event_id: i64) -> Result<i64> {
        debug!("No store attached, root of {} left unassigned", native_event_id);
        Ok(UNASSIGNED_ID)
    }
}

/// Resolver backed by a prepared id table
#[derive(Debug, Clone, Default)]
pub struct InMemoryRootResolver {
    roots: HashMap<i64, i64>,
}

impl InMemoryRootResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the persisted root id of a native event id
    pub fn with_root(mut self, native_event_id: i64, root_id: i64) -> Self {
        self.roots.insert(native_event_id, root_id);
        self
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

impl RootEventResolver for InMemoryRootResolver {
    fn resolve_root_id(&self, native_event_id: i64) -> Result<i64> {
        self.roots.get(&native_event_id).copied().ok_or_else(|| {
            NordicError::root_resolution(native_event_id, "no persisted event with this id")
        })
    }
}

impl FromIterator<(i64, i64)> for InMemoryRootResolver {
    fn from_iter<I: IntoIterator<Item = (i64, i64)>>(iter: I) -> Self {
        Self {
            roots: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_lookup() {
        let resolver = InMemoryRootResolver::new().with_root(20190502, 7);
        assert_eq!(resolver.resolve_root_id(20190502).unwrap(), 7);
        // Lookups are repeatable
        assert_eq!(resolver.resolve_root_id(20190502).unwrap(), 7);

        match resolver.resolve_root_id(1) {
            Err(NordicError::RootResolution { native_id, .. }) => assert_eq!(native_id, 1),
            other => panic!("Expected RootResolution, got {:?}", other),
        }
    }

    #[test]
    fn test_from_iterator() {
        let resolver: InMemoryRootResolver = vec![(1, 10), (2, 20)].into_iter().collect();
        assert_eq!(resolver.len(), 2);
        assert_eq!(resolver.resolve_root_id(2).unwrap(), 20);
    }

    #[test]
    fn test_detached_resolver() {
        assert_eq!(DetachedResolver.resolve_root_id(99).unwrap(), UNASSIGNED_ID);
    }
}
