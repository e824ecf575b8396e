//! Central OID uniqueness authority.
//!
//! One `OidRegistry` instance is shared by every per-kind
//! [`SchemaObjectRegistry`](super::registry::SchemaObjectRegistry): it maps
//! each numeric OID to the single schema object that owns it, across all
//! kinds. Per-kind registries mirror their mutations here inside their own
//! critical sections, so the two views never disagree for an observable
//! instant.

use crate::error::{RegistryError, RegistryResult};
use crate::schema::types::SchemaObject;

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Maps numeric OID strings to the schema objects that own them.
///
/// Construct one per schema manager and share it (via `Arc`) with every
/// per-kind registry; there is no implicit global instance.
#[derive(Debug, Default)]
pub struct OidRegistry {
    by_oid: RwLock<HashMap<String, Arc<dyn SchemaObject>>>,
}

impl OidRegistry {
    /// Create an empty OID registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the association `object.oid() -> object`.
    ///
    /// Re-registering the object already holding the OID is an idempotent
    /// no-op (bulk loaders may replay registrations after a partial
    /// failure). A *different* object claiming a held OID is rejected with
    /// [`RegistryError::DuplicateOid`].
    pub fn register(&self, object: Arc<dyn SchemaObject>) -> RegistryResult<()> {
        let oid = object.oid().to_owned();
        let mut map = self.write();

        if let Some(existing) = map.get(&oid) {
            if Arc::ptr_eq(existing, &object) {
                log::debug!("OID {oid} already registered to the same object, ignoring");
                return Ok(());
            }

            log::warn!(
                "OID {oid} already registered to a {}, rejecting {}",
                existing.object_type(),
                object.object_type()
            );
            return Err(RegistryError::duplicate_oid(object.object_type(), oid));
        }

        log::debug!("registered {} under OID {oid}", object.object_type());
        map.insert(oid, object);
        Ok(())
    }

    /// Remove the association for `oid`, returning the former owner.
    ///
    /// Absent OIDs are a silent no-op: callers may race with a prior
    /// removal.
    pub fn unregister(&self, oid: &str) -> Option<Arc<dyn SchemaObject>> {
        let removed = self.write().remove(oid);

        match &removed {
            Some(object) => log::debug!("removed {} under OID {oid}", object.object_type()),
            None => log::debug!("OID {oid} was not registered, nothing removed"),
        }

        removed
    }

    /// Look up the schema object owning `oid`.
    pub fn get(&self, oid: &str) -> Option<Arc<dyn SchemaObject>> {
        self.read().get(oid).cloned()
    }

    /// Check whether `oid` is registered.
    pub fn contains(&self, oid: &str) -> bool {
        self.read().contains_key(oid)
    }

    /// Number of registered OIDs across all schema-object kinds.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<dyn SchemaObject>>> {
        self.by_oid.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<dyn SchemaObject>>> {
        self.by_oid.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::AttributeType;

    fn attribute(oid: &str) -> Arc<dyn SchemaObject> {
        Arc::new(AttributeType::new(oid, "core"))
    }

    #[test]
    fn test_register_and_get() {
        let registry = OidRegistry::new();
        let object = attribute("2.5.4.3");

        registry.register(object.clone()).unwrap();
        assert!(registry.contains("2.5.4.3"));
        assert!(Arc::ptr_eq(&registry.get("2.5.4.3").unwrap(), &object));
    }

    #[test]
    fn test_same_object_reregistration_is_a_noop() {
        let registry = OidRegistry::new();
        let object = attribute("2.5.4.3");

        registry.register(object.clone()).unwrap();
        registry.register(object).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_distinct_object_with_same_oid_is_rejected() {
        let registry = OidRegistry::new();
        let first = attribute("2.5.4.3");

        registry.register(first.clone()).unwrap();
        let result = registry.register(attribute("2.5.4.3"));
        assert!(matches!(
            result,
            Err(RegistryError::DuplicateOid { .. })
        ));
        // Original owner untouched.
        assert!(Arc::ptr_eq(&registry.get("2.5.4.3").unwrap(), &first));
    }

    #[test]
    fn test_unregister_is_idempotent() {
        let registry = OidRegistry::new();
        registry.register(attribute("2.5.4.3")).unwrap();

        assert!(registry.unregister("2.5.4.3").is_some());
        assert!(registry.unregister("2.5.4.3").is_none());
        assert!(registry.is_empty());
    }
}
