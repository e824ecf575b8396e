//! Generic per-kind schema object registry.
//!
//! One [`SchemaObjectRegistry`] instance holds every registered element of a
//! single schema-object kind, keyed by numeric OID and by each alias. Every
//! mutation mirrors the numeric-OID association into the shared
//! [`OidRegistry`] inside the registry's own write-lock critical section, so
//! readers never observe the two maps disagreeing.
//!
//! Keys are folded to ASCII lowercase on insert and lookup: LDAP short names
//! are case-insensitive, and numeric OIDs contain no letters to fold.

use crate::error::{RegistryError, RegistryResult};
use crate::oid::is_numeric_oid;
use crate::schema::oid_registry::OidRegistry;
use crate::schema::types::{SchemaObject, SchemaObjectType};

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Registry of all schema objects of one kind, indexed by OID and alias.
///
/// Shared, long-lived and safe for concurrent use: queries take a read lock
/// and never block each other; mutations take the write lock and pair the
/// local update with the [`OidRegistry`] mirror before releasing it.
#[derive(Debug)]
pub struct SchemaObjectRegistry<T: SchemaObject + 'static> {
    /// Kind discriminator, carried into error diagnostics.
    object_type: SchemaObjectType,
    /// Objects looked up by folded OID or alias.
    by_key: RwLock<HashMap<String, Arc<T>>>,
    /// The shared OID uniqueness authority.
    oid_registry: Arc<OidRegistry>,
}

impl<T: SchemaObject + 'static> SchemaObjectRegistry<T> {
    /// Create an empty registry for one schema-object kind, backed by the
    /// shared OID registry.
    pub fn new(object_type: SchemaObjectType, oid_registry: Arc<OidRegistry>) -> Self {
        Self {
            object_type,
            by_key: RwLock::new(HashMap::new()),
            oid_registry,
        }
    }

    /// The schema-object kind this registry holds.
    pub fn object_type(&self) -> SchemaObjectType {
        self.object_type
    }

    /// The shared OID registry backing this one.
    pub fn oid_registry(&self) -> &Arc<OidRegistry> {
        &self.oid_registry
    }

    /// Check whether `key` (OID or alias) is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.read().contains_key(&fold(key))
    }

    /// Get the schema name of the object registered under a numeric OID.
    ///
    /// Aliases are rejected with [`RegistryError::InvalidOidFormat`] even
    /// though `lookup` accepts them: this call serves numeric-OID resolution
    /// paths only.
    pub fn get_schema_name(&self, oid: &str) -> RegistryResult<String> {
        if !is_numeric_oid(oid) {
            log::warn!("get_schema_name expects a numeric OID, got '{oid}'");
            return Err(RegistryError::invalid_oid(oid));
        }

        match self.read().get(oid) {
            Some(object) => Ok(object.schema_name()),
            None => {
                log::warn!("OID {oid} not found in the {} registry", self.object_type);
                Err(RegistryError::not_found(self.object_type, oid))
            }
        }
    }

    /// Look up a schema object by OID or alias.
    pub fn lookup(&self, key: &str) -> RegistryResult<Arc<T>> {
        match self.read().get(&fold(key)) {
            Some(object) => Ok(object.clone()),
            None => {
                log::debug!("{} for '{key}' does not exist", self.object_type);
                Err(RegistryError::not_found(self.object_type, key))
            }
        }
    }

    /// Register a schema object under its OID and every alias, mirroring
    /// the OID into the shared registry.
    ///
    /// Fails with [`RegistryError::DuplicateOid`] if the OID or any alias is
    /// already a key here, or if the OID is owned by another kind in the
    /// shared registry. A failed registration leaves both maps exactly as
    /// they were; concurrent readers never see a partial insert.
    pub fn register(&self, object: T) -> RegistryResult<Arc<T>> {
        let object = Arc::new(object);
        let oid = object.oid().to_owned();

        let mut map = self.write();

        for key in std::iter::once(oid.as_str()).chain(object.names().iter().map(String::as_str)) {
            if map.contains_key(&fold(key)) {
                log::warn!(
                    "{} with key '{key}' already registered, rejecting OID {oid}",
                    self.object_type
                );
                return Err(RegistryError::duplicate_oid(self.object_type, key));
            }
        }

        // Mirror first: if the shared registry rejects the OID (owned by a
        // different kind), nothing was inserted locally.
        let as_dyn: Arc<dyn SchemaObject> = object.clone();
        self.oid_registry.register(as_dyn)?;

        map.insert(fold(&oid), object.clone());
        for name in object.names() {
            map.insert(fold(name), object.clone());
        }

        log::debug!("registered {} under OID {oid}", self.object_type);
        Ok(object)
    }

    /// Remove the object registered under a numeric OID, along with its
    /// alias keys and its shared-registry entry.
    ///
    /// Aliases are rejected with [`RegistryError::InvalidOidFormat`]: a
    /// multiply-aliased object must not be removed through a name that might
    /// not be its primary one. An absent OID is a silent no-op returning
    /// `Ok(None)`.
    pub fn unregister(&self, numeric_oid: &str) -> RegistryResult<Option<Arc<T>>> {
        if !is_numeric_oid(numeric_oid) {
            log::warn!("unregister expects a numeric OID, got '{numeric_oid}'");
            return Err(RegistryError::invalid_oid(numeric_oid));
        }

        let mut map = self.write();
        let removed = map.remove(numeric_oid);

        if let Some(object) = &removed {
            for name in object.names() {
                map.remove(&fold(name));
            }
            log::debug!("removed {} with OID {numeric_oid}", self.object_type);
        }

        // Unconditional: the shared entry may outlive a locally absent key
        // after a raced removal.
        self.oid_registry.unregister(numeric_oid);

        Ok(removed)
    }

    /// Remove every object declared under `schema_name` (case-insensitive),
    /// from both the local map and the shared OID registry, in one critical
    /// section. Returns the number of objects removed.
    ///
    /// An empty schema name is a silent no-op. Registrations racing into the
    /// same schema name from other threads land either before or after this
    /// bulk removal as a whole, never mid-scan.
    pub fn unregister_schema_elements(&self, schema_name: &str) -> usize {
        if schema_name.is_empty() {
            return 0;
        }

        let mut map = self.write();

        let doomed: Vec<Arc<T>> = {
            let mut seen = HashSet::new();
            map.values()
                .filter(|object| object.schema_name().eq_ignore_ascii_case(schema_name))
                .filter(|object| seen.insert(fold(object.oid())))
                .cloned()
                .collect()
        };

        for object in &doomed {
            map.remove(&fold(object.oid()));
            for name in object.names() {
                map.remove(&fold(name));
            }
            self.oid_registry.unregister(object.oid());
            log::debug!(
                "removed {} with OID {} from schema '{schema_name}'",
                self.object_type,
                object.oid()
            );
        }

        doomed.len()
    }

    /// Rewrite the schema name of every object declared under
    /// `original_name` (case-insensitive). Keys are untouched; zero matches
    /// is a silent no-op.
    pub fn rename_schema(&self, original_name: &str, new_name: &str) {
        // Write lock: serializes the rename against concurrent bulk
        // mutations even though each name rewrite is individually atomic.
        let map = self.write();
        let mut seen = HashSet::new();

        for object in map.values() {
            if object.schema_name().eq_ignore_ascii_case(original_name)
                && seen.insert(fold(object.oid()))
            {
                object.set_schema_name(new_name);
                log::debug!(
                    "renamed schema of {} {} to '{new_name}'",
                    self.object_type,
                    object.oid()
                );
            }
        }
    }

    /// Iterate over the registered objects, each one yielded once.
    ///
    /// The sequence is a point-in-time snapshot taken under the read lock:
    /// restartable, unaffected by later mutations, and never exposing a
    /// partially removed or partially renamed object.
    pub fn iter(&self) -> impl Iterator<Item = Arc<T>> + use<T> {
        let map = self.read();
        let mut seen = HashSet::new();
        let objects: Vec<Arc<T>> = map
            .values()
            .filter(|object| seen.insert(fold(object.oid())))
            .cloned()
            .collect();
        objects.into_iter()
    }

    /// Iterate over the registered keys, numeric OIDs and aliases alike.
    ///
    /// Snapshot semantics as for [`iter`](Self::iter).
    pub fn oids(&self) -> impl Iterator<Item = String> + use<T> {
        let keys: Vec<String> = self.read().keys().cloned().collect();
        keys.into_iter()
    }

    /// Resolve a name (or OID) to the numeric OID registered for it.
    pub fn get_oid(&self, name: &str) -> RegistryResult<String> {
        match self.read().get(&fold(name)) {
            Some(object) => Ok(object.oid().to_owned()),
            None => Err(RegistryError::not_found(self.object_type, name)),
        }
    }

    /// Number of distinct objects registered (aliases not counted).
    pub fn len(&self) -> usize {
        let map = self.read();
        let mut seen = HashSet::new();
        map.values()
            .filter(|object| seen.insert(fold(object.oid())))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<T>>> {
        self.by_key.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<T>>> {
        self.by_key.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Fold a registry key for case-insensitive alias matching. Numeric OIDs
/// pass through unchanged.
fn fold(key: &str) -> String {
    key.to_ascii_lowercase()
}
