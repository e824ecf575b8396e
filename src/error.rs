//! Error types for schema registry operations.
//!
//! All registry failures are reported synchronously to the caller as typed
//! errors carrying enough context (the key queried, the schema-object kind)
//! for an actionable server-side diagnostic. The registry itself never
//! formats user-facing messages and never retries.

use crate::schema::types::SchemaObjectType;

/// Main error type for schema registry operations.
///
/// Covers every failure a registry operation can report. Documented no-op
/// cases (unregistering an absent OID, renaming or bulk-unregistering a
/// schema with no matches) succeed trivially and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// An argument expected to be a well-formed numeric OID was not one.
    ///
    /// Alias names are deliberately rejected by the operations that raise
    /// this (`get_schema_name`, `unregister`), even where `lookup` would
    /// accept them.
    #[error("'{oid}' is not a well-formed numeric OID")]
    InvalidOidFormat { oid: String },

    /// An OID is already registered and points at a different object.
    #[error("{kind} with OID {oid} is already registered")]
    DuplicateOid {
        kind: SchemaObjectType,
        oid: String,
    },

    /// No schema object is registered under the given OID or alias.
    #[error("no {kind} registered for '{key}'")]
    NotFound {
        kind: SchemaObjectType,
        key: String,
    },

    /// A value handed to a normalizer or syntax checker was unusable.
    #[error("invalid value: {message}")]
    InvalidValue { message: String },
}

// Convenience constructors, mirroring the call sites that raise each variant.
impl RegistryError {
    /// Create an invalid OID format error.
    pub fn invalid_oid(oid: impl Into<String>) -> Self {
        Self::InvalidOidFormat { oid: oid.into() }
    }

    /// Create a duplicate OID error for the given schema-object kind.
    pub fn duplicate_oid(kind: SchemaObjectType, oid: impl Into<String>) -> Self {
        Self::DuplicateOid {
            kind,
            oid: oid.into(),
        }
    }

    /// Create a not-found error for the given schema-object kind and key.
    pub fn not_found(kind: SchemaObjectType, key: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            key: key.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::InvalidValue {
            message: message.into(),
        }
    }
}

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
