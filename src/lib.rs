//! LDAP schema registry library.
//!
//! Provides the concurrent, mutually consistent registries a directory
//! server uses to hold its schema: attribute types, object classes,
//! matching rules and syntaxes, keyed by numeric OID and by alias, with a
//! shared OID map enforcing global uniqueness.
//!
//! # Core Components
//!
//! - [`Registries`] - All per-kind registries of one schema around a shared
//!   OID map
//! - [`SchemaObjectRegistry`] - Generic registry for one schema-object kind
//! - [`OidRegistry`] - Central numeric-OID uniqueness authority
//! - [`RegistryError`] - Typed failures carrying the key and kind queried
//!
//! # Quick Start
//!
//! ```rust
//! use ldap_schema_registry::{AttributeType, Registries};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registries = Registries::new();
//!
//! let cn = AttributeType::new("2.5.4.3", "core").with_names(["cn", "commonName"]);
//! registries.attribute_types().register(cn)?;
//!
//! let found = registries.attribute_types().lookup("cn")?;
//! assert_eq!(found.oid, "2.5.4.3");
//! # Ok(())
//! # }
//! ```
//!
//! Registries are explicitly constructed and explicitly owned: build one
//! [`Registries`] during schema-manager initialization and pass it by
//! reference to every consumer. All operations are synchronous; queries
//! take a shared lock and never block each other, mutations pair the local
//! map and the OID map inside one critical section.

pub mod error;
pub mod oid;
pub mod schema;

// Re-export commonly used types for convenience
pub use error::{RegistryError, RegistryResult};
pub use oid::is_numeric_oid;
pub use schema::{
    AttributeType, AttributeTypeRegistry, LdapSyntax, MatchingRule, MatchingRuleRegistry,
    ObjectClass, ObjectClassRegistry, OidRegistry, Registries, SchemaObject, SchemaObjectRegistry,
    SchemaObjectType, SyntaxRegistry,
};
