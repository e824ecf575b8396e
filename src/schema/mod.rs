//! Schema object registries and the types they hold.
//!
//! This module provides the concurrent registries that index LDAP schema
//! elements by OID and alias while keeping a shared numeric-OID map
//! consistent with every per-kind view.
//!
//! # Key Types
//!
//! - [`SchemaObjectRegistry`] - Generic per-kind registry with the full
//!   register/unregister/rename lifecycle
//! - [`OidRegistry`] - Shared numeric-OID uniqueness authority
//! - [`Registries`] - All per-kind registries of one schema, grouped
//! - [`SchemaObject`] - Capability trait implemented by every registrable
//!   schema element
//!
//! # Examples
//!
//! ```rust
//! use ldap_schema_registry::schema::Registries;
//! use ldap_schema_registry::schema::types::AttributeType;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registries = Registries::new();
//! let cn = AttributeType::new("2.5.4.3", "core").with_names(["cn", "commonName"]);
//! registries.attribute_types().register(cn)?;
//!
//! assert!(registries.attribute_types().contains("commonName"));
//! assert_eq!(registries.attribute_types().get_oid("cn")?, "2.5.4.3");
//! # Ok(())
//! # }
//! ```

pub mod oid_registry;
pub mod registries;
pub mod registry;
pub mod types;


// Re-export the main types for convenience
pub use oid_registry::OidRegistry;
pub use registries::{
    AttributeTypeRegistry, MatchingRuleRegistry, ObjectClassRegistry, Registries, SyntaxRegistry,
};
pub use registry::SchemaObjectRegistry;
pub use types::{
    AttributeType, LdapSyntax, MatchingRule, Normalizer, ObjectClass, ObjectClassKind,
    SchemaObject, SchemaObjectType, SyntaxChecker, UsageFlag,
};
