//! Per-kind registries and the aggregate that groups them.
//!
//! Each specialized registry wraps the generic
//! [`SchemaObjectRegistry`](super::registry::SchemaObjectRegistry) for one
//! schema-object kind and adds kind-specific queries. [`Registries`] groups
//! the four around a single shared [`OidRegistry`], giving the schema
//! manager one handle for schema-wide operations.

use crate::error::RegistryResult;
use crate::schema::oid_registry::OidRegistry;
use crate::schema::registry::SchemaObjectRegistry;
use crate::schema::types::{
    AttributeType, LdapSyntax, MatchingRule, ObjectClass, SchemaObjectType,
};

use std::collections::HashSet;
use std::ops::Deref;
use std::sync::Arc;

/// Registry of attribute types with superior-chain resolution.
#[derive(Debug)]
pub struct AttributeTypeRegistry {
    inner: SchemaObjectRegistry<AttributeType>,
}

impl AttributeTypeRegistry {
    pub fn new(oid_registry: Arc<OidRegistry>) -> Self {
        Self {
            inner: SchemaObjectRegistry::new(SchemaObjectType::AttributeType, oid_registry),
        }
    }

    /// Resolve the superior chain of an attribute type, starting with the
    /// type itself and ending at the root of its derivation.
    ///
    /// Fails with [`NotFound`](crate::error::RegistryError::NotFound) if
    /// `key` or any superior link is unregistered. A cyclic chain
    /// terminates at the first repeated type instead of looping.
    pub fn superior_chain(&self, key: &str) -> RegistryResult<Vec<Arc<AttributeType>>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.inner.lookup(key)?;

        loop {
            if !seen.insert(current.oid.clone()) {
                log::warn!("superior chain of '{key}' is cyclic at {}", current.oid);
                break;
            }
            chain.push(current.clone());

            match &current.superior {
                Some(superior) => current = self.inner.lookup(superior)?,
                None => break,
            }
        }

        Ok(chain)
    }

    /// Resolve the effective syntax OID of an attribute type, walking up
    /// the superior chain when the type does not declare one itself.
    ///
    /// Returns `Ok(None)` when no type in the chain declares a syntax.
    pub fn syntax_oid(&self, key: &str) -> RegistryResult<Option<String>> {
        Ok(self
            .superior_chain(key)?
            .iter()
            .find_map(|attribute_type| attribute_type.syntax.clone()))
    }
}

impl Deref for AttributeTypeRegistry {
    type Target = SchemaObjectRegistry<AttributeType>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Registry of object classes with parent-class resolution.
#[derive(Debug)]
pub struct ObjectClassRegistry {
    inner: SchemaObjectRegistry<ObjectClass>,
}

impl ObjectClassRegistry {
    pub fn new(oid_registry: Arc<OidRegistry>) -> Self {
        Self {
            inner: SchemaObjectRegistry::new(SchemaObjectType::ObjectClass, oid_registry),
        }
    }

    /// Resolve the direct superior classes of an object class.
    ///
    /// Fails with [`NotFound`](crate::error::RegistryError::NotFound) if
    /// `key` or any referenced superior is unregistered.
    pub fn superiors(&self, key: &str) -> RegistryResult<Vec<Arc<ObjectClass>>> {
        let object_class = self.inner.lookup(key)?;
        object_class
            .superiors
            .iter()
            .map(|superior| self.inner.lookup(superior))
            .collect()
    }
}

impl Deref for ObjectClassRegistry {
    type Target = SchemaObjectRegistry<ObjectClass>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Registry of matching rules with per-syntax queries.
#[derive(Debug)]
pub struct MatchingRuleRegistry {
    inner: SchemaObjectRegistry<MatchingRule>,
}

impl MatchingRuleRegistry {
    pub fn new(oid_registry: Arc<OidRegistry>) -> Self {
        Self {
            inner: SchemaObjectRegistry::new(SchemaObjectType::MatchingRule, oid_registry),
        }
    }

    /// All registered rules whose assertion syntax is `syntax_oid`.
    pub fn rules_for_syntax(&self, syntax_oid: &str) -> Vec<Arc<MatchingRule>> {
        self.inner
            .iter()
            .filter(|rule| rule.syntax.as_deref() == Some(syntax_oid))
            .collect()
    }
}

impl Deref for MatchingRuleRegistry {
    type Target = SchemaObjectRegistry<MatchingRule>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Registry of attribute syntaxes.
#[derive(Debug)]
pub struct SyntaxRegistry {
    inner: SchemaObjectRegistry<LdapSyntax>,
}

impl SyntaxRegistry {
    pub fn new(oid_registry: Arc<OidRegistry>) -> Self {
        Self {
            inner: SchemaObjectRegistry::new(SchemaObjectType::LdapSyntax, oid_registry),
        }
    }

    /// Whether values of the given syntax are human readable.
    pub fn is_human_readable(&self, key: &str) -> RegistryResult<bool> {
        Ok(self.inner.lookup(key)?.human_readable)
    }
}

impl Deref for SyntaxRegistry {
    type Target = SchemaObjectRegistry<LdapSyntax>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// All per-kind registries of one directory schema, sharing one
/// [`OidRegistry`].
///
/// Construct once during schema-manager initialization and share by
/// reference with every consumer; there is no implicit global instance.
#[derive(Debug)]
pub struct Registries {
    oid_registry: Arc<OidRegistry>,
    attribute_types: AttributeTypeRegistry,
    object_classes: ObjectClassRegistry,
    matching_rules: MatchingRuleRegistry,
    syntaxes: SyntaxRegistry,
}

impl Registries {
    pub fn new() -> Self {
        let oid_registry = Arc::new(OidRegistry::new());
        Self {
            attribute_types: AttributeTypeRegistry::new(oid_registry.clone()),
            object_classes: ObjectClassRegistry::new(oid_registry.clone()),
            matching_rules: MatchingRuleRegistry::new(oid_registry.clone()),
            syntaxes: SyntaxRegistry::new(oid_registry.clone()),
            oid_registry,
        }
    }

    pub fn oid_registry(&self) -> &Arc<OidRegistry> {
        &self.oid_registry
    }

    pub fn attribute_types(&self) -> &AttributeTypeRegistry {
        &self.attribute_types
    }

    pub fn object_classes(&self) -> &ObjectClassRegistry {
        &self.object_classes
    }

    pub fn matching_rules(&self) -> &MatchingRuleRegistry {
        &self.matching_rules
    }

    pub fn syntaxes(&self) -> &SyntaxRegistry {
        &self.syntaxes
    }

    /// Rename a schema across every kind.
    pub fn rename_schema(&self, original_name: &str, new_name: &str) {
        self.attribute_types.rename_schema(original_name, new_name);
        self.object_classes.rename_schema(original_name, new_name);
        self.matching_rules.rename_schema(original_name, new_name);
        self.syntaxes.rename_schema(original_name, new_name);
    }

    /// Remove every object of every kind declared under `schema_name`.
    /// Returns the total number of objects removed.
    pub fn unregister_schema_elements(&self, schema_name: &str) -> usize {
        self.attribute_types.unregister_schema_elements(schema_name)
            + self.object_classes.unregister_schema_elements(schema_name)
            + self.matching_rules.unregister_schema_elements(schema_name)
            + self.syntaxes.unregister_schema_elements(schema_name)
    }
}

impl Default for Registries {
    fn default() -> Self {
        Self::new()
    }
}
