//! Core schema object definitions.
//!
//! This module contains the data structures describing LDAP schema elements
//! (attribute types, object classes, matching rules, syntaxes) as specified
//! in RFC 4512, along with the [`SchemaObject`] capability trait that lets
//! one registry implementation serve every kind.
//!
//! Registries hold schema objects behind `Arc`; the only attribute mutable
//! after registration is the schema name (administrative rename), guarded by
//! a per-object lock so concurrent readers never observe a torn value.

use crate::error::RegistryResult;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Discriminator for the schema-object kinds a registry can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaObjectType {
    /// Attribute type definition
    AttributeType,
    /// Object class definition
    ObjectClass,
    /// Matching rule definition
    MatchingRule,
    /// Attribute syntax definition
    LdapSyntax,
}

impl fmt::Display for SchemaObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AttributeType => "AttributeType",
            Self::ObjectClass => "ObjectClass",
            Self::MatchingRule => "MatchingRule",
            Self::LdapSyntax => "LdapSyntax",
        };
        f.write_str(name)
    }
}

/// Capability interface every registrable schema element implements.
///
/// Registries key objects by [`oid`](Self::oid) and by each alias in
/// [`names`](Self::names). The schema name is read and rewritten through
/// this trait so `rename_schema` works uniformly across kinds.
pub trait SchemaObject: fmt::Debug + Send + Sync {
    /// The globally unique dotted-numeric OID of this element.
    fn oid(&self) -> &str;

    /// Human-readable short names usable interchangeably with the OID.
    fn names(&self) -> &[String];

    /// The kind discriminator for this element.
    fn object_type(&self) -> SchemaObjectType;

    /// The logical schema (e.g. "core", "cosine") this element belongs to.
    fn schema_name(&self) -> String;

    /// Rewrite the owning schema name in place. Object identity is
    /// unchanged; holders of a previously looked-up `Arc` observe the
    /// rename.
    fn set_schema_name(&self, schema_name: &str);
}

/// The mutable schema-name attribute of a schema object.
///
/// A tiny lock around the name string: renames are rare and administrative,
/// reads must never tear. Serializes as a plain string.
#[derive(Debug)]
pub struct SchemaName(RwLock<String>);

impl SchemaName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(RwLock::new(name.into()))
    }

    pub fn get(&self) -> String {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set(&self, name: &str) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = name.to_owned();
    }

    /// Case-insensitive comparison, matching LDAP schema-name semantics.
    pub fn matches(&self, name: &str) -> bool {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .eq_ignore_ascii_case(name)
    }
}

impl Clone for SchemaName {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl From<&str> for SchemaName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl Serialize for SchemaName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.get().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SchemaName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// Attribute usage categories from RFC 4512 section 4.1.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum UsageFlag {
    /// Ordinary user data
    #[default]
    UserApplications,
    /// Operational attribute maintained per directory
    DirectoryOperation,
    /// Operational attribute shared across the distributed directory
    DistributedOperation,
    /// Operational attribute local to one DSA
    DsaOperation,
}

/// Object class kinds from RFC 4512 section 4.1.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ObjectClassKind {
    /// Cannot be instantiated directly
    Abstract,
    /// Defines the primary shape of an entry
    #[default]
    Structural,
    /// Mixed into entries of any structural class
    Auxiliary,
}

/// An attribute type definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeType {
    /// Globally unique dotted-numeric OID
    pub oid: String,
    /// Short names (aliases) for this type
    #[serde(default)]
    pub names: Vec<String>,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Logical schema this type is declared under
    pub schema_name: SchemaName,
    /// Whether the type is marked OBSOLETE
    #[serde(default)]
    pub obsolete: bool,
    /// OID or alias of the superior attribute type, if derived
    #[serde(default)]
    pub superior: Option<String>,
    /// OID of the value syntax; inherited from the superior when absent
    #[serde(default)]
    pub syntax: Option<String>,
    /// Equality matching rule OID
    #[serde(default)]
    pub equality: Option<String>,
    /// Ordering matching rule OID
    #[serde(default)]
    pub ordering: Option<String>,
    /// Substring matching rule OID
    #[serde(default)]
    pub substring: Option<String>,
    /// Whether at most one value is allowed
    #[serde(default)]
    pub single_valued: bool,
    /// Whether user modification is allowed
    #[serde(default = "default_user_modifiable")]
    pub user_modifiable: bool,
    /// Usage category
    #[serde(default)]
    pub usage: UsageFlag,
}

fn default_user_modifiable() -> bool {
    true
}

impl AttributeType {
    /// Create a minimal attribute type belonging to the given schema.
    pub fn new(oid: impl Into<String>, schema_name: impl Into<String>) -> Self {
        Self {
            oid: oid.into(),
            names: Vec::new(),
            description: String::new(),
            schema_name: SchemaName::new(schema_name),
            obsolete: false,
            superior: None,
            syntax: None,
            equality: None,
            ordering: None,
            substring: None,
            single_valued: false,
            user_modifiable: true,
            usage: UsageFlag::UserApplications,
        }
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_superior(mut self, superior: impl Into<String>) -> Self {
        self.superior = Some(superior.into());
        self
    }

    pub fn with_syntax(mut self, syntax: impl Into<String>) -> Self {
        self.syntax = Some(syntax.into());
        self
    }

    pub fn with_equality(mut self, equality: impl Into<String>) -> Self {
        self.equality = Some(equality.into());
        self
    }
}

impl SchemaObject for AttributeType {
    fn oid(&self) -> &str {
        &self.oid
    }

    fn names(&self) -> &[String] {
        &self.names
    }

    fn object_type(&self) -> SchemaObjectType {
        SchemaObjectType::AttributeType
    }

    fn schema_name(&self) -> String {
        self.schema_name.get()
    }

    fn set_schema_name(&self, schema_name: &str) {
        self.schema_name.set(schema_name);
    }
}

/// An object class definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectClass {
    /// Globally unique dotted-numeric OID
    pub oid: String,
    /// Short names (aliases) for this class
    #[serde(default)]
    pub names: Vec<String>,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Logical schema this class is declared under
    pub schema_name: SchemaName,
    /// Whether the class is marked OBSOLETE
    #[serde(default)]
    pub obsolete: bool,
    /// OIDs or aliases of superior classes
    #[serde(default)]
    pub superiors: Vec<String>,
    /// Structural, auxiliary or abstract
    #[serde(default)]
    pub kind: ObjectClassKind,
    /// Mandatory attribute type OIDs
    #[serde(default)]
    pub must: Vec<String>,
    /// Optional attribute type OIDs
    #[serde(default)]
    pub may: Vec<String>,
}

impl ObjectClass {
    /// Create a minimal structural object class belonging to the given schema.
    pub fn new(oid: impl Into<String>, schema_name: impl Into<String>) -> Self {
        Self {
            oid: oid.into(),
            names: Vec::new(),
            description: String::new(),
            schema_name: SchemaName::new(schema_name),
            obsolete: false,
            superiors: Vec::new(),
            kind: ObjectClassKind::Structural,
            must: Vec::new(),
            may: Vec::new(),
        }
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_superiors<I, S>(mut self, superiors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.superiors = superiors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_kind(mut self, kind: ObjectClassKind) -> Self {
        self.kind = kind;
        self
    }
}

impl SchemaObject for ObjectClass {
    fn oid(&self) -> &str {
        &self.oid
    }

    fn names(&self) -> &[String] {
        &self.names
    }

    fn object_type(&self) -> SchemaObjectType {
        SchemaObjectType::ObjectClass
    }

    fn schema_name(&self) -> String {
        self.schema_name.get()
    }

    fn set_schema_name(&self, schema_name: &str) {
        self.schema_name.set(schema_name);
    }
}

/// A matching rule definition, optionally carrying a pluggable normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingRule {
    /// Globally unique dotted-numeric OID
    pub oid: String,
    /// Short names (aliases) for this rule
    #[serde(default)]
    pub names: Vec<String>,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Logical schema this rule is declared under
    pub schema_name: SchemaName,
    /// Whether the rule is marked OBSOLETE
    #[serde(default)]
    pub obsolete: bool,
    /// OID of the assertion value syntax
    #[serde(default)]
    pub syntax: Option<String>,
    /// Value normalizer applied before comparison, supplied by the consumer
    #[serde(skip)]
    pub normalizer: Option<Arc<dyn Normalizer>>,
}

impl MatchingRule {
    /// Create a minimal matching rule belonging to the given schema.
    pub fn new(oid: impl Into<String>, schema_name: impl Into<String>) -> Self {
        Self {
            oid: oid.into(),
            names: Vec::new(),
            description: String::new(),
            schema_name: SchemaName::new(schema_name),
            obsolete: false,
            syntax: None,
            normalizer: None,
        }
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_syntax(mut self, syntax: impl Into<String>) -> Self {
        self.syntax = Some(syntax.into());
        self
    }

    pub fn with_normalizer(mut self, normalizer: Arc<dyn Normalizer>) -> Self {
        self.normalizer = Some(normalizer);
        self
    }
}

impl SchemaObject for MatchingRule {
    fn oid(&self) -> &str {
        &self.oid
    }

    fn names(&self) -> &[String] {
        &self.names
    }

    fn object_type(&self) -> SchemaObjectType {
        SchemaObjectType::MatchingRule
    }

    fn schema_name(&self) -> String {
        self.schema_name.get()
    }

    fn set_schema_name(&self, schema_name: &str) {
        self.schema_name.set(schema_name);
    }
}

/// An attribute syntax definition, optionally carrying a pluggable checker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LdapSyntax {
    /// Globally unique dotted-numeric OID
    pub oid: String,
    /// Short names (aliases); syntaxes usually have none
    #[serde(default)]
    pub names: Vec<String>,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Logical schema this syntax is declared under
    pub schema_name: SchemaName,
    /// Whether values of this syntax are human readable
    #[serde(default)]
    pub human_readable: bool,
    /// Value validator for this syntax, supplied by the consumer
    #[serde(skip)]
    pub checker: Option<Arc<dyn SyntaxChecker>>,
}

impl LdapSyntax {
    /// Create a minimal syntax belonging to the given schema.
    pub fn new(oid: impl Into<String>, schema_name: impl Into<String>) -> Self {
        Self {
            oid: oid.into(),
            names: Vec::new(),
            description: String::new(),
            schema_name: SchemaName::new(schema_name),
            human_readable: false,
            checker: None,
        }
    }

    pub fn human_readable(mut self) -> Self {
        self.human_readable = true;
        self
    }

    pub fn with_checker(mut self, checker: Arc<dyn SyntaxChecker>) -> Self {
        self.checker = Some(checker);
        self
    }
}

impl SchemaObject for LdapSyntax {
    fn oid(&self) -> &str {
        &self.oid
    }

    fn names(&self) -> &[String] {
        &self.names
    }

    fn object_type(&self) -> SchemaObjectType {
        SchemaObjectType::LdapSyntax
    }

    fn schema_name(&self) -> String {
        self.schema_name.get()
    }

    fn set_schema_name(&self, schema_name: &str) {
        self.schema_name.set(schema_name);
    }
}

/// Validates attribute values against one LDAP syntax.
///
/// Implementations are supplied by the consumer and attached to
/// [`LdapSyntax`] entries; registries store them but never invoke them.
pub trait SyntaxChecker: fmt::Debug + Send + Sync {
    /// Check whether a value conforms to this syntax.
    fn is_valid_syntax(&self, value: &str) -> bool;
}

/// Normalizes attribute values for matching-rule comparison.
pub trait Normalizer: fmt::Debug + Send + Sync {
    /// Produce the canonical comparison form of a value.
    fn normalize(&self, value: &str) -> RegistryResult<String>;
}

/// Checker that accepts every value.
///
/// Stands in for syntaxes whose grammar is not enforced (handled as opaque
/// binary data), e.g. Guide from RFC 4517.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllSyntaxChecker;

impl SyntaxChecker for AcceptAllSyntaxChecker {
    fn is_valid_syntax(&self, value: &str) -> bool {
        log::debug!("syntax accepted for '{value}'");
        true
    }
}

/// Normalizer that collapses whitespace runs into a single space and trims
/// the edges, preserving token order.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeepTrimNormalizer;

impl Normalizer for DeepTrimNormalizer {
    fn normalize(&self, value: &str) -> RegistryResult<String> {
        let mut out = String::with_capacity(value.len());
        for token in value.split_whitespace() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(token);
        }
        Ok(out)
    }
}
