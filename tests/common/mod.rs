//! Shared fixtures for registry integration tests.

use ldap_schema_registry::schema::types::{
    AttributeType, LdapSyntax, MatchingRule, ObjectClass, ObjectClassKind,
};

/// Initialize test logging once; safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The `cn` attribute type from the core schema.
pub fn cn_attribute() -> AttributeType {
    AttributeType::new("2.5.4.3", "core")
        .with_names(["cn", "commonName"])
        .with_superior("2.5.4.41")
        .with_equality("2.5.13.2")
}

/// The `name` attribute type `cn` derives from, carrying the syntax.
pub fn name_attribute() -> AttributeType {
    AttributeType::new("2.5.4.41", "core")
        .with_names(["name"])
        .with_syntax("1.3.6.1.4.1.1466.115.121.1.15")
}

/// The `person` structural object class.
pub fn person_class() -> ObjectClass {
    ObjectClass::new("2.5.6.6", "core")
        .with_names(["person"])
        .with_superiors(["2.5.6.0"])
}

/// The `top` abstract object class.
pub fn top_class() -> ObjectClass {
    ObjectClass::new("2.5.6.0", "core")
        .with_names(["top"])
        .with_kind(ObjectClassKind::Abstract)
}

/// The `caseIgnoreMatch` matching rule.
pub fn case_ignore_match() -> MatchingRule {
    MatchingRule::new("2.5.13.2", "core")
        .with_names(["caseIgnoreMatch"])
        .with_syntax("1.3.6.1.4.1.1466.115.121.1.15")
}

/// The Directory String syntax.
pub fn directory_string_syntax() -> LdapSyntax {
    LdapSyntax::new("1.3.6.1.4.1.1466.115.121.1.15", "core").human_readable()
}
