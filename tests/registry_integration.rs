//! End-to-end registry behavior across kinds, plus concurrent access.

mod common;

use common::*;
use ldap_schema_registry::schema::types::AttributeType;
use ldap_schema_registry::{RegistryError, Registries};

use std::sync::Arc;
use std::thread;

#[test]
fn test_core_schema_lifecycle() {
    init_logging();
    let registries = Registries::new();
    let attribute_types = registries.attribute_types();

    let registered = attribute_types.register(cn_attribute()).unwrap();

    // Both the OID and every alias resolve to the same object.
    assert!(Arc::ptr_eq(
        &attribute_types.lookup("2.5.4.3").unwrap(),
        &registered
    ));
    assert!(Arc::ptr_eq(&attribute_types.lookup("cn").unwrap(), &registered));
    assert_eq!(attribute_types.get_oid("cn").unwrap(), "2.5.4.3");

    // Bulk removal by schema name empties every index.
    assert_eq!(registries.unregister_schema_elements("core"), 1);
    assert!(matches!(
        attribute_types.lookup("cn"),
        Err(RegistryError::NotFound { .. })
    ));
    assert!(registries.oid_registry().is_empty());
}

#[test]
fn test_schema_wide_rename_and_removal_fan_out() {
    init_logging();
    let registries = Registries::new();

    registries.attribute_types().register(cn_attribute()).unwrap();
    registries.attribute_types().register(name_attribute()).unwrap();
    registries.object_classes().register(top_class()).unwrap();
    registries.object_classes().register(person_class()).unwrap();
    registries.matching_rules().register(case_ignore_match()).unwrap();
    registries.syntaxes().register(directory_string_syntax()).unwrap();

    assert_eq!(registries.oid_registry().len(), 6);

    registries.rename_schema("CORE", "system");
    assert_eq!(
        registries.attribute_types().get_schema_name("2.5.4.3").unwrap(),
        "system"
    );
    assert_eq!(
        registries.syntaxes().get_schema_name("1.3.6.1.4.1.1466.115.121.1.15").unwrap(),
        "system"
    );

    // The old name no longer matches anything.
    assert_eq!(registries.unregister_schema_elements("core"), 0);
    assert_eq!(registries.oid_registry().len(), 6);

    assert_eq!(registries.unregister_schema_elements("system"), 6);
    assert!(registries.oid_registry().is_empty());
    assert!(registries.attribute_types().is_empty());
    assert!(registries.object_classes().is_empty());
    assert!(registries.matching_rules().is_empty());
    assert!(registries.syntaxes().is_empty());
}

#[test]
fn test_oid_uniqueness_is_enforced_across_kinds() {
    init_logging();
    let registries = Registries::new();

    registries.attribute_types().register(cn_attribute()).unwrap();

    // A different kind claiming the same OID is rejected by the shared map
    // and leaves its own registry untouched.
    let stolen = ldap_schema_registry::ObjectClass::new("2.5.4.3", "core");
    let result = registries.object_classes().register(stolen);

    assert!(matches!(result, Err(RegistryError::DuplicateOid { .. })));
    assert!(registries.object_classes().is_empty());
    assert_eq!(registries.oid_registry().len(), 1);
}

#[test]
fn test_superior_chain_resolution() {
    init_logging();
    let registries = Registries::new();
    let attribute_types = registries.attribute_types();

    attribute_types.register(name_attribute()).unwrap();
    attribute_types.register(cn_attribute()).unwrap();

    let chain = attribute_types.superior_chain("cn").unwrap();
    let oids: Vec<_> = chain.iter().map(|at| at.oid.as_str()).collect();
    assert_eq!(oids, ["2.5.4.3", "2.5.4.41"]);

    // cn declares no syntax of its own; the effective syntax comes from
    // its superior.
    assert_eq!(
        attribute_types.syntax_oid("cn").unwrap().as_deref(),
        Some("1.3.6.1.4.1.1466.115.121.1.15")
    );
}

#[test]
fn test_superior_chain_reports_dangling_links() {
    init_logging();
    let registries = Registries::new();
    let attribute_types = registries.attribute_types();

    // cn's superior (2.5.4.41) is not registered.
    attribute_types.register(cn_attribute()).unwrap();

    assert!(matches!(
        attribute_types.superior_chain("cn"),
        Err(RegistryError::NotFound { .. })
    ));
}

#[test]
fn test_object_class_superiors_resolution() {
    init_logging();
    let registries = Registries::new();
    let object_classes = registries.object_classes();

    object_classes.register(top_class()).unwrap();
    object_classes.register(person_class()).unwrap();

    let superiors = object_classes.superiors("person").unwrap();
    assert_eq!(superiors.len(), 1);
    assert_eq!(superiors[0].oid, "2.5.6.0");
}

#[test]
fn test_matching_rules_queryable_by_syntax() {
    init_logging();
    let registries = Registries::new();

    registries.matching_rules().register(case_ignore_match()).unwrap();
    registries.syntaxes().register(directory_string_syntax()).unwrap();

    let rules = registries
        .matching_rules()
        .rules_for_syntax("1.3.6.1.4.1.1466.115.121.1.15");
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].oid, "2.5.13.2");

    assert!(registries
        .syntaxes()
        .is_human_readable("1.3.6.1.4.1.1466.115.121.1.15")
        .unwrap());
}

#[test]
fn test_concurrent_registration_of_distinct_oids() {
    init_logging();
    let registries = Arc::new(Registries::new());
    let threads: usize = 8;
    let per_thread: usize = 50;

    thread::scope(|scope| {
        for thread_index in 0..threads {
            let registries = Arc::clone(&registries);
            scope.spawn(move || {
                for i in 0..per_thread {
                    let oid = format!("2.25.{thread_index}.{i}");
                    let name = format!("attr-{thread_index}-{i}");
                    registries
                        .attribute_types()
                        .register(AttributeType::new(&oid, "load-test").with_names([name]))
                        .expect("distinct OIDs must all register");
                }
            });
        }
    });

    // Every registration is visible and the two maps agree on size.
    assert_eq!(registries.attribute_types().len(), threads * per_thread);
    assert_eq!(registries.oid_registry().len(), threads * per_thread);
    for thread_index in 0..threads {
        for i in 0..per_thread {
            assert!(registries.attribute_types().contains(&format!("2.25.{thread_index}.{i}")));
        }
    }
}

#[test]
fn test_concurrent_readers_during_bulk_removal_never_see_torn_state() {
    init_logging();
    let registries = Arc::new(Registries::new());

    for i in 0..200 {
        registries
            .attribute_types()
            .register(AttributeType::new(format!("2.25.1.{i}"), "doomed"))
            .unwrap();
    }

    thread::scope(|scope| {
        let reader = {
            let registries = Arc::clone(&registries);
            scope.spawn(move || {
                // Each observation must find the local map and the OID map
                // agreeing: an object is either fully present in both or
                // fully absent from both.
                for _ in 0..1000 {
                    for i in (0..200).step_by(17) {
                        let oid = format!("2.25.1.{i}");
                        if let Ok(object) = registries.attribute_types().lookup(&oid) {
                            assert_eq!(object.oid, oid);
                        }
                    }
                }
            })
        };

        let registries = Arc::clone(&registries);
        scope.spawn(move || {
            assert_eq!(registries.unregister_schema_elements("doomed"), 200);
        });

        reader.join().unwrap();
    });

    assert!(registries.attribute_types().is_empty());
    assert!(registries.oid_registry().is_empty());
}
