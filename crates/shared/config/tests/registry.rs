mod common;

use common::*;
use config::Config;
use jicoco_config::{DurationMillis, GetterError, GetterRegistry, TypeDescriptor};
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_last_registration_wins() {
    let registry = GetterRegistry::new();
    registry.register(FixedGreeting { id: 1, value: "first" });
    registry.register(FixedGreeting { id: 2, value: "second" });

    let handle = registry.lookup::<Greeting>().expect("getter registered");
    assert_eq!(handle.downcast_ref::<FixedGreeting>().map(|g| g.id), Some(2));

    let config = Config::default();
    assert_eq!(handle.get::<Greeting>(KNOWN_KEY, &config).unwrap(), Greeting("second".into()));
}

#[test]
fn test_unregistered_type_is_not_found() {
    let registry = GetterRegistry::new();
    registry.register(Tagged(1));

    assert!(registry.lookup::<Greeting>().is_none());
    assert!(!registry.contains::<Greeting>());
}

#[test]
fn test_lookup_returns_registered_instance() {
    let registry = GetterRegistry::new();
    let getter = Arc::new(FixedGreeting { id: 9, value: "hi" });
    registry.register_shared(Arc::clone(&getter));

    let first = registry.lookup::<Greeting>().unwrap();
    let second = registry.lookup_descriptor(&TypeDescriptor::of::<Greeting>()).unwrap();
    assert!(first.is_instance(&getter));
    assert!(first.ptr_eq(&second));
    assert_eq!(first.descriptor(), TypeDescriptor::of::<Greeting>());
}

#[test]
fn test_known_and_missing_keys() {
    let registry = GetterRegistry::new();
    registry.register(FixedGreeting { id: 1, value: "hello" });
    let config = Config::default();
    let handle = registry.lookup::<Greeting>().unwrap();

    assert_eq!(handle.get::<Greeting>(KNOWN_KEY, &config).unwrap(), Greeting("hello".into()));
    let err = handle.get::<Greeting>("missing.key", &config).unwrap_err();
    assert!(err.is_missing_key(), "expected key-missing, got {err}");
}

#[test]
fn test_distinct_types_do_not_interfere() {
    let registry = GetterRegistry::new();
    registry.register(Tagged(5));
    registry.register(DurationMillis);

    let tagged = registry.lookup::<u32>().unwrap();
    let millis = registry.lookup::<Duration>().unwrap();
    assert!(tagged.downcast_ref::<Tagged>().is_some());
    assert!(tagged.downcast_ref::<DurationMillis>().is_none());
    assert!(millis.downcast_ref::<DurationMillis>().is_some());
    assert!(!tagged.ptr_eq(&millis));

    let descriptors = registry.descriptors();
    assert_eq!(descriptors.len(), 2);
    assert!(descriptors.contains(&TypeDescriptor::of::<Duration>()));
    assert!(descriptors.contains(&TypeDescriptor::of::<u32>()));
}

#[test]
fn test_register_as_mismatch_keeps_previous_entry() {
    let registry = GetterRegistry::new();
    registry.register(Tagged(1));

    let err = registry.register_as(TypeDescriptor::of::<u32>(), DurationMillis).unwrap_err();
    assert!(matches!(err, GetterError::TypeMismatch { .. }));
    assert_eq!(registry.len(), 1);
    assert!(registry.lookup::<u32>().unwrap().downcast_ref::<Tagged>().is_some());
}

#[test]
fn test_registry_is_shareable_across_threads() {
    let registry = Arc::new(GetterRegistry::new());

    let handles: Vec<_> = (0..8u32)
        .map(|i| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                registry.register(Tagged(i));
                registry.lookup::<u32>().is_some()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().expect("thread should not panic"));
    }
    assert_eq!(registry.len(), 1);
}

proptest! {
    #[test]
    fn last_write_wins_for_any_sequence(ids in proptest::collection::vec(any::<u32>(), 1..32)) {
        let registry = GetterRegistry::new();
        for id in &ids {
            registry.register(Tagged(*id));
        }

        let config = Config::default();
        let handle = registry.lookup::<u32>().unwrap();
        prop_assert_eq!(handle.get::<u32>("any", &config).unwrap(), *ids.last().unwrap());
        prop_assert_eq!(registry.len(), 1);
    }

    #[test]
    fn interleaved_types_stay_isolated(
        ops in proptest::collection::vec((any::<bool>(), any::<u32>()), 1..32)
    ) {
        let registry = GetterRegistry::new();
        let mut last_tagged = None;
        let mut last_greeting = None;

        for (greeting, id) in &ops {
            if *greeting {
                registry.register(FixedGreeting { id: *id, value: "g" });
                last_greeting = Some(*id);
            } else {
                registry.register(Tagged(*id));
                last_tagged = Some(*id);
            }
        }

        let tagged = registry.lookup::<u32>().map(|h| h.downcast_ref::<Tagged>().unwrap().0);
        let greeting = registry
            .lookup::<Greeting>()
            .map(|h| h.downcast_ref::<FixedGreeting>().unwrap().id);
        prop_assert_eq!(tagged, last_tagged);
        prop_assert_eq!(greeting, last_greeting);
    }
}
