//! Override precedence across the store and lookup.

use std::sync::Arc;

use lpg_session::{ConfigLookup, ProcessDefaults, SessionStore, ValueSource, OVERRIDE_KEYS};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_blank_submissions_never_override(key in prop::sample::select(OVERRIDE_KEYS.to_vec()), blank in "[ \t]{0,4}") {
        let store = SessionStore::default();
        let defaults = Arc::new(ProcessDefaults::from_map([(key, "from-default")]));
        let session = store.apply(None, [(key, blank)]);

        let lookup = ConfigLookup::new(store.get(&session), defaults);
        let value = lookup.get_value(key);
        prop_assert_eq!(value.as_deref(), Some("from-default"));
        prop_assert_eq!(lookup.source(key), ValueSource::Default);
    }

    #[test]
    fn prop_non_blank_submissions_override(key in prop::sample::select(OVERRIDE_KEYS.to_vec()), value in "[A-Za-z0-9]{1,16}") {
        let store = SessionStore::default();
        let defaults = Arc::new(ProcessDefaults::from_map([(key, "from-default")]));
        let session = store.apply(None, [(key, value.clone())]);

        let lookup = ConfigLookup::new(store.get(&session), defaults);
        prop_assert_eq!(lookup.get_value(key), Some(value));
    }
}

#[test]
fn sessions_are_isolated() {
    let store = SessionStore::default();
    let defaults = Arc::new(ProcessDefaults::default());
    let a = store.apply(None, [("ORG_TICKER", "A")]);
    let b = store.apply(None, [("ORG_TICKER", "B")]);

    let lookup_a = ConfigLookup::new(store.get(&a), Arc::clone(&defaults));
    let lookup_b = ConfigLookup::new(store.get(&b), Arc::clone(&defaults));
    assert_eq!(lookup_a.get_value("ORG_TICKER").as_deref(), Some("A"));
    assert_eq!(lookup_b.get_value("ORG_TICKER").as_deref(), Some("B"));

    store.clear(&a);
    let cleared = ConfigLookup::new(store.get(&a), defaults);
    assert_eq!(cleared.get_value("ORG_TICKER"), None);
}
