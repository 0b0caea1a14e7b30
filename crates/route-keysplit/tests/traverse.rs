mod common;

use std::sync::Arc;

use common::{Recorder, key_split};
use hotkey_route::{Request, Route, traverse_child};
use hotkey_route_keysplit::key::MAX_KEY_LENGTH;
use hotkey_route_memory::MemoryRoute;

#[test]
fn test_traverse_visits_own_replica_once() {
    let route = key_split(Arc::new(MemoryRoute::named("pool")), 3, true, 4);
    let mut recorder = Recorder::default();

    route.traverse(&Request::delete("foo"), &mut recorder);

    assert_eq!(
        recorder.visits,
        vec![("memory|name=pool".to_string(), "foo::1".to_string())]
    );
}

#[test]
fn test_traverse_canonical_replica_keeps_key() {
    let route = key_split(Arc::new(MemoryRoute::new()), 2, false, 0);
    let mut recorder = Recorder::default();

    route.traverse(&Request::get("foo"), &mut recorder);

    assert_eq!(recorder.visits.len(), 1);
    assert_eq!(recorder.visits[0].1, "foo");
}

#[test]
fn test_traverse_long_key_is_not_rewritten() {
    let route = key_split(Arc::new(MemoryRoute::new()), 2, false, 1);
    let key = "k".repeat(MAX_KEY_LENGTH);
    let mut recorder = Recorder::default();

    route.traverse(&Request::get(key.clone()), &mut recorder);

    assert_eq!(recorder.visits.len(), 1);
    assert_eq!(recorder.visits[0].1, key);
}

#[test]
fn test_traverse_from_parent_includes_route() {
    let route = key_split(Arc::new(MemoryRoute::new()), 2, false, 1);
    let mut recorder = Recorder::default();

    traverse_child(&route, &Request::get("foo"), &mut recorder);

    assert_eq!(
        recorder.visits,
        vec![
            (
                "keysplit|replicas=2|all-sync=false|replicaId=1".to_string(),
                "foo".to_string()
            ),
            ("memory|name=memory".to_string(), "foo::1".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_traverse_matches_routed_key() {
    let child = Arc::new(MemoryRoute::new());
    let route = key_split(Arc::clone(&child), 7, false, 100);
    let request = Request::get("foo");
    let mut recorder = Recorder::default();

    route.traverse(&request, &mut recorder);
    route.route(&request).await.unwrap();

    assert_eq!(child.keys().await, vec![recorder.visits[0].1.clone()]);
    assert_eq!(recorder.visits[0].1, "foo::2");
}
