use pretty_assertions::assert_eq;
use tombgraph_core::prelude::*;
use tombgraph_test_utils::*;

#[test]
fn test_create_get_until_removed() {
    let registry = Registry::new();
    let names: Vec<String> = (1..=20).map(child_name).collect();
    for name in &names {
        registry.create(name, "payload").unwrap();
    }
    for name in &names {
        assert_eq!(registry.get(name).unwrap().name(), name);
    }

    for name in names.iter().step_by(2) {
        registry.remove(name).unwrap();
    }
    for (i, name) in names.iter().enumerate() {
        assert_eq!(registry.get(name).is_some(), i % 2 == 1, "{name}");
    }
    assert_eq!(registry.len(), 10);
}

#[test]
fn test_second_remove_is_not_found() {
    let registry = Registry::new();
    registry.create("a", "").unwrap();
    registry.create("b", "").unwrap();

    registry.remove("a").unwrap();
    let before = {
        let mut names = registry.names();
        names.sort();
        names
    };
    let err = registry.remove("a").unwrap_err();
    assert_eq!(err, GraphError::NotFound { name: "a".into() });
    let mut after = registry.names();
    after.sort();
    assert_eq!(before, after);
}

#[test]
fn test_connect_missing_endpoint_has_no_effect() {
    let registry = Registry::new();
    registry.create("p", "parent").unwrap();
    registry.create("c", "child").unwrap();
    registry.remove("c").unwrap();

    assert!(matches!(registry.connect("p", "c"), Err(GraphError::NotFound { .. })));
    assert!(matches!(registry.connect("ghost", "p"), Err(GraphError::NotFound { .. })));
    assert_eq!(registry.get("p").unwrap().slot_count(), 0);
    assert_eq!(registry.show("p").to_string(), "Node: \"parent\"\nChildren: None");
}

#[test]
fn test_removed_child_never_listed_by_any_parent() {
    let registry = Registry::new();
    for parent in ["p1", "p2", "p3"] {
        registry.create(parent, parent).unwrap();
    }
    registry.create("c", "shared").unwrap();
    registry.create("d", "other").unwrap();
    for parent in ["p1", "p2", "p3"] {
        registry.connect(parent, "c").unwrap();
        registry.connect(parent, "d").unwrap();
    }

    registry.remove("c").unwrap();

    for _ in 0..3 {
        for parent in ["p1", "p2", "p3"] {
            assert_eq!(registry.show(parent).children(), ["d"]);
        }
    }
    // no compaction has run at the default frequency; the dead slot stays
    assert_eq!(registry.get("p1").unwrap().slot_count(), 2);
}

#[test]
fn test_duplicate_connect_lists_child_once() {
    let registry = Registry::new();
    registry.create("p", "").unwrap();
    registry.create("c", "").unwrap();
    registry.connect("p", "c").unwrap();
    registry.connect("p", "c").unwrap();

    assert_eq!(registry.show("p").children(), ["c"]);
    assert_eq!(registry.get("p").unwrap().slot_count(), 1);
}

#[test]
fn test_show_missing_renders_placeholder() {
    let registry = Registry::new();
    assert_eq!(registry.show("nobody").to_string(), "nobody is empty");
}

#[test]
fn test_two_hundred_children_compacted_by_show() {
    let registry = Registry::new();
    let children = build_star(&registry, "A", 200);

    let view = registry.show("A");
    assert_children(&view, &children);
    assert!(view.to_string().starts_with("Node: \"Parent Node\"\nChildren:\n - B1\n - B10\n - B100\n"));

    remove_all(&registry, &children);
    let parent = registry.get("A").unwrap();
    assert_eq!(parent.slot_count(), 200);

    assert_eq!(registry.show("A").to_string(), "Node: \"Parent Node\"\nChildren: None");
    assert!(parent.slot_count() < 200);
    assert_eq!(parent.slot_count(), 0);
    assert_eq!(parent.cleanup_counter(), 0);
}

#[test]
fn test_compaction_spares_live_children() {
    let registry = registry_with_frequency(10);
    let children = build_star(&registry, "A", 40);
    let (doomed, survivors) = children.split_at(35);
    remove_all(&registry, doomed);

    let view = registry.show("A");
    assert_children(&view, survivors);

    let parent = registry.get("A").unwrap();
    assert!(parent.slot_count() < 40);
    for name in survivors {
        assert!(parent.child(name).is_some(), "{name} lost by compaction");
    }
}

#[test]
fn test_point_lookups_reclaim_like_traversal() {
    let registry = registry_with_frequency(5);
    let children = build_star(&registry, "A", 5);
    remove_all(&registry, &children);

    let parent = registry.get("A").unwrap();
    for name in &children {
        assert!(parent.child(name).is_none());
    }
    assert_eq!(parent.slot_count(), 0);
}
