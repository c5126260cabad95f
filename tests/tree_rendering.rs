use taskweave::graph::{Registry, TaskRef};
use taskweave::tree::{NodeType, TreeNode, TreeOptions};
use taskweave_test_utils::{anon, init_tracing, noop};

fn leaf(label: &str) -> TreeNode {
    TreeNode::leaf(label)
}

fn series(label: &str) -> TreeNode {
    TreeNode::composite(label, NodeType::Series)
}

fn parallel(label: &str) -> TreeNode {
    TreeNode::composite(label, NodeType::Parallel)
}

/// fn1 = parallel(anon, noop), fn2 = parallel(anon, noop), fn3 = series("fn1", "fn2").
fn triple_level() -> Registry {
    let mut reg = Registry::new();
    let anon = anon();
    let noop = noop();

    let fn1 = reg.parallel([&anon, &noop]).unwrap();
    reg.register("fn1", fn1).unwrap();
    let fn2 = reg.parallel([&anon, &noop]).unwrap();
    reg.register("fn2", fn2).unwrap();
    let fn3 = reg.series(["fn1", "fn2"]).unwrap();
    reg.register("fn3", fn3).unwrap();
    reg
}

fn triple_level_full() -> Vec<TreeNode> {
    let inner = || vec![leaf("<anonymous>"), leaf("noop")];
    vec![
        parallel("fn1").with_nodes(inner()),
        parallel("fn2").with_nodes(inner()),
        series("fn3").with_nodes(vec![
            parallel("fn1").with_nodes(inner()),
            parallel("fn2").with_nodes(inner()),
        ]),
    ]
}

#[test]
fn simple_tree_by_default() {
    init_tracing();
    let mut reg = Registry::new();
    reg.register("test1", anon()).unwrap();
    reg.register("test2", anon()).unwrap();
    reg.register("test3", anon()).unwrap();
    reg.register("error", anon()).unwrap();

    let ser = reg.series(["test1", "test2"]).unwrap();
    let display = anon().with_display_name("<display name>");

    let s = reg.series(["test1", "test2"]).unwrap();
    reg.register("ser", s).unwrap();
    let p = reg.parallel(["test1", "test2", "test3"]).unwrap();
    reg.register("par", p).unwrap();
    let sp = reg.series(["ser", "par"]).unwrap();
    reg.register("serpar", sp).unwrap();
    let sp2 = reg
        .series(vec![TaskRef::from(&ser), TaskRef::from(&display)])
        .unwrap();
    reg.register("serpar2", sp2).unwrap();
    reg.register_callable(&display).unwrap();

    let tree = reg.render_tree(TreeOptions::default()).unwrap();
    assert_eq!(
        tree,
        vec![
            leaf("test1"),
            leaf("test2"),
            leaf("test3"),
            leaf("error"),
            series("ser"),
            parallel("par"),
            series("serpar"),
            series("serpar2"),
            leaf("<display name>"),
        ]
    );
}

#[test]
fn unregistered_composite_shows_placeholder_when_nested() {
    let mut reg = Registry::new();
    reg.register("test1", anon()).unwrap();
    reg.register("test2", anon()).unwrap();
    let ser = reg.series(["test1", "test2"]).unwrap();
    let display = anon().with_display_name("<display name>");
    let sp2 = reg
        .series(vec![TaskRef::from(&ser), TaskRef::from(&display)])
        .unwrap();
    reg.register("serpar2", sp2).unwrap();

    let tree = reg.render_tree(TreeOptions::deep()).unwrap();
    assert_eq!(
        tree[2],
        series("serpar2").with_nodes(vec![
            series("<series>").with_nodes(vec![leaf("test1"), leaf("test2")]),
            leaf("<display name>"),
        ])
    );
}

#[test]
fn one_level_tree() {
    let mut reg = Registry::new();
    reg.register("fn1", anon()).unwrap();
    reg.register("fn2", anon()).unwrap();

    let tree = reg.render_tree(TreeOptions::deep()).unwrap();
    assert_eq!(tree, vec![leaf("fn1"), leaf("fn2")]);
}

#[test]
fn two_level_tree() {
    let mut reg = Registry::new();
    reg.register("fn1", anon()).unwrap();
    reg.register("fn2", anon()).unwrap();
    let fn3 = reg.series(["fn1", "fn2"]).unwrap();
    reg.register("fn3", fn3).unwrap();

    let tree = reg.render_tree(TreeOptions::deep()).unwrap();
    assert_eq!(
        tree,
        vec![
            leaf("fn1"),
            leaf("fn2"),
            series("fn3").with_nodes(vec![leaf("fn1"), leaf("fn2")]),
        ]
    );
}

#[test]
fn three_level_tree() {
    let tree = triple_level().render_tree(TreeOptions::deep()).unwrap();
    assert_eq!(tree, triple_level_full());
}

#[test]
fn leaves_never_expand() {
    let mut reg = Registry::new();
    for name in ["a", "b", "c"] {
        reg.register(name, anon()).unwrap();
    }

    for depth in [None, Some(1), Some(2), Some(10)] {
        let options = TreeOptions { deep: true, depth };
        let tree = reg.render_tree(options).unwrap();
        assert!(tree.iter().all(|n| n.nodes.is_none() && n.node_type.is_none()));
    }
}

#[test]
fn label_stability_for_nested_occurrences() {
    let mut reg = Registry::new();
    let a = reg.register("A", anon()).unwrap();
    let b = reg.series([&a]).unwrap();
    reg.register("B", b).unwrap();

    let tree = reg.render_tree(TreeOptions::deep()).unwrap();
    assert_eq!(
        tree,
        vec![leaf("A"), series("B").with_nodes(vec![leaf("A")])]
    );
}

#[test]
fn aliased_tasks_simple() {
    let mut reg = Registry::new();
    let noop = noop();
    let anon = anon();

    reg.register_callable(&noop).unwrap();
    reg.register("fn1", &noop).unwrap();
    let n = reg.get("noop").unwrap();
    reg.register("fn2", n).unwrap();
    reg.register("fn3", &anon).unwrap();
    let f3 = reg.get("fn3").unwrap();
    reg.register("fn4", f3).unwrap();

    let tree = reg.render_tree(TreeOptions::deep()).unwrap();
    assert_eq!(
        tree,
        vec![leaf("noop"), leaf("fn1"), leaf("fn2"), leaf("fn3"), leaf("fn4")]
    );
}

#[test]
fn aliased_tasks_nested() {
    let mut reg = Registry::new();
    let noop = noop();
    let anon = anon();

    reg.register_callable(&noop).unwrap();
    reg.register("fn1", &noop).unwrap();
    let n = reg.get("noop").unwrap();
    reg.register("fn2", n).unwrap();
    reg.register("fn3", &anon).unwrap();

    let refs = || {
        vec![
            TaskRef::from(&noop),
            TaskRef::from(&anon),
            TaskRef::from("fn1"),
            TaskRef::from("fn2"),
            TaskRef::from("fn3"),
        ]
    };
    let ser = reg.series(refs()).unwrap();
    reg.register("ser", ser).unwrap();
    let par = reg.parallel(refs()).unwrap();
    reg.register("par", par).unwrap();

    // Nested positions show canonical labels, never the alias used to refer to them.
    let nested = || {
        vec![
            leaf("noop"),
            leaf("fn3"),
            leaf("noop"),
            leaf("noop"),
            leaf("fn3"),
        ]
    };

    let tree = reg.render_tree(TreeOptions::deep()).unwrap();
    assert_eq!(
        tree,
        vec![
            leaf("noop"),
            leaf("fn1"),
            leaf("fn2"),
            leaf("fn3"),
            series("ser").with_nodes(nested()),
            parallel("par").with_nodes(nested()),
        ]
    );
}

#[test]
fn depth_1_of_three_level_tree() {
    let tree = triple_level()
        .render_tree(TreeOptions::deep().with_depth(1))
        .unwrap();
    assert_eq!(tree, vec![parallel("fn1"), parallel("fn2"), series("fn3")]);
}

#[test]
fn depth_2_of_three_level_tree() {
    let tree = triple_level()
        .render_tree(TreeOptions::deep().with_depth(2))
        .unwrap();
    let inner = || vec![leaf("<anonymous>"), leaf("noop")];
    assert_eq!(
        tree,
        vec![
            parallel("fn1").with_nodes(inner()),
            parallel("fn2").with_nodes(inner()),
            series("fn3").with_nodes(vec![parallel("fn1"), parallel("fn2")]),
        ]
    );
}

#[test]
fn depth_3_and_beyond_match_unbounded() {
    let reg = triple_level();
    let full = triple_level_full();

    for depth in [3, 4, 5, 6, 100] {
        let tree = reg.render_tree(TreeOptions::deep().with_depth(depth)).unwrap();
        assert_eq!(tree, full, "depth {depth}");
    }
}

#[test]
fn depth_without_deep_does_not_expand() {
    let tree = triple_level()
        .render_tree(TreeOptions {
            deep: false,
            depth: Some(3),
        })
        .unwrap();
    assert_eq!(tree, vec![parallel("fn1"), parallel("fn2"), series("fn3")]);
}

#[test]
fn description_and_flag_pass_through() {
    let mut reg = Registry::new();
    let anon = anon();
    let noop = noop();

    let f1 = reg.parallel([&anon, &noop]).unwrap();
    f1.set_description("Task #1.");
    f1.set_flag([("--opt1", "Option 1."), ("--opt2", "Option 2.")]);
    reg.register("fn1", f1).unwrap();

    let f2 = reg.parallel([&anon, &noop]).unwrap();
    f2.set_description("Task #2.");
    reg.register("fn2", f2).unwrap();

    let f3 = reg.series(["fn1", "fn2"]).unwrap();
    f3.set_flag([("--opt3", "Option 3."), ("--opt4", "Option 4.")]);
    reg.register("fn3", f3).unwrap();

    let inner = || vec![leaf("<anonymous>"), leaf("noop")];
    let fn1 = parallel("fn1")
        .with_description("Task #1.")
        .with_flag([("--opt1", "Option 1."), ("--opt2", "Option 2.")])
        .with_nodes(inner());
    let fn2 = parallel("fn2")
        .with_description("Task #2.")
        .with_nodes(inner());

    let tree = reg.render_tree(TreeOptions::deep()).unwrap();
    assert_eq!(
        tree,
        vec![
            fn1.clone(),
            fn2.clone(),
            series("fn3")
                .with_flag([("--opt3", "Option 3."), ("--opt4", "Option 4.")])
                .with_nodes(vec![fn1, fn2]),
        ]
    );

    let json = serde_json::to_value(&tree).unwrap();
    assert!(json[1].get("flag").is_none());
    assert!(json[2].get("description").is_none());
    assert_eq!(json[0]["flag"]["--opt2"], "Option 2.");
}

#[test]
fn metadata_set_after_registration_is_read_at_render_time() {
    let mut reg = Registry::new();
    let unit = reg.register("build", anon()).unwrap();
    assert_eq!(reg.render_tree(TreeOptions::default()).unwrap(), vec![leaf("build")]);

    unit.set_description("first");
    unit.set_description("second");
    unit.add_flag("--release", "Optimised.");

    assert_eq!(
        reg.render_tree(TreeOptions::default()).unwrap(),
        vec![leaf("build")
            .with_description("second")
            .with_flag([("--release", "Optimised.")])]
    );
}

#[test]
fn overwrite_keeps_old_direct_references() {
    let mut reg = Registry::new();
    let first = reg.parallel([anon(), noop()]).unwrap();
    reg.register("X", &first).unwrap();

    let old = reg.get("X").unwrap();
    let keeper = reg.series([&old]).unwrap();
    reg.register("keeper", keeper).unwrap();

    let second = reg.register("X", anon()).unwrap();

    assert_eq!(reg.get("X").unwrap(), second);
    assert_ne!(reg.get("X").unwrap(), first);

    let tree = reg.render_tree(TreeOptions::deep()).unwrap();
    assert_eq!(
        tree,
        vec![
            leaf("X"),
            series("keeper").with_nodes(vec![
                parallel("X").with_nodes(vec![leaf("<anonymous>"), leaf("noop")])
            ]),
        ]
    );
}

#[test]
fn overwrite_is_seen_by_name_references() {
    let mut reg = Registry::new();
    reg.register("X", anon()).unwrap();
    let uses = reg.series(["X"]).unwrap();
    reg.register("uses", uses).unwrap();

    let replacement = reg.parallel([noop()]).unwrap();
    reg.register("X", replacement).unwrap();

    let tree = reg.render_tree(TreeOptions::deep()).unwrap();
    assert_eq!(
        tree[1],
        series("uses").with_nodes(vec![parallel("X").with_nodes(vec![leaf("noop")])])
    );
}

#[test]
fn forward_references_resolve_at_render_time() {
    let mut reg = Registry::new();
    let build = reg.series(["lint", "compile"]).unwrap();
    reg.register("build", build).unwrap();
    reg.register("lint", anon()).unwrap();
    reg.register("compile", anon()).unwrap();

    let tree = reg.render_tree(TreeOptions::deep()).unwrap();
    assert_eq!(
        tree[0],
        series("build").with_nodes(vec![leaf("lint"), leaf("compile")])
    );
}

#[test]
fn repeated_renders_are_identical() {
    let reg = triple_level();
    for options in [
        TreeOptions::default(),
        TreeOptions::deep(),
        TreeOptions::deep().with_depth(2),
    ] {
        let first = reg.render_tree(options).unwrap();
        let second = reg.render_tree(options).unwrap();
        assert_eq!(first, second);
    }
}
