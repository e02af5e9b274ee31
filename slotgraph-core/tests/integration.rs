//! Integration Tests for the Dependency Graph
//!
//! These tests drive the public API the way a host would: build a graph,
//! edit it, resolve it.

use slotgraph_core::{DepGraph, GraphConfig, GraphError, Overflow, Planner};

fn position(order: &[u32], node: u32) -> usize {
    order
        .iter()
        .position(|&n| n == node)
        .unwrap_or_else(|| panic!("node {node} missing from {order:?}"))
}

/// A self-loop is a one-node cycle.
#[test]
fn self_loop_is_a_cycle() {
    let mut graph: DepGraph = DepGraph::new(4, 4);
    graph.add(1, 1).unwrap();
    assert!(matches!(
        graph.resolve(),
        Err(GraphError::CycleDetected { .. })
    ));
}

/// Two nodes pointing at each other.
#[test]
fn two_cycle_is_detected() {
    let mut graph: DepGraph = DepGraph::new(4, 4);
    graph.add(1, 2).unwrap();
    graph.add(2, 1).unwrap();
    assert!(graph.resolve().unwrap_err().is_cycle());
}

/// A longer ring is still a cycle.
#[test]
fn four_cycle_is_detected() {
    let mut graph: DepGraph = DepGraph::new(8, 8);
    graph.add(1, 2).unwrap();
    graph.add(2, 3).unwrap();
    graph.add(3, 4).unwrap();
    graph.add(4, 1).unwrap();
    let err = graph.resolve().unwrap_err();
    assert_eq!(
        err,
        GraphError::CycleDetected {
            unresolved: 4,
            active: 5
        }
    );
}

/// Removing an edge updates in-degrees immediately, not just at resolve time.
#[test]
fn removal_updates_in_degree() {
    let mut graph: DepGraph = DepGraph::new(4, 4);
    let e1 = graph.add(0, 1).unwrap();
    let _e2 = graph.add(1, 2).unwrap();
    assert_eq!(graph.in_degree(1), 1);
    assert_eq!(graph.in_degree(2), 1);

    graph.remove(e1, 0);
    assert_eq!(graph.in_degree(1), 0);

    let order = graph.resolve().unwrap();
    assert!(position(order, 1) < position(order, 2));
}

/// Filling the arena, overflowing it, then recycling freed slots.
#[test]
fn slot_reuse_stays_within_capacity() {
    let capacity = 6;
    let mut graph: DepGraph = DepGraph::new(16, capacity);
    let handles: Vec<_> = (0..capacity as u32)
        .map(|i| graph.add(i, i + 1).unwrap())
        .collect();

    let err = graph.add(10, 11).unwrap_err();
    assert_eq!(err, GraphError::Overflow(Overflow::Edges { capacity }));

    graph.remove(handles[1], 1);
    graph.remove(handles[4], 4);

    let a = graph.add(12, 13).unwrap();
    let b = graph.add(13, 14).unwrap();
    assert!(graph.high_water() <= capacity);

    let mut reused = vec![a, b];
    reused.sort();
    assert_eq!(reused, vec![handles[1], handles[4]]);

    assert!(graph.add(14, 15).unwrap_err().is_overflow());
}

/// Same edit history, same order.
#[test]
fn identical_histories_resolve_identically() {
    fn build() -> DepGraph<u32> {
        let mut graph = DepGraph::new(10, 16);
        let a = graph.add(0, 5).unwrap();
        graph.add(3, 5).unwrap();
        graph.add(2, 7).unwrap();
        let b = graph.add(5, 9).unwrap();
        graph.add(1, 9).unwrap();
        graph.remove(a, 0);
        graph.add(8, 2).unwrap();
        graph.remove(b, 5);
        graph.add(5, 6).unwrap();
        graph
    }

    let mut left = build();
    let mut right = build();
    assert_eq!(left.resolve().unwrap(), right.resolve().unwrap());
}

/// The classic diamond.
#[test]
fn diamond_orders_both_branches() {
    let mut graph: DepGraph = DepGraph::new(4, 4);
    graph.add(0, 1).unwrap();
    graph.add(0, 2).unwrap();
    graph.add(1, 3).unwrap();
    graph.add(2, 3).unwrap();

    let order = graph.resolve().unwrap();
    assert_eq!(order.len(), 4);
    assert!(position(order, 0) < position(order, 1));
    assert!(position(order, 0) < position(order, 2));
    assert!(position(order, 1) < position(order, 3));
    assert!(position(order, 2) < position(order, 3));
}

/// A chain that uses every node and every edge slot.
#[test]
fn saturated_chain_resolves() {
    let mut graph: DepGraph = DepGraph::new(5, 4);
    graph.add(0, 1).unwrap();
    graph.add(1, 2).unwrap();
    graph.add(2, 3).unwrap();
    graph.add(3, 4).unwrap();

    let order = graph.resolve().unwrap();
    assert_eq!(order.len(), 5);
    assert!(position(order, 0) < position(order, 4));
    assert_eq!(order, &[0, 1, 2, 3, 4]);
}

/// Narrow id types work end to end.
#[test]
fn u8_node_ids() {
    let mut graph: DepGraph<u8> = DepGraph::new(256, 8);
    graph.add(255, 0).unwrap();
    let order = graph.resolve().unwrap();
    assert_eq!(order.len(), 256);
    assert_eq!(order.last(), Some(&0));
}

/// Capacities loaded from JSON configure the engine.
#[test]
fn graph_from_json_config() {
    let config = GraphConfig::from_json(r#"{ "node_capacity": 3, "edge_capacity": 1 }"#).unwrap();
    let mut graph: DepGraph<u16> = DepGraph::with_config(&config).unwrap();
    graph.add(0, 2).unwrap();
    assert!(graph.add(0, 1).unwrap_err().is_overflow());
    assert!(graph.add(0, 3).unwrap_err().is_overflow());
    assert_eq!(graph.resolve().unwrap(), &[0, 1, 2]);
}

/// A package-manager style session: declare, resolve, prune, resolve again.
#[test]
fn planner_replans_after_pruning() {
    let mut planner = Planner::with_capacity(16, 32);
    planner.depend("app", "http").unwrap();
    planner.depend("http", "tls").unwrap();
    planner.depend("tls", "crypto").unwrap();
    planner.depend("http", "crypto").unwrap();

    let order = planner.build_order().unwrap();
    assert_eq!(order, vec!["crypto", "tls", "http", "app"]);

    // http no longer needs tls directly; tls becomes a leaf.
    assert!(planner.undepend("http", "tls").unwrap());
    let order = planner.build_order().unwrap();
    let at = |name: &str| order.iter().position(|&n| n == name).unwrap();
    assert!(at("crypto") < at("tls"));
    assert!(at("crypto") < at("http"));
    assert!(at("http") < at("app"));
}
