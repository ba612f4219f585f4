//! A* pathfinding over the waypoint graph, plus route planning
//!
//! An empty path is a normal answer: callers fall back to moving directly.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy::prelude::*;

use crate::ai::navigation::NavGraph;
use crate::ai::reachability::Reachability;
use crate::geometry::Body;

/// Node in the A* search priority queue
#[derive(Clone, Copy)]
struct SearchNode {
    /// Index into nav graph nodes
    node_index: usize,
    /// Cost from start to this node (g-score)
    g_cost: f32,
    /// Estimated total cost (f-score = g + h)
    f_cost: f32,
    /// Push order, so equal f-scores pop first-found first
    seq: u64,
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchNode {}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (lower f_cost = higher priority)
        other
            .f_cost
            .total_cmp(&self.f_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Heuristic function for A* (Euclidean distance)
fn heuristic(from: Vec2, to: Vec2) -> f32 {
    from.distance(to)
}

/// Node indices from the node closest to `start` to the node closest to `goal`.
/// Empty when the graph is empty or the two are not connected.
pub fn find_path_nodes(nav_graph: &NavGraph, start: Vec2, goal: Vec2) -> Vec<usize> {
    let (Some(start_node), Some(goal_node)) = (
        nav_graph.find_closest_node(start),
        nav_graph.find_closest_node(goal),
    ) else {
        return Vec::new();
    };

    if start_node == goal_node {
        return vec![start_node];
    }

    let node_count = nav_graph.nodes.len();
    let goal_pos = nav_graph.nodes[goal_node].position;
    let mut open_set = BinaryHeap::new();
    let mut came_from: Vec<Option<usize>> = vec![None; node_count];
    let mut g_scores = vec![f32::INFINITY; node_count];
    let mut seq = 0u64;

    g_scores[start_node] = 0.0;
    open_set.push(SearchNode {
        node_index: start_node,
        g_cost: 0.0,
        f_cost: heuristic(nav_graph.nodes[start_node].position, goal_pos),
        seq,
    });

    while let Some(current) = open_set.pop() {
        if current.node_index == goal_node {
            return reconstruct_path(&came_from, start_node, goal_node);
        }

        // Skip if we've found a better path to this node
        if current.g_cost > g_scores[current.node_index] {
            continue;
        }

        for edge in &nav_graph.edges[current.node_index] {
            let tentative_g = current.g_cost + edge.cost;
            if tentative_g < g_scores[edge.to_node] {
                g_scores[edge.to_node] = tentative_g;
                came_from[edge.to_node] = Some(current.node_index);
                seq += 1;
                open_set.push(SearchNode {
                    node_index: edge.to_node,
                    g_cost: tentative_g,
                    f_cost: tentative_g
                        + heuristic(nav_graph.nodes[edge.to_node].position, goal_pos),
                    seq,
                });
            }
        }
    }

    Vec::new()
}

/// Waypoint positions from start-closest to goal-closest node
pub fn find_path(nav_graph: &NavGraph, start: Vec2, goal: Vec2) -> Vec<Vec2> {
    let path: Vec<Vec2> = find_path_nodes(nav_graph, start, goal)
        .into_iter()
        .map(|i| nav_graph.nodes[i].position)
        .collect();

    if path.is_empty() {
        debug!("No path from {:?} to {:?}", start, goal);
    } else {
        debug!("Found path with {} waypoints", path.len());
    }
    path
}

/// Walk back from the goal through `came_from`
fn reconstruct_path(came_from: &[Option<usize>], start_node: usize, goal_node: usize) -> Vec<usize> {
    let mut path = vec![goal_node];
    let mut current = goal_node;
    while current != start_node {
        match came_from[current] {
            Some(prev) => {
                path.push(prev);
                current = prev;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}

/// How to get from a pursuer to a goal
#[derive(Clone, Debug, PartialEq)]
pub enum Route {
    /// One jump lands at the goal
    DirectJump(Vec2),
    /// Walk straight there
    DirectWalk(Vec2),
    /// Follow graph waypoints; empty when nothing connects
    Waypoints(Vec<Vec2>),
}

impl Route {
    /// Points to follow; direct walks need none
    pub fn into_waypoints(self) -> Vec<Vec2> {
        match self {
            Route::DirectJump(point) => vec![point],
            Route::DirectWalk(_) => Vec::new(),
            Route::Waypoints(points) => points,
        }
    }
}

/// Walk when the goal is level and gap-free, jump when one jump lands there,
/// otherwise search the waypoint graph.
pub fn plan_route(reach: &Reachability, nav_graph: &NavGraph, from: &Body, goal_feet: Vec2) -> Route {
    if reach.is_direct_walk_possible(from, goal_feet) {
        return Route::DirectWalk(goal_feet);
    }
    if reach.can_jump_directly_to(from, goal_feet) {
        return Route::DirectJump(goal_feet);
    }
    Route::Waypoints(find_path(nav_graph, from.feet(), goal_feet))
}
