//! Waypoint navigation graph - platform edges connected by walk/jump/drop edges
//!
//! Built from a platform snapshot. Each solid platform contributes a node just
//! inside its left and right edge. Edges are computed once per build; moving
//! platforms make them stale until the next rebuild.

use bevy::prelude::*;

use crate::tuning::NavTuning;
use crate::world::PlatformSnapshot;

/// Which side of its platform a node sits on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeSide {
    Left,
    Right,
}

/// A waypoint standing on a platform edge
#[derive(Clone, Debug)]
pub struct NavNode {
    /// Index in `NavGraph::nodes`
    pub id: usize,
    /// Feet position of the waypoint
    pub position: Vec2,
    /// Snapshot index of the supporting platform
    pub platform: usize,
    pub side: EdgeSide,
}

/// Type of edge connecting two navigation nodes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeType {
    /// Along the same platform
    Walk,
    /// Hop across or up to another platform
    Jump,
    /// Step off onto a lower platform
    Drop,
}

/// A directed edge in the navigation graph
#[derive(Clone, Debug)]
pub struct NavEdge {
    /// Target node index
    pub to_node: usize,
    pub edge_type: EdgeType,
    /// Distance scaled by the edge type's weight
    pub cost: f32,
}

/// Navigation graph shared by all ground pursuers
#[derive(Resource, Default)]
pub struct NavGraph {
    pub nodes: Vec<NavNode>,
    /// Adjacency list (edges[i] = edges from node i)
    pub edges: Vec<Vec<NavEdge>>,
    /// Whether the graph needs rebuilding
    pub dirty: bool,
    /// Snapshot generation this graph was built from
    pub built_for_generation: Option<u64>,
}

impl NavGraph {
    /// Build a fresh graph from the solid platforms in `platforms`
    pub fn build(platforms: &PlatformSnapshot, tuning: &NavTuning) -> Self {
        let mut graph = Self::default();
        graph.rebuild(platforms, tuning);
        graph
    }

    /// Does the graph need to be rebuilt for this snapshot?
    pub fn is_stale(&self, platforms: &PlatformSnapshot) -> bool {
        self.dirty || self.built_for_generation != Some(platforms.generation)
    }

    /// Replace nodes and edges with ones computed from `platforms`
    pub fn rebuild(&mut self, platforms: &PlatformSnapshot, tuning: &NavTuning) {
        self.nodes.clear();
        self.edges.clear();

        for (index, platform) in platforms.solid() {
            let top = platform.bounds.max.y + tuning.node_lift;
            let left = platform.bounds.min.x + tuning.node_inset;
            let right = (platform.bounds.max.x - tuning.node_inset).max(left);

            for (side, x) in [(EdgeSide::Left, left), (EdgeSide::Right, right)] {
                self.nodes.push(NavNode {
                    id: self.nodes.len(),
                    position: Vec2::new(x, top),
                    platform: index,
                    side,
                });
            }
        }

        let node_count = self.nodes.len();
        self.edges = vec![Vec::new(); node_count];
        for i in 0..node_count {
            for j in 0..node_count {
                if i == j {
                    continue;
                }
                if let Some(edge) = calculate_edge(&self.nodes[i], &self.nodes[j], tuning) {
                    self.edges[i].push(edge);
                }
            }
        }

        self.dirty = false;
        self.built_for_generation = Some(platforms.generation);

        info!(
            "Nav graph built: {} nodes, {} total edges",
            self.nodes.len(),
            self.edge_count()
        );

        debug!("=== Nav Graph Debug ===");
        for node in &self.nodes {
            let edge_summary: Vec<String> = self.edges[node.id]
                .iter()
                .map(|e| {
                    let edge_type = match e.edge_type {
                        EdgeType::Walk => "W",
                        EdgeType::Jump => "J",
                        EdgeType::Drop => "D",
                    };
                    format!("{}->{}({})", node.id, e.to_node, edge_type)
                })
                .collect();
            debug!(
                "  Node {}: platform {} {:?} @ ({:.0}, {:.0}) edges=[{}]",
                node.id,
                node.platform,
                node.side,
                node.position.x,
                node.position.y,
                edge_summary.join(", ")
            );
        }
        debug!("=== End Nav Graph ===");
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(|e| e.len()).sum()
    }

    /// Is there a direct edge from `from` to `to`?
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.edges
            .get(from)
            .is_some_and(|edges| edges.iter().any(|e| e.to_node == to))
    }

    /// Node closest to `point` (Euclidean)
    pub fn find_closest_node(&self, point: Vec2) -> Option<usize> {
        self.nodes
            .iter()
            .min_by(|a, b| {
                let dist_a = a.position.distance_squared(point);
                let dist_b = b.position.distance_squared(point);
                dist_a.total_cmp(&dist_b)
            })
            .map(|n| n.id)
    }
}

/// Connection rules between two edge nodes, if any
fn calculate_edge(from: &NavNode, to: &NavNode, tuning: &NavTuning) -> Option<NavEdge> {
    let distance = from.position.distance(to.position);

    // Same platform: always walkable
    if from.platform == to.platform {
        return Some(NavEdge {
            to_node: to.id,
            edge_type: EdgeType::Walk,
            cost: distance,
        });
    }

    let dx = (to.position.x - from.position.x).abs();
    let dy = to.position.y - from.position.y;

    // Level hop across a gap
    if dx <= tuning.max_hop_distance && dy.abs() < tuning.level_tolerance {
        return Some(NavEdge {
            to_node: to.id,
            edge_type: EdgeType::Jump,
            cost: distance * tuning.hop_cost,
        });
    }

    // Jump up, preferred
    if dy > 0.0 && dy <= tuning.max_jump_height && dx <= tuning.max_jump_reach {
        return Some(NavEdge {
            to_node: to.id,
            edge_type: EdgeType::Jump,
            cost: distance,
        });
    }

    // Small drop; bigger drops are left out on purpose
    if dy < 0.0 && -dy < tuning.max_drop_height && dx <= tuning.max_drop_reach {
        return Some(NavEdge {
            to_node: to.id,
            edge_type: EdgeType::Drop,
            cost: distance * tuning.drop_cost,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{ColliderKind, PlatformRect};

    fn graph(platforms: Vec<PlatformRect>) -> NavGraph {
        NavGraph::build(&PlatformSnapshot::new(platforms), &NavTuning::default())
    }

    fn edge_type(graph: &NavGraph, from: usize, to: usize) -> Option<EdgeType> {
        graph.edges[from]
            .iter()
            .find(|e| e.to_node == to)
            .map(|e| e.edge_type)
    }

    #[test]
    fn test_nodes_sit_inside_platform_edges() {
        let g = graph(vec![PlatformRect::solid(0.0, -20.0, 200.0, 20.0)]);
        assert_eq!(g.nodes.len(), 2);
        assert_eq!(g.nodes[0].position, Vec2::new(10.0, 2.0));
        assert_eq!(g.nodes[1].position, Vec2::new(190.0, 2.0));
        assert_eq!(edge_type(&g, 0, 1), Some(EdgeType::Walk));
        assert_eq!(edge_type(&g, 1, 0), Some(EdgeType::Walk));
    }

    #[test]
    fn test_level_hop_and_jump_up_and_drop() {
        let g = graph(vec![
            PlatformRect::solid(0.0, -20.0, 100.0, 20.0),
            // Level neighbour across a 60 unit gap
            PlatformRect::solid(160.0, -20.0, 100.0, 20.0),
            // Ledge 80 above the first platform
            PlatformRect::solid(-40.0, 70.0, 60.0, 10.0),
        ]);
        // Nodes: 0/1 first platform, 2/3 neighbour, 4/5 ledge
        assert_eq!(edge_type(&g, 1, 2), Some(EdgeType::Jump));
        assert_eq!(edge_type(&g, 0, 5), Some(EdgeType::Jump));
        // Ledge is 80 above: too far to drop back down
        assert_eq!(edge_type(&g, 5, 0), None);
    }

    #[test]
    fn test_small_drop_is_connected_and_costs_more() {
        let g = graph(vec![
            PlatformRect::solid(0.0, 20.0, 100.0, 20.0),
            PlatformRect::solid(140.0, -20.0, 100.0, 20.0),
        ]);
        // 40 unit drop from the right edge of the high platform
        let drop = g.edges[1].iter().find(|e| e.to_node == 2);
        let drop = drop.expect("drop edge");
        assert_eq!(drop.edge_type, EdgeType::Drop);
        let distance = g.nodes[1].position.distance(g.nodes[2].position);
        assert!(drop.cost > distance);
    }

    #[test]
    fn test_pass_through_kinds_get_no_nodes() {
        let g = graph(vec![
            PlatformRect::solid(0.0, -20.0, 100.0, 20.0),
            PlatformRect::new(Rect::new(20.0, 0.0, 50.0, 60.0), ColliderKind::Door),
        ]);
        assert_eq!(g.nodes.len(), 2);
        assert!(g.nodes.iter().all(|n| n.platform == 0));
    }

    #[test]
    fn test_staleness_tracks_generation() {
        let mut snapshot = PlatformSnapshot::new(vec![PlatformRect::solid(0.0, 0.0, 100.0, 20.0)]);
        let g = NavGraph::build(&snapshot, &NavTuning::default());
        assert!(!g.is_stale(&snapshot));
        snapshot.replace(vec![
            PlatformRect::solid(0.0, 0.0, 100.0, 20.0),
            PlatformRect::solid(200.0, 0.0, 100.0, 20.0),
        ]);
        assert!(g.is_stale(&snapshot));
    }
}
