//! Layered graph layout: positioned nodes and routed edges

use std::collections::HashMap;

use serde::Serialize;

use crate::graph::PrereqGraph;
use crate::level::compute_levels;
use crate::model::{Course, CourseId};

/// Fixed node footprint, in layout units.
pub const NODE_WIDTH: f32 = 180.0;
pub const NODE_HEIGHT: f32 = 50.0;

/// Minimum horizontal gap between nodes in the same layer.
pub const NODE_SEP: f32 = 60.0;

/// Vertical gap between consecutive layers.
pub const RANK_SEP: f32 = 80.0;

/// Color scheme the node and edge colors are computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// A positioned course node. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    pub id: CourseId,
    pub label: String,
    pub level: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: String,
}

impl LayoutNode {
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }
}

/// A routed prerequisite edge, pointing from prerequisite to dependent.
///
/// `points` runs from the source's bottom edge to the target's top edge with
/// an elbow midway; the arrowhead belongs at the last point. The renderer
/// can always fall back to a straight line between the two node centers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutEdge {
    pub id: String,
    pub source: CourseId,
    pub target: CourseId,
    pub points: Vec<Point>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct LayoutResult {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    pub width: f32,
    pub height: f32,
}

impl LayoutResult {
    pub fn node(&self, id: &CourseId) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Straight center-to-center line for an edge, for renderers that ignore
    /// the routed polyline or receive one that is missing points.
    pub fn fallback_line(&self, edge: &LayoutEdge) -> Option<(Point, Point)> {
        Some((
            self.node(&edge.source)?.center(),
            self.node(&edge.target)?.center(),
        ))
    }
}

/// Lay out a course set: layers keyed by level (level 0 on top, prerequisites
/// above their dependents), names sorted case-insensitively within a layer,
/// each layer centered against the widest. Identical input yields identical
/// output. Dangling prerequisite references produce no edge.
pub fn layout_graph(courses: &[Course], theme: Theme) -> LayoutResult {
    if courses.is_empty() {
        return LayoutResult::default();
    }

    let graph = PrereqGraph::build(courses);
    let levels = compute_levels(courses);
    let max_level = levels.max_level();

    let mut layers: Vec<Vec<&Course>> = vec![Vec::new(); (max_level + 1) as usize];
    for course in courses {
        layers[levels.level(&course.id) as usize].push(course);
    }
    for layer in &mut layers {
        layer.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    }

    let width = layers
        .iter()
        .map(|layer| layer_width(layer.len()))
        .fold(0.0, f32::max);
    let height = (max_level + 1) as f32 * NODE_HEIGHT + max_level as f32 * RANK_SEP;

    let mut nodes = Vec::with_capacity(courses.len());
    for (level, layer) in layers.iter().enumerate() {
        let y = level as f32 * (NODE_HEIGHT + RANK_SEP);
        let offset = (width - layer_width(layer.len())) / 2.0;
        for (slot, course) in layer.iter().enumerate() {
            nodes.push(LayoutNode {
                id: course.id.clone(),
                label: course.name.clone(),
                level: level as u32,
                x: offset + slot as f32 * (NODE_WIDTH + NODE_SEP),
                y,
                width: NODE_WIDTH,
                height: NODE_HEIGHT,
                color: level_color(level as u32, max_level, theme),
            });
        }
    }

    let slot_of: HashMap<&CourseId, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (&node.id, i))
        .collect();

    let mut edges = Vec::new();
    for (source, target) in graph.edges() {
        let (Some(&s), Some(&t)) = (slot_of.get(source), slot_of.get(target)) else {
            continue;
        };
        let (s, t) = (&nodes[s], &nodes[t]);
        let start = Point {
            x: s.x + s.width / 2.0,
            y: s.y + s.height,
        };
        let end = Point {
            x: t.x + t.width / 2.0,
            y: t.y,
        };
        let mid_y = (start.y + end.y) / 2.0;
        edges.push(LayoutEdge {
            id: format!("{source}->{target}"),
            source: source.clone(),
            target: target.clone(),
            points: vec![
                start,
                Point { x: start.x, y: mid_y },
                Point { x: end.x, y: mid_y },
                end,
            ],
            // Edge color follows the node it flows into.
            color: t.color.clone(),
        });
    }

    LayoutResult {
        nodes,
        edges,
        width,
        height,
    }
}

/// HSL color for a node at `level`: a ramp from hue 210 at level 0 towards
/// hue 330 at the deepest chain, so visual intensity tracks prerequisite
/// depth. Edges reuse their target node's color.
pub fn level_color(level: u32, max_level: u32, theme: Theme) -> String {
    if max_level == 0 {
        return match theme {
            Theme::Dark => "hsl(210, 70%, 45%)".to_string(),
            Theme::Light => "hsl(210, 80%, 55%)".to_string(),
        };
    }
    let t = level as f32 / max_level as f32;
    let hue = 210.0 + t * 120.0;
    let (sat, light) = match theme {
        Theme::Dark => (65, 40),
        Theme::Light => (75, 50),
    };
    format!("hsl({hue:.0}, {sat}%, {light}%)")
}

fn layer_width(count: usize) -> f32 {
    count as f32 * NODE_WIDTH + count.saturating_sub(1) as f32 * NODE_SEP
}
