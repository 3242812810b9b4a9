use std::collections::HashMap;

use log::warn;

use super::types::{Category, GraphSpec};

/// Physics constants for the layout simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutParams {
	pub repulsion: f64,
	pub spring_length: f64,
	pub spring_stiffness: f64,
	pub center_stiffness: f64,
	pub damping: f64,
	pub margin: f64,
	/// Wall-clock budget of one layout run, in milliseconds.
	pub budget_ms: f64,
	pub panel_height: f64,
	pub fallback_width: f64,
}

impl Default for LayoutParams {
	fn default() -> Self {
		Self {
			repulsion: 0.05,
			spring_length: 80.0,
			spring_stiffness: 0.05,
			center_stiffness: 0.01,
			damping: 0.85,
			margin: 20.0,
			budget_ms: 5000.0,
			panel_height: 300.0,
			fallback_width: 600.0,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutNode {
	pub label: String,
	pub category: Category,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
}

/// Indices into the owning layout's node list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutEdge {
	pub source: usize,
	pub target: usize,
}

pub struct ForceLayout {
	pub nodes: Vec<LayoutNode>,
	pub edges: Vec<LayoutEdge>,
	pub width: f64,
	pub height: f64,
	params: LayoutParams,
}

impl ForceLayout {
	/// Builds a fresh layout. `random` yields values in `[0, 1)` and seeds the
	/// initial positions.
	pub fn new(
		spec: &GraphSpec,
		width: f64,
		height: f64,
		params: LayoutParams,
		mut random: impl FnMut() -> f64,
	) -> Self {
		let mut id_to_idx = HashMap::new();
		let nodes: Vec<LayoutNode> = spec
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| {
				id_to_idx.entry(node.id.as_str()).or_insert(i);
				LayoutNode {
					label: node.label.clone(),
					category: node.category.clone(),
					x: random() * width,
					y: random() * height,
					vx: 0.0,
					vy: 0.0,
				}
			})
			.collect();

		let mut edges = Vec::new();
		for edge in &spec.edges {
			match (id_to_idx.get(edge.from.as_str()), id_to_idx.get(edge.to.as_str())) {
				(Some(&source), Some(&target)) => edges.push(LayoutEdge { source, target }),
				_ => warn!("dropping edge {} -> {}: unknown node id", edge.from, edge.to),
			}
		}

		Self {
			nodes,
			edges,
			width,
			height,
			params,
		}
	}

	pub fn params(&self) -> &LayoutParams {
		&self.params
	}

	pub fn tick(&mut self) {
		let p = &self.params;
		let k2 = p.repulsion * p.repulsion;

		// Repulsion
		for i in 0..self.nodes.len() {
			for j in (i + 1)..self.nodes.len() {
				let (mut dx, mut dy) = (
					self.nodes[j].x - self.nodes[i].x,
					self.nodes[j].y - self.nodes[i].y,
				);
				let mut dist = (dx * dx + dy * dy).sqrt();
				if dist == 0.0 {
					// Coincident nodes get pushed apart along x.
					(dx, dy, dist) = (1.0, 0.0, 1.0);
				}
				let force = k2 / dist.max(1.0);
				let (fx, fy) = (dx / dist * force, dy / dist * force);
				self.nodes[i].vx -= fx;
				self.nodes[i].vy -= fy;
				self.nodes[j].vx += fx;
				self.nodes[j].vy += fy;
			}
		}

		// Springs
		for edge in &self.edges {
			let (s, t) = (&self.nodes[edge.source], &self.nodes[edge.target]);
			let (dx, dy) = (t.x - s.x, t.y - s.y);
			let dist = match (dx * dx + dy * dy).sqrt() {
				d if d == 0.0 => 1.0,
				d => d,
			};
			let force = (dist - p.spring_length) * p.spring_stiffness;
			let (fx, fy) = (dx / dist * force, dy / dist * force);
			self.nodes[edge.source].vx += fx;
			self.nodes[edge.source].vy += fy;
			self.nodes[edge.target].vx -= fx;
			self.nodes[edge.target].vy -= fy;
		}

		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		for node in &mut self.nodes {
			node.vx += (cx - node.x) * p.center_stiffness;
			node.vy += (cy - node.y) * p.center_stiffness;
			node.vx *= p.damping;
			node.vy *= p.damping;
			node.x += node.vx;
			node.y += node.vy;
			// max/min rather than clamp: the panel may be narrower than two margins
			node.x = node.x.max(p.margin).min(self.width - p.margin);
			node.y = node.y.max(p.margin).min(self.height - p.margin);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{SpecEdge, SpecNode};

	fn node(id: &str) -> SpecNode {
		SpecNode {
			id: id.into(),
			label: id.to_uppercase(),
			category: Category::Backend,
		}
	}

	fn edge(from: &str, to: &str) -> SpecEdge {
		SpecEdge {
			from: from.into(),
			to: to.into(),
		}
	}

	fn fixed(value: f64) -> impl FnMut() -> f64 {
		move || value
	}

	#[test]
	fn single_node_graph_has_no_edges() {
		let spec = GraphSpec::from_json(
			r#"{"nodes":[{"id":"a","label":"A","category":"Frontend"}],"edges":[]}"#,
		)
		.unwrap();
		let layout = ForceLayout::new(&spec, 600.0, 300.0, LayoutParams::default(), fixed(0.5));
		assert_eq!(layout.nodes.len(), 1);
		assert!(layout.edges.is_empty());
	}

	#[test]
	fn dangling_edges_are_dropped() {
		let spec = GraphSpec {
			nodes: vec![node("a"), node("b"), node("c")],
			edges: vec![edge("a", "b"), edge("b", "c"), edge("c", "ghost")],
		};
		let layout = ForceLayout::new(&spec, 600.0, 300.0, LayoutParams::default(), fixed(0.5));
		assert_eq!(layout.nodes.len(), 3);
		assert_eq!(layout.edges.len(), 2);
		assert_eq!(layout.edges[1], LayoutEdge { source: 1, target: 2 });
	}

	#[test]
	fn initial_positions_are_inside_panel_with_zero_velocity() {
		let mut seed = 0usize;
		let random = move || {
			seed += 1;
			((seed * 9301 + 49297) % 233280) as f64 / 233280.0
		};
		let spec = GraphSpec {
			nodes: (0..20).map(|i| node(&i.to_string())).collect(),
			edges: vec![],
		};
		let layout = ForceLayout::new(&spec, 640.0, 300.0, LayoutParams::default(), random);
		for n in &layout.nodes {
			assert!((0.0..640.0).contains(&n.x));
			assert!((0.0..300.0).contains(&n.y));
			assert_eq!((n.vx, n.vy), (0.0, 0.0));
		}
	}

	#[test]
	fn coincident_nodes_at_center_repel() {
		let spec = GraphSpec {
			nodes: vec![node("a"), node("b")],
			edges: vec![],
		};
		let mut layout = ForceLayout::new(&spec, 600.0, 300.0, LayoutParams::default(), fixed(0.5));
		assert_eq!((layout.nodes[0].x, layout.nodes[0].y), (300.0, 150.0));
		layout.tick();
		let (a, b) = (&layout.nodes[0], &layout.nodes[1]);
		assert!(a.vx < 0.0);
		assert!(b.vx > 0.0);
		assert_eq!(a.vx, -b.vx);
		assert!(a.x < b.x);
	}

	#[test]
	fn spring_pulls_distant_nodes_together() {
		let spec = GraphSpec {
			nodes: vec![node("a"), node("b")],
			edges: vec![edge("a", "b")],
		};
		let mut layout = ForceLayout::new(&spec, 600.0, 300.0, LayoutParams::default(), fixed(0.5));
		layout.nodes[0].x = 100.0;
		layout.nodes[1].x = 500.0;
		layout.tick();
		assert!(layout.nodes[0].vx > 0.0);
		assert!(layout.nodes[1].vx < 0.0);
	}

	#[test]
	fn positions_stay_within_margin() {
		let spec = GraphSpec {
			nodes: vec![node("a"), node("b")],
			edges: vec![],
		};
		let mut layout = ForceLayout::new(&spec, 600.0, 300.0, LayoutParams::default(), fixed(0.5));
		layout.nodes[0].x = -500.0;
		layout.nodes[0].vx = -400.0;
		layout.nodes[1].y = 900.0;
		layout.nodes[1].vy = 400.0;
		layout.tick();
		assert_eq!(layout.nodes[0].x, 20.0);
		assert_eq!(layout.nodes[1].y, 280.0);
	}
}
