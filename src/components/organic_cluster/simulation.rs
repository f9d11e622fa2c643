//! One explicit-Euler physics step over the node set.
//!
//! Forces for every node are computed from the bodies as they stood at the
//! start of the step; the new bodies land in a scratch buffer and are
//! committed together, so no node sees a neighbour's half-updated position.

use super::error::ClusterError;
use super::graph::{Body, GraphModel};
use super::params::LayoutParams;

#[derive(Debug, Default)]
pub struct LayoutSimulator {
	next: Vec<Body>,
}

impl LayoutSimulator {
	/// Advance every non-dragging node by one frame.
	///
	/// Refuses to run on fewer than two nodes.
	pub fn step(&mut self, model: &mut GraphModel, params: &LayoutParams) -> Result<(), ClusterError> {
		model.ensure_renderable()?;

		self.next.clear();
		for slot in 0..model.nodes().len() {
			let node = &model.nodes()[slot];
			if node.dragging {
				self.next.push(node.body);
				continue;
			}

			let (fx, fy) = net_force(model, slot, params);
			let vx = (node.body.vx + fx) * params.damping;
			let vy = (node.body.vy + fy) * params.damping;
			let (x, y) = params.clamp_position(node.body.x + vx, node.body.y + vy, node.radius);
			self.next.push(Body { x, y, vx, vy });
		}

		model.commit(&self.next);
		Ok(())
	}
}

/// Unit vector and length from `from` to `to`, or `None` when they coincide.
fn direction(from: &Body, to: &Body, epsilon: f64) -> Option<(f64, f64, f64)> {
	let (dx, dy) = (to.x - from.x, to.y - from.y);
	let distance = (dx * dx + dy * dy).sqrt();
	if distance.is_nan() || distance <= epsilon {
		return None;
	}
	Some((dx / distance, dy / distance, distance))
}

fn net_force(model: &GraphModel, slot: usize, params: &LayoutParams) -> (f64, f64) {
	let nodes = model.nodes();
	let node = &nodes[slot];
	let (mut fx, mut fy) = (0.0, 0.0);

	for (other_slot, other) in nodes.iter().enumerate() {
		if other_slot == slot {
			continue;
		}
		// points away from the neighbour
		let Some((ux, uy, distance)) = direction(&other.body, &node.body, params.epsilon) else {
			continue;
		};
		if distance < params.repulsion_range {
			let force = (params.repulsion_range - distance) * params.repulsion_strength;
			fx += ux * force;
			fy += uy * force;
		}
	}

	for edge in model.edges() {
		let Some(other_slot) = edge.other_end(&node.id).and_then(|id| model.resolve(id)) else {
			continue;
		};
		let Some((ux, uy, distance)) =
			direction(&node.body, &nodes[other_slot].body, params.epsilon)
		else {
			continue;
		};
		let force =
			(distance - edge.kind.rest_length(params)) * params.spring_strength * edge.confidence();
		fx += ux * force;
		fy += uy * force;
	}

	let (cx, cy) = params.center();
	fx += (cx - node.body.x) * params.center_strength;
	fy += (cy - node.body.y) * params.center_strength;

	(fx, fy)
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;
	use crate::components::organic_cluster::types::{Edge, EdgeKind, Issue};

	fn model(likes: &[u32], edges: Vec<Edge>, seed: u64) -> GraphModel {
		let mut model = GraphModel::default();
		model.replace_edges(Arc::from(edges));
		let issues: Arc<[Issue]> = likes
			.iter()
			.enumerate()
			.map(|(i, &likes)| Issue::new(i.to_string(), likes))
			.collect();
		model.replace_issues(issues, &LayoutParams::default(), &mut SmallRng::seed_from_u64(seed));
		model
	}

	fn place(model: &mut GraphModel, slot: usize, x: f64, y: f64) {
		model.nodes_mut()[slot].body = Body {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
		};
	}

	fn kinetic_energy(model: &GraphModel) -> f64 {
		model.nodes().iter().map(|n| n.body.speed_sq()).sum()
	}

	fn distance(model: &GraphModel, a: usize, b: usize) -> f64 {
		let (a, b) = (&model.nodes()[a].body, &model.nodes()[b].body);
		((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
	}

	#[test]
	fn close_nodes_repel_along_their_axis() {
		let params = LayoutParams::default();
		let mut model = model(&[0, 0], Vec::new(), 1);
		place(&mut model, 0, 380.0, 300.0);
		place(&mut model, 1, 420.0, 300.0);

		LayoutSimulator::default().step(&mut model, &params).unwrap();

		// repulsion (100 - 40) * 0.01 = 0.6 outward, centering 0.02 inward
		let left = model.nodes()[0].body;
		assert!((left.vx - (-0.6 + 0.02) * 0.9).abs() < 1e-12);
		assert_eq!(left.vy, 0.0);
		assert!(left.x < 380.0);
		assert!(model.nodes()[1].x() > 420.0);
	}

	#[test]
	fn distant_nodes_do_not_repel() {
		let params = LayoutParams::default();
		let mut model = model(&[0, 0], Vec::new(), 1);
		place(&mut model, 0, 300.0, 300.0);
		place(&mut model, 1, 500.0, 300.0);

		LayoutSimulator::default().step(&mut model, &params).unwrap();

		// only centering: (400 - 300) * 0.001 * 0.9
		assert!((model.nodes()[0].body.vx - 0.09).abs() < 1e-12);
		assert!((model.nodes()[1].body.vx + 0.09).abs() < 1e-12);
	}

	#[test]
	fn stretched_edge_pulls_weighted_by_confidence() {
		let params = LayoutParams::default();
		let edges = vec![Edge::new("0", "1", EdgeKind::Cause, 0.5)];
		let mut model = model(&[0, 0], edges, 1);
		place(&mut model, 0, 250.0, 300.0);
		place(&mut model, 1, 550.0, 300.0);

		LayoutSimulator::default().step(&mut model, &params).unwrap();

		// spring (300 - 120) * 0.005 * 0.5 = 0.45 inward, centering 0.15 inward
		let expected = (0.45 + 0.15) * 0.9;
		assert!((model.nodes()[0].body.vx - expected).abs() < 1e-12);
		assert!((model.nodes()[1].body.vx + expected).abs() < 1e-12);
	}

	#[test]
	fn dangling_edge_contributes_nothing() {
		let params = LayoutParams::default();
		let dangling = vec![Edge::new("0", "missing", EdgeKind::Related, 1.0)];
		let mut with_edge = model(&[0, 0], dangling, 1);
		let mut without = model(&[0, 0], Vec::new(), 1);
		for model in [&mut with_edge, &mut without] {
			place(model, 0, 300.0, 250.0);
			place(model, 1, 520.0, 330.0);
			LayoutSimulator::default().step(model, &params).unwrap();
		}
		assert_eq!(with_edge.nodes(), without.nodes());
	}

	#[test]
	fn coincident_nodes_stay_finite() {
		let params = LayoutParams::default();
		let edges = vec![
			Edge::new("0", "1", EdgeKind::Related, 1.0),
			Edge::new("0", "0", EdgeKind::Cause, 1.0),
		];
		let mut model = model(&[0, 0], edges, 1);
		place(&mut model, 0, 400.0, 300.0);
		place(&mut model, 1, 400.0, 300.0);

		let mut simulator = LayoutSimulator::default();
		for _ in 0..10 {
			simulator.step(&mut model, &params).unwrap();
		}
		for node in model.nodes() {
			assert!(node.x().is_finite() && node.y().is_finite());
			assert!(node.body.vx.is_finite() && node.body.vy.is_finite());
		}
	}

	#[test]
	fn dragging_node_is_not_moved() {
		let params = LayoutParams::default();
		let edges = vec![Edge::new("0", "1", EdgeKind::Related, 1.0)];
		let mut model = model(&[0, 0], edges, 1);
		place(&mut model, 0, 390.0, 300.0);
		place(&mut model, 1, 410.0, 300.0);
		model.nodes_mut()[0].dragging = true;

		let mut simulator = LayoutSimulator::default();
		for _ in 0..30 {
			simulator.step(&mut model, &params).unwrap();
		}
		assert_eq!((model.nodes()[0].x(), model.nodes()[0].y()), (390.0, 300.0));
		assert!(model.nodes()[1].x() > 410.0);
	}

	#[test]
	fn step_reads_only_the_previous_frame() {
		let params = LayoutParams::default();
		let mut model = model(&[0, 0], Vec::new(), 1);
		place(&mut model, 0, 380.0, 300.0);
		place(&mut model, 1, 420.0, 300.0);

		LayoutSimulator::default().step(&mut model, &params).unwrap();

		// a symmetric pair stays symmetric only if neither saw the other's update
		let (a, b) = (model.nodes()[0].body, model.nodes()[1].body);
		assert!((a.vx + b.vx).abs() < 1e-12);
		assert!(((a.x - 400.0) + (b.x - 400.0)).abs() < 1e-9);
	}

	#[test]
	fn refuses_to_step_single_node() {
		let params = LayoutParams::default();
		let mut model = model(&[3], Vec::new(), 1);
		let before = model.nodes().to_vec();

		let result = LayoutSimulator::default().step(&mut model, &params);
		assert!(matches!(result, Err(ClusterError::InsufficientIssues { count: 1 })));
		assert_eq!(model.nodes(), before.as_slice());
	}

	#[test]
	fn kinetic_energy_decays_on_small_graph() {
		let params = LayoutParams::default();
		let edges = vec![
			Edge::new("0", "1", EdgeKind::Related, 1.0),
			Edge::new("1", "2", EdgeKind::Related, 1.0),
		];
		let mut model = model(&[2, 2, 2], edges, 11);
		let mut simulator = LayoutSimulator::default();

		let mut peak = 0.0_f64;
		for _ in 0..100 {
			simulator.step(&mut model, &params).unwrap();
			peak = peak.max(kinetic_energy(&model));
		}
		for _ in 100..3000 {
			simulator.step(&mut model, &params).unwrap();
		}
		let settled = kinetic_energy(&model);
		assert!(peak > 0.0);
		assert!(settled < 1e-6, "energy still {settled}");
	}

	#[test]
	fn related_pair_settles_near_rest_length() {
		let params = LayoutParams::default();
		let edges = vec![Edge::new("0", "1", EdgeKind::Related, 1.0)];
		let mut model = model(&[5, 5], edges, 4);
		let mut simulator = LayoutSimulator::default();
		for _ in 0..3000 {
			simulator.step(&mut model, &params).unwrap();
		}
		let settled = distance(&model, 0, 1);
		assert!((90.0..=110.0).contains(&settled), "distance {settled}");
	}
}
