/// Physics constants and canvas extent for one layout instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
	/// Canvas width in logical units.
	pub width: f64,
	/// Canvas height in logical units.
	pub height: f64,
	/// Pairs closer than this push each other apart.
	pub repulsion_range: f64,
	pub repulsion_strength: f64,
	pub spring_strength: f64,
	/// Rest length of a `related` edge.
	pub related_length: f64,
	/// Rest length of a `cause` edge.
	pub cause_length: f64,
	pub center_strength: f64,
	/// Velocity multiplier applied after every step.
	pub damping: f64,
	/// Radius of the seed ring, before jitter.
	pub seed_distance: f64,
	/// Upper bound of the random radial jitter added to the seed ring.
	pub seed_jitter: f64,
	pub radius_base: f64,
	pub radius_per_like: f64,
	pub min_radius: f64,
	pub max_radius: f64,
	/// Distances at or below this are treated as coincident and produce no force.
	pub epsilon: f64,
}

impl Default for LayoutParams {
	fn default() -> Self {
		Self {
			width: 800.0,
			height: 600.0,
			repulsion_range: 100.0,
			repulsion_strength: 0.01,
			spring_strength: 0.005,
			related_length: 100.0,
			cause_length: 120.0,
			center_strength: 0.001,
			damping: 0.9,
			seed_distance: 150.0,
			seed_jitter: 100.0,
			radius_base: 15.0,
			radius_per_like: 2.0,
			min_radius: 20.0,
			max_radius: 50.0,
			epsilon: 1e-6,
		}
	}
}

impl LayoutParams {
	/// Same constants on a canvas of a different size.
	pub fn with_extent(width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			..Self::default()
		}
	}

	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	/// Clamp a position so a circle of `radius` stays on the canvas.
	pub fn clamp_position(&self, x: f64, y: f64, radius: f64) -> (f64, f64) {
		(
			clamp_axis(x, radius, self.width),
			clamp_axis(y, radius, self.height),
		)
	}
}

// A circle wider than the canvas is pinned to the middle of that axis.
fn clamp_axis(value: f64, radius: f64, extent: f64) -> f64 {
	let (lo, hi) = (radius, extent - radius);
	if hi < lo {
		extent / 2.0
	} else {
		value.clamp(lo, hi)
	}
}
