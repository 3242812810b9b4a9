use log::debug;

use super::state::ForceLayout;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStep {
	/// Schedule another frame.
	Continue,
	/// Budget spent or cancelled; do not schedule again.
	Finished,
}

/// Drives a [`ForceLayout`] one tick per animation frame until its time budget
/// runs out or it is cancelled.
pub struct LayoutLoop {
	layout: ForceLayout,
	started_at: Option<f64>,
	stopped: bool,
	ticks: u64,
}

impl LayoutLoop {
	pub fn new(layout: ForceLayout) -> Self {
		Self {
			layout,
			started_at: None,
			stopped: false,
			ticks: 0,
		}
	}

	pub fn layout(&self) -> &ForceLayout {
		&self.layout
	}

	pub fn ticks(&self) -> u64 {
		self.ticks
	}

	pub fn is_stopped(&self) -> bool {
		self.stopped
	}

	pub fn cancel(&mut self) {
		self.stopped = true;
	}

	/// Runs one frame at `now_ms`. The first call starts the budget clock.
	pub fn frame(&mut self, now_ms: f64) -> FrameStep {
		if self.stopped {
			return FrameStep::Finished;
		}
		let started_at = *self.started_at.get_or_insert(now_ms);
		if now_ms - started_at >= self.layout.params().budget_ms {
			self.stopped = true;
			debug!("layout loop finished after {} ticks", self.ticks);
			return FrameStep::Finished;
		}
		self.layout.tick();
		self.ticks += 1;
		FrameStep::Continue
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::state::LayoutParams;
	use crate::components::force_graph::types::GraphSpec;

	fn two_node_loop() -> LayoutLoop {
		let spec = GraphSpec::from_json(
			r#"{"nodes":[{"id":"a","label":"A","category":"Frontend"},{"id":"b","label":"B","category":"Backend"}],"edges":[{"from":"a","to":"b"}]}"#,
		)
		.unwrap();
		let mut seeds = [0.2, 0.7, 0.6, 0.4].into_iter();
		let layout = ForceLayout::new(&spec, 600.0, 300.0, LayoutParams::default(), move || {
			seeds.next().unwrap_or(0.5)
		});
		LayoutLoop::new(layout)
	}

	/// Stands in for `requestAnimationFrame`: keeps calling back at ~60 fps
	/// for as long as the loop asks for another frame.
	fn run_scheduler(sim: &mut LayoutLoop, until_ms: f64) -> usize {
		let (mut now, mut scheduled) = (0.0, 0);
		while now <= until_ms {
			scheduled += 1;
			if sim.frame(now) == FrameStep::Finished {
				break;
			}
			now += 16.0;
		}
		scheduled
	}

	#[test]
	fn stops_after_budget() {
		let mut sim = two_node_loop();
		let scheduled = run_scheduler(&mut sim, 10_000.0);
		assert!(sim.is_stopped());
		// 0, 16, ..., 4992 tick; 5008 is past the budget.
		assert_eq!(sim.ticks(), 313);
		assert_eq!(scheduled, 314);

		let positions: Vec<(f64, f64)> = sim.layout().nodes.iter().map(|n| (n.x, n.y)).collect();
		assert_eq!(sim.frame(6000.0), FrameStep::Finished);
		assert_eq!(sim.frame(7000.0), FrameStep::Finished);
		assert_eq!(sim.ticks(), 313);
		let after: Vec<(f64, f64)> = sim.layout().nodes.iter().map(|n| (n.x, n.y)).collect();
		assert_eq!(positions, after);
	}

	#[test]
	fn cancel_stops_immediately() {
		let mut sim = two_node_loop();
		assert_eq!(sim.frame(0.0), FrameStep::Continue);
		assert_eq!(sim.frame(16.0), FrameStep::Continue);
		sim.cancel();
		assert_eq!(sim.frame(32.0), FrameStep::Finished);
		assert_eq!(sim.ticks(), 2);
	}

	#[test]
	fn budget_starts_at_first_frame() {
		let mut sim = two_node_loop();
		assert_eq!(sim.frame(100_000.0), FrameStep::Continue);
		assert_eq!(sim.frame(104_999.0), FrameStep::Continue);
		assert_eq!(sim.frame(105_000.0), FrameStep::Finished);
	}
}
