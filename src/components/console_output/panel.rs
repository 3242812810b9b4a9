/// How close to the bottom, in pixels, still counts as "at the bottom".
const FOLLOW_SLACK: f64 = 24.0;

/// View state of the output panel. Holds no document text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelState {
	pub expanded: bool,
	pub export_menu_open: bool,
	/// Keep the view pinned to the newest output.
	pub follow: bool,
}

impl Default for PanelState {
	fn default() -> Self {
		Self {
			expanded: false,
			export_menu_open: false,
			follow: true,
		}
	}
}

impl PanelState {
	pub fn toggle_expanded(&mut self) {
		self.expanded = !self.expanded;
	}

	pub fn toggle_export_menu(&mut self) {
		self.export_menu_open = !self.export_menu_open;
	}

	pub fn close_export_menu(&mut self) {
		self.export_menu_open = false;
	}

	/// A press anywhere outside the export menu closes it.
	pub fn on_pointer_down(&mut self, inside_menu: bool) {
		if !inside_menu {
			self.close_export_menu();
		}
	}

	/// Tracks user scrolling: scrolling away from the bottom stops following,
	/// scrolling back down resumes it.
	pub fn on_scroll(&mut self, scroll_top: f64, scroll_height: f64, client_height: f64) {
		self.follow = scroll_height - (scroll_top + client_height) <= FOLLOW_SLACK;
	}

	/// A new delivery starts pinned to the bottom again.
	pub fn on_delivery_started(&mut self) {
		self.follow = true;
		self.export_menu_open = false;
	}

	pub fn should_scroll_to_bottom(&self, in_progress: bool) -> bool {
		in_progress && self.follow
	}
}

/// Export is offered once there is output and delivery has finished.
pub fn can_export(output: &str, in_progress: bool) -> bool {
	!output.is_empty() && !in_progress
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn follows_only_while_in_progress() {
		let state = PanelState::default();
		assert!(state.should_scroll_to_bottom(true));
		assert!(!state.should_scroll_to_bottom(false));
	}

	#[test]
	fn scrolling_up_pauses_follow_until_back_at_bottom() {
		let mut state = PanelState::default();
		state.on_scroll(100.0, 1000.0, 400.0);
		assert!(!state.should_scroll_to_bottom(true));
		state.on_scroll(590.0, 1000.0, 400.0);
		assert!(state.should_scroll_to_bottom(true));
	}

	#[test]
	fn new_delivery_resets_follow_and_menu() {
		let mut state = PanelState::default();
		state.on_scroll(0.0, 1000.0, 400.0);
		state.toggle_export_menu();
		state.on_delivery_started();
		assert!(state.follow);
		assert!(!state.export_menu_open);
	}

	#[test]
	fn toggles() {
		let mut state = PanelState::default();
		state.toggle_expanded();
		state.toggle_export_menu();
		assert!(state.expanded && state.export_menu_open);
		state.close_export_menu();
		state.toggle_expanded();
		assert_eq!(state, PanelState::default());
	}

	#[test]
	fn press_outside_closes_export_menu() {
		let mut state = PanelState::default();
		state.toggle_export_menu();
		state.on_pointer_down(true);
		assert!(state.export_menu_open);
		state.on_pointer_down(false);
		assert!(!state.export_menu_open);
		state.on_pointer_down(false);
		assert_eq!(state, PanelState::default());
	}

	#[test]
	fn export_needs_finished_output() {
		assert!(can_export("report", false));
		assert!(!can_export("report", true));
		assert!(!can_export("", false));
	}
}
