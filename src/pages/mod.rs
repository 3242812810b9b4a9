use leptos::prelude::*;

use crate::scan::{ScanHistory, ScanRecord, Tool};

mod demo;
pub mod history;
pub mod home;
pub mod not_found;

/// Per-tab state shared by the dashboard and the session log.
#[derive(Clone, Copy)]
pub struct Session {
	pub history: RwSignal<ScanHistory>,
	/// Report shown in the console.
	pub current: RwSignal<Option<ScanRecord>>,
	pub selected: RwSignal<Option<Tool>>,
	/// Target field of the dashboard form, kept across page changes.
	pub target_input: RwSignal<String>,
}

impl Session {
	pub fn new() -> Self {
		Self {
			history: RwSignal::new(ScanHistory::default()),
			current: RwSignal::new(None),
			selected: RwSignal::new(None),
			target_input: RwSignal::new(String::new()),
		}
	}

	/// Shows a stored record on the dashboard.
	pub fn reopen(&self, record: ScanRecord) {
		self.selected.set(Some(record.tool));
		self.target_input.set(record.target.clone());
		self.current.set(Some(record));
	}
}
