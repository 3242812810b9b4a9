//! Tunables for the console renderer, provided to components through context.

use crate::components::console_output::ExportSettings;
use crate::components::force_graph::LayoutParams;

/// Layout and export parameters shared by the output panel.
#[derive(Clone, Debug, Default)]
pub struct ConsoleConfig {
	/// Force-layout physics and panel size.
	pub layout: LayoutParams,
	/// Page geometry of the PDF export.
	pub export: ExportSettings,
}
