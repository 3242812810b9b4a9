use leptos::prelude::*;

use crate::scan::{Tool, ToolCategory};

fn badge_class(category: ToolCategory) -> &'static str {
	match category {
		ToolCategory::Network => "badge badge-network",
		ToolCategory::Analysis => "badge badge-analysis",
		ToolCategory::Passive | ToolCategory::Active => "badge badge-passive",
	}
}

#[component]
pub fn ToolCard(tool: Tool, #[prop(into)] on_select: Callback<Tool>) -> impl IntoView {
	let icon = tool.icon().glyph();
	view! {
		<button class="tool-card" on:click=move |_| on_select.run(tool)>
			<div class="tool-card-watermark">{icon}</div>
			<div class="tool-card-top">
				<span class="tool-card-icon">{icon}</span>
				<span class=badge_class(tool.category())>{tool.category().name()}</span>
			</div>
			<h3 class="tool-card-name">{tool.name()}</h3>
			<p class="tool-card-description">{tool.description()}</p>
			<div class="tool-card-cta">"INITIALIZE MODULE →"</div>
		</button>
	}
}
