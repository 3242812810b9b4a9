use std::time::Duration;

use leptos::prelude::*;
use log::{info, warn};

use super::Session;
use super::demo::demo_report;
use crate::components::console_output::ConsoleOutput;
use crate::components::tool_card::ToolCard;
use crate::components::visualizations::{NetworkActivityChart, ThreatGauge, threat_score};
use crate::scan::{Tool, ToolCategory, validate_target};

/// Simulated latency of a demo scan.
const SCAN_DELAY: Duration = Duration::from_millis(900);

/// Dashboard: pick a module, enter a target, read the report.
#[component]
pub fn Home() -> impl IntoView {
	let session = expect_context::<Session>();
	let target_input = session.target_input;
	let scanning = RwSignal::new(false);
	let error_msg = RwSignal::new(None::<String>);

	let select = Callback::new(move |tool: Tool| {
		session.selected.set(Some(tool));
		session.current.set(None);
		error_msg.set(None);
		target_input.set(String::new());
	});

	let back = move |_| {
		session.selected.set(None);
		session.current.set(None);
		error_msg.set(None);
	};

	let run_scan = move |ev: leptos::ev::SubmitEvent| {
		ev.prevent_default();
		if scanning.get_untracked() {
			return;
		}
		let Some(tool) = session.selected.get_untracked() else {
			return;
		};
		let input = target_input.get_untracked();
		let target = match validate_target(&input) {
			Ok(target) => target.to_string(),
			Err(e) => {
				warn!("rejected scan target: {e}");
				session.current.set(None);
				error_msg.set(Some(e.to_string()));
				return;
			}
		};

		info!("running {} against {target}", tool.name());
		error_msg.set(None);
		session.current.set(None);
		scanning.set(true);
		set_timeout(
			move || {
				let (text, sources) = demo_report(tool, &target);
				let now = js_sys::Date::now();
				let record = session
					.history
					.try_update(|h| h.record(tool, &target, now, text, sources));
				session.current.set(record);
				scanning.set(false);
			},
			SCAN_DELAY,
		);
	};

	let output = Signal::derive(move || {
		session
			.current
			.with(|c| c.as_ref().map(|r| r.raw_output.clone()).unwrap_or_default())
	});
	let sources = Signal::derive(move || {
		session
			.current
			.with(|c| c.as_ref().map(|r| r.sources.clone()).unwrap_or_default())
	});
	let target = Signal::derive(move || {
		session.current.with(|c| match c {
			Some(record) => record.target.clone(),
			None => target_input.with(|t| t.trim().to_string()),
		})
	});
	let tool_name = Signal::derive(move || {
		session
			.selected
			.get()
			.map(|tool| tool.name().to_string())
			.unwrap_or_default()
	});

	let catalog = move || {
		ToolCategory::ORDER
			.into_iter()
			.filter(|category| Tool::in_category(*category).next().is_some())
			.map(|category| {
				view! {
					<section class="tool-section">
						<h2 class="tool-section-title">{category.name()}</h2>
						<div class="tool-grid">
							{Tool::in_category(category)
								.map(|tool| view! { <ToolCard tool=tool on_select=select /> })
								.collect_view()}
						</div>
					</section>
				}
			})
			.collect_view()
	};

	view! {
		<Show
			when=move || session.selected.get().is_some()
			fallback=move || {
				view! {
					<div class="dashboard">
						<header class="dashboard-header">
							<h1>"Intelligence Modules"</h1>
							<p>"Select a module to begin reconnaissance."</p>
						</header>
						{catalog()}
					</div>
				}
			}
		>
			<div class="scan-view">
				<button class="back-link" on:click=back>
					"← Back to modules"
				</button>
				<h1 class="scan-title">{move || tool_name.get()}</h1>
				<form class="target-form" on:submit=run_scan>
					<input
						type="text"
						class="target-input"
						placeholder="Enter domain or IP (e.g. example.com)"
						prop:value=move || target_input.get()
						on:input=move |ev| target_input.set(event_target_value(&ev))
					/>
					<button
						type="submit"
						class="execute-button"
						disabled=move || scanning.get() || target_input.with(|t| t.trim().is_empty())
					>
						{move || if scanning.get() { "SCANNING..." } else { "EXECUTE" }}
					</button>
				</form>
				<Show when=move || session.current.with(Option::is_some)>
					<div class="widgets">
						<ThreatGauge score=threat_score(js_sys::Math::random()) />
						<NetworkActivityChart />
					</div>
				</Show>
				<Show
					when=move || error_msg.with(Option::is_none)
					fallback=move || {
						view! {
							<div class="execution-error" role="alert">
								<h3>"Execution Error"</h3>
								<p>{move || error_msg.get().unwrap_or_default()}</p>
							</div>
						}
					}
				>
					<ConsoleOutput
						output=output
						sources=sources
						in_progress=scanning
						target=target
						tool_name=tool_name
					/>
				</Show>
			</div>
		</Show>
	}
}
