use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen::JsValue;

use super::Session;
use crate::scan::ScanRecord;

fn format_timestamp(ms: f64) -> String {
	js_sys::Date::new(&JsValue::from_f64(ms))
		.to_locale_string("en-US", &JsValue::UNDEFINED)
		.into()
}

/// Session log of completed scans, newest first.
#[component]
pub fn History() -> impl IntoView {
	let session = expect_context::<Session>();
	let navigate = use_navigate();

	let open = move |record: ScanRecord| {
		session.reopen(record);
		navigate("/", Default::default());
	};

	view! {
		<div class="history">
			<header class="dashboard-header">
				<h1>"Operation Log"</h1>
				<p>{move || format!("{} operations this session", session.history.with(|h| h.len()))}</p>
			</header>
			<Show
				when=move || session.history.with(|h| !h.is_empty())
				fallback=|| view! { <p class="history-empty">"No operations recorded in this session."</p> }
			>
				<ul class="history-list">
					{
						let open = open.clone();
						move || {
							let open = open.clone();
							session
								.history
								.with(|h| h.newest_first().cloned().collect::<Vec<_>>())
								.into_iter()
								.map(|record| {
									let open = open.clone();
									let summary = format!("{} // {}", record.tool.name(), record.target);
									let when = format_timestamp(record.timestamp);
									view! {
										<li class="history-item">
											<button on:click=move |_| open(record.clone())>
												<span class="history-summary">{summary}</span>
												<span class="history-time">{when}</span>
											</button>
										</li>
									}
								})
								.collect_view()
						}
					}
				</ul>
			</Show>
		</div>
	}
}
