use leptos::prelude::*;
use leptos_router::components::A;

/// 404 Not Found Page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found">
			<h1>"SIGNAL LOST"</h1>
			<p>"No module is mounted at this address."</p>
			<A href="/">"Return to dashboard"</A>
		</div>
	}
}
