//! Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod components;
mod config;
mod pages;
mod scan;

// Top-Level pages
use crate::config::ConsoleConfig;
use crate::pages::Session;
use crate::pages::history::History;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// The console app: dashboard, session log and a 404 fallback.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	provide_context(ConsoleConfig::default());
	provide_context(Session::new());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="OSINT Console" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<div class="app-shell">
				<nav class="sidebar">
					<div class="sidebar-brand">"PROJECT_X"</div>
					<A href="/">"Dashboard"</A>
					<A href="/history">"History"</A>
				</nav>
				<main class="content">
					<Routes fallback=|| view! { <NotFound /> }>
						<Route path=path!("/") view=Home />
						<Route path=path!("/history") view=History />
					</Routes>
				</main>
			</div>
		</Router>
	}
}
