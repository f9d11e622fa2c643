//! Issue relationship map: a client-side Leptos app drawing reported issues
//! as a force-directed cluster.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

mod components;
mod pages;
mod sample_data;

// Routed pages
use crate::pages::map::MapPage;
use crate::pages::not_found::NotFound;

/// Route `log` output and panics to the browser console.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("console logging ready");
}

/// Root component: the relationship map at `/` and `/map`, a not-found page elsewhere.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		<Title text="Issue Relationship Map" />

		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=MapPage />
				<Route path=path!("/map") view=MapPage />
			</Routes>
		</Router>
	}
}
