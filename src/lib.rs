//! Entanglement graphs: build a hub-centred graph from a list of integers,
//! score every node by its distance to the hub, lay it out in 3D and draw it
//! on a canvas.
//!
//! The core ([`input`], [`graph`], [`metrics`], [`layout`], [`scene`],
//! [`pipeline`]) is plain Rust; the Leptos client-side app lives in the
//! private `components` and `pages` modules.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

pub mod error;
pub mod graph;
pub mod input;
pub mod layout;
pub mod metrics;
pub mod pipeline;
pub mod scene;

// Modules
mod components;
mod pages;

pub use error::GraphError;

// Top-Level pages
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the graph page and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Entanglement Graph" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
