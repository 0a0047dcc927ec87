use leptos::prelude::*;
use leptos::task::spawn_local;
use log::error;

use crate::components::org_chart::{DetailPanel, Employee, GroupMode, OrgChartCanvas};
use crate::config::AppConfig;
use crate::directory::{Directory, DirectoryError};

/// `"Phone: 555"` style prefix used by the hover variant; empty values stay empty.
fn labelled(prefix: &str, value: &str, prefixed: bool) -> String {
	if prefixed && !value.is_empty() {
		format!("{prefix}: {value}")
	} else {
		value.to_string()
	}
}

fn detail_panel(panel: DetailPanel, prefixed: bool) -> impl IntoView {
	let phone = labelled("Phone", &panel.phone, prefixed);
	let mobile = panel.mobile.as_deref().map(|m| labelled("Mobile", m, prefixed));
	let DetailPanel {
		name,
		job_title,
		department,
		location,
		email,
		mailto,
		photo_url,
		..
	} = panel;

	view! {
		<aside class="information-container">
			{photo_url.map(|src| view! { <img class="information-picture" src=src alt="" /> })}
			<h2 class="information-name">{name}</h2>
			<p class="information-job-title">{job_title}</p>
			<p class="information-department">{department}</p>
			<p class="information-location">{location}</p>
			<p class="information-telephone-number">{phone}</p>
			{mobile.map(|m| view! { <p class="information-mobile-number">{m}</p> })}
			<a class="information-email-link" href=mailto>{email}</a>
		</aside>
	}
}

/// Org chart page: grouping and search controls, the graph, and the detail
/// panel of the selected employee.
#[component]
pub fn Home() -> impl IntoView {
	let config = AppConfig::from_build_env();
	let images = config.image_retriever();
	let prefixed = config.graph.prefix_contact_labels;

	let employees = RwSignal::new(Vec::<Employee>::new());
	let load_error = RwSignal::new(None::<DirectoryError>);
	let loading = RwSignal::new(true);

	let origin = web_sys::window()
		.and_then(|w| w.location().origin().ok())
		.unwrap_or_default();
	let directory = Directory::new(config.directory_url_for(&origin));
	spawn_local(async move {
		match directory.get_users(None::<fn(&Employee) -> bool>).await {
			Ok(users) => employees.set(users),
			Err(e) => {
				error!("{e}");
				load_error.set(Some(e));
			}
		}
		loading.set(false);
	});

	let (by_department, set_by_department) = signal(false);
	let (by_location, set_by_location) = signal(false);
	let group_mode =
		Signal::derive(move || GroupMode::from_controls(by_department.get(), by_location.get()));
	let (query, set_query) = signal(String::new());
	let detail = RwSignal::new(None::<DetailPanel>);
	let readout = RwSignal::new(String::new());

	view! {
		<div class="org-chart-page">
			<header class="graph-controls">
				<h1>"Org Chart"</h1>
				<div class="group-by">
					<label>
						<input
							type="checkbox"
							prop:checked=by_department
							on:change=move |ev| set_by_department.set(event_target_checked(&ev))
						/>
						" Group by department"
					</label>
					<label>
						<input
							type="checkbox"
							prop:checked=by_location
							on:change=move |ev| set_by_location.set(event_target_checked(&ev))
						/>
						" Group by location"
					</label>
				</div>
				<input
					type="search"
					class="search"
					placeholder="Search name, title, department, phone or email"
					prop:value=query
					on:input=move |ev| set_query.set(event_target_value(&ev))
				/>
				<span class="search-record-count">{move || readout.get()}</span>
			</header>

			{move || loading.get().then(|| view! { <p class="status">"Loading directory..."</p> })}
			{move || {
				load_error
					.get()
					.map(|e| view! { <p class="status error">{e.to_string()}</p> })
			}}

			<div class="graph-container">
				<OrgChartCanvas
					employees=employees
					group_mode=group_mode
					query=query
					images=images
					config=config.graph.clone()
					on_select=Callback::new(move |panel: DetailPanel| detail.set(Some(panel)))
					on_search=Callback::new(move |text: String| readout.set(text))
				/>
			</div>

			{move || detail.get().map(|panel| detail_panel(panel, prefixed))}
		</div>
	}
}
