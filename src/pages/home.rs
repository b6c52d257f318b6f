use leptos::prelude::*;
use log::warn;

use crate::components::entanglement_view::EntanglementCanvas;
use crate::layout::SpringLayout;
use crate::pipeline::{self, PipelineRequest, PipelineRun, Variant};
use crate::scene::{PairFilter, Scene, ViewConfig};

fn summarize(run: &PipelineRun) -> String {
	let shape = format!(
		"{} nodes, {} edges around |{}>",
		run.graph.node_count(),
		run.graph.edge_count(),
		run.graph.central()
	);
	match &run.report {
		Some(report) => format!(
			"{shape}; alpha {}, mean strength {:.2}%, {} qubits",
			report.alpha,
			report.average * 100.0,
			report.qubits
		),
		None => shape,
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let (nodes, set_nodes) = signal("[1, 2, 3, 4, 5]".to_string());
	let (central, set_central) = signal("3".to_string());
	let (alpha, set_alpha) = signal("0.5".to_string());
	let (variant, set_variant) = signal(Variant::Complete);
	let (reference_pairs, set_reference_pairs) = signal(false);

	let (scene, set_scene) = signal(None::<Scene>);
	let (outcome, set_outcome) = signal(None::<Result<String, crate::GraphError>>);

	let on_submit = move |ev: leptos::ev::SubmitEvent| {
		ev.prevent_default();
		let request = PipelineRequest {
			nodes: nodes.get_untracked(),
			central: central.get_untracked(),
			alpha: alpha.get_untracked(),
			variant: variant.get_untracked(),
		};
		let view = ViewConfig {
			pair_filter: if reference_pairs.get_untracked() {
				PairFilter::DistanceWithinId
			} else {
				PairFilter::None
			},
			..ViewConfig::default()
		};
		match pipeline::run(&request, &SpringLayout::default(), &view) {
			Ok(run) => {
				set_outcome.set(Some(Ok(summarize(&run))));
				set_scene.set(Some(run.scene));
			}
			Err(err) => {
				warn!("run aborted: {err}");
				set_scene.set(None);
				set_outcome.set(Some(Err(err)));
			}
		}
	};

	view! {
		<div class="fullscreen-graph">
			<EntanglementCanvas scene=scene fullscreen=true />
			<div class="graph-overlay">
				<h1>"Entanglement Graph"</h1>
				<p class="subtitle">"Drag to rotate. Scroll to zoom. Hover a node to trace its links."</p>

				<form on:submit=on_submit>
					<label>
						"Nodes "
						<input
							type="text"
							placeholder="[x1, x2, x3, ...]"
							prop:value=nodes
							on:input=move |ev| set_nodes.set(event_target_value(&ev))
						/>
					</label>
					<label>
						"Central node "
						<input
							type="text"
							prop:value=central
							on:input=move |ev| set_central.set(event_target_value(&ev))
						/>
					</label>
					<label>
						"Graph "
						<select on:change=move |ev| {
							set_variant
								.set(
									if event_target_value(&ev) == "entanglement" {
										Variant::Entanglement
									} else {
										Variant::Complete
									},
								)
						}>
							<option value="complete" selected=true>"Hub + complete"</option>
							<option value="entanglement">"Star + entanglement strength"</option>
						</select>
					</label>
					<Show when=move || variant.get().uses_metrics()>
						<label>
							"Alpha "
							<input
								type="text"
								prop:value=alpha
								on:input=move |ev| set_alpha.set(event_target_value(&ev))
							/>
						</label>
						<label title="Links node pairs whose distance to the hub does not exceed their id">
							<input
								type="checkbox"
								prop:checked=reference_pairs
								on:change=move |ev| set_reference_pairs.set(event_target_checked(&ev))
							/>
							" Distance-within-id links"
						</label>
					</Show>
					<button type="submit">"Draw"</button>
				</form>

				<ErrorBoundary fallback=|errors| {
					view! {
						<p class="error">"Nothing drawn:"</p>
						<ul class="error">
							{move || {
								errors
									.get()
									.into_iter()
									.map(|(_, e)| view! { <li>{e.to_string()}</li> })
									.collect_view()
							}}
						</ul>
					}
				}>
					{move || {
						outcome
							.get()
							.map(|result| result.map(|summary| view! { <p class="summary">{summary}</p> }))
					}}
				</ErrorBoundary>
			</div>
		</div>
	}
}
