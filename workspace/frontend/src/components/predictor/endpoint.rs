use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::settings;

/// Lets the user point the panel at another prediction endpoint.
#[function_component(EndpointSettings)]
pub fn endpoint_settings() -> Html {
    let input_ref = use_node_ref();
    let current = use_state(|| settings::get_settings().endpoint_url);
    let saved = use_state(|| false);

    let on_submit = {
        let input_ref = input_ref.clone();
        let current = current.clone();
        let saved = saved.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(input) = input_ref.cast::<HtmlInputElement>() else {
                return;
            };
            let endpoint = input.value().trim().to_string();
            if endpoint.is_empty() {
                return;
            }

            settings::update_settings(|s| s.endpoint_url = endpoint.clone());
            match settings::get_settings().save_to_storage() {
                Ok(()) => log::info!("Prediction endpoint set to {}", endpoint),
                Err(e) => log::error!("Failed to persist settings: {:?}", e),
            }
            current.set(endpoint);
            saved.set(true);
        })
    };

    html! {
        <details class="collapse collapse-arrow bg-base-100 shadow">
            <summary class="collapse-title text-sm">{"Prediction endpoint"}</summary>
            <div class="collapse-content">
                <form class="join w-full" onsubmit={on_submit}>
                    <input
                        ref={input_ref}
                        type="url"
                        class="input input-bordered input-sm join-item w-full"
                        value={(*current).clone()}
                    />
                    <button type="submit" class="btn btn-sm join-item">{"Save"}</button>
                </form>
                if *saved {
                    <p class="text-xs text-success mt-2">{"Saved"}</p>
                }
            </div>
        </details>
    }
}
