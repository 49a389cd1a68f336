use yew::prelude::*;

mod components;
pub mod api_client;
pub mod common;
pub mod hooks;
pub mod settings;

use components::layout::Layout;
use components::predictor::{EndpointSettings, PredictorPanel};

#[function_component(App)]
pub fn app() -> Html {
    log::trace!("Rendering predictor page");
    html! {
        <Layout title="SmartFin Stock Predictor AI">
            <div class="flex flex-col gap-6">
                <PredictorPanel />
                <EndpointSettings />
            </div>
        </Layout>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    // Initialize settings first
    settings::init_settings();

    // Initialize logger with settings
    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== SmartFin Frontend Application Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("Prediction endpoint: {}", settings.endpoint_url);
    log::debug!("Debug mode: {}", settings.debug_mode);

    log::trace!("Initializing Yew renderer");
    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}
